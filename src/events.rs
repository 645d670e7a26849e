//! Events and history logging

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, Turn, WarId};
use crate::diplomacy::TreatyKind;
use crate::justification::CasusBelliKind;
use crate::war::{PeaceKind, WarStatus};

/// A historical event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub turn: Turn,
    pub event_type: EventType,
    pub participants: Vec<AgentId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventType {
    // Wars
    WarDeclared { attacker: AgentId, defender: AgentId, war: WarId, casus_belli: CasusBelliKind },
    PeaceSigned { war: WarId, status: WarStatus, kind: PeaceKind },

    // Negotiation
    PeaceOffered { war: WarId, from: AgentId, to: AgentId, kind: PeaceKind },
    PeaceRejected { war: WarId, by: AgentId, countered: bool },
    PeaceOfferExpired { war: WarId, from: AgentId, to: AgentId },

    // Diplomacy
    TreatySigned { kind: TreatyKind, parties: (AgentId, AgentId) },
    TreatyBroken { breaker: AgentId, victim: AgentId },
    SanctionsImposed { by: AgentId, target: AgentId },
    AidSent { from: AgentId, to: AgentId, amount: i32 },
}

/// The complete history log
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    pub events: Vec<Event>,
    next_event_id: u32,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(
        &mut self,
        event_type: EventType,
        turn: Turn,
        participants: Vec<AgentId>,
    ) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;

        self.events.push(Event {
            id,
            turn,
            event_type,
            participants,
        });

        id
    }

    pub fn events_for_turn(&self, turn: Turn) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.turn == turn)
    }

    pub fn events_for_agent(&self, agent: AgentId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.participants.contains(&agent))
    }

    pub fn wars_declared(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.event_type, EventType::WarDeclared { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ids_sequential() {
        let mut log = HistoryLog::new();
        let a = log.add_event(
            EventType::TreatyBroken { breaker: AgentId(1), victim: AgentId(2) },
            3,
            vec![AgentId(1), AgentId(2)],
        );
        let b = log.add_event(
            EventType::SanctionsImposed { by: AgentId(2), target: AgentId(1) },
            4,
            vec![AgentId(2), AgentId(1)],
        );
        assert_eq!((a, b), (0, 1));
        assert_eq!(log.events_for_turn(4).count(), 1);
        assert_eq!(log.events_for_agent(AgentId(1)).count(), 2);
        assert_eq!(log.events_for_agent(AgentId(3)).count(), 0);
    }
}
