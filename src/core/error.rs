use thiserror::Error;

use crate::core::types::AgentId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Agent not found: {0}")]
    AgentNotFound(AgentId),

    #[error("Agent {0} cannot act on itself")]
    SameAgent(AgentId),

    #[error("Unknown personality archetype: {0}")]
    UnknownArchetype(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
