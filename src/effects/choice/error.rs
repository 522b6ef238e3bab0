use thiserror::Error;

use crate::core::{EntityId, PlayerId};

/// Failures while configuring or resolving a card choice.
#[derive(Debug, Error)]
pub enum ChoiceError {
    #[error("conflicting choice modes: {}", .0.join(", "))]
    ConflictingModes(Vec<&'static str>),

    #[error("cannot evaluate amount '{expr}': {reason}")]
    Amount { expr: String, reason: String },

    #[error("invalid value '{value}' for {name}")]
    InvalidParam { name: &'static str, value: String },

    #[error("invalid choice parameters: {0}")]
    Config(#[from] serde_json::Error),

    #[error("unknown card {0}")]
    UnknownCard(EntityId),

    #[error("no agent for {0}")]
    MissingAgent(PlayerId),

    #[error("no player for {0}")]
    NoPlayer(&'static str),

    #[error("{player} gave an invalid answer: {reason}")]
    InvalidResponse { player: PlayerId, reason: String },
}
