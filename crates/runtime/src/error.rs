//! Errors surfaced by a game session.
use delve_core::{ErrorSeverity, GameError, MapError, TurnError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("the map has no player character")]
    NoPlayer,

    #[error("the player character cannot be despawned")]
    PlayerDespawn,

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}

impl RuntimeError {
    /// Severity used when deciding whether a session can continue.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoPlayer => ErrorSeverity::Fatal,
            Self::PlayerDespawn => ErrorSeverity::Validation,
            Self::Turn(error) => error.severity(),
            Self::Map(error) => error.severity(),
            Self::Content(_) => ErrorSeverity::Recoverable,
        }
    }
}
