//! Error types for the rules engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors raised while building a game from configuration.
#[derive(Debug, Error)]
pub enum GameError {
    /// The RON configuration could not be parsed.
    #[error("Failed to parse game config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// The configuration parsed but describes an impossible game.
    #[error("Invalid game config: {0}")]
    InvalidConfig(String),
}

/// Broad classification of a rejected action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The entity already used the action this turn, or the base is already held.
    Precondition,
    /// The requested cell or entity is outside the legal set.
    IllegalTarget,
    /// No entity is selected.
    NothingSelected,
}

/// A rejected player action.
///
/// Every variant is recoverable: the engine validates before it mutates,
/// so a returned error means the game state is exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionError {
    /// No unit or base is selected.
    #[error("Nothing is selected")]
    NothingSelected,

    /// The selected unit has already moved this turn.
    #[error("Unit has already moved this turn")]
    AlreadyMoved,

    /// The destination is not a legal move for the selected unit.
    #[error("Destination is not a legal move")]
    IllegalDestination,

    /// The selected unit has already fired this turn.
    #[error("Unit has already fired this turn")]
    AlreadyFired,

    /// The target cell is not a legal attack for the selected unit.
    #[error("Target is not a legal attack")]
    IllegalTarget,

    /// There is no base under the selected entity.
    #[error("There is no base here")]
    NoBaseHere,

    /// The base is already owned by the active player.
    #[error("Base is already owned by the active player")]
    AlreadyOwned,

    /// The selection is not a base owned by the active player.
    #[error("Selection is not a base owned by the active player")]
    NotABase,

    /// The base has already produced a unit this turn.
    #[error("Base has already built this turn")]
    AlreadyBuilt,
}

impl ActionError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::NothingSelected => ErrorKind::NothingSelected,
            Self::AlreadyMoved | Self::AlreadyFired | Self::AlreadyOwned | Self::AlreadyBuilt => {
                ErrorKind::Precondition
            }
            Self::IllegalDestination | Self::IllegalTarget | Self::NoBaseHere | Self::NotABase => {
                ErrorKind::IllegalTarget
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_kinds() {
        assert_eq!(ActionError::AlreadyMoved.kind(), ErrorKind::Precondition);
        assert_eq!(ActionError::AlreadyFired.kind(), ErrorKind::Precondition);
        assert_eq!(ActionError::AlreadyOwned.kind(), ErrorKind::Precondition);
        assert_eq!(ActionError::AlreadyBuilt.kind(), ErrorKind::Precondition);
        assert_eq!(ActionError::IllegalDestination.kind(), ErrorKind::IllegalTarget);
        assert_eq!(ActionError::IllegalTarget.kind(), ErrorKind::IllegalTarget);
        assert_eq!(ActionError::NoBaseHere.kind(), ErrorKind::IllegalTarget);
        assert_eq!(ActionError::NotABase.kind(), ErrorKind::IllegalTarget);
        assert_eq!(
            ActionError::NothingSelected.kind(),
            ErrorKind::NothingSelected
        );
    }

    #[test]
    fn test_action_error_display() {
        assert_eq!(
            ActionError::AlreadyMoved.to_string(),
            "Unit has already moved this turn"
        );
        assert_eq!(
            ActionError::AlreadyBuilt.to_string(),
            "Base has already built this turn"
        );
    }

    #[test]
    fn test_invalid_config_display() {
        let err = GameError::InvalidConfig("move radius must be positive".into());
        assert_eq!(
            err.to_string(),
            "Invalid game config: move radius must be positive"
        );
    }
}
