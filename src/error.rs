use thiserror::Error;

/// Errors raised while reading input from outside the core (square strings,
/// placement strings, coordinate moves). Gameplay itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),

    #[error("invalid move notation: {0:?}")]
    InvalidMove(String),
}
