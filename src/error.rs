use thiserror::Error;

use crate::action::PlayerId;
use crate::card::Face;

/// Errors that can occur when manipulating the game state.
///
/// Every command that returns one of these has left the game untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid player list: {0}")]
    InvalidPlayers(&'static str),
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("game has not been initialized")]
    NotInitialized,
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("current player already played or drew this turn")]
    ActionAlreadyTaken,
    #[error("current player must play or draw before ending the turn")]
    ActionRequired,
    #[error("round is already over")]
    RoundOver,
    #[error("round is still in progress")]
    RoundInProgress,
    #[error("game is already over")]
    GameOver,
    #[error("no cards left to draw")]
    SupplyExhausted,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of rejected moves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("a colour must be chosen when playing a wild card")]
    MissingColour,
    #[error("{card} cannot be played on {top}")]
    IllegalCard { card: Face, top: Face },
}
