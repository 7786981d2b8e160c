use serde::{Deserialize, Serialize};

use crate::card::Colour;

/// Zero-based index of a player within the game, in turn order.
pub type PlayerId = usize;

/// Command a controller may issue on behalf of the current player.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Play the card at `hand_index` (zero-based). `colour` names the
    /// forced colour and is required for wild cards, ignored otherwise.
    Play {
        hand_index: usize,
        colour: Option<Colour>,
    },
    /// Draw one card instead of playing.
    Draw,
    /// Pass the turn on after having played or drawn.
    EndTurn,
}

impl Action {
    /// Returns the hand index if the action is a play.
    pub fn hand_index(&self) -> Option<usize> {
        match self {
            Action::Play { hand_index, .. } => Some(*hand_index),
            _ => None,
        }
    }
}
