use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::{GameError, InvalidAction};

/// A seat at the table: identity, running match score and current hand.
///
/// Outside the crate the hand is read-only; only the engine deals, draws
/// and plays cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    score: u32,
    hand: Vec<Card>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Result<Self, GameError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GameError::InvalidPlayers("player name cannot be empty"));
        }
        Ok(Self {
            name,
            score: 0,
            hand: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    pub(crate) fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Removes the card at a zero-based index.
    pub(crate) fn remove_card(&mut self, index: usize) -> Result<Card, GameError> {
        if index >= self.hand.len() {
            return Err(InvalidAction::HandIndex(index).into());
        }
        Ok(self.hand.remove(index))
    }

    pub(crate) fn increase_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    pub(crate) fn take_hand(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }
}
