use std::collections::VecDeque;

use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::card::Card;
use crate::error::GameError;

/// Draw sequence plus discard stack.
///
/// Draws come off the front of `draw_pile`; the top of the discard stack is
/// the last element of `discard_pile`.
#[derive(Clone)]
pub struct Deck {
    draw_pile: VecDeque<Card>,
    discard_pile: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// Takes `cards` as the draw sequence in the given order.
    pub fn new(cards: Vec<Card>, rng: StdRng) -> Self {
        Self {
            draw_pile: cards.into(),
            discard_pile: Vec::new(),
            rng,
        }
    }

    pub fn draw_count(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_count(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards that could still be drawn, counting the discard stack minus
    /// its top.
    pub fn available(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len().saturating_sub(1)
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        if self.draw_pile.is_empty() {
            self.reshuffle_discards();
        }
        self.draw_pile.pop_front().ok_or(GameError::SupplyExhausted)
    }

    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    pub fn top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    pub fn shuffle(&mut self) {
        self.draw_pile.make_contiguous().shuffle(&mut self.rng);
    }

    /// Moves every discard except the top back under the draw sequence and
    /// shuffles it.
    fn reshuffle_discards(&mut self) {
        let Some(top) = self.discard_pile.pop() else {
            return;
        };
        let recycled = self.discard_pile.len();
        self.draw_pile.extend(self.discard_pile.drain(..));
        self.discard_pile.push(top);
        self.shuffle();
        trace!("reshuffled {recycled} discards into the draw pile");
    }

    /// Returns `cards` and the whole discard stack to the draw sequence and
    /// shuffles it, leaving the discard stack empty.
    pub fn reclaim<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.draw_pile.extend(cards);
        self.draw_pile.extend(self.discard_pile.drain(..));
        self.shuffle();
    }

    pub fn draw_pile(&self) -> impl Iterator<Item = &Card> {
        self.draw_pile.iter()
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }
}
