use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Colour};

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub hand_size: usize,
    pub match_target: u32,
    pub deck_size: usize,
}

/// Where the engine is in the turn cycle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    /// No players yet; only `initialize_game` is accepted.
    Setup,
    /// Current player may play or draw.
    AwaitingAction,
    /// Current player has played or drawn; only an advance is accepted.
    ActionTaken,
    RoundOver,
    MatchOver,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// +1 for clockwise, -1 for counter-clockwise.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Seat reached from `from` after `steps` seats in this direction.
    pub fn step(self, from: PlayerId, steps: usize, num_players: usize) -> PlayerId {
        let steps = steps % num_players;
        match self {
            Direction::Clockwise => (from + steps) % num_players,
            Direction::CounterClockwise => (from + num_players - steps) % num_players,
        }
    }
}

/// Public portion of a player's state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub hand_size: usize,
    pub is_current: bool,
}

/// Snapshot of the table as seen by `self_player`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub phase: TurnPhase,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub top_card: Option<Card>,
    pub forced_colour: Option<Colour>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub players: Vec<PlayerSummary>,
    pub hand: Vec<Card>,
    pub round_winner: Option<PlayerId>,
    pub match_winner: Option<PlayerId>,
    pub last_round_points: u32,
}
