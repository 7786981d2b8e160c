//! Rules engine for a multi-round shedding card game with wild cards,
//! direction reversal and a carried (but inert) flip side.

pub mod action;
pub mod card;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod player;
pub mod score;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, PlayerId};
pub use crate::card::{BackFace, Card, CardId, Colour, Face};
pub use crate::deck::Deck;
pub use crate::error::{GameError, InvalidAction};
pub use crate::event::{EventKind, GameEvent, SubscriptionId};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::player::Player;
pub use crate::state::{Direction, GameSettings, GameStateView, PlayerSummary, TurnPhase};
pub use crate::visualize::{VisualOptions, describe_action, describe_hand, render_state};
