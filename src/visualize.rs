use std::fmt::Write;

use crate::action::Action;
use crate::card::Card;
use crate::player::Player;
use crate::state::{Direction, GameStateView, TurnPhase};

/// Customize state rendering for text front ends.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_scores: bool,
    pub show_pile_sizes: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_scores: true,
            show_pile_sizes: true,
        }
    }
}

/// Numbered listing of a hand, one card per line, starting at 0 to match
/// the index `play_card` expects.
pub fn describe_hand(player: &Player) -> String {
    if player.hand().is_empty() {
        return format!("{}'s hand is empty", player.name());
    }
    let mut out = format!("{}'s cards:\n", player.name());
    for (idx, card) in player.hand().iter().enumerate() {
        let _ = writeln!(out, "{idx}: {card}");
    }
    out
}

pub fn describe_action(state: &GameStateView, action: &Action) -> String {
    match action {
        Action::Play { hand_index, colour } => {
            let card = state
                .hand
                .get(*hand_index)
                .map(Card::to_string)
                .unwrap_or_else(|| format!("card #{hand_index}"));
            match colour {
                Some(colour) if card_is_wild(state, *hand_index) => {
                    format!("Play {card} calling {colour}")
                }
                _ => format!("Play {card}"),
            }
        }
        Action::Draw => String::from("Draw a card"),
        Action::EndTurn => String::from("End turn"),
    }
}

fn card_is_wild(state: &GameStateView, hand_index: usize) -> bool {
    state.hand.get(hand_index).is_some_and(Card::is_wild)
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let phase = match state.phase {
        TurnPhase::Setup => String::from("Waiting for players"),
        TurnPhase::AwaitingAction => String::from("Play or draw"),
        TurnPhase::ActionTaken => String::from("End turn"),
        TurnPhase::RoundOver => match state.round_winner {
            Some(winner) => format!(
                "Round over (won by {}, {} points)",
                player_name(state, winner),
                state.last_round_points
            ),
            None => String::from("Round over"),
        },
        TurnPhase::MatchOver => match state.match_winner {
            Some(winner) => format!("Match over (winner: {})", player_name(state, winner)),
            None => String::from("Match over"),
        },
    };
    let _ = writeln!(out, "Phase: {phase}");
    let top = state
        .top_card
        .map(|card| card.to_string())
        .unwrap_or_else(|| String::from("--"));
    match state.forced_colour {
        Some(colour) => {
            let _ = writeln!(out, "Top card: {top} (colour called: {colour})");
        }
        None => {
            let _ = writeln!(out, "Top card: {top}");
        }
    }
    let direction = match state.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let _ = writeln!(out, "Direction: {direction}");
    if options.show_pile_sizes {
        let _ = writeln!(
            out,
            "Draw pile: {}  |  Discard pile: {}",
            state.draw_pile_count, state.discard_pile_count
        );
    }
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let label_you = if player.id == state.self_player {
            " (You)"
        } else {
            ""
        };
        let current_tag = if player.is_current { " <- current" } else { "" };
        if options.show_scores {
            let _ = writeln!(
                out,
                "  {}{} - {} cards, {} points{}",
                player.name, label_you, player.hand_size, player.score, current_tag
            );
        } else {
            let _ = writeln!(
                out,
                "  {}{} - {} cards{}",
                player.name, label_you, player.hand_size, current_tag
            );
        }
    }
    if state.hand.is_empty() {
        let _ = writeln!(out, "Hand: (empty)");
    } else {
        let entries = state
            .hand
            .iter()
            .enumerate()
            .map(|(idx, card)| format!("[{idx}] {card}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "Hand: {entries}");
    }
    out
}

fn player_name(state: &GameStateView, id: usize) -> &str {
    state
        .players
        .get(id)
        .map(|player| player.name.as_str())
        .unwrap_or("?")
}
