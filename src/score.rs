//! Round scoring.
//!
//! The player who empties their hand scores the face value of every card
//! still held by the other players:
//!   number = rank, skip / reverse = 20, draw one = 10,
//!   wild = 40, wild draw two = 50.

use crate::action::PlayerId;
use crate::card::{Card, Face};
use crate::player::Player;

pub const SKIP_POINTS: u32 = 20;
pub const REVERSE_POINTS: u32 = 20;
pub const DRAW_ONE_POINTS: u32 = 10;
pub const WILD_POINTS: u32 = 40;
pub const WILD_DRAW_TWO_POINTS: u32 = 50;
pub const MATCH_TARGET: u32 = 500;

pub fn point_value(card: &Card) -> u32 {
    match card.face {
        Face::Number { rank, .. } => u32::from(rank),
        Face::Skip(_) => SKIP_POINTS,
        Face::Reverse(_) => REVERSE_POINTS,
        Face::DrawOne(_) => DRAW_ONE_POINTS,
        Face::Wild => WILD_POINTS,
        Face::WildDrawTwo => WILD_DRAW_TWO_POINTS,
        // Never dealt from the light-side deck.
        Face::Flip(_) => 0,
    }
}

pub fn hand_points(hand: &[Card]) -> u32 {
    hand.iter().map(point_value).sum()
}

/// Points awarded to `winner`: everything left in the other hands.
pub fn round_points(players: &[Player], winner: PlayerId) -> u32 {
    players
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != winner)
        .map(|(_, player)| hand_points(player.hand()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Colour, deck_from_faces};
    use crate::error::GameError;

    fn player_with(name: &str, faces: &[Face]) -> Result<Player, GameError> {
        let mut player = Player::new(name)?;
        for card in deck_from_faces(faces.iter().copied()) {
            player.add_card(card);
        }
        Ok(player)
    }

    #[test]
    fn point_table() {
        let cards = deck_from_faces([
            Face::Number { colour: Colour::Red, rank: 0 },
            Face::Number { colour: Colour::Red, rank: 9 },
            Face::Skip(Colour::Blue),
            Face::Reverse(Colour::Blue),
            Face::DrawOne(Colour::Blue),
            Face::Wild,
            Face::WildDrawTwo,
        ]);
        let values: Vec<u32> = cards.iter().map(point_value).collect();
        assert_eq!(values, vec![0, 9, 20, 20, 10, 40, 50]);
        assert_eq!(hand_points(&cards), 149);
    }

    #[test]
    fn winner_collects_opponent_hands_only() -> Result<(), GameError> {
        // Player 1 wins; opponents hold 40 + 3 and 20 => 63.
        let players = vec![
            player_with("A", &[Face::Wild, Face::Number { colour: Colour::Red, rank: 3 }])?,
            player_with("B", &[Face::WildDrawTwo])?,
            player_with("C", &[Face::Skip(Colour::Green)])?,
        ];
        assert_eq!(round_points(&players, 1), 63);
        Ok(())
    }

    #[test]
    fn empty_opponents_score_nothing() -> Result<(), GameError> {
        let players = vec![player_with("A", &[])?, player_with("B", &[])?];
        assert_eq!(round_points(&players, 0), 0);
        Ok(())
    }
}
