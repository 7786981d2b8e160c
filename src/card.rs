use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const MIN_RANK: u8 = 1;
pub const MAX_RANK: u8 = 9;
pub const COPIES_PER_CARD: usize = 2;
pub const WILD_COUNT: usize = 4;
pub const WILD_DRAW_TWO_COUNT: usize = 4;
pub const DECK_SIZE: usize = 104;
pub const HAND_SIZE: usize = 7;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Light-side colours. Wild faces have no colour at all.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Colour {
    pub const ALL: [Colour; 4] = [Colour::Red, Colour::Blue, Colour::Green, Colour::Yellow];

    fn dark(self) -> DarkColour {
        match self {
            Colour::Red => DarkColour::Pink,
            Colour::Blue => DarkColour::Teal,
            Colour::Green => DarkColour::Orange,
            Colour::Yellow => DarkColour::Purple,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Colour::Red => "RED",
            Colour::Blue => "BLUE",
            Colour::Green => "GREEN",
            Colour::Yellow => "YELLOW",
        };
        f.write_str(name)
    }
}

/// The face the engine plays with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Face {
    Number { colour: Colour, rank: u8 },
    Skip(Colour),
    DrawOne(Colour),
    Reverse(Colour),
    Flip(Colour),
    Wild,
    WildDrawTwo,
}

impl Face {
    #[inline]
    pub fn colour(&self) -> Option<Colour> {
        match *self {
            Face::Number { colour, .. }
            | Face::Skip(colour)
            | Face::DrawOne(colour)
            | Face::Reverse(colour)
            | Face::Flip(colour) => Some(colour),
            Face::Wild | Face::WildDrawTwo => None,
        }
    }

    #[inline]
    pub fn rank(&self) -> Option<u8> {
        match self {
            Face::Number { rank, .. } => Some(*rank),
            _ => None,
        }
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self, Face::Wild | Face::WildDrawTwo)
    }

    /// Two action faces share a kind regardless of colour. Numbers never do;
    /// they match on rank instead.
    pub fn same_action(&self, other: &Face) -> bool {
        match (self, other) {
            (Face::Skip(_), Face::Skip(_))
            | (Face::DrawOne(_), Face::DrawOne(_))
            | (Face::Reverse(_), Face::Reverse(_))
            | (Face::Flip(_), Face::Flip(_))
            | (Face::Wild, Face::Wild)
            | (Face::WildDrawTwo, Face::WildDrawTwo) => true,
            _ => false,
        }
    }

    /// Dark-side counterpart used when pairing backs with fronts.
    fn mirror(&self) -> BackFace {
        let colour = self.colour().map(Colour::dark);
        let kind = match *self {
            Face::Number { rank, .. } => BackKind::Number(rank),
            Face::Skip(_) => BackKind::SkipAll,
            Face::DrawOne(_) => BackKind::DrawFive,
            Face::Reverse(_) => BackKind::Reverse,
            Face::Flip(_) => BackKind::Flip,
            Face::Wild => BackKind::Wild,
            Face::WildDrawTwo => BackKind::WildDrawColour,
        };
        BackFace { colour, kind }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Number { colour, rank } => write!(f, "{colour} {rank}"),
            Face::Skip(colour) => write!(f, "{colour} SKIP"),
            Face::DrawOne(colour) => write!(f, "{colour} DRAW ONE"),
            Face::Reverse(colour) => write!(f, "{colour} REVERSE"),
            Face::Flip(colour) => write!(f, "{colour} FLIP"),
            Face::Wild => f.write_str("WILD"),
            Face::WildDrawTwo => f.write_str("WILD DRAW TWO"),
        }
    }
}

/// Dark-side colours.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DarkColour {
    Pink,
    Teal,
    Orange,
    Purple,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BackKind {
    Number(u8),
    SkipAll,
    DrawFive,
    Reverse,
    Flip,
    Wild,
    WildDrawColour,
}

/// Dark side of a card. Carried with every card; no rule reads it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BackFace {
    pub colour: Option<DarkColour>,
    pub kind: BackKind,
}

/// Stable identity of a physical card within one deck.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

/// A single physical card. Two cards with the same face are still distinct
/// when their ids differ.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub face: Face,
    pub back: BackFace,
}

impl Card {
    pub fn new(id: u16, face: Face) -> Self {
        Self {
            id: CardId(id),
            face,
            back: face.mirror(),
        }
    }

    #[inline]
    pub fn colour(&self) -> Option<Colour> {
        self.face.colour()
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.face.is_wild()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.face, f)
    }
}

/// Numbers ids sequentially from zero, in iteration order.
pub fn deck_from_faces<I>(faces: I) -> Vec<Card>
where
    I: IntoIterator<Item = Face>,
{
    faces
        .into_iter()
        .enumerate()
        .map(|(idx, face)| Card::new(idx as u16, face))
        .collect()
}

/// Builds the full 104-card deck in deterministic order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut faces = Vec::with_capacity(DECK_SIZE);
    for colour in Colour::ALL {
        for _ in 0..COPIES_PER_CARD {
            for rank in MIN_RANK..=MAX_RANK {
                faces.push(Face::Number { colour, rank });
            }
            faces.push(Face::Skip(colour));
            faces.push(Face::DrawOne(colour));
            faces.push(Face::Reverse(colour));
        }
    }
    faces.extend(std::iter::repeat(Face::Wild).take(WILD_COUNT));
    faces.extend(std::iter::repeat(Face::WildDrawTwo).take(WILD_DRAW_TWO_COUNT));
    deck_from_faces(faces)
}

/// Randomly re-pairs back faces with front faces.
pub fn shuffle_backs<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    let mut backs: Vec<BackFace> = cards.iter().map(|card| card.back).collect();
    backs.shuffle(rng);
    for (card, back) in cards.iter_mut().zip(backs) {
        card.back = back;
    }
}
