use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Terrain {
    Forest,
    Hills,
    Pasture,
    Fields,
    Mountains,
    Desert,
}

impl Terrain {
    pub const ALL: [Terrain; 6] = [
        Terrain::Forest,
        Terrain::Hills,
        Terrain::Pasture,
        Terrain::Fields,
        Terrain::Mountains,
        Terrain::Desert,
    ];

    /// Single-character code used by the save string and the board display.
    pub fn code(self) -> char {
        match self {
            Terrain::Forest => 'f',
            Terrain::Hills => 'h',
            Terrain::Pasture => 'p',
            Terrain::Fields => 'w',
            Terrain::Mountains => 'm',
            Terrain::Desert => 'd',
        }
    }

    pub fn from_code(code: char) -> Option<Terrain> {
        Terrain::ALL
            .into_iter()
            .find(|terrain| terrain.code() == code)
    }

    pub fn is_desert(self) -> bool {
        self == Terrain::Desert
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Red,
    Blue,
    Orange,
    Green,
}

impl Color {
    /// Seat order: player 0 is Red, player 3 is Green.
    pub const ORDERED: [Color; 4] = [Color::Red, Color::Blue, Color::Orange, Color::Green];
}

/// First or second pass of the snake draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftRound {
    First,
    Second,
}

impl DraftRound {
    pub fn ordinal(self) -> &'static str {
        match self {
            DraftRound::First => "1st",
            DraftRound::Second => "2nd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementKind {
    Settlement,
    Road,
}
