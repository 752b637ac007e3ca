//! Move and outcome definitions

use serde::{Deserialize, Serialize};
use crate::error::ArenaError;

/// One of the three cyclic choices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Map a u8 index (0–2) to the corresponding Move variant.
    pub fn from_index(index: u8) -> Option<Move> {
        match index {
            0 => Some(Move::Rock),
            1 => Some(Move::Paper),
            2 => Some(Move::Scissors),
            _ => None,
        }
    }

    /// Move for a residue modulo 3
    pub(crate) fn from_residue(residue: u64) -> Move {
        match residue % 3 {
            0 => Move::Rock,
            1 => Move::Paper,
            _ => Move::Scissors,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// The move this one defeats
    pub fn beats(self) -> Move {
        Move::from_residue(self.index() as u64 + 2)
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }
}

impl TryFrom<u8> for Move {
    type Error = ArenaError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Move::from_index(index).ok_or(ArenaError::InvalidMove)
    }
}

/// Result of a match for the acting player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl Outcome {
    pub fn from_index(index: u8) -> Option<Outcome> {
        match index {
            0 => Some(Outcome::Win),
            1 => Some(Outcome::Lose),
            2 => Some(Outcome::Tie),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Same match seen from the opponent's side
    pub fn inverse(self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }
}
