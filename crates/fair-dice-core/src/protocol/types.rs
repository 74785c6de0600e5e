//! Protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique match identifier, used to correlate logs and transcripts
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Create a new random match ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for MatchId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Participant in a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    User,
    Computer,
}

impl Party {
    /// Get the opponent
    pub fn opponent(&self) -> Party {
        match self {
            Party::User => Party::Computer,
            Party::Computer => Party::User,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::User => write!(f, "user"),
            Party::Computer => write!(f, "computer"),
        }
    }
}

/// What a fair draw decides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawPurpose {
    /// Which party picks dice first
    FirstMove,
    /// Roll of the computer's dice
    ComputerRoll,
    /// Roll of the user's dice
    UserRoll,
}

impl DrawPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawPurpose::FirstMove => "first move",
            DrawPurpose::ComputerRoll => "computer roll",
            DrawPurpose::UserRoll => "user roll",
        }
    }
}

impl fmt::Display for DrawPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Match result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    User,
    Computer,
    Tie,
}

impl Winner {
    /// Decide from the two rolled faces; strictly higher wins
    pub fn from_rolls(user_roll: i64, computer_roll: i64) -> Self {
        match user_roll.cmp(&computer_roll) {
            std::cmp::Ordering::Greater => Winner::User,
            std::cmp::Ordering::Less => Winner::Computer,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::User => "You win",
            Winner::Computer => "Computer wins",
            Winner::Tie => "Tie",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
