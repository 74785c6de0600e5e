//! Operator interface between the game and whoever sits at the prompt.
//!
//! The game never reads input or prints output itself. It asks the
//! [`Operator`] for choices and hands it [`GameEvent`]s to show, so a console,
//! a script or a test can drive a match.

use super::dice::DiceSet;
use super::game::MatchResult;
use super::probability::ProbabilityTable;
use crate::protocol::{CommitMessage, DrawPurpose, MatchId, Party, Reveal};
use std::str::FromStr;
use thiserror::Error;

/// Operator's answer to a prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    /// A numeric selection
    Value(usize),
    /// Show the probability table, then ask again
    Help,
    /// End the match without a winner
    Exit,
}

/// Input that is neither a number nor a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized selection {0:?}; enter a number, ? for help or X to exit")]
pub struct ParseChoiceError(pub String);

impl FromStr for Choice {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        match input.to_ascii_lowercase().as_str() {
            "x" | "exit" => Ok(Choice::Exit),
            "?" | "help" => Ok(Choice::Help),
            other => other
                .parse::<usize>()
                .map(Choice::Value)
                .map_err(|_| ParseChoiceError(input.to_string())),
        }
    }
}

/// What the game is asking for
#[derive(Clone, Copy, Debug)]
pub enum Prompt<'a> {
    /// Contribution to a fair draw over `0..=commit.range_max`
    FairDraw {
        purpose: DrawPurpose,
        commit: &'a CommitMessage,
    },
    /// Pick one of `options`, indices into `dice`
    SelectDice {
        options: &'a [usize],
        dice: &'a [DiceSet],
    },
}

/// Something the operator should show
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    MatchStarted {
        match_id: MatchId,
        dice: Vec<DiceSet>,
    },
    /// Commitment published before the operator contributes
    Committed {
        purpose: DrawPurpose,
        commit: CommitMessage,
    },
    /// Secret revealed after the operator contributed
    Revealed {
        purpose: DrawPurpose,
        commit: CommitMessage,
        reveal: Reveal,
    },
    FirstMover(Party),
    DiceSelected {
        party: Party,
        index: usize,
        dice: DiceSet,
    },
    Rolled {
        party: Party,
        face: i64,
    },
    /// A selection was rejected; the prompt repeats
    InvalidChoice(String),
    Help(ProbabilityTable),
    Finished(MatchResult),
    Aborted,
}

/// Request/response channel to the human side of the match
pub trait Operator {
    /// Block until the operator answers `prompt`
    fn request_choice(&mut self, prompt: &Prompt<'_>) -> Choice;

    /// Show an event
    fn display(&mut self, event: &GameEvent);
}
