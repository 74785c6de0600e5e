//! Fair Dice Core Library
//!
//! This crate provides the commit-reveal draw protocol, the unbiased
//! sampler it is built on, and the non-transitive dice game that uses it.
//! All I/O goes through the [`games::Operator`] trait.

pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;

pub use crypto::{Commitment, EntropySource, OsEntropy, ScriptedEntropy, SecureKey, SecureRandom};
pub use error::{FairnessError, RevealError};
pub use games::{
    parse_dice_list, win_probability, Choice, DiceGame, DiceSet, GameError, GameEvent,
    MatchResult, Operator, Outcome, ProbabilityTable, Prompt,
};
pub use protocol::{CommitMessage, DrawPurpose, FairRandomSession, MatchId, Party, Reveal, Winner};
