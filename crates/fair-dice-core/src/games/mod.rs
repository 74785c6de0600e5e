//! Dice game definitions and logic.

mod dice;
mod game;
mod mock;
mod operator;
mod probability;

pub use dice::{parse_dice_list, DiceError, DiceSet, MAX_DICE, MAX_FACES, MIN_DICE, MIN_FACES};
pub use game::{DiceGame, GameError, MatchResult, Outcome, Phase};
pub use mock::ScriptedOperator;
pub use operator::{Choice, GameEvent, Operator, ParseChoiceError, Prompt};
pub use probability::{win_count, win_probability, ProbabilityTable};
