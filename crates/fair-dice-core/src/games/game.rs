//! Dice game orchestration.
//!
//! A match runs through these phases in order:
//!
//! 1. `SelectingFirstMover`: fair draw over 0..=1, result 0 lets the user
//!    pick first
//! 2. `SelectingOwnDice`: the first party picks a dice
//! 3. `SelectingOpponentDice`: the other party picks from what is left
//! 4. `RollingComputer`, `RollingUser`: one fair draw per dice, the result
//!    indexes its faces
//! 5. `Finished`: higher face wins
//!
//! An exit request at any prompt moves straight to `Aborted`.

use super::dice::{DiceSet, MAX_DICE, MIN_DICE};
use super::operator::{Choice, GameEvent, Operator, Prompt};
use super::probability::ProbabilityTable;
use crate::crypto::{EntropySource, OsEntropy, SecureRandom};
use crate::error::FairnessError;
use crate::protocol::{DrawPurpose, FairRandomSession, MatchId, Party, Winner};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that end a match abnormally
#[derive(Debug, Error)]
pub enum GameError {
    #[error("A match needs between 3 and 256 dice, got {0}")]
    DiceCount(usize),

    #[error("Match already played")]
    MatchOver,

    #[error("Fair draw protocol violated: {0}")]
    Protocol(#[from] FairnessError),
}

/// Match phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    SelectingFirstMover,
    SelectingOwnDice,
    SelectingOpponentDice,
    RollingComputer,
    RollingUser,
    Finished,
    Aborted,
}

/// Final state of a completed match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: MatchId,
    pub first_mover: Party,
    pub user_dice: usize,
    pub computer_dice: usize,
    pub user_roll: i64,
    pub computer_roll: i64,
    pub winner: Winner,
}

/// How a match ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Finished(MatchResult),
    /// The operator asked to exit; no winner
    Aborted,
}

/// One match between the user and the computer
pub struct DiceGame<O: Operator, E: EntropySource = OsEntropy> {
    match_id: MatchId,
    dice: Vec<DiceSet>,
    rng: SecureRandom<E>,
    operator: O,
    phase: Phase,
}

impl<O: Operator> DiceGame<O, OsEntropy> {
    /// Create a match drawing from the operating system CSPRNG
    pub fn new(dice: Vec<DiceSet>, operator: O) -> Result<Self, GameError> {
        Self::with_rng(dice, operator, SecureRandom::new())
    }
}

impl<O: Operator, E: EntropySource> DiceGame<O, E> {
    /// Create a match over a custom random source
    pub fn with_rng(
        dice: Vec<DiceSet>,
        operator: O,
        rng: SecureRandom<E>,
    ) -> Result<Self, GameError> {
        if !(MIN_DICE..=MAX_DICE).contains(&dice.len()) {
            return Err(GameError::DiceCount(dice.len()));
        }

        Ok(Self {
            match_id: MatchId::new(),
            dice,
            rng,
            operator,
            phase: Phase::SelectingFirstMover,
        })
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dice(&self) -> &[DiceSet] {
        &self.dice
    }

    pub fn operator(&self) -> &O {
        &self.operator
    }

    pub fn into_operator(self) -> O {
        self.operator
    }

    /// Run the match to completion or until the operator exits.
    pub fn play(&mut self) -> Result<Outcome, GameError> {
        if self.phase != Phase::SelectingFirstMover {
            return Err(GameError::MatchOver);
        }

        info!(match_id = %self.match_id, dice = self.dice.len(), "match started");
        self.operator.display(&GameEvent::MatchStarted {
            match_id: self.match_id,
            dice: self.dice.clone(),
        });

        let Some(first_draw) = self.fair_draw(DrawPurpose::FirstMove, 1)? else {
            return Ok(self.abort());
        };
        let first_mover = if first_draw == 0 {
            Party::User
        } else {
            Party::Computer
        };
        debug!(match_id = %self.match_id, %first_mover, "first mover decided");
        self.operator.display(&GameEvent::FirstMover(first_mover));

        self.advance(Phase::SelectingOwnDice);
        let Some(first_pick) = self.select_dice(first_mover, None)? else {
            return Ok(self.abort());
        };

        self.advance(Phase::SelectingOpponentDice);
        let Some(second_pick) = self.select_dice(first_mover.opponent(), Some(first_pick))? else {
            return Ok(self.abort());
        };

        let (user_dice, computer_dice) = match first_mover {
            Party::User => (first_pick, second_pick),
            Party::Computer => (second_pick, first_pick),
        };

        self.advance(Phase::RollingComputer);
        let Some(computer_roll) = self.roll(Party::Computer, computer_dice)? else {
            return Ok(self.abort());
        };

        self.advance(Phase::RollingUser);
        let Some(user_roll) = self.roll(Party::User, user_dice)? else {
            return Ok(self.abort());
        };

        self.advance(Phase::Finished);
        let result = MatchResult {
            match_id: self.match_id,
            first_mover,
            user_dice,
            computer_dice,
            user_roll,
            computer_roll,
            winner: Winner::from_rolls(user_roll, computer_roll),
        };
        info!(
            match_id = %self.match_id,
            user_roll,
            computer_roll,
            winner = %result.winner,
            "match finished"
        );
        self.operator.display(&GameEvent::Finished(result.clone()));
        Ok(Outcome::Finished(result))
    }

    fn advance(&mut self, next: Phase) {
        debug!(match_id = %self.match_id, from = ?self.phase, to = ?next, "phase transition");
        self.phase = next;
    }

    fn abort(&mut self) -> Outcome {
        info!(match_id = %self.match_id, phase = ?self.phase, "match aborted by operator");
        self.phase = Phase::Aborted;
        self.operator.display(&GameEvent::Aborted);
        Outcome::Aborted
    }

    fn show_help(&mut self) {
        debug!(match_id = %self.match_id, "help requested");
        let table = ProbabilityTable::compute(&self.dice);
        self.operator.display(&GameEvent::Help(table));
    }

    /// Commit, collect the operator's contribution, reveal.
    ///
    /// Returns `None` if the operator exits at the prompt.
    fn fair_draw(
        &mut self,
        purpose: DrawPurpose,
        range_max: usize,
    ) -> Result<Option<u8>, GameError> {
        let mut session = FairRandomSession::open(&mut self.rng, range_max)?;
        let commit = session.commit_message();
        self.operator.display(&GameEvent::Committed {
            purpose,
            commit: commit.clone(),
        });

        loop {
            let choice = self.operator.request_choice(&Prompt::FairDraw {
                purpose,
                commit: &commit,
            });
            match choice {
                Choice::Exit => return Ok(None),
                Choice::Help => self.show_help(),
                Choice::Value(value) => match session.resolve(value) {
                    Ok(reveal) => {
                        let result = reveal.result;
                        self.operator.display(&GameEvent::Revealed {
                            purpose,
                            commit,
                            reveal,
                        });
                        return Ok(Some(result));
                    }
                    Err(err @ FairnessError::ValueOutOfRange { .. }) => {
                        self.operator
                            .display(&GameEvent::InvalidChoice(err.to_string()));
                    }
                    Err(err) => return Err(err.into()),
                },
            }
        }
    }

    /// Pick a dice for `party` among those not yet `taken`.
    ///
    /// The computer picks on its own with the unbiased sampler; there is
    /// nothing to contest, so no commitment is made.
    fn select_dice(
        &mut self,
        party: Party,
        taken: Option<usize>,
    ) -> Result<Option<usize>, GameError> {
        let options: Vec<usize> = (0..self.dice.len())
            .filter(|&i| Some(i) != taken)
            .collect();

        let index = match party {
            Party::Computer => {
                let pick = self.rng.generate_unbiased_int(options.len() - 1)?;
                options[pick as usize]
            }
            Party::User => loop {
                let choice = self.operator.request_choice(&Prompt::SelectDice {
                    options: &options,
                    dice: &self.dice,
                });
                match choice {
                    Choice::Exit => return Ok(None),
                    Choice::Help => self.show_help(),
                    Choice::Value(value) if options.contains(&value) => break value,
                    Choice::Value(value) => {
                        self.operator.display(&GameEvent::InvalidChoice(format!(
                            "Dice {} is not available",
                            value
                        )));
                    }
                }
            },
        };

        debug!(match_id = %self.match_id, %party, index, "dice selected");
        self.operator.display(&GameEvent::DiceSelected {
            party,
            index,
            dice: self.dice[index].clone(),
        });
        Ok(Some(index))
    }

    /// Fair draw over the faces of `party`'s dice
    fn roll(&mut self, party: Party, dice_index: usize) -> Result<Option<i64>, GameError> {
        let purpose = match party {
            Party::User => DrawPurpose::UserRoll,
            Party::Computer => DrawPurpose::ComputerRoll,
        };
        let range_max = self.dice[dice_index].max_index();

        let Some(face_index) = self.fair_draw(purpose, range_max)? else {
            return Ok(None);
        };
        let face = self.dice[dice_index].faces()[face_index as usize];
        self.operator.display(&GameEvent::Rolled { party, face });
        Ok(Some(face))
    }
}
