//! Line-based console operator.

use crate::table;
use crate::transcript::{TranscriptEntry, TranscriptWriter};
use fair_dice_core::{
    Choice, DrawPurpose, GameEvent, MatchId, MatchResult, Operator, Party, Prompt, Winner,
};
use std::fmt;
use std::io::{BufRead, Write};
use tracing::warn;

/// Operator reading choices from `input` and printing to `output`
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
    transcript: Option<TranscriptWriter>,
    match_id: Option<MatchId>,
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            transcript: None,
            match_id: None,
        }
    }

    /// Record every commitment and reveal to `transcript`
    pub fn with_transcript(mut self, transcript: TranscriptWriter) -> Self {
        self.transcript = Some(transcript);
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = self.output.write_fmt(args).and_then(|_| self.output.flush()) {
            warn!(%err, "failed to write to console");
        }
    }

    fn record(&mut self, entry: impl FnOnce(MatchId) -> TranscriptEntry) {
        let (Some(writer), Some(match_id)) = (self.transcript.as_mut(), self.match_id) else {
            return;
        };
        if let Err(err) = writer.append(&entry(match_id)) {
            warn!(%err, "failed to append to transcript");
        }
    }

    fn render_prompt(&mut self, prompt: &Prompt<'_>) {
        match prompt {
            Prompt::FairDraw { commit, .. } => {
                self.say(format_args!("Add your number modulo {}.\n", commit.range_max as u16 + 1));
                for value in 0..=commit.range_max {
                    self.say(format_args!("{} - {}\n", value, value));
                }
            }
            Prompt::SelectDice { options, dice } => {
                self.say(format_args!("Choose your dice:\n"));
                for &index in options.iter() {
                    self.say(format_args!("{} - {}\n", index, dice[index]));
                }
            }
        }
        self.say(format_args!("X - exit\n? - help\nYour selection: "));
    }

    fn show_result(&mut self, result: &MatchResult) {
        let (user, computer) = (result.user_roll, result.computer_roll);
        match result.winner {
            Winner::User => self.say(format_args!("You win ({} > {})!\n", user, computer)),
            Winner::Computer => self.say(format_args!("I win ({} > {})!\n", computer, user)),
            Winner::Tie => self.say(format_args!("It's a tie ({} = {}).\n", user, computer)),
        }
    }
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn request_choice(&mut self, prompt: &Prompt<'_>) -> Choice {
        loop {
            self.render_prompt(prompt);

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    self.say(format_args!("\n"));
                    return Choice::Exit;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "failed to read input");
                    return Choice::Exit;
                }
            }

            match line.parse::<Choice>() {
                Ok(choice) => return choice,
                Err(err) => self.say(format_args!("{}\n", err)),
            }
        }
    }

    fn display(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MatchStarted { match_id, dice } => {
                self.match_id = Some(*match_id);
                self.say(format_args!("Match {} with {} dice.\n", match_id, dice.len()));
                self.say(format_args!("Let's determine who makes the first move.\n"));
            }
            GameEvent::Committed { purpose, commit } => {
                match purpose {
                    DrawPurpose::FirstMove => {}
                    DrawPurpose::ComputerRoll => self.say(format_args!("It's time for my roll.\n")),
                    DrawPurpose::UserRoll => self.say(format_args!("It's time for your roll.\n")),
                }
                self.say(format_args!(
                    "I selected a random value in the range 0..{} (HMAC={}).\n",
                    commit.range_max, commit.commitment
                ));
                let (purpose, commitment, range_max) = (*purpose, commit.commitment, commit.range_max);
                self.record(|match_id| TranscriptEntry::Commit {
                    match_id,
                    purpose,
                    commitment,
                    range_max,
                });
            }
            GameEvent::Revealed {
                purpose,
                commit,
                reveal,
            } => {
                self.say(format_args!(
                    "My number is {} (KEY={}).\n",
                    reveal.committed_value, reveal.key
                ));
                if *purpose != DrawPurpose::FirstMove {
                    self.say(format_args!(
                        "The fair number generation result is {} + {} = {} (mod {}).\n",
                        reveal.committed_value,
                        reveal.user_value,
                        reveal.result,
                        reveal.range_max as u16 + 1
                    ));
                }
                let (purpose, commitment, reveal) = (*purpose, commit.commitment, reveal.clone());
                self.record(|match_id| TranscriptEntry::Reveal {
                    match_id,
                    purpose,
                    commitment,
                    reveal,
                });
            }
            GameEvent::FirstMover(Party::User) => {
                self.say(format_args!("You make the first move.\n"))
            }
            GameEvent::FirstMover(Party::Computer) => {
                self.say(format_args!("I make the first move.\n"))
            }
            GameEvent::DiceSelected { party, dice, .. } => match party {
                Party::User => self.say(format_args!("You choose the {} dice.\n", dice)),
                Party::Computer => self.say(format_args!("I choose the {} dice.\n", dice)),
            },
            GameEvent::Rolled { party, face } => match party {
                Party::User => self.say(format_args!("Your roll result is {}.\n", face)),
                Party::Computer => self.say(format_args!("My roll result is {}.\n", face)),
            },
            GameEvent::InvalidChoice(reason) => {
                self.say(format_args!("{}. Try again.\n", reason))
            }
            GameEvent::Help(probabilities) => {
                let rendered = table::render(probabilities);
                self.say(format_args!("Probability of the win for the user:\n{}", rendered));
            }
            GameEvent::Finished(result) => {
                self.show_result(result);
                let result = result.clone();
                self.record(|match_id| TranscriptEntry::Result { match_id, result });
            }
            GameEvent::Aborted => self.say(format_args!("Game aborted.\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::read_entries;
    use crate::verify::verify_transcript;
    use fair_dice_core::{
        parse_dice_list, DiceGame, Outcome, ScriptedEntropy, SecureRandom,
    };
    use std::io::Cursor;

    fn play(input: &str, entropy: &[u8]) -> (Outcome, String) {
        let dice = parse_dice_list(["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap();
        let operator = ConsoleOperator::new(Cursor::new(input.to_string()), Vec::new());
        let rng = SecureRandom::with_entropy(ScriptedEntropy::new(entropy.iter().copied()));
        let mut game = DiceGame::with_rng(dice, operator, rng).unwrap();
        let outcome = game.play().unwrap();
        let output = String::from_utf8(game.into_operator().into_output()).unwrap();
        (outcome, output)
    }

    #[test]
    fn test_console_full_match() {
        // Same script as the user-wins integration test
        let (outcome, output) = play("1\n0\n3\n1\n", &[1, 1, 253, 10, 250]);

        assert!(matches!(outcome, Outcome::Finished(_)));
        assert!(output.contains("You make the first move."));
        assert!(output.contains("You choose the [2,2,4,4,9,9] dice."));
        assert!(output.contains("I choose the [3,3,5,5,7,7] dice."));
        assert!(output.contains("The fair number generation result is 4 + 3 = 1 (mod 6)."));
        assert!(output.contains("You win (9 > 3)!"));
    }

    #[test]
    fn test_commitment_printed_before_key() {
        let (_, output) = play("1\nx\n", &[1]);

        let hmac = output.find("HMAC=").unwrap();
        let key = output.find("KEY=").unwrap();
        assert!(hmac < key);
        assert!(output.contains("Game aborted."));
    }

    #[test]
    fn test_garbage_input_reprompts() {
        let (outcome, output) = play("maybe\n?\nx\n", &[1]);

        assert_eq!(outcome, Outcome::Aborted);
        assert!(output.contains("Unrecognized selection \"maybe\""));
        assert!(output.contains("Probability of the win for the user:"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (outcome, _) = play("", &[1]);
        assert_eq!(outcome, Outcome::Aborted);
    }

    #[test]
    fn test_transcript_records_verifiable_draws() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.jsonl");

        let dice = parse_dice_list(["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap();
        let operator = ConsoleOperator::new(Cursor::new("1\n0\n3\n1\n".to_string()), Vec::new())
            .with_transcript(TranscriptWriter::open(&path).unwrap());
        let rng = SecureRandom::with_entropy(ScriptedEntropy::new([1, 1, 253, 10, 250]));
        let mut game = DiceGame::with_rng(dice, operator, rng).unwrap();
        game.play().unwrap();
        drop(game);

        let entries = read_entries(&path).unwrap();
        assert_eq!(entries.len(), 7);
        assert!(matches!(entries.last(), Some(TranscriptEntry::Result { .. })));

        let checks = verify_transcript(&entries);
        assert_eq!(checks.len(), 3);
        assert!(checks.iter().all(|c| c.ok()));
    }
}
