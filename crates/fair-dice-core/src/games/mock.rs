//! Scripted operator for testing.

use super::operator::{Choice, GameEvent, Operator, Prompt};
use std::collections::VecDeque;

/// Operator that replays a fixed list of choices and records every event
///
/// Once the script runs out it answers `Exit`, so a short script ends the
/// match instead of hanging.
#[derive(Clone, Debug, Default)]
pub struct ScriptedOperator {
    choices: VecDeque<Choice>,
    events: Vec<GameEvent>,
    prompts: usize,
}

impl ScriptedOperator {
    pub fn new(choices: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            events: Vec::new(),
            prompts: 0,
        }
    }

    /// Events displayed so far, in order
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Number of prompts answered
    pub fn prompts(&self) -> usize {
        self.prompts
    }

    /// Choices not yet consumed
    pub fn remaining(&self) -> usize {
        self.choices.len()
    }
}

impl Operator for ScriptedOperator {
    fn request_choice(&mut self, _prompt: &Prompt<'_>) -> Choice {
        self.prompts += 1;
        self.choices.pop_front().unwrap_or(Choice::Exit)
    }

    fn display(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
