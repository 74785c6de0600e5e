//! Pairwise win probabilities between dice.

use super::dice::DiceSet;
use serde::{Deserialize, Serialize};

/// Count the face pairs where `a` rolls strictly higher than `b`.
///
/// Returns `(wins, total)` with `total = |a| * |b|`. Ties count for neither
/// side.
pub fn win_count(a: &DiceSet, b: &DiceSet) -> (usize, usize) {
    let wins = a
        .faces()
        .iter()
        .map(|fa| b.faces().iter().filter(|fb| fa > fb).count())
        .sum();
    (wins, a.len() * b.len())
}

/// Probability that `a` beats `b`, rounded half up to two decimals
pub fn win_probability(a: &DiceSet, b: &DiceSet) -> f64 {
    let (wins, total) = win_count(a, b);
    hundredths(wins, total) as f64 / 100.0
}

/// `wins / total` in hundredths, rounded half up on the exact ratio
fn hundredths(wins: usize, total: usize) -> usize {
    (wins * 200 + total) / (2 * total)
}

/// Win probabilities for every ordered pair of dice in a game
///
/// `cells[row][col]` is the probability that dice `row` beats dice `col`.
/// Diagonal cells are `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityTable {
    dice: Vec<DiceSet>,
    cells: Vec<Vec<Option<f64>>>,
}

impl ProbabilityTable {
    pub fn compute(dice: &[DiceSet]) -> Self {
        let cells = dice
            .iter()
            .enumerate()
            .map(|(row, a)| {
                dice.iter()
                    .enumerate()
                    .map(|(col, b)| (row != col).then(|| win_probability(a, b)))
                    .collect()
            })
            .collect();

        Self {
            dice: dice.to_vec(),
            cells,
        }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.dice.len()
    }

    pub fn dice(&self) -> &[DiceSet] {
        &self.dice
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.cells.iter().map(|row| row.as_slice())
    }
}
