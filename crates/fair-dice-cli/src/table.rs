//! Probability table rendering.

use fair_dice_core::ProbabilityTable;
use prettytable::{format, Cell, Row, Table};

/// Render the table with one row and one column per dice.
///
/// Each cell is the chance that the row dice beats the column dice;
/// self-comparisons show `-`.
pub fn render(table: &ProbabilityTable) -> String {
    let mut out = Table::new();
    out.set_format(*format::consts::FORMAT_BOX_CHARS);

    let mut titles = vec![Cell::new("User dice v")];
    titles.extend(table.dice().iter().map(|d| Cell::new(&d.to_string())));
    out.set_titles(Row::new(titles));

    for (dice, row) in table.dice().iter().zip(table.rows()) {
        let mut cells = vec![Cell::new(&dice.to_string())];
        cells.extend(row.iter().map(|cell| match cell {
            Some(p) => Cell::new(&format!("{:.2}", p)),
            None => Cell::new("-"),
        }));
        out.add_row(Row::new(cells));
    }

    out.to_string()
}
