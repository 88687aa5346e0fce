//! Fixed-width table rendering of the grid's display strings.

use sheetling_core::{CellRef, Grid};

/// Render the grid as a bordered table: column letters across the top,
/// zero-based row labels down the side, every cell centered in a column
/// sized to its widest display string.
pub fn render_table(grid: &Grid) -> String {
    let rows = grid.rows();
    let cols = grid.columns();

    let mut widths = vec![3usize; cols];
    for (col, width) in widths.iter_mut().enumerate() {
        for row in 0..rows {
            *width = (*width).max(grid.display_at(row, col).chars().count() + 2);
        }
    }

    let label_width = rows.to_string().len();

    let mut out = String::from("\n");
    out.push_str(&center("", label_width));
    for col in 0..cols {
        out.push('|');
        out.push_str(&center(&CellRef::col_letters(col), widths[col]));
    }
    out.push_str("|\n");

    for row in 0..rows {
        out.push_str(&center(&row.to_string(), label_width));
        out.push('|');
        for col in 0..cols {
            out.push_str(&center(&grid.display_at(row, col), widths[col]));
            out.push('|');
        }
        out.push('\n');
    }
    out
}

/// Center `text` in a field of `width` spaces (extra padding goes right).
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}
