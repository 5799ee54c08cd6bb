use crate::theme::Theme;
use crossterm::{
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{self, Write};
use sudoku_engine::{Grid, Position, BOX_SIZE, SIZE};

/// Draw the player board with row/column headers and 3x3 box borders.
///
/// ```text
///     1 2 3   4 5 6   7 8 9
///   +-------+-------+-------+
/// 1 | 5 3 . | . 7 . | . . . |
/// ```
pub fn draw_board(out: &mut impl Write, grid: &Grid, theme: &Theme) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(theme.header),
        SetAttribute(Attribute::Bold),
        Print("    1 2 3   4 5 6   7 8 9\n"),
        SetAttribute(Attribute::Reset),
        ResetColor
    )?;
    draw_separator(out, theme)?;

    for row in 0..SIZE {
        if row % BOX_SIZE == 0 && row != 0 {
            draw_separator(out, theme)?;
        }
        queue!(
            out,
            SetForegroundColor(theme.header),
            SetAttribute(Attribute::Bold),
            Print(format!("{}", row + 1)),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(theme.border),
            Print(" | "),
            ResetColor
        )?;
        for col in 0..SIZE {
            if col % BOX_SIZE == 0 && col != 0 {
                queue!(out, SetForegroundColor(theme.border), Print("| "), ResetColor)?;
            }
            match grid.get(Position::new(row, col)) {
                0 => queue!(out, Print(". "))?,
                value => queue!(out, Print(format!("{value} ")))?,
            }
        }
        queue!(out, SetForegroundColor(theme.border), Print("|\n"), ResetColor)?;
    }

    draw_separator(out, theme)?;
    out.flush()
}

fn draw_separator(out: &mut impl Write, theme: &Theme) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(theme.border),
        Print("  +-------+-------+-------+\n"),
        ResetColor
    )
}

/// Draw the completed solution in a 3x3-blocked layout, shown on loss.
pub fn draw_solution(out: &mut impl Write, solution: &Grid, theme: &Theme) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(theme.info),
        Print("\nSolution:\n"),
        ResetColor
    )?;
    for row in 0..SIZE {
        for col in 0..SIZE {
            queue!(out, Print(format!("{} ", solution.get(Position::new(row, col)))))?;
            if col % BOX_SIZE == BOX_SIZE - 1 {
                queue!(out, Print(" "))?;
            }
        }
        queue!(out, Print("\n"))?;
        if row % BOX_SIZE == BOX_SIZE - 1 {
            queue!(out, Print("\n"))?;
        }
    }
    out.flush()
}
