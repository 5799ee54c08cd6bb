//! Save-file persistence.
//!
//! The format is plain text: the 81 board values in row-major order, nine
//! per line space-separated, followed by hints used and wrong attempts on
//! their own lines. The solution is never persisted; loading re-derives it
//! (see [`Game::from_saved`]).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use sudoku_engine::{Game, Grid, Position, MAX_HINTS, MAX_WRONG_ATTEMPTS, SIZE};

pub const SAVE_FILE_NAME: &str = "sudoku_save.txt";

/// Default save location, next to the other per-user game data.
pub fn default_save_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SAVE_FILE_NAME)
}

pub fn save(game: &Game, path: &Path) -> io::Result<()> {
    fs::write(path, encode(game))
}

/// Load a session. Any I/O failure or malformed content is an error; the
/// caller falls back to a fresh game.
pub fn load(path: &Path) -> io::Result<Game> {
    let text = fs::read_to_string(path)?;
    decode(&text).ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "malformed save file"))
}

fn encode(game: &Game) -> String {
    let mut out = String::new();
    for row in 0..SIZE {
        for col in 0..SIZE {
            out.push_str(&game.value_at(Position::new(row, col)).to_string());
            out.push(if col == SIZE - 1 { '\n' } else { ' ' });
        }
    }
    out.push_str(&format!("{}\n{}\n", game.hints_used(), game.wrong_attempts()));
    out
}

fn decode(text: &str) -> Option<Game> {
    let mut tokens = text.split_whitespace();

    let mut board = Grid::empty();
    for pos in Position::all() {
        let value: u8 = tokens.next()?.parse().ok()?;
        if value > 9 {
            return None;
        }
        board.set(pos, value);
    }
    let hints_used: usize = tokens.next()?.parse().ok()?;
    let wrong_attempts: usize = tokens.next()?.parse().ok()?;

    // A live session never has a spent wrong-attempt budget or an
    // overdrawn hint counter; anything else is a corrupt file.
    if hints_used > MAX_HINTS || wrong_attempts >= MAX_WRONG_ATTEMPTS {
        return None;
    }

    Some(Game::from_saved(board, hints_used, wrong_attempts))
}
