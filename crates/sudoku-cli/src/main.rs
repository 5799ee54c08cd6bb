mod app;
mod command;
mod render;
mod storage;
mod theme;

use app::App;
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use theme::Theme;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeChoice {
    /// Colored output.
    Classic,
    /// Monochrome output.
    Mono,
}

/// Terminal Sudoku: 2 hints, 3 wrong attempts, correct numbers stick.
#[derive(Parser)]
#[command(name = "sudoku", version, about)]
struct Args {
    /// Seed for puzzle generation (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Save file location
    #[arg(long)]
    save_file: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum, default_value = "classic")]
    theme: ThemeChoice,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let theme = match args.theme {
        ThemeChoice::Classic => Theme::classic(),
        ThemeChoice::Mono => Theme::mono(),
    };
    let save_path = args.save_file.unwrap_or_else(storage::default_save_path);

    App::new(args.seed, save_path, theme).run()
}
