use crate::command::{self, Command, ParseError};
use crate::render;
use crate::storage;
use crate::theme::Theme;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use sudoku_engine::{Game, HintOutcome, MoveOutcome, Position, MAX_HINTS, MAX_WRONG_ATTEMPTS};

/// How an individual session ended.
enum SessionEnd {
    /// Won or lost; offer another round.
    Finished,
    /// Restart chosen from the quit menu.
    Restart,
    /// The player is done.
    Quit,
}

/// Session driver: owns the current game and runs the prompt loop.
pub struct App {
    game: Game,
    seed: Option<u64>,
    save_path: PathBuf,
    theme: Theme,
}

fn new_game(seed: Option<u64>) -> Game {
    match seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    }
}

impl App {
    pub fn new(seed: Option<u64>, save_path: PathBuf, theme: Theme) -> Self {
        Self {
            game: new_game(seed),
            seed,
            save_path,
            theme,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        let mut input = io::stdin().lock().lines();
        let mut out = io::stdout();
        self.run_loop(&mut input, &mut out)
    }

    fn run_loop<In, Out>(&mut self, input: &mut In, out: &mut Out) -> io::Result<()>
    where
        In: Iterator<Item = io::Result<String>>,
        Out: Write,
    {
        loop {
            self.print_welcome(out)?;
            match self.play_session(input, out)? {
                SessionEnd::Quit => break,
                SessionEnd::Restart => self.game = new_game(self.seed),
                SessionEnd::Finished => {
                    if !self.ask_play_again(input, out)? {
                        break;
                    }
                    self.game = new_game(self.seed);
                }
            }
        }
        self.say(out, self.theme.success, true, "Thanks for playing! Goodbye!")
    }

    fn play_session<In, Out>(&mut self, input: &mut In, out: &mut Out) -> io::Result<SessionEnd>
    where
        In: Iterator<Item = io::Result<String>>,
        Out: Write,
    {
        loop {
            render::draw_board(out, self.game.board(), &self.theme)?;
            self.prompt(
                out,
                "Enter row, column, number (e.g. 1 2 3), or h)int, s)ave, l)oad, q)uit: ",
            )?;
            let Some(line) = input.next() else {
                // End of input counts as quitting.
                return Ok(SessionEnd::Quit);
            };
            match command::parse(&line?) {
                Err(ParseError::Invalid) => self.say(
                    out,
                    self.theme.error,
                    false,
                    "Invalid input! Enter three numbers or a command.",
                )?,
                Err(ParseError::OutOfRange) => {
                    self.say(out, self.theme.error, false, "Numbers must be 1-9!")?;
                }
                Ok(Command::Quit) => return self.quit_menu(input, out),
                Ok(Command::Hint) => {
                    if self.handle_hint(out)? {
                        return Ok(SessionEnd::Finished);
                    }
                }
                Ok(Command::Save) => self.handle_save(out)?,
                Ok(Command::Load) => self.handle_load(out)?,
                Ok(Command::Move { pos, num }) => {
                    if self.handle_move(out, pos, num)? {
                        return Ok(SessionEnd::Finished);
                    }
                }
            }
        }
    }

    /// Returns true when the session is over (won or lost).
    fn handle_move<Out: Write>(&mut self, out: &mut Out, pos: Position, num: u8) -> io::Result<bool> {
        if self.game.is_fixed(pos) {
            let msg = format!("Cell ({},{}) is already correct!", pos.row + 1, pos.col + 1);
            self.say(out, self.theme.success, false, &msg)?;
            return Ok(false);
        }
        if !self.game.is_valid(pos, num) {
            self.say(
                out,
                self.theme.error,
                false,
                "Invalid move! Number conflicts with existing numbers.",
            )?;
            return Ok(false);
        }

        match self.game.attempt_move(pos, num) {
            MoveOutcome::Correct { complete } => {
                self.say(out, self.theme.success, false, "Correct!")?;
                if complete {
                    self.celebrate_win(out)?;
                }
                Ok(complete)
            }
            MoveOutcome::Wrong { attempts_left } => {
                let msg = format!("Wrong! Attempts left: {attempts_left}");
                self.say(out, self.theme.error, true, &msg)?;
                if attempts_left == 0 {
                    self.say(out, self.theme.error, false, "Game Over! Good luck next time.")?;
                    render::draw_solution(out, self.game.reveal_solution(), &self.theme)?;
                    return Ok(true);
                }
                Ok(false)
            }
        }
    }

    /// Returns true when the hint filled the last empty cell and won.
    fn handle_hint<Out: Write>(&mut self, out: &mut Out) -> io::Result<bool> {
        match self.game.provide_hint() {
            HintOutcome::Placed { pos, .. } => {
                let msg = format!("Hint placed at ({},{})", pos.row + 1, pos.col + 1);
                self.say(out, self.theme.header, false, &msg)?;
                if self.game.is_complete() {
                    self.celebrate_win(out)?;
                    return Ok(true);
                }
                Ok(false)
            }
            HintOutcome::Exhausted => {
                self.say(out, self.theme.error, false, "No hints left!")?;
                Ok(false)
            }
            HintOutcome::BoardFull => {
                self.say(out, self.theme.header, false, "No empty cells left to hint.")?;
                Ok(false)
            }
        }
    }

    fn handle_save<Out: Write>(&mut self, out: &mut Out) -> io::Result<()> {
        match storage::save(&self.game, &self.save_path) {
            Ok(()) => {
                let msg = format!("Game saved to {}", self.save_path.display());
                self.say(out, self.theme.info, false, &msg)
            }
            Err(_) => self.say(out, self.theme.error, false, "Error: could not save game!"),
        }
    }

    fn handle_load<Out: Write>(&mut self, out: &mut Out) -> io::Result<()> {
        match storage::load(&self.save_path) {
            Ok(game) => {
                self.game = game;
                let msg = format!("Game loaded from {}", self.save_path.display());
                self.say(out, self.theme.info, false, &msg)
            }
            Err(_) => {
                // An unreadable save is not fatal: start over instead.
                self.game = new_game(self.seed);
                self.say(
                    out,
                    self.theme.error,
                    false,
                    "Error: could not load game! Starting a new one.",
                )
            }
        }
    }

    fn celebrate_win<Out: Write>(&self, out: &mut Out) -> io::Result<()> {
        render::draw_board(out, self.game.board(), &self.theme)?;
        self.say(
            out,
            self.theme.success,
            true,
            "Congratulations! You solved the Sudoku!",
        )
    }

    fn quit_menu<In, Out>(&self, input: &mut In, out: &mut Out) -> io::Result<SessionEnd>
    where
        In: Iterator<Item = io::Result<String>>,
        Out: Write,
    {
        loop {
            self.say(out, self.theme.info, true, "\nQuit Menu:")?;
            self.say(out, self.theme.prompt, true, "  1. Restart Game")?;
            self.say(out, self.theme.prompt, true, "  2. Quit Game")?;
            self.prompt(out, "Enter your choice (1-2): ")?;
            let Some(line) = input.next() else {
                return Ok(SessionEnd::Quit);
            };
            match line?.trim() {
                "1" => return Ok(SessionEnd::Restart),
                "2" => return Ok(SessionEnd::Quit),
                _ => self.say(
                    out,
                    self.theme.error,
                    false,
                    "Invalid choice! Please enter 1 or 2.",
                )?,
            }
        }
    }

    fn ask_play_again<In, Out>(&self, input: &mut In, out: &mut Out) -> io::Result<bool>
    where
        In: Iterator<Item = io::Result<String>>,
        Out: Write,
    {
        loop {
            self.prompt(out, "\nPlay again? (y/n): ")?;
            let Some(line) = input.next() else {
                return Ok(false);
            };
            match line?.trim().to_ascii_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => self.say(
                    out,
                    self.theme.error,
                    false,
                    "Invalid input! Please enter 'y' or 'n'.",
                )?,
            }
        }
    }

    fn print_welcome<Out: Write>(&self, out: &mut Out) -> io::Result<()> {
        self.say(out, self.theme.success, true, "\nWelcome to Sudoku!\n")?;
        let rules = format!(
            "Rules:\n  1. Correct numbers become permanent\n  2. You get {MAX_HINTS} hints\n  3. {MAX_WRONG_ATTEMPTS} wrong attempts end the game\n  4. Type 'q' to quit\n"
        );
        self.say(out, self.theme.success, false, &rules)
    }

    fn say<Out: Write>(&self, out: &mut Out, color: Color, bold: bool, msg: &str) -> io::Result<()> {
        if bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, SetForegroundColor(color), Print(msg), Print("\n"), ResetColor)?;
        if bold {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        out.flush()
    }

    fn prompt<Out: Write>(&self, out: &mut Out, msg: &str) -> io::Result<()> {
        queue!(
            out,
            SetForegroundColor(self.theme.prompt),
            SetAttribute(Attribute::Bold),
            Print(msg),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sudoku_engine::GameStatus;

    fn scripted(lines: &[&str]) -> impl Iterator<Item = io::Result<String>> {
        lines
            .iter()
            .map(|line| Ok(line.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn test_app(seed: u64, save_name: &str) -> App {
        let save_path = std::env::temp_dir().join(save_name);
        App::new(Some(seed), save_path, Theme::mono())
    }

    /// An editable cell plus a value that passes constraint validation but
    /// does not match the solution, entered as a 1-based move line.
    fn wrong_move_line(game: &Game) -> String {
        for pos in Position::all() {
            if game.is_fixed(pos) {
                continue;
            }
            for num in 1..=9u8 {
                if num != game.solution_at(pos) && game.is_valid(pos, num) {
                    return format!("{} {} {}", pos.row + 1, pos.col + 1, num);
                }
            }
        }
        unreachable!("a fresh puzzle always has a valid wrong move");
    }

    #[test]
    fn test_quit_from_menu_ends_session() {
        let mut app = test_app(1, "sudoku_app_test_quit.txt");
        let mut out = Vec::new();
        let end = app
            .play_session(&mut scripted(&["q", "2"]), &mut out)
            .unwrap();
        assert!(matches!(end, SessionEnd::Quit));
    }

    #[test]
    fn test_quit_menu_can_restart() {
        let mut app = test_app(1, "sudoku_app_test_restart.txt");
        let mut out = Vec::new();
        let end = app
            .play_session(&mut scripted(&["q", "x", "1"]), &mut out)
            .unwrap();
        assert!(matches!(end, SessionEnd::Restart));
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut app = test_app(1, "sudoku_app_test_eof.txt");
        let mut out = Vec::new();
        let end = app.play_session(&mut scripted(&[]), &mut out).unwrap();
        assert!(matches!(end, SessionEnd::Quit));
    }

    #[test]
    fn test_three_wrong_moves_finish_the_session() {
        let mut app = test_app(2, "sudoku_app_test_loss.txt");
        let mut out = Vec::new();

        // The board does not change on a wrong move, so the same line can
        // be replayed until the budget is spent.
        let line = wrong_move_line(&app.game);
        let lines = [line.as_str(), line.as_str(), line.as_str()];
        let end = app.play_session(&mut scripted(&lines), &mut out).unwrap();

        assert!(matches!(end, SessionEnd::Finished));
        assert_eq!(app.game.status(), GameStatus::Lost);
        assert_eq!(app.game.wrong_attempts(), MAX_WRONG_ATTEMPTS);
    }

    #[test]
    fn test_hint_command_spends_budget() {
        let mut app = test_app(3, "sudoku_app_test_hint.txt");
        let mut out = Vec::new();
        let end = app
            .play_session(&mut scripted(&["h", "q", "2"]), &mut out)
            .unwrap();
        assert!(matches!(end, SessionEnd::Quit));
        assert_eq!(app.game.hints_used(), 1);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let mut app = test_app(4, "sudoku_app_test_save_load.txt");
        let mut out = Vec::new();

        let end = app
            .play_session(&mut scripted(&["h", "s", "l", "q", "2"]), &mut out)
            .unwrap();
        assert!(matches!(end, SessionEnd::Quit));
        // The hint happened before the save, so the load keeps it.
        assert_eq!(app.game.hints_used(), 1);
        std::fs::remove_file(&app.save_path).unwrap();
    }

    #[test]
    fn test_failed_load_starts_a_new_game() {
        let mut app = test_app(5, "sudoku_app_test_missing_save.txt");
        let _ = std::fs::remove_file(&app.save_path);
        let mut out = Vec::new();
        let before = *app.game.board();

        let end = app
            .play_session(&mut scripted(&["h", "l", "q", "2"]), &mut out)
            .unwrap();
        assert!(matches!(end, SessionEnd::Quit));
        // Same seed, so the fallback regenerates the identical puzzle with
        // the hint gone.
        assert_eq!(app.game.hints_used(), 0);
        assert_eq!(*app.game.board(), before);
    }
}
