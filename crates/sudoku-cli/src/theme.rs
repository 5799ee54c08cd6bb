use crossterm::style::Color;

/// Color theme for the prompt loop.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Row/column header labels.
    pub header: Color,
    /// Grid and box borders.
    pub border: Color,
    /// Input prompts.
    pub prompt: Color,
    /// Menu titles and neutral notices.
    pub info: Color,
    /// Rejections, wrong attempts, game over.
    pub error: Color,
    /// Correct moves, wins, farewells.
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// The classic palette: cyan headers, green borders, yellow prompts.
    pub fn classic() -> Self {
        Self {
            header: Color::Cyan,
            border: Color::Green,
            prompt: Color::Yellow,
            info: Color::Blue,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Monochrome: every role renders in the terminal's default color.
    pub fn mono() -> Self {
        Self {
            header: Color::Reset,
            border: Color::Reset,
            prompt: Color::Reset,
            info: Color::Reset,
            error: Color::Reset,
            success: Color::Reset,
        }
    }
}
