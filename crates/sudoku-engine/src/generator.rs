use crate::{solver, FixedMask, Grid, Position, SIZE};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Fewest cells cleared when deriving a puzzle from the solution.
const REMOVE_MIN: usize = 40;
/// Most cells cleared when deriving a puzzle from the solution.
const REMOVE_MAX: usize = 54;

/// A freshly generated puzzle: the reference solution, the player board
/// with cells cleared, and the mask of cells the player may not touch.
pub struct GeneratedPuzzle {
    pub solution: Grid,
    pub board: Grid,
    pub fixed: FixedMask,
}

/// Puzzle generator.
///
/// Produces a complete solution via the solver, then clears a random set of
/// cells to make the player board. There is no uniqueness check on the
/// residual puzzle; difficulty is controlled by blank count alone.
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a puzzle.
    pub fn generate(&mut self) -> GeneratedPuzzle {
        let solution = solver::solved_grid();
        let mut board = solution;
        let mut fixed = [[true; SIZE]; SIZE];

        // Accept/reject loop: already-cleared cells are simply resampled.
        let mut to_remove = self.rng.gen_range(REMOVE_MIN..=REMOVE_MAX);
        while to_remove > 0 {
            let pos = Position::new(self.rng.gen_range(0..SIZE), self.rng.gen_range(0..SIZE));
            if board.get(pos) != 0 {
                board.set(pos, 0);
                fixed[pos.row][pos.col] = false;
                to_remove -= 1;
            }
        }

        GeneratedPuzzle {
            solution,
            board,
            fixed,
        }
    }
}
