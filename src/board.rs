use crate::error::{LifeError, Result};
use rand::RngExt;

/// The eight neighbor offsets at Chebyshev distance 1, as (row, col) deltas.
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Toroidal Game of Life board.
///
/// Cells are stored row-major in one flat buffer, so every row always has
/// exactly `cols` cells. A second buffer of the same size receives each new
/// generation and is swapped in once it is complete.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    next: Vec<bool>,
    generation: u64,
}

impl Board {
    /// Create a board of `rows x cols` dead cells.
    ///
    /// Fails if either side is zero or the cell count overflows `usize`.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LifeError::InvalidDimension { rows, cols });
        }
        let size = rows
            .checked_mul(cols)
            .ok_or(LifeError::InvalidDimension { rows, cols })?;
        Ok(Board {
            rows,
            cols,
            cells: vec![false; size],
            next: vec![false; size],
            generation: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of generations advanced since creation, `clear` or `randomize`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Set every cell alive with probability `probability`, dead otherwise.
    ///
    /// The board is left untouched if `probability` is not within `0.0..=1.0`.
    pub fn randomize<R: RngExt + ?Sized>(&mut self, rng: &mut R, probability: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }
        for cell in &mut self.cells {
            *cell = rng.random::<f64>() < probability;
        }
        self.generation = 0;
        Ok(())
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
    }

    /// Compute the next generation.
    ///
    /// Every cell of the new generation is derived from the untouched
    /// current one, then the two buffers trade places.
    pub fn advance(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let alive = self.cells[row * self.cols + col];
                let neighbors = self.alive_neighbors(row, col);
                self.next[row * self.cols + col] =
                    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3));
            }
        }
        std::mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;
    }

    /// Count live cells among the eight wrapped neighbors of `(row, col)`.
    ///
    /// On boards one cell thin a wrapped offset can land back on the cell
    /// itself or repeat a neighbor; each offset is counted once regardless.
    pub fn alive_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0u8;
        for (dr, dc) in NEIGHBORS {
            let r = wrap(row, dr, self.rows);
            let c = wrap(col, dc, self.cols);
            if self.cells[r * self.cols + c] {
                count += 1;
            }
        }
        count
    }

    /// State of the cell at `(row, col)`.
    ///
    /// # Panics
    /// If the coordinate is outside the board.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} board",
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col]
    }

    /// State of the cell at `(row, col)`, or `None` outside the board.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }

    /// # Panics
    /// If the coordinate is outside the board.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} board",
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col] = alive;
    }

    /// Rows of the current generation, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.cols)
    }
}

// The scratch buffer holds a stale generation and takes no part in equality.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.generation == other.generation
            && self.cells == other.cells
    }
}

impl Eq for Board {}

/// `(coord + delta + extent) % extent`, written so it never underflows.
#[inline]
fn wrap(coord: usize, delta: isize, extent: usize) -> usize {
    (coord + extent).wrapping_add_signed(delta) % extent
}
