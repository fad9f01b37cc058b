use log::{trace, warn};

use crate::config::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::pieces::ColorToken;

pub type Cell = Option<ColorToken>;

/// Settled cells of the playfield, row 0 at the top.
///
/// Dimensions are fixed when the board is created; only placement and
/// line clearing change its contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![None; width]; height],
        }
    }

    pub fn create(width: usize, height: usize) -> Self {
        Self::new(width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Out-of-range coordinates count as blocked.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some((r, c)) => self.rows[r][c].is_some(),
            None => true,
        }
    }

    /// Paints `color` into each `(row, col)`. Rows above the top are skipped
    /// silently; anything else outside the grid is refused.
    pub fn place<I>(&mut self, color: ColorToken, cells: I)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        for (row, col) in cells {
            if row < 0 {
                continue;
            }
            match self.index(row, col) {
                Some((r, c)) => self.rows[r][c] = Some(color),
                None => warn!("refusing to place cell outside the board at ({row}, {col})"),
            }
        }
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| r.iter().all(|cell| cell.is_some()))
    }

    /// Removes every full row and returns how many went.
    ///
    /// Scans bottom to top. After a removal the same index is checked again,
    /// since the row above has just shifted into it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.rows.remove(row);
                self.rows.insert(0, vec![None; self.width]);
                cleared += 1;
                trace!("cleared row {row}");
                continue;
            }
            y -= 1;
        }
        cleared
    }

    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
    }

    fn index(&self, row: i32, col: i32) -> Option<(usize, usize)> {
        let r = usize::try_from(row).ok()?;
        let c = usize::try_from(col).ok()?;
        (r < self.height && c < self.width).then_some((r, c))
    }
}
