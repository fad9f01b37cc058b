use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::config::MAX_SHAPE_DIM;

/// 24-bit RGB color a piece paints into the board, e.g. `0xff6b6b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ColorToken(pub u32);

impl ColorToken {
    pub const fn rgb(self) -> (u8, u8, u8) {
        let v = self.0;
        ((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
}

/// Occupancy grid of a piece's bounding box.
///
/// Backed by a fixed `MAX_SHAPE_DIM` square so rotation never deals with ragged
/// rows; only the top-left `height × width` corner is meaningful and every cell
/// outside it stays empty.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMask {
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
    width: usize,
    height: usize,
}

impl ShapeMask {
    /// Builds a mask from row literals (`1` filled, `0` empty).
    ///
    /// Panics on empty, ragged or oversized input. Catalog shapes are built in
    /// const context, so a bad literal is rejected at compile time.
    pub const fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        assert!(height > 0 && height <= MAX_SHAPE_DIM, "shape height out of range");
        let width = rows[0].len();
        assert!(width > 0 && width <= MAX_SHAPE_DIM, "shape width out of range");

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut y = 0;
        while y < height {
            assert!(rows[y].len() == width, "ragged shape row");
            let mut x = 0;
            while x < width {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self { cells, width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row][col]
    }

    /// `(row, col)` of every filled cell, row-major.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| self.cells[y][x].then_some((y, x)))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.filled_cells().count()
    }
}

impl fmt::Debug for ShapeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.cells[y][x] { '#' } else { '.' })
                    .collect()
            })
            .collect();
        write!(f, "ShapeMask({}x{} {})", self.width, self.height, rows.join("/"))
    }
}

/// Returns `shape` turned 90° clockwise. Width and height swap; the input is untouched.
pub fn rotate(shape: &ShapeMask) -> ShapeMask {
    let (w, h) = (shape.width, shape.height);
    let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
    for y in 0..h {
        for x in 0..w {
            cells[x][h - 1 - y] = shape.cells[y][x];
        }
    }
    ShapeMask {
        cells,
        width: h,
        height: w,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceTemplate {
    pub name: &'static str,
    pub color: ColorToken,
    pub shape: ShapeMask,
    pub glyph: &'static str,
}

impl PieceTemplate {
    pub fn by_name(name: &str) -> Option<&'static PieceTemplate> {
        CATALOG.iter().find(|t| t.name == name)
    }
}

const fn template(
    name: &'static str,
    color: u32,
    rows: &[&[u8]],
    glyph: &'static str,
) -> PieceTemplate {
    PieceTemplate {
        name,
        color: ColorToken(color),
        shape: ShapeMask::from_rows(rows),
        glyph,
    }
}

pub static CATALOG: [PieceTemplate; 20] = [
    template("Letter A", 0xff6b6b, &[&[0, 1, 0], &[1, 1, 1], &[1, 0, 1], &[1, 0, 1]], "🅰️"),
    template("Heart", 0xe74c3c, &[&[1, 0, 1], &[1, 1, 1], &[0, 1, 0]], "❤️"),
    template("Star", 0xf1c40f, &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0], &[1, 0, 1]], "⭐"),
    template("Lightning", 0x9b59b6, &[&[1, 0, 0], &[1, 1, 0], &[0, 1, 0], &[0, 1, 1]], "⚡"),
    template("Tree", 0x27ae60, &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0], &[0, 1, 0]], "🌲"),
    template("Diamond", 0x3498db, &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]], "💎"),
    template("Cross", 0xe67e22, &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]], "➕"),
    template(
        "Arrow",
        0x1abc9c,
        &[&[0, 0, 1], &[0, 1, 1], &[1, 1, 1], &[0, 1, 1], &[0, 0, 1]],
        "➡️",
    ),
    template("Puzzle", 0x8e44ad, &[&[1, 1, 0], &[0, 1, 1], &[0, 1, 0]], "🧩"),
    template("Spiral", 0xf39c12, &[&[1, 1, 1], &[0, 0, 1], &[1, 1, 1]], "🌀"),
    template("Giraffe", 0xd35400, &[&[1, 0], &[1, 0], &[1, 0], &[1, 1]], "🦒"),
    template("Rocket", 0xc0392b, &[&[0, 1, 0], &[1, 1, 1], &[1, 1, 1], &[0, 1, 0]], "🚀"),
    // Small pieces keep the board playable.
    template("Dot", 0xff6b6b, &[&[1]], "⚫"),
    template("Mini L", 0x3498db, &[&[1, 0], &[1, 1]], "🔵"),
    template("Mini Line", 0x27ae60, &[&[1, 1]], "🟢"),
    template("Mini T", 0xf1c40f, &[&[1, 1, 1], &[0, 1, 0]], "🟡"),
    template("Mini Z", 0x9b59b6, &[&[1, 1, 0], &[0, 1, 1]], "🟣"),
    template("Mini Square", 0xe67e22, &[&[1, 1], &[1, 1]], "🟠"),
    template("Corner", 0x1abc9c, &[&[1, 1], &[1, 0]], "🔷"),
    template("Short Line", 0xe74c3c, &[&[1], &[1], &[1]], "🔴"),
];

/// Uniform pick over [`CATALOG`].
pub fn pick_random<R: Rng>(rng: &mut R) -> &'static PieceTemplate {
    &CATALOG[rng.random_range(0..CATALOG.len())]
}
