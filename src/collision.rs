use crate::board::Board;
use crate::pieces::{rotate, ColorToken, PieceTemplate, ShapeMask};

/// The falling piece: a (possibly rotated) shape at a board offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: ShapeMask,
    pub color: ColorToken,
    pub x: i32,
    pub y: i32,
    pub template: &'static PieceTemplate,
}

impl ActivePiece {
    /// Horizontally centred on row 0.
    pub fn spawn(template: &'static PieceTemplate, board_width: usize) -> Self {
        let x = (board_width / 2) as i32 - (template.shape.width() / 2) as i32;
        Self {
            shape: template.shape,
            color: template.color,
            x,
            y: 0,
            template,
        }
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: rotate(&self.shape),
            ..*self
        }
    }

    /// Board `(row, col)` of every filled cell at the current offset.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(r, c)| (self.y + r as i32, self.x + c as i32))
    }

    pub fn collides(&self, board: &Board) -> bool {
        collides(board, &self.shape, self.x, self.y)
    }
}

/// Whether `shape` at `(x, y)` leaves the sides or bottom or overlaps a
/// settled cell. Cells above row 0 are only checked against the side walls.
pub fn collides(board: &Board, shape: &ShapeMask, x: i32, y: i32) -> bool {
    let width = board.width() as i32;
    let height = board.height() as i32;
    shape.filled_cells().any(|(r, c)| {
        let col = x + c as i32;
        let row = y + r as i32;
        col < 0 || col >= width || row >= height || (row >= 0 && board.is_occupied(row, col))
    })
}

/// Writes the piece into the board at its current offset.
pub fn commit_placement(board: &mut Board, piece: &ActivePiece) {
    board.place(piece.color, piece.cells());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::CATALOG;

    const X: ColorToken = ColorToken(0x111111);

    fn template(name: &str) -> &'static PieceTemplate {
        PieceTemplate::by_name(name).unwrap()
    }

    #[test]
    fn bounds_collide_regardless_of_contents() {
        let empty = Board::default();
        let mut full = Board::default();
        for r in 0..20 {
            full.place(X, (0..10).map(|c| (r, c)));
        }
        let dot = template("Dot").shape;
        for board in [&empty, &full] {
            assert!(collides(board, &dot, -1, 5));
            assert!(collides(board, &dot, 10, 5));
            assert!(collides(board, &dot, 3, 20));
            assert!(collides(board, &dot, -1, -3));
            assert!(collides(board, &dot, 10, -3));
        }
    }

    #[test]
    fn only_filled_cells_count() {
        let board = Board::default();
        // Giraffe's right column is empty above its foot; the bounding box may
        // hang over the edge only where cells are empty.
        let giraffe = template("Giraffe").shape;
        assert!(!collides(&board, &giraffe, 8, 0));
        assert!(collides(&board, &giraffe, 9, 0));
        let heart = template("Heart").shape;
        assert!(!collides(&board, &heart, 0, 17));
        assert!(collides(&board, &heart, 0, 18));
    }

    #[test]
    fn above_top_ignores_board_contents() {
        let mut board = Board::default();
        board.place(X, (0..10).map(|c| (0, c)));
        let line = template("Short Line").shape;
        assert!(!collides(&board, &line, 4, -3));
        assert!(collides(&board, &line, 4, -2));
    }

    #[test]
    fn settled_cells_block() {
        let mut board = Board::default();
        board.place(X, [(19, 4)]);
        let square = template("Mini Square").shape;
        assert!(collides(&board, &square, 3, 18));
        assert!(!collides(&board, &square, 5, 18));
        assert!(!collides(&board, &square, 3, 17));
    }

    #[test]
    fn spawn_centres_on_row_zero() {
        let arrow = ActivePiece::spawn(template("Arrow"), 10);
        assert_eq!((arrow.x, arrow.y), (4, 0));
        let line = ActivePiece::spawn(template("Mini Line"), 10);
        assert_eq!((line.x, line.y), (4, 0));
        let dot = ActivePiece::spawn(template("Dot"), 10);
        assert_eq!((dot.x, dot.y), (5, 0));
        for t in CATALOG.iter() {
            assert!(!ActivePiece::spawn(t, 10).collides(&Board::default()), "{}", t.name);
        }
    }

    #[test]
    fn commit_writes_piece_color() {
        let mut board = Board::default();
        let mut piece = ActivePiece::spawn(template("Corner"), 10);
        piece.y = 18;
        commit_placement(&mut board, &piece);
        let color = piece.color;
        assert_eq!(board.cell(18, 4), Some(color));
        assert_eq!(board.cell(18, 5), Some(color));
        assert_eq!(board.cell(19, 4), Some(color));
        assert_eq!(board.cell(19, 5), None);
    }

    #[test]
    fn commit_partially_above_top_keeps_visible_cells() {
        let mut board = Board::default();
        let mut piece = ActivePiece::spawn(template("Short Line"), 10);
        piece.y = -2;
        commit_placement(&mut board, &piece);
        assert_eq!(board.cell(0, 5), Some(piece.color));
        assert_eq!(board.rows().iter().flatten().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn rotated_keeps_offset() {
        let piece = ActivePiece::spawn(template("Giraffe"), 10).shifted(1, 3);
        let turned = piece.rotated();
        assert_eq!((turned.x, turned.y), (piece.x, piece.y));
        assert_eq!(turned.shape.width(), 4);
        assert_eq!(piece.shape.width(), 2);
    }
}
