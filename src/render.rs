use macroquad::prelude::*;

use crazy_blocks::config::{PREVIEW_BOX, PREVIEW_TILE_SIZE, TILE_SIZE};
use crazy_blocks::{ActivePiece, ColorToken, Frame, Phase, Renderer, ScoreSink, Stats};

const BACKGROUND: Color = Color::new(0.09, 0.09, 0.14, 1.0);
const GAME_AREA_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.35);
const GRID_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.1);
const BLOCK_SHADE: Color = Color::new(15.0 / 255.0, 56.0 / 255.0, 15.0 / 255.0, 0.4);
const BLOCK_HIGHLIGHT: Color = Color::new(1.0, 1.0, 1.0, 0.2);
const BLOCK_BORDER: Color = Color::new(15.0 / 255.0, 56.0 / 255.0, 15.0 / 255.0, 1.0);

pub fn token_color(token: ColorToken) -> Color {
    let (r, g, b) = token.rgb();
    Color::from_rgba(r, g, b, 255)
}

/// Draws the playfield and HUD. The HUD numbers only change through
/// [`ScoreSink::update`].
#[derive(Default)]
pub struct BoardRenderer {
    shown: Stats,
}

impl BoardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn origin(frame: &Frame<'_>) -> (f32, f32) {
        let board_w = frame.board.width() as f32 * TILE_SIZE;
        let board_h = frame.board.height() as f32 * TILE_SIZE;
        (
            (screen_width() - board_w) / 2.0,
            (screen_height() - board_h) / 2.0,
        )
    }

    fn draw_board(&self, frame: &Frame<'_>, offset_x: f32, offset_y: f32) {
        let board = frame.board;
        let board_w = board.width() as f32 * TILE_SIZE;
        let board_h = board.height() as f32 * TILE_SIZE;
        draw_rectangle(offset_x, offset_y, board_w, board_h, GAME_AREA_COLOR);

        for x in 0..=board.width() {
            let px = offset_x + x as f32 * TILE_SIZE;
            draw_line(px, offset_y, px, offset_y + board_h, 1.0, GRID_COLOR);
        }
        for y in 0..=board.height() {
            let py = offset_y + y as f32 * TILE_SIZE;
            draw_line(offset_x, py, offset_x + board_w, py, 1.0, GRID_COLOR);
        }

        for (y, row) in board.rows().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(token) = cell {
                    let px = offset_x + x as f32 * TILE_SIZE;
                    let py = offset_y + y as f32 * TILE_SIZE;
                    draw_block(px, py, TILE_SIZE, token_color(*token));
                }
            }
        }

        if let Some(piece) = frame.current {
            let color = token_color(piece.color);
            for (row, col) in piece.cells() {
                // Cells still above the top are not drawn.
                if row < 0 {
                    continue;
                }
                let px = offset_x + col as f32 * TILE_SIZE;
                let py = offset_y + row as f32 * TILE_SIZE;
                draw_block(px, py, TILE_SIZE, color);
            }
        }
    }

    fn draw_hud(&self, frame: &Frame<'_>, offset_x: f32, offset_y: f32) {
        let panel_x = offset_x + frame.board.width() as f32 * TILE_SIZE + 30.0;

        draw_text("Next", panel_x, offset_y + 30.0, 36.0, WHITE);
        draw_preview(frame.next, panel_x, offset_y + 45.0);
        draw_text(
            frame.next.template.name,
            panel_x,
            offset_y + 45.0 + PREVIEW_BOX + 25.0,
            24.0,
            LIGHTGRAY,
        );

        let lines = [
            format!("Score: {}", self.shown.score),
            format!("Lines: {}", self.shown.lines),
            format!("Level: {}", self.shown.level),
        ];
        let mut y = offset_y + PREVIEW_BOX + 130.0;
        for line in &lines {
            draw_text(line, panel_x, y, 32.0, WHITE);
            y += 40.0;
        }

        let controls = [
            "Left/Right: Move",
            "Down: Soft Drop",
            "Up: Rotate",
            "Space: Pause",
            "R: Restart",
            "M: Mute",
        ];
        y += 20.0;
        for line in controls {
            draw_text(line, panel_x, y, 20.0, GRAY);
            y += 24.0;
        }
    }

    fn draw_overlays(&self, frame: &Frame<'_>, offset_x: f32, offset_y: f32) {
        let board_w = frame.board.width() as f32 * TILE_SIZE;
        let board_h = frame.board.height() as f32 * TILE_SIZE;

        match frame.phase {
            Phase::GameOver => {
                draw_rectangle(offset_x, offset_y, board_w, board_h, Color::new(0.0, 0.0, 0.0, 0.7));
                centered_text("Game Over", offset_x, board_w, offset_y + board_h / 2.0 - 30.0, 50, RED);
                let score = format!("Final score: {}", frame.stats.score);
                centered_text(&score, offset_x, board_w, offset_y + board_h / 2.0 + 15.0, 30, WHITE);
                centered_text(
                    "Press Enter to play again",
                    offset_x,
                    board_w,
                    offset_y + board_h / 2.0 + 55.0,
                    22,
                    YELLOW,
                );
            }
            Phase::Falling if frame.paused => {
                draw_rectangle(offset_x, offset_y, board_w, board_h, Color::new(0.0, 0.0, 0.0, 0.7));
                centered_text("PAUSED", offset_x, board_w, offset_y + board_h / 2.0, 40, WHITE);
            }
            Phase::Falling => {}
        }
    }
}

impl Renderer for BoardRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        clear_background(BACKGROUND);
        let (offset_x, offset_y) = Self::origin(frame);
        self.draw_board(frame, offset_x, offset_y);
        self.draw_hud(frame, offset_x, offset_y);
        self.draw_overlays(frame, offset_x, offset_y);
    }
}

impl ScoreSink for BoardRenderer {
    fn update(&mut self, stats: &Stats) {
        self.shown = *stats;
    }
}

fn centered_text(text: &str, left: f32, width: f32, y: f32, size: u16, color: Color) {
    let measure = measure_text(text, None, size, 1.0);
    draw_text(text, left + (width - measure.width) / 2.0, y, f32::from(size), color);
}

fn draw_block(x: f32, y: f32, size: f32, color: Color) {
    draw_rectangle(x, y, size, size, color);
    draw_rectangle(x, y + size - 4.0, size, 4.0, BLOCK_SHADE);
    draw_rectangle(x + size - 4.0, y, 4.0, size, BLOCK_SHADE);
    draw_rectangle(x + 2.0, y + 2.0, size - 8.0, size - 8.0, BLOCK_HIGHLIGHT);
    draw_rectangle_lines(x + 1.5, y + 1.5, size - 3.0, size - 3.0, 3.0, BLOCK_BORDER);
}

fn draw_preview(piece: &ActivePiece, pos_x: f32, pos_y: f32) {
    draw_rectangle(pos_x, pos_y, PREVIEW_BOX, PREVIEW_BOX, GAME_AREA_COLOR);
    let shape_w = piece.shape.width() as f32 * PREVIEW_TILE_SIZE;
    let shape_h = piece.shape.height() as f32 * PREVIEW_TILE_SIZE;
    let offset_x = pos_x + (PREVIEW_BOX - shape_w) / 2.0;
    let offset_y = pos_y + (PREVIEW_BOX - shape_h) / 2.0;
    let color = token_color(piece.color);
    for (row, col) in piece.shape.filled_cells() {
        let draw_x = offset_x + col as f32 * PREVIEW_TILE_SIZE;
        let draw_y = offset_y + row as f32 * PREVIEW_TILE_SIZE;
        draw_block(draw_x, draw_y, PREVIEW_TILE_SIZE, color);
    }
}
