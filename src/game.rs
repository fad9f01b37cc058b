use std::time::Duration;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::Board;
use crate::collision::{commit_placement, ActivePiece};
use crate::events::{Command, Event, Frame, SoundEvent};
use crate::pieces::{pick_random, PieceTemplate};
use crate::progression::{ClearOutcome, Stats};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Falling,
    GameOver,
}

/// One play session: board, falling piece, preview piece and score.
///
/// All mutation goes through [`Game::tick`] and [`Game::handle`]. Spawning,
/// locking and line clearing happen inside those calls and never leave the
/// game in an intermediate state.
pub struct Game<R = StdRng> {
    board: Board,
    current: Option<ActivePiece>,
    next: ActivePiece,
    stats: Stats,
    phase: Phase,
    paused: bool,
    since_drop: Duration,
    rng: R,
    events: Vec<Event>,
}

impl Game<StdRng> {
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn new(mut rng: R) -> Self {
        let board = Board::default();
        let next = ActivePiece::spawn(pick_random(&mut rng), board.width());
        let mut game = Self {
            board,
            current: None,
            next,
            stats: Stats::default(),
            phase: Phase::Falling,
            paused: false,
            since_drop: Duration::ZERO,
            rng,
            events: Vec::new(),
        };
        game.push_stats();
        game.spawn();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<&ActivePiece> {
        self.current.as_ref()
    }

    pub fn next(&self) -> &ActivePiece {
        &self.next
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Falling
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            board: &self.board,
            current: self.current.as_ref(),
            next: &self.next,
            stats: self.stats,
            phase: self.phase,
            paused: self.paused,
        }
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, Event> {
        self.events.drain(..)
    }

    /// Advances the fall clock by `dt`. Runs at most one fall step per call and
    /// returns whether it did.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.is_running() || self.paused {
            return false;
        }
        self.since_drop += dt;
        if self.since_drop < self.stats.fall_interval() {
            return false;
        }
        self.since_drop = Duration::ZERO;
        self.fall_step();
        true
    }

    /// Applies a player command. Returns whether anything changed.
    ///
    /// Movement and rotation only need a running game; they ignore `paused`,
    /// which only holds back the automatic fall.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Left => self.try_shift(-1),
            Command::Right => self.try_shift(1),
            Command::SoftDrop => self.soft_drop(),
            Command::Rotate => self.try_rotate(),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn restart(&mut self) {
        info!("restarting (final score {})", self.stats.score);
        self.board.reset();
        self.stats = Stats::default();
        self.paused = false;
        self.since_drop = Duration::ZERO;
        self.phase = Phase::Falling;
        self.current = None;
        self.next = ActivePiece::spawn(pick_random(&mut self.rng), self.board.width());
        self.push_stats();
        self.spawn();
    }

    fn toggle_pause(&mut self) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }
        self.paused = !self.paused;
        debug!("paused: {}", self.paused);
        true
    }

    fn try_shift(&mut self, dx: i32) -> bool {
        let moved = self.try_replace(|piece| piece.shifted(dx, 0));
        if moved {
            self.events.push(Event::Sound(SoundEvent::Move));
        }
        moved
    }

    fn soft_drop(&mut self) -> bool {
        let moved = self.try_replace(|piece| piece.shifted(0, 1));
        if moved {
            self.stats.award_soft_drop();
            self.push_stats();
            self.events.push(Event::Sound(SoundEvent::Move));
        }
        moved
    }

    fn try_rotate(&mut self) -> bool {
        let rotated = self.try_replace(ActivePiece::rotated);
        if rotated {
            self.events.push(Event::Sound(SoundEvent::Rotate));
        }
        rotated
    }

    /// Swaps in `f(current)` if the game is running and the result fits.
    fn try_replace(&mut self, f: impl FnOnce(&ActivePiece) -> ActivePiece) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.current.as_ref() else {
            return false;
        };
        let candidate = f(piece);
        if candidate.collides(&self.board) {
            return false;
        }
        self.current = Some(candidate);
        true
    }

    fn fall_step(&mut self) {
        let Some(piece) = self.current else {
            return;
        };
        let lowered = piece.shifted(0, 1);
        if lowered.collides(&self.board) {
            self.lock(piece);
        } else {
            trace!("fall to row {}", lowered.y);
            self.current = Some(lowered);
        }
    }

    fn lock(&mut self, piece: ActivePiece) {
        debug!("locking {} at ({}, {})", piece.template.name, piece.x, piece.y);
        commit_placement(&mut self.board, &piece);
        self.current = None;
        self.events.push(Event::Sound(SoundEvent::Lock));

        let cleared = self.board.clear_full_rows() as u32;
        match self.stats.apply_line_clear(cleared) {
            Some(ClearOutcome::LevelUp { level }) => {
                info!("level up: {level}");
                self.events.push(Event::Sound(SoundEvent::LevelUp));
                self.push_stats();
            }
            Some(ClearOutcome::LinesCleared { count }) => {
                debug!("cleared {count} line(s)");
                self.events.push(Event::Sound(SoundEvent::LineClear));
                self.push_stats();
            }
            None => {}
        }
        self.spawn();
    }

    fn spawn(&mut self) {
        let fresh = ActivePiece::spawn(pick_random(&mut self.rng), self.board.width());
        let current = std::mem::replace(&mut self.next, fresh);
        trace!("spawning {}, next is {}", current.template.name, self.next.template.name);

        let blocked = current.collides(&self.board);
        self.current = Some(current);
        self.since_drop = Duration::ZERO;
        if blocked {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        match serde_json::to_string(&self.stats) {
            Ok(summary) => info!("game over: {summary}"),
            Err(err) => info!("game over (summary unavailable: {err})"),
        }
        self.events.push(Event::Sound(SoundEvent::GameOver));
        self.push_stats();
    }

    fn push_stats(&mut self) {
        self.events.push(Event::Stats(self.stats));
    }

    #[doc(hidden)]
    pub fn set_current_for_test(&mut self, piece: ActivePiece) {
        self.current = Some(piece);
    }

    #[doc(hidden)]
    pub fn set_next_for_test(&mut self, template: &'static PieceTemplate) {
        self.next = ActivePiece::spawn(template, self.board.width());
    }

    #[doc(hidden)]
    pub fn board_mut_for_test(&mut self) -> &mut Board {
        &mut self.board
    }

    #[doc(hidden)]
    pub fn set_stats_for_test(&mut self, stats: Stats) {
        self.stats = stats;
    }
}
