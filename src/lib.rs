//! Simulation core for a falling-block puzzle with custom piece shapes.
//!
//! Nothing in here draws or plays sound; the frontend drains [`events::Event`]s
//! from the [`game::Game`] and feeds it [`events::Command`]s.

pub mod board;
pub mod collision;
pub mod config;
pub mod events;
pub mod game;
pub mod pieces;
pub mod progression;

pub use board::Board;
pub use collision::{collides, commit_placement, ActivePiece};
pub use events::{dispatch, AudioNotifier, Command, Event, Frame, Renderer, ScoreSink, SoundEvent};
pub use game::{Game, Phase};
pub use pieces::{pick_random, rotate, ColorToken, PieceTemplate, ShapeMask, CATALOG};
pub use progression::{ClearOutcome, Stats};
