//! What the core tells the outside world, and what it accepts from it.
//!
//! The game never calls a collaborator directly. It queues [`Event`]s that the
//! frontend drains once per frame and hands to [`dispatch`].

use serde::Serialize;

use crate::board::Board;
use crate::collision::ActivePiece;
use crate::game::Phase;
use crate::progression::Stats;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundEvent {
    Move,
    Rotate,
    Lock,
    LineClear,
    LevelUp,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Sound(SoundEvent),
    Stats(Stats),
}

/// Player intent, already decoded from whatever input device produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    SoftDrop,
    Rotate,
    TogglePause,
    Restart,
}

pub trait AudioNotifier {
    fn notify(&mut self, event: SoundEvent);
}

pub trait ScoreSink {
    fn update(&mut self, stats: &Stats);
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub board: &'a Board,
    pub current: Option<&'a ActivePiece>,
    pub next: &'a ActivePiece,
    pub stats: Stats,
    pub phase: Phase,
    pub paused: bool,
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Routes queued events to their sinks in order.
pub fn dispatch<I, A, S>(events: I, audio: &mut A, scores: &mut S)
where
    I: IntoIterator<Item = Event>,
    A: AudioNotifier + ?Sized,
    S: ScoreSink + ?Sized,
{
    for event in events {
        match event {
            Event::Sound(sound) => audio.notify(sound),
            Event::Stats(stats) => scores.update(&stats),
        }
    }
}
