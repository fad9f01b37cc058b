use std::f32::consts::TAU;
use std::time::Duration;

use anyhow::Context;
use log::{debug, warn};
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crazy_blocks::config::{ATTACK_SECS, DECAY_FLOOR, MASTER_VOLUME, SAMPLE_RATE};
use crazy_blocks::{AudioNotifier, SoundEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// One oscillator note inside a cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub secs: f32,
    pub wave: Waveform,
    pub volume: f32,
    pub start_secs: f32,
}

const fn tone(freq_hz: f32, secs: f32, wave: Waveform, volume: f32, start_secs: f32) -> Tone {
    Tone {
        freq_hz,
        secs,
        wave,
        volume,
        start_secs,
    }
}

use Waveform::{Sawtooth, Sine, Square};

const MOVE: [Tone; 1] = [tone(200.0, 0.1, Square, 0.3, 0.0)];
const ROTATE: [Tone; 1] = [tone(300.0, 0.1, Sawtooth, 0.3, 0.0)];
const LOCK: [Tone; 1] = [tone(150.0, 0.2, Sine, 0.4, 0.0)];
const LINE_CLEAR: [Tone; 3] = [
    tone(400.0, 0.3, Sine, 0.5, 0.0),
    tone(500.0, 0.3, Sine, 0.5, 0.05),
    tone(600.0, 0.3, Sine, 0.5, 0.1),
];
const LEVEL_UP: [Tone; 4] = [
    tone(300.0, 0.2, Sine, 0.5, 0.0),
    tone(400.0, 0.2, Sine, 0.5, 0.1),
    tone(500.0, 0.2, Sine, 0.5, 0.2),
    tone(600.0, 0.3, Sine, 0.5, 0.3),
];
const GAME_OVER: [Tone; 4] = [
    tone(300.0, 0.3, Sawtooth, 0.6, 0.0),
    tone(250.0, 0.3, Sawtooth, 0.6, 0.2),
    tone(200.0, 0.3, Sawtooth, 0.6, 0.4),
    tone(150.0, 0.5, Sawtooth, 0.6, 0.6),
];

pub fn tones(event: SoundEvent) -> &'static [Tone] {
    match event {
        SoundEvent::Move => &MOVE,
        SoundEvent::Rotate => &ROTATE,
        SoundEvent::Lock => &LOCK,
        SoundEvent::LineClear => &LINE_CLEAR,
        SoundEvent::LevelUp => &LEVEL_UP,
        SoundEvent::GameOver => &GAME_OVER,
    }
}

impl Tone {
    pub fn end_secs(&self) -> f32 {
        self.start_secs + self.secs
    }

    /// Short linear attack to the peak, then an exponential fall to
    /// `DECAY_FLOOR` at the end of the note.
    pub fn envelope(&self, local: f32) -> f32 {
        let peak = self.volume * MASTER_VOLUME;
        if local < 0.0 || local >= self.secs {
            return 0.0;
        }
        if local < ATTACK_SECS {
            return peak * local / ATTACK_SECS;
        }
        let progress = (local - ATTACK_SECS) / (self.secs - ATTACK_SECS);
        peak * (DECAY_FLOOR / peak).powf(progress)
    }

    pub fn sample(&self, t: f32) -> f32 {
        let local = t - self.start_secs;
        let gain = self.envelope(local);
        if gain == 0.0 {
            return 0.0;
        }
        let cycle = (self.freq_hz * local).fract();
        let osc = match self.wave {
            Waveform::Sine => (TAU * cycle).sin(),
            Waveform::Square => {
                if cycle < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * cycle - 1.0,
        };
        osc * gain
    }
}

/// Mono source that renders a set of overlapping tones.
#[derive(Clone, Debug)]
pub struct Cue {
    tones: &'static [Tone],
    frame: u64,
    total_frames: u64,
}

impl Cue {
    pub fn new(tones: &'static [Tone]) -> Self {
        let end = tones.iter().map(Tone::end_secs).fold(0.0_f32, f32::max);
        Self {
            tones,
            frame: 0,
            total_frames: (end * SAMPLE_RATE as f32).ceil() as u64,
        }
    }
}

impl Iterator for Cue {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.total_frames {
            return None;
        }
        let t = self.frame as f32 / SAMPLE_RATE as f32;
        self.frame += 1;
        Some(self.tones.iter().map(|tone| tone.sample(t)).sum())
    }
}

impl Source for Cue {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total_frames - self.frame) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f64(
            self.total_frames as f64 / f64::from(SAMPLE_RATE),
        ))
    }
}

struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Synthesized sound effects. Falls back to silence when no output device
/// can be opened.
pub struct SfxPlayer {
    output: Option<Output>,
    muted: bool,
}

impl SfxPlayer {
    pub fn open() -> Self {
        let output = match Self::open_output() {
            Ok(output) => Some(output),
            Err(err) => {
                warn!("sound disabled: {err:#}");
                None
            }
        };
        Self {
            output,
            muted: false,
        }
    }

    fn open_output() -> anyhow::Result<Output> {
        let (stream, handle) =
            OutputStream::try_default().context("opening default audio output")?;
        Ok(Output {
            _stream: stream,
            handle,
        })
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        debug!("muted: {}", self.muted);
        self.muted
    }

    fn play(&self, output: &Output, event: SoundEvent) -> anyhow::Result<()> {
        let sink = Sink::try_new(&output.handle).context("creating sfx sink")?;
        sink.append(Cue::new(tones(event)));
        sink.detach();
        Ok(())
    }
}

impl AudioNotifier for SfxPlayer {
    fn notify(&mut self, event: SoundEvent) {
        if self.muted {
            return;
        }
        let Some(output) = self.output.as_ref() else {
            return;
        };
        debug!("playing {event:?}");
        if let Err(err) = self.play(output, event) {
            warn!("{event:?} sound failed: {err:#}");
        }
    }
}
