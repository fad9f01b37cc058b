use macroquad::prelude::*;

use crazy_blocks::Command;

const INITIAL_REPEAT_DELAY: f32 = 0.2;
const REPEAT_DELAY: f32 = 0.1;

/// Key auto-repeat: fires on press, again after the initial delay, then at the
/// repeat rate while held.
#[derive(Debug, Default, Clone, Copy)]
pub struct Repeater {
    timer: f32,
}

impl Repeater {
    pub fn update(&mut self, pressed: bool, held: bool, dt: f32) -> bool {
        if pressed {
            self.timer = INITIAL_REPEAT_DELAY;
            return true;
        }
        if !held {
            self.timer = 0.0;
            return false;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.timer = REPEAT_DELAY;
            return true;
        }
        false
    }
}

#[derive(Debug, Default)]
pub struct Controls {
    left: Repeater,
    right: Repeater,
    down: Repeater,
}

impl Controls {
    /// Commands for this frame, in the order they should be applied.
    pub fn poll(&mut self, dt: f32, game_over: bool) -> Vec<Command> {
        let mut commands = Vec::new();
        let mut repeat = |repeater: &mut Repeater, key: KeyCode, command: Command| {
            if repeater.update(is_key_pressed(key), is_key_down(key), dt) {
                commands.push(command);
            }
        };
        repeat(&mut self.left, KeyCode::Left, Command::Left);
        repeat(&mut self.right, KeyCode::Right, Command::Right);
        repeat(&mut self.down, KeyCode::Down, Command::SoftDrop);

        if is_key_pressed(KeyCode::Up) {
            commands.push(Command::Rotate);
        }
        if is_key_pressed(KeyCode::Space) {
            commands.push(Command::TogglePause);
        }
        if is_key_pressed(KeyCode::R) || (game_over && is_key_pressed(KeyCode::Enter)) {
            commands.push(Command::Restart);
        }
        commands
    }

    pub fn mute_pressed(&self) -> bool {
        is_key_pressed(KeyCode::M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_fires_immediately() {
        let mut r = Repeater::default();
        assert!(r.update(true, true, 0.016));
    }

    #[test]
    fn hold_waits_for_initial_delay_then_repeats() {
        let mut r = Repeater::default();
        assert!(r.update(true, true, 0.0));
        assert!(!r.update(false, true, 0.15));
        assert!(r.update(false, true, 0.06));
        assert!(!r.update(false, true, 0.05));
        assert!(r.update(false, true, 0.06));
    }

    #[test]
    fn release_resets() {
        let mut r = Repeater::default();
        r.update(true, true, 0.0);
        assert!(!r.update(false, false, 0.5));
        assert!(!r.update(false, false, 0.5));
    }
}
