use std::time::Duration;

use serde::Serialize;

use crate::config::{
    BASE_FALL_INTERVAL_MS, FALL_SPEEDUP_PER_LEVEL_MS, LINES_PER_LEVEL, MIN_FALL_INTERVAL_MS,
    POINTS_PER_LINE, SOFT_DROP_POINTS,
};

/// Score, lines, level and the fall cadence derived from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub fall_interval_ms: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            fall_interval_ms: BASE_FALL_INTERVAL_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearOutcome {
    LinesCleared { count: u32 },
    LevelUp { level: u32 },
}

pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

pub fn fall_interval_for_level(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(FALL_SPEEDUP_PER_LEVEL_MS);
    BASE_FALL_INTERVAL_MS
        .saturating_sub(speedup)
        .max(MIN_FALL_INTERVAL_MS)
}

impl Stats {
    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.fall_interval_ms))
    }

    /// Books `count` cleared rows. Scoring uses the level in force before the
    /// clear; level and fall interval are recomputed afterwards.
    pub fn apply_line_clear(&mut self, count: u32) -> Option<ClearOutcome> {
        if count == 0 {
            return None;
        }
        self.lines += count;
        self.score += count * POINTS_PER_LINE * self.level;

        let level = level_for_lines(self.lines);
        let leveled_up = level > self.level;
        self.level = level;
        self.fall_interval_ms = fall_interval_for_level(level);

        Some(if leveled_up {
            ClearOutcome::LevelUp { level }
        } else {
            ClearOutcome::LinesCleared { count }
        })
    }

    pub fn award_soft_drop(&mut self) {
        self.score += SOFT_DROP_POINTS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stats() {
        let stats = Stats::default();
        assert_eq!(stats.level, 1);
        assert_eq!(stats.fall_interval(), Duration::from_secs(1));
    }

    #[test]
    fn zero_lines_changes_nothing() {
        let mut stats = Stats {
            score: 40,
            lines: 7,
            ..Stats::default()
        };
        let before = stats;
        assert_eq!(stats.apply_line_clear(0), None);
        assert_eq!(stats, before);
    }

    #[test]
    fn score_scales_with_level_before_clear() {
        let mut stats = Stats {
            score: 0,
            lines: 28,
            level: 3,
            fall_interval_ms: fall_interval_for_level(3),
        };
        // 28 + 3 = 31 lines crosses into level 4, but the clear pays at level 3.
        assert_eq!(stats.apply_line_clear(3), Some(ClearOutcome::LevelUp { level: 4 }));
        assert_eq!(stats.score, 3 * 100 * 3);
        assert_eq!(stats.lines, 31);
        assert_eq!(stats.fall_interval_ms, 850);
    }

    #[test]
    fn clear_below_threshold_reports_lines() {
        let mut stats = Stats::default();
        assert_eq!(
            stats.apply_line_clear(2),
            Some(ClearOutcome::LinesCleared { count: 2 })
        );
        assert_eq!(stats.score, 200);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.fall_interval_ms, 1000);
    }

    #[test]
    fn level_and_interval_formulas() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(199), 20);
        assert_eq!(fall_interval_for_level(1), 1000);
        assert_eq!(fall_interval_for_level(2), 950);
        assert_eq!(fall_interval_for_level(19), 100);
        assert_eq!(fall_interval_for_level(20), 100);
        assert_eq!(fall_interval_for_level(500), 100);
    }

    #[test]
    fn soft_drop_is_one_point() {
        let mut stats = Stats::default();
        stats.award_soft_drop();
        stats.award_soft_drop();
        assert_eq!(stats.score, 2);
        assert_eq!(stats.level, 1);
    }

    #[test]
    fn serializes_for_display() {
        let json = serde_json::to_string(&Stats::default()).unwrap();
        assert_eq!(json, r#"{"score":0,"lines":0,"level":1,"fall_interval_ms":1000}"#);
    }
}
