//! Countdown timers for study sessions.

use serde::{Deserialize, Serialize};
use crate::id::TimerId;
use crate::Time;

/// A named countdown timer. Durations are in whole seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    /// Unique identifier
    pub id: TimerId,

    /// Display name
    pub name: String,

    /// Full duration in seconds
    pub duration: u64,

    /// Whether the countdown is running
    pub is_running: bool,

    /// Seconds remaining
    pub time_left: u64,

    /// When created
    pub created_at: Time,
}

impl Timer {
    /// Create a stopped timer with the full duration remaining.
    pub fn new(name: impl Into<String>, duration: u64) -> Self {
        Self {
            id: TimerId::new(),
            name: name.into(),
            duration,
            is_running: false,
            time_left: duration,
            created_at: chrono::Utc::now(),
        }
    }

    /// Build a duration from an hours/minutes/seconds triple, saturating at `u64::MAX`.
    pub fn duration_from_hms(hours: u64, minutes: u64, seconds: u64) -> u64 {
        hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds)
    }

    /// Start counting down.
    pub fn start(&mut self) {
        self.is_running = true;
    }

    /// Pause without losing the remaining time.
    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Stop and restore the full duration.
    pub fn reset(&mut self) {
        self.time_left = self.duration;
        self.is_running = false;
    }

    /// Advance a running timer by `elapsed` seconds.
    ///
    /// Returns `true` if this tick made the timer expire.
    pub fn tick(&mut self, elapsed: u64) -> bool {
        if !self.is_running || self.time_left == 0 {
            return false;
        }
        self.time_left = self.time_left.saturating_sub(elapsed);
        if self.time_left == 0 {
            self.is_running = false;
            return true;
        }
        false
    }

    /// Whether the countdown has reached zero.
    pub fn is_finished(&self) -> bool {
        self.time_left == 0
    }

    /// Merge a partial update.
    pub fn apply(&mut self, patch: &TimerPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
            self.time_left = self.time_left.min(duration);
        }
    }

    /// Remaining time as `HH:MM:SS`.
    pub fn display_time_left(&self) -> String {
        let h = self.time_left / 3600;
        let m = (self.time_left % 3600) / 60;
        let s = self.time_left % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }
}

/// Partial update for a timer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerPatch {
    pub name: Option<String>,
    pub duration: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_stopped_and_full() {
        let timer = Timer::new("Pomodoro", 1500);
        assert!(!timer.is_running);
        assert_eq!(timer.time_left, 1500);
    }

    #[test]
    fn test_tick_only_when_running() {
        let mut timer = Timer::new("Pomodoro", 10);
        assert!(!timer.tick(3));
        assert_eq!(timer.time_left, 10);

        timer.start();
        assert!(!timer.tick(3));
        assert_eq!(timer.time_left, 7);
    }

    #[test]
    fn test_tick_expires_and_stops() {
        let mut timer = Timer::new("Break", 5);
        timer.start();
        assert!(timer.tick(60));
        assert!(timer.is_finished());
        assert!(!timer.is_running);
        assert!(!timer.tick(1));
    }

    #[test]
    fn test_pause_and_reset() {
        let mut timer = Timer::new("Focus", 100);
        timer.start();
        timer.tick(40);
        timer.pause();
        assert_eq!(timer.time_left, 60);
        assert!(!timer.is_running);

        timer.start();
        timer.reset();
        assert_eq!(timer.time_left, 100);
        assert!(!timer.is_running);
    }

    #[test]
    fn test_duration_from_hms_and_display() {
        let d = Timer::duration_from_hms(1, 2, 3);
        assert_eq!(d, 3723);
        assert_eq!(Timer::new("x", d).display_time_left(), "01:02:03");
    }

    #[test]
    fn test_duration_from_hms_saturates() {
        assert_eq!(Timer::duration_from_hms(u64::MAX, 0, 0), u64::MAX);
        assert_eq!(Timer::duration_from_hms(0, u64::MAX, 1), u64::MAX);
        assert_eq!(Timer::duration_from_hms(1, 1, u64::MAX), u64::MAX);
    }

    #[test]
    fn test_shrinking_duration_clamps_time_left() {
        let mut timer = Timer::new("Focus", 100);
        timer.apply(&TimerPatch {
            duration: Some(30),
            ..Default::default()
        });
        assert_eq!(timer.duration, 30);
        assert_eq!(timer.time_left, 30);
    }
}
