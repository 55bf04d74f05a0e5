//! Tick gating
//!
//! The browser calls us once per animation frame; the simulation should only
//! advance once per fixed interval. `TickClock` decides which frames tick.

use serde::{Deserialize, Serialize};

/// How the clock catches up after a tick fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockMode {
    /// Advance the last-tick mark by exactly one interval. At most one tick
    /// per frame, so a slow frame rate makes the game lag behind wall time.
    #[default]
    Fixed,
    /// Move the last-tick mark to the current frame time. Time in excess of
    /// the interval is dropped instead of accumulating.
    Resync,
}

/// Fixed-interval gate over frame timestamps (milliseconds)
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: f64,
    mode: ClockMode,
    last: Option<f64>,
}

impl TickClock {
    pub fn new(interval_ms: f64, mode: ClockMode) -> Self {
        assert!(interval_ms > 0.0, "tick interval must be positive");
        Self {
            interval: interval_ms,
            mode,
            last: None,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Frame callback: returns true if a tick is due at `now`
    ///
    /// The first frame only starts the clock.
    pub fn poll(&mut self, now: f64) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return false;
        };
        if now - last > self.interval {
            self.last = Some(match self.mode {
                ClockMode::Fixed => last + self.interval,
                ClockMode::Resync => now,
            });
            true
        } else {
            false
        }
    }

    /// Forget the start time (next poll restarts the clock)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_starts_clock() {
        let mut clock = TickClock::new(200.0, ClockMode::Fixed);
        assert!(!clock.poll(1000.0));
        assert!(!clock.poll(1150.0));
        // Exactly one interval is not enough: elapsed must exceed it
        assert!(!clock.poll(1200.0));
        assert!(clock.poll(1201.0));
    }

    #[test]
    fn test_fixed_mode_drifts() {
        let mut clock = TickClock::new(200.0, ClockMode::Fixed);
        clock.poll(0.0);
        // A long stall yields one tick per frame, not a burst
        assert!(clock.poll(1000.0));
        assert!(clock.poll(1001.0));
        assert!(clock.poll(1002.0));
        assert!(clock.poll(1003.0));
        // Mark is now 800, and 1004 - 800 still exceeds the interval
        assert!(clock.poll(1004.0));
        assert!(!clock.poll(1005.0));
    }

    #[test]
    fn test_resync_mode_drops_backlog() {
        let mut clock = TickClock::new(200.0, ClockMode::Resync);
        clock.poll(0.0);
        assert!(clock.poll(1000.0));
        assert!(!clock.poll(1001.0));
        assert!(!clock.poll(1200.0));
        assert!(clock.poll(1201.0));
    }

    #[test]
    fn test_reset_restarts() {
        let mut clock = TickClock::new(100.0, ClockMode::Fixed);
        clock.poll(0.0);
        clock.reset();
        assert!(!clock.poll(500.0));
        assert!(clock.poll(601.0));
    }
}
