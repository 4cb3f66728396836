//! Frame-driven timers. Time is a monotonic `Duration` supplied by the caller
//! (egui's input clock in the app), so every timer is owned state and is
//! cancelled simply by dropping it.

use std::time::Duration;

/// Periodic timer, like `setInterval`
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_fire: Duration,
}

impl IntervalTimer {
    pub fn start(period: Duration, now: Duration) -> Self {
        Self {
            period,
            next_fire: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks elapsed since the last poll
    pub fn poll(&mut self, now: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        let mut fired = 0;
        while now >= self.next_fire {
            self.next_fire += self.period;
            fired += 1;
        }
        fired
    }

    /// Time until the next tick (for repaint scheduling)
    pub fn remaining(&self, now: Duration) -> Duration {
        self.next_fire.saturating_sub(now)
    }
}

/// One-shot progress timeline from 0 to 1 over `duration`
#[derive(Debug, Clone)]
pub struct Timeline {
    started: Duration,
    duration: Duration,
}

impl Timeline {
    pub fn start(duration: Duration, now: Duration) -> Self {
        Self {
            started: now,
            duration,
        }
    }

    /// Normalized progress in [0, 1]
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_interval_fires_once_per_period() {
        let mut t = IntervalTimer::start(ms(4000), ms(0));
        assert_eq!(t.poll(ms(3999)), 0);
        assert_eq!(t.poll(ms(4000)), 1);
        assert_eq!(t.poll(ms(4001)), 0);
        assert_eq!(t.poll(ms(8000)), 1);
    }

    #[test]
    fn test_interval_catches_up_after_stall() {
        let mut t = IntervalTimer::start(ms(100), ms(0));
        assert_eq!(t.poll(ms(350)), 3);
        assert_eq!(t.remaining(ms(350)), ms(50));
    }

    #[test]
    fn test_zero_period_never_fires() {
        let mut t = IntervalTimer::start(Duration::ZERO, ms(0));
        assert_eq!(t.poll(ms(1000)), 0);
    }

    #[test]
    fn test_timeline_progress() {
        let t = Timeline::start(ms(3500), ms(1000));
        assert_eq!(t.progress(ms(500)), 0.0);
        assert_eq!(t.progress(ms(1000)), 0.0);
        assert!((t.progress(ms(2750)) - 0.5).abs() < 1e-6);
        assert_eq!(t.progress(ms(4500)), 1.0);
        assert!(t.is_finished(ms(9000)));
    }
}
