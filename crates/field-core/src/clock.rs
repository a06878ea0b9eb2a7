//! Time sources, frame scheduling capabilities and the link rebuild cadence.

use std::cell::Cell;

/// Monotonic seconds since an arbitrary origin.
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// Wall clock backed by `instant`, which maps to `performance.now()` on the web.
#[derive(Debug)]
pub struct InstantClock {
    origin: instant::Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for deterministic stepping.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_secs(&self) -> f64 {
        (**self).now_secs()
    }
}

/// Asks the host to call back once more before the next repaint.
pub trait FrameScheduler {
    fn request_frame(&mut self);
    /// Drop any request that has not fired yet. Safe to call when none is pending.
    fn cancel_frame(&mut self);
}

/// Records requests instead of scheduling them.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    pub pending: bool,
    pub requested: usize,
    pub cancelled: usize,
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requested += 1;
    }

    fn cancel_frame(&mut self) {
        if self.pending {
            self.cancelled += 1;
        }
        self.pending = false;
    }
}

/// Fires during the first `window` seconds of every `interval`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RebuildThrottle {
    pub interval: f64,
    pub window: f64,
}

impl RebuildThrottle {
    pub fn new(interval: f64, window: f64) -> Self {
        Self { interval, window }
    }

    #[inline]
    pub fn due(&self, now_secs: f64) -> bool {
        if !(self.interval > 0.0) || !now_secs.is_finite() {
            return false;
        }
        now_secs.rem_euclid(self.interval) < self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_fires_at_start_of_each_interval() {
        let t = RebuildThrottle::new(0.1, 0.016);
        assert!(t.due(0.0));
        assert!(t.due(0.205));
        assert!(!t.due(0.05));
        assert!(!t.due(0.13));
    }

    #[test]
    fn throttle_rejects_bad_inputs() {
        assert!(!RebuildThrottle::new(0.0, 0.016).due(1.0));
        assert!(!RebuildThrottle::new(0.1, 0.016).due(f64::NAN));
    }

    #[test]
    fn manual_clock_advances() {
        let c = ManualClock::new(1.0);
        c.advance(0.5);
        assert_eq!(c.now_secs(), 1.5);
        c.set(0.0);
        assert_eq!((&c).now_secs(), 0.0);
    }

    #[test]
    fn manual_scheduler_counts_only_pending_cancels() {
        let mut s = ManualScheduler::default();
        s.cancel_frame();
        assert_eq!(s.cancelled, 0);
        s.request_frame();
        s.cancel_frame();
        assert_eq!((s.requested, s.cancelled, s.pending), (1, 1, false));
    }
}
