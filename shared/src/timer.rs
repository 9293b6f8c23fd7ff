//! Countdown timer used for the jump window and the jump cooldown.
//!
//! The timer is ticked by its owner (it never reads global time) and reports expiry
//! both through the return value of [`CountdownTimer::tick`] and an optional callback.

use std::fmt;

type ExpiryCallback = Box<dyn FnMut() + Send + Sync>;

/// A time-bounded interval that counts `remaining` down from `duration` to zero.
pub struct CountdownTimer {
    duration: f32,
    remaining: f32,
    running: bool,
    on_expire: Option<ExpiryCallback>,
}

impl CountdownTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: duration.max(0.0),
            running: false,
            on_expire: None,
        }
    }

    /// Register the zero-argument callback fired when the timer runs out.
    pub fn with_on_expire(mut self, callback: impl FnMut() + Send + Sync + 'static) -> Self {
        self.set_on_expire(callback);
        self
    }

    pub fn set_on_expire(&mut self, callback: impl FnMut() + Send + Sync + 'static) {
        self.on_expire = Some(Box::new(callback));
    }

    /// Reset to the full duration and start counting. Restarts a running timer.
    pub fn start(&mut self) {
        self.remaining = self.duration.max(0.0);
        self.running = true;
    }

    /// Halt without reaching zero. Does not fire the expiry callback.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns `true` on the tick the timer expires. A timer with a non-positive
    /// duration expires on its first tick after [`start`](Self::start).
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }

        self.remaining -= dt.max(0.0);
        if self.remaining > 0.0 {
            return false;
        }

        self.remaining = 0.0;
        self.running = false;
        if let Some(callback) = self.on_expire.as_mut() {
            callback();
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed fraction of the duration: 0 at start, 1 at expiry.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

impl fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("duration", &self.duration)
            .field("remaining", &self.remaining)
            .field("running", &self.running)
            .field("on_expire", &self.on_expire.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_start_resets_and_runs() {
        let mut timer = CountdownTimer::new(0.5);
        assert!(!timer.is_running());
        assert_eq!(timer.duration(), 0.5);
        assert_eq!(timer.progress(), 0.0);

        timer.start();
        timer.tick(0.2);
        assert!((timer.remaining() - 0.3).abs() < 1e-6);

        // Restart while running goes back to full duration
        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 0.5);
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn test_tick_is_noop_when_stopped() {
        let mut timer = CountdownTimer::new(1.0);
        assert!(!timer.tick(5.0));
        assert_eq!(timer.remaining(), 1.0);
    }

    #[test]
    fn test_expires_exactly_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let mut timer = CountdownTimer::new(0.5).with_on_expire(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        timer.start();

        let steps = [0.1, 0.0, 0.15, 0.2, 0.1, 0.3, 0.3];
        let mut expirations = 0;
        for dt in steps {
            if timer.tick(dt) {
                expirations += 1;
                assert_eq!(timer.progress(), 1.0);
            }
        }

        assert_eq!(expirations, 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn test_stop_does_not_fire_callback() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let mut timer = CountdownTimer::new(0.5);
        timer.set_on_expire(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        timer.start();
        timer.tick(0.1);
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.tick(1.0));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut timer = CountdownTimer::new(0.5);
        timer.start();
        let mut last = timer.progress();
        while timer.is_running() {
            timer.tick(0.02);
            let p = timer.progress();
            assert!(p >= last);
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_zero_duration_expires_on_first_tick() {
        let mut timer = CountdownTimer::new(0.0);
        assert_eq!(timer.progress(), 1.0);
        timer.start();
        assert!(timer.is_running());
        assert!(timer.tick(0.0));
        assert!(!timer.is_running());

        let mut negative = CountdownTimer::new(-1.0);
        negative.start();
        assert_eq!(negative.remaining(), 0.0);
        assert_eq!(negative.progress(), 1.0);
        assert!(negative.tick(0.016));
    }
}
