//! Cancellable timers driven by the host frame clock
//!
//! Nothing here spawns threads or reads a wall clock: the host passes the
//! current time (seconds) in, and a timer only fires when polled.

/// One-shot timer. Fires once when polled at or after its deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    deadline: Option<f64>,
}

impl Timer {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm (or re-arm) to fire `delay` seconds after `now`
    pub fn schedule(&mut self, now: f64, delay: f64) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, on the first poll at or past the deadline
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Trailing-edge debounce: every `call` pushes the deadline back, so it
/// fires at most once per idle gap of `wait` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debounce {
    wait: f64,
    timer: Timer,
}

impl Debounce {
    pub fn new(wait: f64) -> Self {
        Self {
            wait,
            timer: Timer::new(),
        }
    }

    pub fn call(&mut self, now: f64) {
        self.timer.schedule(now, self.wait);
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn poll(&mut self, now: f64) -> bool {
        self.timer.poll(now)
    }
}
