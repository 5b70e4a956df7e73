use std::time::Instant;

/// Monotonic time source, seconds since an arbitrary epoch.
///
/// Wave animation is a pure function of the `now` values read from a clock,
/// so swapping in a scripted clock makes phase and envelope math fully
/// reproducible.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`], shared process-wide.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
        assert!(first >= 0.0);
    }
}
