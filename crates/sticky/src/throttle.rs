use core::time::Duration;

/// Number of frames the throttle duration is spread over.
pub const FRAME_TICKS: u32 = 60;

/// Duration handed to the throttle when none is configured.
pub const DEFAULT_RESIZE_DURATION: Duration = Duration::from_millis(1000);

/// Rate limiter for resize-triggered re-measurement.
///
/// At most one call per window is let through. Calls inside the window are
/// dropped, not queued, and never replayed later.
#[derive(Clone, Debug)]
pub struct ResizeThrottle {
    window: Duration,
    last_fired: Option<Duration>,
    /// Calls rejected because they landed inside the window.
    dropped_count: u64,
}

impl ResizeThrottle {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: None,
            dropped_count: 0,
        }
    }

    /// Build a throttle whose window is one frame of `duration` split into
    /// [`FRAME_TICKS`] frames.
    pub fn from_duration(duration: Duration) -> Self {
        Self::new(duration / FRAME_TICKS)
    }

    /// Return the configured window.
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Returns true if the window has elapsed since the last accepted call,
    /// recording `now` as the new start. The first call is always accepted.
    pub fn allow(&mut self, now: Duration) -> bool {
        match self.last_fired {
            Some(start) if now.saturating_sub(start) < self.window => {
                self.dropped_count = self.dropped_count.saturating_add(1);
                false
            }
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }

    /// Return the number of calls dropped so far.
    pub const fn dropped(&self) -> u64 {
        self.dropped_count
    }
}

impl Default for ResizeThrottle {
    fn default() -> Self {
        Self::from_duration(DEFAULT_RESIZE_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_passes() {
        let mut throttle = ResizeThrottle::new(Duration::from_millis(100));
        assert!(throttle.allow(Duration::ZERO));
        assert_eq!(throttle.dropped(), 0);
    }

    #[test]
    fn calls_inside_window_are_dropped() {
        let mut throttle = ResizeThrottle::new(Duration::from_millis(100));
        assert!(throttle.allow(Duration::from_millis(10)));
        assert!(!throttle.allow(Duration::from_millis(50)));
        assert!(!throttle.allow(Duration::from_millis(109)));
        assert_eq!(throttle.dropped(), 2);
    }

    #[test]
    fn call_at_window_edge_passes() {
        let mut throttle = ResizeThrottle::new(Duration::from_millis(100));
        assert!(throttle.allow(Duration::from_millis(10)));
        assert!(throttle.allow(Duration::from_millis(110)));
        assert!(!throttle.allow(Duration::from_millis(150)));
    }

    #[test]
    fn default_window_is_one_frame_of_a_second() {
        let throttle = ResizeThrottle::default();
        assert_eq!(throttle.window(), Duration::from_millis(1000) / 60);
    }
}
