//! Monotonic millisecond clock and wraparound-safe deadline comparison
//!
//! The driver never sleeps between phases; it arms millisecond deadlines and
//! re-checks them on every poll. The counter is expected to wrap at 2^32
//! (roughly 49.7 days), so deadline comparison must use modular arithmetic,
//! not direct inequality.

/// Source of monotonic milliseconds, injected into the driver.
///
/// On embedded targets wrap whatever tick source the platform provides (for
/// Embassy, `Instant::now().as_millis() as u32`); on the host use
/// [`StdClock`]. The counter may wrap; all driver comparisons tolerate it.
pub trait MonotonicClock {
    /// Current time in milliseconds. Wraps at 2^32.
    fn now_ms(&mut self) -> u32;
}

/// Wraparound-safe "has this deadline passed" comparison.
///
/// Treats the half-range ahead of `now` as the future and the half-range
/// behind as the past, so a deadline of `2^32 - 10` with `now = 5` reads as
/// already passed.
#[inline]
pub fn deadline_passed(now: u32, deadline: u32) -> bool {
    now.wrapping_sub(deadline) as i32 >= 0
}

/// Host-side clock backed by `std::time::Instant`.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct StdClock {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Create a clock whose zero point is now.
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl MonotonicClock for StdClock {
    fn now_ms(&mut self) -> u32 {
        self.epoch.elapsed().as_millis() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_in_the_past_has_passed() {
        assert!(deadline_passed(1000, 999));
        assert!(deadline_passed(1000, 1000));
        assert!(deadline_passed(1000, 0));
    }

    #[test]
    fn deadline_in_the_future_has_not_passed() {
        assert!(!deadline_passed(1000, 1001));
        assert!(!deadline_passed(0, 200));
    }

    #[test]
    fn deadline_just_before_wraparound_has_passed() {
        // The counter wrapped: "now" = 5, deadline armed at 2^32 - 10.
        assert!(deadline_passed(5, u32::MAX - 9));
    }

    #[test]
    fn deadline_just_after_wraparound_has_not_passed() {
        // Deadline armed shortly before wrap for shortly after wrap.
        assert!(!deadline_passed(u32::MAX - 9, 5));
    }

    #[test]
    fn elapsed_measurement_spans_wraparound() {
        // A 200 ms delay armed at 2^32 - 100 expires at 100.
        let deadline = (u32::MAX - 99).wrapping_add(200);
        assert_eq!(deadline, 100);
        assert!(!deadline_passed(u32::MAX - 50, deadline));
        assert!(!deadline_passed(20, deadline));
        assert!(deadline_passed(100, deadline));
        assert!(deadline_passed(150, deadline));
    }
}
