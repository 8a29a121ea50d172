//=========================================================================
// Timing & Yield Bridge
//=========================================================================
//
// Supplies monotonic time to the engine and implements the engine's
// "sleep" request as a yield back to the host.
//
// The engine is written as if `yield_for` blocks. On this target the
// engine owns a dedicated OS thread, so the suspension is a real sleep:
// the host event loop keeps running on the main thread for the whole
// duration, servicing input callbacks and presentation while the engine
// is yielded. Local state of the in-progress tick survives unchanged.
//
// Timestamps wrap at the 32-bit boundary (~49.7 days); callers must use
// wraparound-safe subtraction — see `elapsed_ms`.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== Clock ===============================================================

/// Monotonic millisecond clock anchored at bridge startup.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Clock {
    epoch: Instant,
}

impl Clock {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    //--- Time Queries -----------------------------------------------------

    /// Milliseconds since bridge startup, truncated to 32 bits.
    ///
    /// Monotonically non-decreasing modulo the wrap; suitable for
    /// frame-pacing arithmetic via [`elapsed_ms`].
    pub(crate) fn now_ms(&self) -> u32 {
        self.epoch.elapsed().as_millis() as u32
    }

    //--- Yield ------------------------------------------------------------

    /// Suspends the engine thread for at least `ms` milliseconds,
    /// returning control to the host for the duration.
    ///
    /// A zero request is normalized to 1 ms so the host always gets a
    /// turn; a true zero-yield could monopolize the CPU against the host
    /// scheduler. Execution resumes exactly where it suspended.
    pub(crate) fn yield_for(&self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms.max(1))));
    }
}

//=== Free Functions ======================================================

/// Wraparound-safe elapsed time between two [`Clock::now_ms`] readings.
///
/// Correct even when the 32-bit counter wrapped between `earlier` and
/// `later`, as long as the real gap is under ~49.7 days.
pub fn elapsed_ms(earlier: u32, later: u32) -> u32 {
    later.wrapping_sub(earlier)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_ms_is_non_decreasing() {
        let clock = Clock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(elapsed_ms(a, b) < 1000, "consecutive reads {} -> {}", a, b);
        assert!(b.wrapping_sub(a) as i32 >= 0);
    }

    #[test]
    fn now_ms_tracks_real_time() {
        let clock = Clock::new();
        let before = clock.now_ms();
        thread::sleep(Duration::from_millis(30));
        let after = clock.now_ms();

        let elapsed = elapsed_ms(before, after);
        assert!(elapsed >= 25, "expected >= 25ms, got {}", elapsed);
        assert!(elapsed < 5000, "expected < 5s, got {}", elapsed);
    }

    #[test]
    fn elapsed_ms_handles_wraparound() {
        assert_eq!(elapsed_ms(0xFFFF_FF00, 0x0000_0100), 0x200);
        assert_eq!(elapsed_ms(u32::MAX, 0), 1);
        assert_eq!(elapsed_ms(1234, 1234), 0);
    }

    #[test]
    fn yield_for_zero_still_sleeps() {
        let clock = Clock::new();
        let start = Instant::now();
        clock.yield_for(0);
        assert!(start.elapsed() >= Duration::from_millis(1));
    }

    #[test]
    fn yield_for_waits_at_least_requested_duration() {
        let clock = Clock::new();
        let start = Instant::now();
        clock.yield_for(20);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
