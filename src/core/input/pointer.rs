//=========================================================================
// Pointer Channel
//=========================================================================
//
// Coalescing accumulator for continuous pointer input.
//
// Pointer motion is naturally accumulative rather than discrete, so it
// does not queue: deltas add up between engine reads and individual
// motion callbacks lose their separate identity. Button state carries no
// history either — the mask reflects current physical state and is
// replaced wholesale on every change (last-writer-wins).
//
// Producer (host thread) and consumer (engine thread) run on real OS
// threads, so the accumulator is built on atomics. Relaxed ordering is
// sufficient: each field is independent and no other data is published
// through these loads and stores.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

//=== PointerState ========================================================

/// Snapshot of pointer input returned to the engine once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerState {
    /// Horizontal motion accumulated since the previous read.
    pub dx: i32,

    /// Vertical motion accumulated since the previous read.
    pub dy: i32,

    /// Current button bitmask (bit 0 = left/fire, bit 1 = right/strafe,
    /// bit 2 = middle/use). Sticky: reflects physical state, not an edge,
    /// and stays set until an explicit release replaces the mask.
    pub buttons: u32,
}

//=== PointerChannel ======================================================

/// Shared pointer-input accumulator.
///
/// Deltas accumulate additively with standard two's-complement wraparound
/// (real input devices bound per-event deltas, so wraparound only occurs
/// after an implausible amount of unread motion).
pub(crate) struct PointerChannel {
    dx: AtomicI32,
    dy: AtomicI32,
    buttons: AtomicU32,
}

impl PointerChannel {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            dx: AtomicI32::new(0),
            dy: AtomicI32::new(0),
            buttons: AtomicU32::new(0),
        }
    }

    //--- Producer Side ----------------------------------------------------

    /// Adds relative motion to the accumulated deltas.
    pub(crate) fn add_motion(&self, dx: i32, dy: i32) {
        self.dx.fetch_add(dx, Ordering::Relaxed);
        self.dy.fetch_add(dy, Ordering::Relaxed);
    }

    /// Replaces the button mask unconditionally.
    pub(crate) fn set_buttons(&self, mask: u32) {
        self.buttons.store(mask, Ordering::Relaxed);
    }

    //--- Consumer Side ----------------------------------------------------

    /// Returns the current button mask and the deltas accumulated since
    /// the last call, then resets the deltas to zero. The button mask is
    /// not reset.
    pub(crate) fn take(&self) -> PointerState {
        PointerState {
            dx: self.dx.swap(0, Ordering::Relaxed),
            dy: self.dy.swap(0, Ordering::Relaxed),
            buttons: self.buttons.load(Ordering::Relaxed),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_channel_reads_zero() {
        let channel = PointerChannel::new();
        assert_eq!(channel.take(), PointerState::default());
    }

    #[test]
    fn deltas_accumulate_between_reads() {
        let channel = PointerChannel::new();
        channel.add_motion(3, -2);
        channel.add_motion(-1, 7);
        channel.add_motion(10, 0);

        let state = channel.take();
        assert_eq!((state.dx, state.dy), (12, 5));
    }

    #[test]
    fn read_resets_deltas_to_zero() {
        let channel = PointerChannel::new();
        channel.add_motion(5, 5);
        channel.take();

        let state = channel.take();
        assert_eq!((state.dx, state.dy), (0, 0));
    }

    #[test]
    fn button_mask_is_last_writer_wins() {
        let channel = PointerChannel::new();
        channel.set_buttons(0b101);
        channel.set_buttons(0b010);

        assert_eq!(channel.take().buttons, 0b010);
    }

    #[test]
    fn button_mask_is_sticky_across_reads() {
        let channel = PointerChannel::new();
        channel.set_buttons(0b001);

        assert_eq!(channel.take().buttons, 0b001);
        assert_eq!(channel.take().buttons, 0b001);
        assert_eq!(channel.take().buttons, 0b001);

        channel.set_buttons(0);
        assert_eq!(channel.take().buttons, 0);
    }

    #[test]
    fn delta_accumulation_wraps() {
        let channel = PointerChannel::new();
        channel.add_motion(i32::MAX, 0);
        channel.add_motion(1, 0);

        assert_eq!(channel.take().dx, i32::MIN);
    }

    #[test]
    fn motion_from_another_thread_is_summed() {
        use std::sync::Arc;

        let channel = Arc::new(PointerChannel::new());
        let producer = Arc::clone(&channel);

        let handle = std::thread::spawn(move || {
            for _ in 0..1000 {
                producer.add_motion(1, -1);
            }
        });
        handle.join().unwrap();

        let state = channel.take();
        assert_eq!((state.dx, state.dy), (1000, -1000));
    }
}
