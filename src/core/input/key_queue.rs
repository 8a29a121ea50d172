//=========================================================================
// Key Event Queue
//=========================================================================
//
// Bounded FIFO decoupling the host's asynchronous key callbacks from the
// engine's synchronous per-tick polling.
//
// Architecture:
//   Host thread ──push()──> bounded channel ──poll()──> Engine thread
//
// Queue-full is a defined, silent-drop condition: the producer never
// blocks, the buffer is never corrupted, and the earliest events are the
// ones retained. The engine polls every tick, so sustained overflow
// indicates a starved consumer rather than a producer bug.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::trace;

//=== KeyEvent ============================================================

/// A single key edge (press or release) in engine key-code space.
///
/// Key events are transient: produced by the host, owned by the queue,
/// consumed exactly once by the engine poll and then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// `true` on key down, `false` on key up.
    pub pressed: bool,

    /// Byte-sized engine key code; the platform layer owns the mapping
    /// from host key identifiers into this space.
    pub code: u8,
}

//=== KeyQueue ============================================================

/// Default number of key events held before the queue starts dropping.
pub const DEFAULT_KEY_QUEUE_CAPACITY: usize = 512;

/// Bounded, ordered buffer of [`KeyEvent`]s.
///
/// Both halves of the underlying channel live in this struct; the struct
/// itself is shared between threads, so neither half can disconnect while
/// the queue is alive.
///
/// # Ordering
///
/// Strict FIFO: events are returned to the engine in the exact order the
/// host produced them, across any number of yield cycles.
pub(crate) struct KeyQueue {
    tx: Sender<KeyEvent>,
    rx: Receiver<KeyEvent>,
}

impl KeyQueue {
    //--- Construction -----------------------------------------------------

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self { tx, rx }
    }

    //--- Producer Side ----------------------------------------------------

    /// Enqueues a key event. Called by the host at any time, including
    /// while the engine is yielded.
    ///
    /// When the queue is full the event is dropped: no error, no blocking,
    /// the caller always returns immediately. The write cursor advances on
    /// success only.
    pub(crate) fn push(&self, event: KeyEvent) {
        if self.tx.try_send(event).is_err() {
            // Full. Disconnect is impossible while both halves live here.
            trace!(
                target: "bridge::input",
                "Key queue full, dropping {:?}",
                event
            );
        }
    }

    //--- Consumer Side ----------------------------------------------------

    /// Returns the next queued event in FIFO order, or `None` when the
    /// queue is empty. Never blocks, never allocates.
    pub(crate) fn poll(&self) -> Option<KeyEvent> {
        self.rx.try_recv().ok()
    }

    //--- Utilities --------------------------------------------------------

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.rx.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: u8) -> KeyEvent {
        KeyEvent {
            pressed: true,
            code,
        }
    }

    #[test]
    fn empty_queue_polls_none() {
        let queue = KeyQueue::with_capacity(8);
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn events_drain_in_fifo_order() {
        let queue = KeyQueue::with_capacity(8);
        queue.push(press(1));
        queue.push(KeyEvent {
            pressed: false,
            code: 1,
        });
        queue.push(press(2));

        assert_eq!(queue.poll(), Some(press(1)));
        assert_eq!(
            queue.poll(),
            Some(KeyEvent {
                pressed: false,
                code: 1
            })
        );
        assert_eq!(queue.poll(), Some(press(2)));
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn fill_then_drain_returns_every_event_once() {
        let queue = KeyQueue::with_capacity(64);
        for code in 0..64u8 {
            queue.push(press(code));
        }
        for code in 0..64u8 {
            assert_eq!(queue.poll(), Some(press(code)));
        }
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn overflow_retains_earliest_events() {
        let queue = KeyQueue::with_capacity(4);
        for code in 0..10u8 {
            queue.push(press(code));
        }

        // Exactly capacity events retained, FIFO from the front.
        assert_eq!(queue.len(), 4);
        for code in 0..4u8 {
            assert_eq!(queue.poll(), Some(press(code)));
        }
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn overflow_push_does_not_corrupt_queue() {
        let queue = KeyQueue::with_capacity(2);
        queue.push(press(1));
        queue.push(press(2));
        queue.push(press(3)); // dropped

        assert_eq!(queue.poll(), Some(press(1)));

        // One slot freed: the next push must land.
        queue.push(press(4));
        assert_eq!(queue.poll(), Some(press(2)));
        assert_eq!(queue.poll(), Some(press(4)));
        assert_eq!(queue.poll(), None);
    }

    #[test]
    fn producer_on_another_thread_is_observed_in_order() {
        use std::sync::Arc;

        let queue = Arc::new(KeyQueue::with_capacity(128));
        let producer = Arc::clone(&queue);

        let handle = std::thread::spawn(move || {
            for code in 0..100u8 {
                producer.push(press(code));
            }
        });
        handle.join().unwrap();

        for code in 0..100u8 {
            assert_eq!(queue.poll(), Some(press(code)));
        }
        assert_eq!(queue.poll(), None);
    }
}
