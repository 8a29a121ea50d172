//=========================================================================
// Input Bridge
//
// Translates push-based host input into the pull-based polling semantics
// the engine expects.
//
// Two kinds of input, two structures:
// - Key events need edge-triggered press/release semantics and must not
//   be lost between ticks, so they go through a bounded FIFO queue.
// - Pointer motion is accumulative, so last-value/reset semantics
//   suffice and avoid unbounded event storms from continuous movement.
//
// Notes:
// Both structures are shared between the host thread (producer) and the
// engine thread (consumer) through the bridge context; see
// `core::context` for the two facades built on top of them.
//
//=========================================================================

//=== Submodules ==========================================================

mod key_queue;
mod pointer;

//=== Public Exports ======================================================

pub use key_queue::{KeyEvent, DEFAULT_KEY_QUEUE_CAPACITY};
pub use pointer::PointerState;

pub(crate) use key_queue::KeyQueue;
pub(crate) use pointer::PointerChannel;
