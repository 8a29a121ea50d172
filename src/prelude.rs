//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use hearthport::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime entry point
pub use crate::runtime::{Runtime, RuntimeBuilder, RuntimeError};

// Engine-facing bridge context
pub use crate::core::{EngineContext, HostHandle};

// Input types
pub use crate::core::input::{KeyEvent, PointerState, DEFAULT_KEY_QUEUE_CAPACITY};

// Timing helpers
pub use crate::core::clock::elapsed_ms;

// Frame types
pub use crate::core::frame::{PresentedFrame, BYTES_PER_PIXEL};
