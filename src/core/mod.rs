//=========================================================================
// Bridge Core
//
// The host-independent half of the platform bridge: everything the
// engine thread touches directly.
//
// Responsibilities:
// - Queue and coalesce host input for per-tick polling (`input`)
// - Supply monotonic time and the cooperative yield (`clock`)
// - Convert engine frame buffers to the host pixel encoding (`frame`)
// - Tie the pieces together behind the two context facades (`context`)
//
// Notes:
// Nothing in this module knows about winit or softbuffer; the `platform`
// module owns all host-specific types and drives these pieces from the
// main thread.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod clock;
pub mod frame;
pub mod input;

pub(crate) mod context;

//=== Public Exports ======================================================

pub use context::{EngineContext, HostHandle};
