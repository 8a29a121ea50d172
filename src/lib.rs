//=========================================================================
// Hearthport — Library Root
//
// A platform bridge adapting a self-contained, synchronous game engine
// loop to an event-driven windowing host.
//
// The engine side expects classic "init, then tick-and-render forever"
// control flow with blocking-style input polling; the host delivers
// input through asynchronous callbacks and owns the main thread. This
// crate sits between them:
//
// - Translates push-based host input into pull-based polling
//   (`core::input`)
// - Turns the engine's "sleep" into a host-cooperative yield
//   (`core::clock`)
// - Converts engine frame buffers to the host pixel encoding and blits
//   them (`core::frame`, `platform`)
// - Drives the engine's run-forever loop from process start (`runtime`)
//
// Typical usage:
// ```no_run
// use hearthport::RuntimeBuilder;
//
// fn main() {
//     RuntimeBuilder::new()
//         .build()
//         .run(|ctx| {
//             // engine init + run-forever loop, using `ctx` for input,
//             // timing, and presentation
//             let _ = ctx;
//         })
//         .expect("bridge terminated abnormally");
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the host-independent bridge pieces (input queueing,
// timing, frame conversion, the context facades). It is exposed for
// engine-level code; most embeddings only need the top-level re-exports.
//
pub mod core;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains host-specific logic (winit window, event loop,
// softbuffer presentation) and is kept private.
//
// `runtime` defines the entry point that wires both sides together.
//
mod platform;
mod runtime;

pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use crate::core::input::{KeyEvent, PointerState};
pub use crate::core::{EngineContext, HostHandle};
pub use platform::PlatformError;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeError};
