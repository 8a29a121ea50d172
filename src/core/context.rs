//=========================================================================
// Bridge Context
//=========================================================================
//
// The explicit context object pair replacing process-wide singletons.
//
// Architecture:
// ```text
//  Main Thread (host):              Engine Thread:
//  ┌───────────────────────┐       ┌─────────────────────────┐
//  │  HostHandle           │       │  EngineContext          │
//  │   push_key() ─────────┼──────▶│   poll_key()            │
//  │   move_pointer() ─────┼──────▶│   read_pointer_state()  │
//  │   set_buttons() ──────┼──────▶│                         │
//  │                       │       │   init_surface() ─┐     │
//  │  winit user events ◀──┼───────┼── present() ──────┤     │
//  │  (HostRequest)        │       │   set_title() ────┘     │
//  └───────────────────────┘       └─────────────────────────┘
// ```
//
// Both facades share one `Arc`-owned state block, constructed once at
// startup by `bridge()` and handed to the two sides. Requests flowing
// engine → host travel through a `HostSink` (the winit event-loop proxy
// in production, a plain channel in tests) so the host wakes up for every
// submitted frame.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Crates =====================================================

use log::{trace, warn};

//=== Internal Imports ====================================================

use crate::core::clock::Clock;
use crate::core::frame::{self, PresentedFrame};
use crate::core::input::{KeyEvent, KeyQueue, PointerChannel, PointerState};

//=== HostRequest =========================================================

/// Requests sent from the engine thread to the host event loop.
///
/// These are the only messages that cross the engine → host boundary.
#[derive(Debug)]
pub(crate) enum HostRequest {
    /// Establish the presentation surface at fixed dimensions.
    /// Sent exactly once, at engine startup.
    InitSurface { width: u32, height: u32 },

    /// One complete converted frame, ready to blit.
    Present(PresentedFrame),

    /// Update the host window title.
    SetTitle(String),

    /// The engine's run-forever loop returned. Fatal: the host halts
    /// presentation visibly instead of leaving a frozen last frame.
    EngineExited,
}

//=== HostSink ============================================================

/// Engine-side outlet for [`HostRequest`]s.
///
/// Production wires this to the winit event-loop proxy so every request
/// wakes the host scheduler. `submit` returns `false` when the host is
/// gone, which the engine side treats as a silent no-op (the surface is
/// an external, possibly-absent resource, never a crash).
pub(crate) trait HostSink: Send {
    fn submit(&self, request: HostRequest) -> bool;
}

#[cfg(test)]
impl HostSink for crossbeam_channel::Sender<HostRequest> {
    fn submit(&self, request: HostRequest) -> bool {
        self.send(request).is_ok()
    }
}

//=== Shared State ========================================================

/// State block shared by both facades. Lives for the process lifetime.
struct Shared {
    keys: KeyQueue,
    pointer: PointerChannel,
}

//=== Construction ========================================================

/// Builds the paired bridge facades over one shared state block.
pub(crate) fn bridge(
    key_queue_capacity: usize,
    clock: Clock,
    host: Box<dyn HostSink>,
) -> (EngineContext, HostHandle) {
    let shared = Arc::new(Shared {
        keys: KeyQueue::with_capacity(key_queue_capacity),
        pointer: PointerChannel::new(),
    });

    let context = EngineContext {
        shared: Arc::clone(&shared),
        clock,
        host,
    };
    let handle = HostHandle { shared };

    (context, handle)
}

//=== EngineContext =======================================================

/// Engine-facing half of the bridge.
///
/// Handed to the engine's run-forever entry point; every operation here
/// is called from the engine thread. A typical tick:
///
/// 1. `poll_key()` until drained, `read_pointer_state()`
/// 2. compute one frame
/// 3. `present(w, h, buffer)`
/// 4. `now_ms()` / `yield_for(ms)` to pace itself
pub struct EngineContext {
    shared: Arc<Shared>,
    clock: Clock,
    host: Box<dyn HostSink>,
}

impl EngineContext {
    //--- Input Polling ----------------------------------------------------

    /// Returns the next queued key event in FIFO order, or `None`.
    /// Non-blocking; call repeatedly each tick until drained.
    pub fn poll_key(&self) -> Option<KeyEvent> {
        self.shared.keys.poll()
    }

    /// Returns pointer deltas accumulated since the previous call and the
    /// current button mask. Resets the deltas; the mask stays sticky
    /// until the host replaces it.
    pub fn read_pointer_state(&self) -> PointerState {
        self.shared.pointer.take()
    }

    //--- Timing -----------------------------------------------------------

    /// Monotonic milliseconds since bridge startup, wrapping at 32 bits.
    /// Compute deltas with [`crate::core::clock::elapsed_ms`].
    pub fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }

    /// Yields the engine thread to the host for at least `ms`
    /// milliseconds (zero is normalized to 1). Host callbacks, input
    /// delivery and presentation all proceed while yielded.
    pub fn yield_for(&self, ms: u32) {
        self.clock.yield_for(ms);
    }

    //--- Presentation -----------------------------------------------------

    /// Establishes the host presentation surface. Call once at startup,
    /// before the first `present`.
    pub fn init_surface(&self, width: u32, height: u32) {
        if !self.host.submit(HostRequest::InitSurface { width, height }) {
            warn!(target: "bridge", "Host gone, surface request dropped");
        }
    }

    /// Converts one complete engine frame (4 bytes/pixel, [B, G, R, X])
    /// and submits it to the host. A short buffer or an absent host is a
    /// logged no-op, never a failure surfaced to the engine.
    pub fn present(&self, width: u32, height: u32, buffer: &[u8]) {
        let Some(converted) = frame::convert_bgrx(width, height, buffer) else {
            warn!(
                target: "bridge::frame",
                "Frame buffer too small for {}x{}, skipping present",
                width,
                height
            );
            return;
        };

        if !self.host.submit(HostRequest::Present(converted)) {
            trace!(target: "bridge::frame", "Host gone, frame dropped");
        }
    }

    /// Asks the host to retitle its window. Best-effort.
    pub fn set_window_title(&self, title: &str) {
        let _ = self.host.submit(HostRequest::SetTitle(title.to_owned()));
    }
}

//=== HostHandle ==========================================================

/// Host-facing half of the bridge.
///
/// Invoked from the host event loop at any time, including while the
/// engine is yielded. Cloneable so the host can hand it to multiple
/// callback sites.
#[derive(Clone)]
pub struct HostHandle {
    shared: Arc<Shared>,
}

impl HostHandle {
    /// Enqueues a key edge. Returns immediately; drops silently when the
    /// queue is full.
    pub fn push_key(&self, pressed: bool, code: u8) {
        self.shared.keys.push(KeyEvent { pressed, code });
    }

    /// Accumulates relative pointer motion.
    pub fn move_pointer(&self, dx: i32, dy: i32) {
        self.shared.pointer.add_motion(dx, dy);
    }

    /// Replaces the pointer button mask wholesale.
    pub fn set_buttons(&self, mask: u32) {
        self.shared.pointer.set_buttons(mask);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
