//=========================================================================
// Runtime (Loop Driver)
//=========================================================================
//
// Entry point that starts the engine's run-forever loop inside the
// host's execution model.
//
// Architecture:
// ```text
//     RuntimeBuilder  ──build()──>  Runtime  ──run(engine_main)──>
//         │                           │
//         ├─ with_title()             ├─ spawns the engine thread
//         ├─ with_key_queue_capacity  └─ blocks in the host event loop
//         └─ with_scale()
// ```
//
// `run` never returns while both sides are healthy. A normal return
// means the user closed the window; an `EngineLoopExited` error means
// the engine's loop returned, which its contract forbids.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;

//=== External Crates =====================================================

use log::{error, info};
use winit::event_loop::EventLoop;

//=== Internal Imports ====================================================

use crate::core::clock::Clock;
use crate::core::context::{bridge, HostRequest, HostSink};
use crate::core::input::DEFAULT_KEY_QUEUE_CAPACITY;
use crate::core::EngineContext;
use crate::platform::{Platform, PlatformError};

//=== RuntimeError ========================================================

/// Top-level failures surfaced by [`Runtime::run`].
#[derive(Debug)]
pub enum RuntimeError {
    /// The host windowing layer failed to start or crashed.
    Platform(PlatformError),

    /// The engine's run-forever entry point returned. This never happens
    /// in normal operation; presentation is halted visibly rather than
    /// leaving a frozen last frame.
    EngineLoopExited,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Platform(e) => write!(f, "Platform failure: {}", e),
            Self::EngineLoopExited => write!(f, "Engine loop exited unexpectedly"),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Platform(e) => Some(e),
            Self::EngineLoopExited => None,
        }
    }
}

//=== ExitNotifier ========================================================

/// Guarantees the host hears about an engine stop.
///
/// Armed on the engine thread before the entry point runs; the `Drop`
/// impl fires on both a plain return and a panic unwinding the thread,
/// so the host halts presentation either way instead of repainting the
/// last frame forever.
struct ExitNotifier {
    host: Box<dyn HostSink>,
}

impl Drop for ExitNotifier {
    fn drop(&mut self) {
        if thread::panicking() {
            error!(target: "runtime", "Engine thread panicked");
        } else {
            error!(target: "runtime", "Engine entry point returned");
        }
        let _ = self.host.submit(HostRequest::EngineExited);
    }
}

//=== RuntimeBuilder ======================================================

/// Builder for configuring and constructing a [`Runtime`].
///
/// # Default Values
///
/// - **Title**: `"Hearthport"`
/// - **Key queue capacity**: 512 events
/// - **Scale**: 1 (presented pixels map 1:1 to window pixels)
///
/// # Examples
///
/// ```no_run
/// use hearthport::RuntimeBuilder;
///
/// RuntimeBuilder::new()
///     .with_title("My Game")
///     .with_scale(3)
///     .build()
///     .run(|ctx| {
///         ctx.init_surface(320, 200);
///         let frame = vec![0u8; 320 * 200 * 4];
///         loop {
///             while let Some(_key) = ctx.poll_key() { /* feed engine */ }
///             let _pointer = ctx.read_pointer_state();
///             // ... simulate and render into `frame` ...
///             ctx.present(320, 200, &frame);
///             ctx.yield_for(16);
///         }
///     })
///     .unwrap();
/// ```
pub struct RuntimeBuilder {
    title: String,
    key_queue_capacity: usize,
    scale: u32,
}

impl RuntimeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Hearthport".to_owned(),
            key_queue_capacity: DEFAULT_KEY_QUEUE_CAPACITY,
            scale: 1,
        }
    }

    /// Sets the initial window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets how many key events the input queue holds before it starts
    /// dropping the newest ones. The engine polls every tick, so the
    /// default is generous for human input rates.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_key_queue_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Key queue capacity must be positive");
        self.key_queue_capacity = capacity;
        self
    }

    /// Sets the integer scale between engine pixels and window pixels.
    /// Classic low-resolution frames are tiny on modern displays; a
    /// scale of 2-4 keeps them crisp via nearest-neighbour duplication.
    ///
    /// # Panics
    ///
    /// Panics if `scale == 0`.
    pub fn with_scale(mut self, scale: u32) -> Self {
        assert!(scale > 0, "Scale must be positive, got {}", scale);
        self.scale = scale;
        self
    }

    /// Builds the runtime instance.
    pub fn build(self) -> Runtime {
        info!(
            "Building runtime (queue: {}, scale: {})",
            self.key_queue_capacity, self.scale
        );
        Runtime {
            title: self.title,
            key_queue_capacity: self.key_queue_capacity,
            scale: self.scale,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Runtime =============================================================

/// Bridge runtime: owns both sides of the engine/host seam.
///
/// Create via [`RuntimeBuilder`]. Call [`Runtime::run`] exactly once at
/// process start, after any required startup assets are in place.
pub struct Runtime {
    title: String,
    key_queue_capacity: usize,
    scale: u32,
}

impl Runtime {
    /// Starts the bridge and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Builds the host event loop and its wakeup proxy
    /// 2. Constructs the shared bridge context pair
    /// 3. Spawns the engine thread running `engine_main` with the
    ///    engine-facing context
    /// 4. Enters the host event loop on the calling thread (blocks here)
    ///
    /// `engine_main` must never return; it owns the engine's classic
    /// init-then-tick-forever control flow. If it does return, `run`
    /// halts presentation and reports [`RuntimeError::EngineLoopExited`].
    ///
    /// A normal `Ok(())` return means the host shut the bridge down
    /// (window closed). The engine thread is detached; embeddings are
    /// expected to exit the process promptly after `run` returns.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (winit requirement on
    /// macOS/iOS).
    pub fn run<F>(self, engine_main: F) -> Result<(), RuntimeError>
    where
        F: FnOnce(EngineContext) + Send + 'static,
    {
        info!("Starting bridge runtime");

        //--- 1. Host event loop + wakeup proxy ----------------------------
        let event_loop = EventLoop::<HostRequest>::with_user_event()
            .build()
            .map_err(|e| RuntimeError::Platform(PlatformError::EventLoopCreation(e)))?;
        let proxy = event_loop.create_proxy();

        //--- 2. Shared bridge context -------------------------------------
        let (context, host) = bridge(self.key_queue_capacity, Clock::new(), Box::new(proxy.clone()));

        //--- 3. Engine thread ----------------------------------------------
        thread::spawn(move || {
            // The engine's contract is a run-forever loop; the guard
            // reports a return or a panic to the host all the same.
            let _notifier = ExitNotifier {
                host: Box::new(proxy),
            };
            info!(target: "runtime", "Engine thread started");
            engine_main(context);
        });

        //--- 4. Host event loop (blocks) -----------------------------------
        let mut platform = Platform::new(host, self.title, self.scale);
        platform.run(event_loop).map_err(RuntimeError::Platform)?;

        if platform.engine_exited() {
            return Err(RuntimeError::EngineLoopExited);
        }

        info!("Host event loop exited");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
