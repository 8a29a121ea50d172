//=========================================================================
// Platform Subsystem
//
// Bridges the winit host (OS window, input devices, scheduler) with the
// engine thread.
//
// Architecture:
// ```text
//  Main Thread:                        Engine Thread:
//  ┌───────────────────────────┐      ┌─────────────────────┐
//  │  Winit Event Loop         │      │  Engine run-forever │
//  │   ├─ KeyboardInput        │      │  loop               │
//  │   │    ↓ event_mapper     │      │   ├─ poll_key()     │
//  │   │    HostHandle ────────┼─────▶│   ├─ read_pointer() │
//  │   ├─ MouseMotion/Input    │      │   ├─ present() ─┐   │
//  │   │    ↓ (same path)      │      │   └─ yield_for()│   │
//  │   └─ user events ◀────────┼──────┼─────────────────┘   │
//  │        (HostRequest)      │      └─────────────────────┘
//  │        ↓                  │
//  │   Presenter (softbuffer)  │
//  └───────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Window is created lazily**: winit only hands out windows once the
//   loop is resumed, and the dimensions only arrive with the engine's
//   `InitSurface` request; the window materializes when both have
//   happened. Frames presented before then are dropped without error.
// - **Raw device motion**: pointer deltas come from `DeviceEvent::
//   MouseMotion` (relative, unaccelerated where the OS allows) rather
//   than absolute cursor positions, matching what a mouselook engine
//   expects.
// - **OS auto-repeat is filtered**: the engine wants press/release
//   edges, so repeated `KeyboardInput` events are discarded at the seam.
// - **Main thread requirement**: winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Runtime::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod surface;

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Crates =====================================================

use log::{debug, error, info, trace};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowAttributes, WindowId};

//=== Internal Imports ====================================================

use crate::core::context::{HostRequest, HostSink};
use crate::core::HostHandle;
use event_mapper::{button_bit, map_physical_key};
use surface::Presenter;

//=== HostSink Wiring =====================================================

/// The production sink: every engine request wakes the event loop.
impl HostSink for EventLoopProxy<HostRequest> {
    fn submit(&self, request: HostRequest) -> bool {
        self.send_event(request).is_ok()
    }
}

//=== PlatformError =======================================================

/// Failures from the host windowing layer.
///
/// Either variant means the bridge has no event loop to run on, so
/// callers treat both as fatal.
#[derive(Debug)]
pub enum PlatformError {
    /// The host refused to create an event loop (headless session,
    /// missing display server).
    EventLoopCreation(winit::error::EventLoopError),

    /// The event loop aborted while running.
    EventLoopExecution(winit::error::EventLoopError),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Could not create host event loop: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Host event loop failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Platform ============================================================

/// Window manager, input producer and frame consumer.
///
/// Runs on the main thread and talks to the engine thread exclusively
/// through the [`HostHandle`] producer facade (input) and the
/// `HostRequest` user events (surface, frames, lifecycle).
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(host, ...)`
/// 2. **Execution**: `platform.run(event_loop)` - blocks until exit
/// 3. **Surface**: created once `resumed()` has fired and the engine's
///    `InitSurface` request has arrived
/// 4. **Shutdown**: window close (normal) or `EngineExited` (fatal)
pub(crate) struct Platform {
    /// Producer facade into the shared input structures.
    host: HostHandle,

    /// Window title; updated by `SetTitle` requests.
    title: String,

    /// Integer pixel scale for the presented frame.
    scale: u32,

    /// Whether `resumed()` has fired (window creation gate).
    resumed: bool,

    /// Surface dimensions requested by the engine, until the window
    /// exists.
    pending_surface: Option<(u32, u32)>,

    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,

    /// Current pointer button mask (bit 0 left, 1 right, 2 middle).
    buttons: u32,

    /// Sub-pixel motion left over after forwarding whole-pixel deltas.
    /// High-DPI devices report many deltas below 1.0; truncating each
    /// one independently would discard slow motion entirely.
    motion_remainder: (f64, f64),

    /// Set when the engine loop returned; `run` surfaces this as fatal.
    engine_exited: bool,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(host: HostHandle, title: String, scale: u32) -> Self {
        debug!(target: "platform", "Platform subsystem initialized");
        Self {
            host,
            title,
            scale,
            resumed: false,
            pending_surface: None,
            window: None,
            presenter: None,
            buttons: 0,
            motion_remainder: (0.0, 0.0),
            engine_exited: false,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the host event loop to completion.
    ///
    /// Blocks until the user closes the window or the engine loop exits
    /// fatally; check [`Platform::engine_exited`] afterwards to tell the
    /// two apart.
    pub(crate) fn run(&mut self, event_loop: EventLoop<HostRequest>) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");
        event_loop
            .run_app(self)
            .map_err(PlatformError::EventLoopExecution)
    }

    /// `true` when the loop ended because the engine's run-forever loop
    /// returned.
    pub(crate) fn engine_exited(&self) -> bool {
        self.engine_exited
    }

    //--- Internal Helpers -------------------------------------------------

    /// Creates the window and presentation surface once both gates are
    /// open: the loop has resumed and the engine requested dimensions.
    fn try_create_surface(&mut self, event_loop: &ActiveEventLoop) {
        if self.presenter.is_some() || !self.resumed {
            return;
        }
        let Some((width, height)) = self.pending_surface else {
            return;
        };

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(width * self.scale, height * self.scale))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        match Presenter::new(Arc::clone(&window), width, height, self.scale) {
            Ok(presenter) => {
                info!(
                    target: "platform",
                    "Surface ready: {}x{} at {}x scale",
                    width,
                    height,
                    self.scale
                );
                self.presenter = Some(presenter);
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Surface creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    /// Folds a button edge into the mask and republishes it wholesale.
    fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(bit) = button_bit(button) else {
            return;
        };
        match state {
            ElementState::Pressed => self.buttons |= bit,
            ElementState::Released => self.buttons &= !bit,
        }
        self.host.set_buttons(self.buttons);
    }

    /// Forwards host motion to the engine in whole pixels, banking the
    /// fractional remainder for the next event so sub-pixel deltas sum
    /// instead of truncating to zero one by one.
    fn accumulate_motion(&mut self, dx: f64, dy: f64) {
        self.motion_remainder.0 += dx;
        self.motion_remainder.1 += dy;

        let whole_dx = self.motion_remainder.0.trunc();
        let whole_dy = self.motion_remainder.1.trunc();
        self.motion_remainder.0 -= whole_dx;
        self.motion_remainder.1 -= whole_dy;

        if whole_dx != 0.0 || whole_dy != 0.0 {
            self.host.move_pointer(whole_dx as i32, whole_dy as i32);
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler<HostRequest> for Platform {
    /// Called when the app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Wake only for OS events and engine requests; redraws are driven
        // by presented frames, not a timer.
        event_loop.set_control_flow(ControlFlow::Wait);

        if self.resumed {
            debug!(target: "platform", "Resume with existing state (mobile resume?)");
            return;
        }
        self.resumed = true;
        self.try_create_surface(event_loop);
    }

    /// Requests from the engine thread, delivered through the loop proxy.
    fn user_event(&mut self, event_loop: &ActiveEventLoop, request: HostRequest) {
        match request {
            HostRequest::InitSurface { width, height } => {
                debug!(target: "platform", "Engine requested {}x{} surface", width, height);
                self.pending_surface = Some((width, height));
                self.try_create_surface(event_loop);
            }

            HostRequest::Present(frame) => match &mut self.presenter {
                Some(presenter) => presenter.submit(frame),
                None => {
                    // Surface not ready yet; dropping the frame is the
                    // defined non-fatal behavior.
                    trace!(target: "platform", "Frame before surface init, dropped");
                }
            },

            HostRequest::SetTitle(title) => {
                self.title = title;
                if let Some(window) = &self.window {
                    window.set_title(&self.title);
                }
            }

            HostRequest::EngineExited => {
                error!(
                    target: "platform",
                    "Engine loop returned unexpectedly, halting presentation"
                );
                self.engine_exited = true;
                event_loop.exit();
            }
        }
    }

    /// Per-window host events: input production and redraws.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    // The engine wants edges; OS auto-repeat is noise.
                    return;
                }
                match map_physical_key(event.physical_key) {
                    Some(code) => {
                        self.host.push_key(event.state.is_pressed(), code);
                    }
                    None => {
                        trace!(target: "platform::input", "Unmapped key ignored");
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.process_mouse_button(button, state);
            }

            WindowEvent::RedrawRequested => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.draw();
                }
            }

            _ => {
                // Resized, Focused, CursorMoved, etc.: not needed.
            }
        }
    }

    /// Raw device events: relative pointer motion.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.accumulate_motion(dx, dy);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::Clock;
    use crate::core::context::bridge;
    use crate::core::EngineContext;
    use crossbeam_channel::unbounded;

    fn test_platform() -> (Platform, EngineContext) {
        let (tx, _rx) = unbounded();
        let (ctx, host) = bridge(16, Clock::new(), Box::new(tx));
        (Platform::new(host, "test".into(), 1), ctx)
    }

    #[test]
    fn platform_starts_without_window_or_surface() {
        let (platform, _ctx) = test_platform();
        assert!(platform.window.is_none());
        assert!(platform.presenter.is_none());
        assert!(!platform.resumed);
        assert!(!platform.engine_exited());
    }

    #[test]
    fn button_press_sets_bit_and_publishes_mask() {
        let (mut platform, ctx) = test_platform();

        platform.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(ctx.read_pointer_state().buttons, 0b001);

        platform.process_mouse_button(MouseButton::Middle, ElementState::Pressed);
        assert_eq!(ctx.read_pointer_state().buttons, 0b101);
    }

    #[test]
    fn button_release_clears_only_its_bit() {
        let (mut platform, ctx) = test_platform();

        platform.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        platform.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        platform.process_mouse_button(MouseButton::Left, ElementState::Released);

        assert_eq!(ctx.read_pointer_state().buttons, 0b010);
    }

    #[test]
    fn unmapped_buttons_leave_mask_unchanged() {
        let (mut platform, ctx) = test_platform();

        platform.process_mouse_button(MouseButton::Back, ElementState::Pressed);
        platform.process_mouse_button(MouseButton::Other(9), ElementState::Pressed);

        assert_eq!(ctx.read_pointer_state().buttons, 0);
    }

    #[test]
    fn whole_pixel_motion_passes_through() {
        let (mut platform, ctx) = test_platform();

        platform.accumulate_motion(3.0, -7.0);

        let pointer = ctx.read_pointer_state();
        assert_eq!((pointer.dx, pointer.dy), (3, -7));
    }

    #[test]
    fn sub_pixel_motion_accumulates_instead_of_vanishing() {
        let (mut platform, ctx) = test_platform();

        // A slow high-DPI drag: every single delta is below one pixel.
        for _ in 0..10 {
            platform.accumulate_motion(0.25, -0.5);
        }

        let pointer = ctx.read_pointer_state();
        assert_eq!((pointer.dx, pointer.dy), (2, -5));
    }

    #[test]
    fn fractional_remainder_carries_across_events() {
        let (mut platform, ctx) = test_platform();

        platform.accumulate_motion(0.6, 0.0);
        assert_eq!(ctx.read_pointer_state().dx, 0);

        platform.accumulate_motion(0.6, 0.0);
        assert_eq!(ctx.read_pointer_state().dx, 1);
    }

    #[test]
    fn opposite_sub_pixel_motion_cancels() {
        let (mut platform, ctx) = test_platform();

        platform.accumulate_motion(0.7, 0.4);
        platform.accumulate_motion(-0.7, -0.4);

        let pointer = ctx.read_pointer_state();
        assert_eq!((pointer.dx, pointer.dy), (0, 0));
    }

    #[test]
    fn platform_error_implements_error_and_display() {
        fn assert_error<T: std::error::Error>() {}
        fn assert_display<T: std::fmt::Display>() {}
        assert_error::<PlatformError>();
        assert_display::<PlatformError>();
    }
}
