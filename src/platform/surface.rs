//=========================================================================
// Presentation Surface
//=========================================================================
//
// Owns the softbuffer surface bound to the host window and blits
// converted RGBA frames into it.
//
// Architecture:
//   PresentedFrame (RGBA bytes) → pack_rgba_scaled() → softbuffer [u32]
//
// softbuffer expects 0RGB u32 words, so the blit packs the RGBA bytes
// down and drops alpha (frames are always fully opaque). An optional
// integer scale duplicates pixels nearest-neighbour, the native
// equivalent of the crisp CSS scaling a browser canvas gets for free.
//
// The last submitted frame is kept so expose/redraw events can repaint
// without waiting for the engine's next tick.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::num::NonZeroU32;
use std::sync::Arc;

//=== External Dependencies ===============================================

use log::trace;
use softbuffer::{Context, SoftBufferError, Surface};
use winit::window::Window;

//=== Internal Imports ====================================================

use crate::core::frame::{PresentedFrame, BYTES_PER_PIXEL};

//=== Presenter ===========================================================

/// Host-side pixel sink for one fixed-size window.
///
/// Field order matters for drop order: `surface` must drop before
/// `_context`, and both before `window`.
pub(crate) struct Presenter {
    surface: Surface<Arc<Window>, Arc<Window>>,
    _context: Context<Arc<Window>>,
    window: Arc<Window>,

    /// Engine frame dimensions (pre-scale).
    width: u32,
    height: u32,
    scale: u32,

    /// Most recent frame, repainted on every redraw.
    frame: Option<PresentedFrame>,
}

impl Presenter {
    //--- Construction -----------------------------------------------------

    /// Binds a softbuffer surface to `window` sized for `width x height`
    /// engine pixels at the given integer scale.
    pub(crate) fn new(
        window: Arc<Window>,
        width: u32,
        height: u32,
        scale: u32,
    ) -> Result<Self, SoftBufferError> {
        let context = Context::new(Arc::clone(&window))?;
        let mut surface = Surface::new(&context, Arc::clone(&window))?;

        // Pre-size so the first draw skips the resize step.
        if let (Some(w), Some(h)) = (
            NonZeroU32::new(width * scale),
            NonZeroU32::new(height * scale),
        ) {
            surface.resize(w, h)?;
        }

        Ok(Self {
            surface,
            _context: context,
            window,
            width,
            height,
            scale,
            frame: None,
        })
    }

    //--- Frame Intake -----------------------------------------------------

    /// Stores a converted frame and schedules a repaint.
    ///
    /// Frames whose dimensions do not match the configured surface are
    /// dropped; the surface is fixed-size and partial frames are not a
    /// supported input.
    pub(crate) fn submit(&mut self, frame: PresentedFrame) {
        if frame.width != self.width || frame.height != self.height {
            trace!(
                target: "platform::surface",
                "Dropping {}x{} frame for {}x{} surface",
                frame.width,
                frame.height,
                self.width,
                self.height
            );
            return;
        }
        self.frame = Some(frame);
        self.window.request_redraw();
    }

    //--- Drawing ----------------------------------------------------------

    /// Blits the most recent frame into the window. No-op until the
    /// first frame arrives or when the surface rejects the draw (the
    /// window may be mid-teardown).
    pub(crate) fn draw(&mut self) {
        let Some(frame) = &self.frame else {
            return;
        };

        let (Some(w), Some(h)) = (
            NonZeroU32::new(self.width * self.scale),
            NonZeroU32::new(self.height * self.scale),
        ) else {
            return;
        };
        if self.surface.resize(w, h).is_err() {
            return;
        }

        let mut buffer = match self.surface.buffer_mut() {
            Ok(buffer) => buffer,
            Err(_) => return,
        };

        pack_rgba_scaled(
            &frame.pixels,
            self.width,
            self.height,
            self.scale,
            &mut buffer,
        );

        self.window.pre_present_notify();
        buffer.present().ok();
    }
}

//=== Pixel Packing =======================================================

/// Packs RGBA bytes into softbuffer's 0RGB u32 words with integer
/// nearest-neighbour upscaling.
///
/// Bounds are verified up front; mismatched buffers leave `dst`
/// untouched rather than panicking.
pub(crate) fn pack_rgba_scaled(pixels: &[u8], width: u32, height: u32, scale: u32, dst: &mut [u32]) {
    let width = width as usize;
    let height = height as usize;
    let scale = scale as usize;

    let dst_width = width * scale;
    if pixels.len() != width * height * BYTES_PER_PIXEL || dst.len() != dst_width * height * scale {
        return;
    }

    for (dst_y, dst_row) in dst.chunks_exact_mut(dst_width).enumerate() {
        let src_y = dst_y / scale;
        for (dst_x, out) in dst_row.iter_mut().enumerate() {
            let src_x = dst_x / scale;
            let s = (src_y * width + src_x) * BYTES_PER_PIXEL;
            let r = u32::from(pixels[s]);
            let g = u32::from(pixels[s + 1]);
            let b = u32::from(pixels[s + 2]);
            *out = (r << 16) | (g << 8) | b;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
