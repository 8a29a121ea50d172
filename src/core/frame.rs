//=========================================================================
// Pixel Frame Adapter
//=========================================================================
//
// Converts the engine's native frame buffer encoding into the encoding
// the host presents.
//
// Source: 4 bytes per pixel, byte order [B, G, R, X] (the engine stores
// pixels as little-endian XRGB u32 words).
// Destination: 4 bytes per pixel, byte order [R, G, B, A], alpha always
// fully opaque.
//
// Both encodings are fixed constants; there is no format negotiation.
// The adapter only reads the engine's buffer for the duration of one
// conversion and never retains a reference to it.
//
//=========================================================================

//=== Constants ===========================================================

/// Bytes per pixel in both the source and destination encodings.
pub const BYTES_PER_PIXEL: usize = 4;

const ALPHA_OPAQUE: u8 = 0xFF;

//=== PresentedFrame ======================================================

/// A host-ready RGBA frame, recreated every tick.
///
/// No persistent identity: each [`convert_bgrx`] call produces a fresh
/// frame that the host consumes and discards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedFrame {
    pub width: u32,
    pub height: u32,

    /// `width * height * 4` bytes in `[R, G, B, A]` order.
    pub pixels: Vec<u8>,
}

//=== Conversion ==========================================================

/// Converts a complete engine frame buffer to host RGBA.
///
/// For every pixel: destination byte 0 = source byte 2 (red), byte 1 =
/// source byte 1 (green), byte 2 = source byte 0 (blue), byte 3 = 255.
///
/// Returns `None` when `source` holds fewer than `width * height` pixels;
/// partial frames are not a supported input and the caller treats this
/// as a logged no-op. Excess source bytes are ignored.
pub(crate) fn convert_bgrx(width: u32, height: u32, source: &[u8]) -> Option<PresentedFrame> {
    let byte_count = (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)?;
    let source = source.get(..byte_count)?;

    let mut pixels = vec![0u8; byte_count];
    for (dst, src) in pixels
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(source.chunks_exact(BYTES_PER_PIXEL))
    {
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
        dst[3] = ALPHA_OPAQUE;
    }

    Some(PresentedFrame {
        width,
        height,
        pixels,
    })
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pixel_swizzle() {
        // blue=0x10, green=0x20, red=0x30, unused=0x00
        let source = [0x10, 0x20, 0x30, 0x00];
        let frame = convert_bgrx(1, 1, &source).unwrap();

        assert_eq!(frame.pixels, [0x30, 0x20, 0x10, 0xFF]);
    }

    #[test]
    fn alpha_is_opaque_regardless_of_source_x_byte() {
        let source = [0x01, 0x02, 0x03, 0xAB];
        let frame = convert_bgrx(1, 1, &source).unwrap();
        assert_eq!(frame.pixels[3], 0xFF);
    }

    #[test]
    fn converts_full_pixel_count() {
        let width = 320u32;
        let height = 200u32;
        let count = (width * height) as usize;

        let mut source = vec![0u8; count * BYTES_PER_PIXEL];
        for (i, px) in source.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            px[0] = i as u8; // blue
            px[1] = (i >> 8) as u8; // green
            px[2] = 0x7F; // red
        }

        let frame = convert_bgrx(width, height, &source).unwrap();
        assert_eq!(frame.width, width);
        assert_eq!(frame.height, height);
        assert_eq!(frame.pixels.len(), count * BYTES_PER_PIXEL);

        for (i, px) in frame.pixels.chunks_exact(BYTES_PER_PIXEL).enumerate() {
            assert_eq!(px[0], 0x7F);
            assert_eq!(px[1], (i >> 8) as u8);
            assert_eq!(px[2], i as u8);
            assert_eq!(px[3], 0xFF);
        }
    }

    #[test]
    fn short_source_is_rejected() {
        let source = [0u8; 4 * 3];
        assert!(convert_bgrx(2, 2, &source).is_none());
    }

    #[test]
    fn excess_source_bytes_are_ignored() {
        let mut source = vec![0u8; 4 * 8];
        source[0] = 0x42; // blue of pixel 0
        let frame = convert_bgrx(2, 2, &source).unwrap();
        assert_eq!(frame.pixels.len(), 4 * 4);
        assert_eq!(frame.pixels[2], 0x42);
    }

    #[test]
    fn zero_sized_frame_converts_to_empty() {
        let frame = convert_bgrx(0, 0, &[]).unwrap();
        assert!(frame.pixels.is_empty());
    }
}
