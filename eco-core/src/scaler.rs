//! Uniform bilinear scaling of captured frames.
//!
//! The scale applies to the drawing, not the canvas: the output has the
//! same pixel dimensions as the input, content is anchored at the
//! top-left, anything scaled past the right/bottom edge is clipped and
//! uncovered area is transparent. The destination window is resized
//! separately to show the magnified content.

use std::borrow::Cow;

use image::imageops::{self, FilterType};

use crate::types::Frame;

/// Zoom factors closer than this to 1.0 pass the frame through untouched.
pub const DEFAULT_PASSTHROUGH_TOLERANCE: f64 = 0.1;

/// Scales frames by the current zoom level.
#[derive(Debug, Clone, Copy)]
pub struct ImageScaler {
    tolerance: f64,
}

impl ImageScaler {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    /// Whether `zoom` is far enough from 1.0 to be worth resampling.
    pub fn is_active(&self, zoom: f64) -> bool {
        (zoom - 1.0).abs() >= self.tolerance
    }

    /// Scale `frame` by `zoom` using bilinear interpolation, or borrow it
    /// unchanged when the zoom is effectively 1.0.
    pub fn scale<'a>(&self, frame: &'a Frame, zoom: f64) -> Cow<'a, Frame> {
        if !self.is_active(zoom) {
            return Cow::Borrowed(frame);
        }

        let (width, height) = (frame.width(), frame.height());

        // Triangle is image's bilinear filter.
        let scaled = if zoom > 1.0 {
            // Only the top-left 1/zoom of the input survives the clip.
            let visible_width = visible_extent(width, zoom);
            let visible_height = visible_extent(height, zoom);
            let visible =
                imageops::crop_imm(&frame.pixels, 0, 0, visible_width, visible_height).to_image();
            imageops::resize(
                &visible,
                scaled_extent(visible_width, zoom),
                scaled_extent(visible_height, zoom),
                FilterType::Triangle,
            )
        } else {
            imageops::resize(
                &frame.pixels,
                scaled_extent(width, zoom),
                scaled_extent(height, zoom),
                FilterType::Triangle,
            )
        };

        let mut out = Frame::blank(frame.size(), frame.format);
        imageops::replace(&mut out.pixels, &scaled, 0, 0);
        out.captured_at = frame.captured_at;
        Cow::Owned(out)
    }
}

/// Source pixels along one axis that remain on the canvas at `zoom`.
fn visible_extent(extent: u32, zoom: f64) -> u32 {
    ((extent as f64 / zoom).ceil() as u32).clamp(1, extent.max(1))
}

fn scaled_extent(extent: u32, zoom: f64) -> u32 {
    ((extent as f64 * zoom).round() as u32).max(1)
}

impl Default for ImageScaler {
    fn default() -> Self {
        Self::new(DEFAULT_PASSTHROUGH_TOLERANCE)
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelFormat;

    /// Opaque black/white checkerboard.
    fn checkerboard(size: u32) -> Frame {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let v = if (x + y) % 2 == 0 { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Frame::from_raw(size, size, PixelFormat::Bgra8, data).unwrap()
    }

    #[test]
    fn unit_zoom_passes_through() {
        let frame = checkerboard(4);
        let out = ImageScaler::default().scale(&frame, 1.0);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out.as_bytes(), frame.as_bytes());
    }

    #[test]
    fn near_unit_zoom_passes_through() {
        let frame = checkerboard(4);
        let scaler = ImageScaler::default();
        for zoom in [0.95, 0.99, 1.01, 1.05] {
            let out = scaler.scale(&frame, zoom);
            assert!(matches!(out, Cow::Borrowed(_)), "zoom {zoom} resampled");
        }
    }

    #[test]
    fn tolerance_boundary_resamples() {
        let scaler = ImageScaler::default();
        assert!(scaler.is_active(1.25));
        assert!(scaler.is_active(0.8));
        assert!(!scaler.is_active(1.05));
    }

    #[test]
    fn zoom_in_keeps_canvas_and_interpolates() {
        let frame = checkerboard(4);
        let out = ImageScaler::default().scale(&frame, 2.0);
        assert_eq!(out.size(), frame.size());

        // Nearest neighbour would only ever produce 0 or 255.
        let blended = out
            .pixels
            .pixels()
            .any(|p| p.0[0] > 0 && p.0[0] < 255);
        assert!(blended, "expected interpolated values");
    }

    #[test]
    fn zoom_out_leaves_transparent_margin() {
        let frame = checkerboard(4);
        let out = ImageScaler::default().scale(&frame, 0.5);
        assert_eq!(out.size(), frame.size());
        assert_eq!(out.pixels.get_pixel(0, 0).0[3], 255);
        assert_eq!(out.pixels.get_pixel(3, 3).0[3], 0);
        assert_eq!(out.pixels.get_pixel(3, 0).0[3], 0);
    }

    /// Distinct value per pixel so any sampling shift shows up.
    fn gradient(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 30) as u8, (y * 40) as u8, ((x + y) * 10) as u8, 255]);
            }
        }
        Frame::from_raw(width, height, PixelFormat::Bgra8, data).unwrap()
    }

    #[test]
    fn zoom_in_resamples_only_the_visible_corner() {
        let frame = gradient(8, 6);
        let out = ImageScaler::default().scale(&frame, 4.0);
        assert_eq!(out.size(), frame.size());

        // ceil(8 / 4) x ceil(6 / 4) source pixels, blown up to 8x8.
        let corner = imageops::crop_imm(&frame.pixels, 0, 0, 2, 2).to_image();
        let expected = imageops::resize(&corner, 8, 8, FilterType::Triangle);
        for y in 0..6 {
            for x in 0..8 {
                assert_eq!(out.pixels.get_pixel(x, y), expected.get_pixel(x, y), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn visible_extent_rounds_up_and_stays_in_bounds() {
        assert_eq!(visible_extent(600, 4.0), 150);
        assert_eq!(visible_extent(200, 3.0), 67);
        assert_eq!(visible_extent(5, 1.25), 4);
        assert_eq!(visible_extent(1, 4.0), 1);
    }

    #[test]
    fn scaled_frame_keeps_format_and_timestamp() {
        let frame = checkerboard(2);
        let out = ImageScaler::default().scale(&frame, 3.0);
        assert_eq!(out.format, PixelFormat::Bgra8);
        assert_eq!(out.captured_at, frame.captured_at);
    }
}
