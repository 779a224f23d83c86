//! Shared geometry and frame types for the capture/display pipeline.

use std::time::Instant;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

// ── Size ─────────────────────────────────────────────────────────

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

// ── Rect ─────────────────────────────────────────────────────────

/// An axis-aligned screen rectangle.
///
/// `x`/`y` are signed because windows may sit partly left of or above
/// the primary monitor's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Top-left corner.
    pub const fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Same top-left corner, new size.
    pub const fn with_size(self, size: Size) -> Self {
        Self::new(self.x, self.y, size.width, size.height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

// ── PixelFormat ──────────────────────────────────────────────────

/// Channel order of a captured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Blue, Green, Red, Alpha (GDI default).
    Bgra8,
    /// Red, Green, Blue, Alpha.
    Rgba8,
}

impl PixelFormat {
    /// Bytes consumed by a single pixel in this format.
    pub const fn bytes_per_pixel(self) -> usize {
        4
    }
}

// ── Frame ────────────────────────────────────────────────────────

/// A captured (or scaled) screen image.
///
/// The pixel buffer is a tightly packed 4-channel image; `format`
/// says which channel is which. Scaling is per-channel, so it does not
/// care about the order.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Pixel layout.
    pub format: PixelFormat,
    /// Pixel data, `width * height * 4` bytes, top row first.
    pub pixels: RgbaImage,
    /// Monotonic capture timestamp.
    pub captured_at: Instant,
}

impl Frame {
    /// Wrap a raw buffer. Returns `None` if `data` does not hold exactly
    /// `width * height` pixels.
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, data).map(|pixels| Self {
            format,
            pixels,
            captured_at: Instant::now(),
        })
    }

    /// A fully transparent frame.
    pub fn blank(size: Size, format: PixelFormat) -> Self {
        Self {
            format,
            pixels: RgbaImage::new(size.width, size.height),
            captured_at: Instant::now(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Raw pixel bytes, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

// ── Tests ────────────────────────────────────────────────────────
