//! Source and destination rectangles.
//!
//! The destination window must be larger than the scaled content by the
//! size of its own decorations, otherwise the bottom/right of the mirror
//! would be hidden under the frame. That overhead is the "chrome".

use crate::types::{Rect, Size};

/// Default horizontal decoration overhead in pixels.
pub const DEFAULT_CHROME_WIDTH: u32 = 10;
/// Default vertical decoration overhead in pixels (title bar + border).
pub const DEFAULT_CHROME_HEIGHT: u32 = 32;

/// Default source rectangle: y, width, height. `x` is half the screen width.
pub const DEFAULT_SOURCE_Y: i32 = 900;
pub const DEFAULT_SOURCE_SIZE: Size = Size::new(600, 200);

/// Window decoration overhead reserved around the mirrored content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub width: u32,
    pub height: u32,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHROME_WIDTH,
            height: DEFAULT_CHROME_HEIGHT,
        }
    }
}

/// Destination window size for a source of `source` pixels at `zoom`.
///
/// `floor(source * zoom) + chrome` on each axis.
pub fn derive_destination_size(source: Size, zoom: f64, chrome: Chrome) -> Size {
    let scale = |v: u32| (v as f64 * zoom).floor().max(0.0) as u32;
    Size::new(
        scale(source.width) + chrome.width,
        scale(source.height) + chrome.height,
    )
}

/// Owns the source and destination rectangles for the process lifetime.
#[derive(Debug, Clone)]
pub struct RegionModel {
    source: Rect,
    destination: Rect,
    chrome: Chrome,
}

impl RegionModel {
    /// Explicit rectangles.
    pub fn new(source: Rect, destination: Rect, chrome: Chrome) -> Self {
        Self {
            source,
            destination,
            chrome,
        }
    }

    /// Startup layout: the given source, and a destination centred
    /// horizontally at `destination_y`, sized from the source at `zoom`.
    pub fn centered(source: Rect, screen_width: u32, destination_y: i32, zoom: f64, chrome: Chrome) -> Self {
        let x = (screen_width as i32 - source.width as i32) / 2;
        let destination = Rect::new(x, destination_y, 0, 0)
            .with_size(derive_destination_size(source.size(), zoom, chrome));
        Self::new(source, destination, chrome)
    }

    /// The default source rectangle on a screen `screen_width` pixels wide.
    pub fn default_source(screen_width: u32) -> Rect {
        Rect::new((screen_width / 2) as i32, DEFAULT_SOURCE_Y, 0, 0).with_size(DEFAULT_SOURCE_SIZE)
    }

    pub fn source(&self) -> Rect {
        self.source
    }

    pub fn destination(&self) -> Rect {
        self.destination
    }

    pub fn chrome(&self) -> Chrome {
        self.chrome
    }

    pub fn set_source(&mut self, rect: Rect) {
        self.source = rect;
    }

    pub fn set_destination(&mut self, rect: Rect) {
        self.destination = rect;
    }

    /// Destination size for the current source at `zoom`.
    pub fn destination_size_for(&self, zoom: f64) -> Size {
        derive_destination_size(self.source.size(), zoom, self.chrome)
    }

    /// Resize the destination for `zoom`, keeping its top-left corner.
    pub fn resize_destination(&mut self, zoom: f64) -> Rect {
        self.destination = self.destination.with_size(self.destination_size_for(zoom));
        self.destination
    }
}

// ── Tests ────────────────────────────────────────────────────────
