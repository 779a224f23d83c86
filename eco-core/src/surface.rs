//! Seams to the platform: the on-screen window and the screen grabber.
//!
//! The core never talks to an OS API directly. The desktop binary
//! implements these over Win32/GDI; tests implement them with fakes.

use crate::error::EcoError;
use crate::types::{Frame, Rect};

/// The single top-level window that alternately represents the source
/// selection and the mirrored destination.
pub trait MirrorWindow {
    /// Current outer bounds of the window on screen.
    fn bounds(&self) -> Rect;

    /// Move and resize the window.
    fn set_bounds(&mut self, rect: Rect);

    fn set_title(&mut self, title: &str);

    /// Ask the platform to deliver a paint to the UI context.
    fn request_repaint(&mut self);

    /// Draw `frame` 1:1 at the origin of the client surface.
    fn draw(&mut self, frame: &Frame) -> Result<(), EcoError>;
}

/// Reads the current pixels of a screen rectangle.
pub trait ScreenCapturer {
    fn capture(&mut self, region: Rect) -> Result<Frame, EcoError>;
}
