//! # eco-core
//!
//! Capture-scale-render core of the eye contact screen mirror: one
//! always-on-top window alternately marks a screen region ("source") and
//! shows a live, optionally zoomed copy of it ("destination").
//!
//! This crate contains:
//! - **Geometry & frames**: `Rect`, `Size`, `Frame`, `PixelFormat`
//! - **Zoom**: `ZoomController`, the clamped discrete zoom ladder
//! - **Statistics**: `FrameRateTracker`, frames counted and sampled per second
//! - **Scaling**: `ImageScaler`, bilinear uniform scaling with a 1.0 passthrough
//! - **Regions**: `RegionModel`, source/destination rectangles and chrome padding
//! - **Mode**: `ModeController`, the source-selection/mirroring state machine
//! - **Render**: `RenderDriver`, the background repaint pacer
//! - **Mirror**: `Mirror`, the composition the UI context drives
//! - **Seams**: `MirrorWindow` / `ScreenCapturer` traits for the platform
//! - **Error**: `EcoError`, a `thiserror`-based error type

pub mod command;
pub mod error;
pub mod mirror;
pub mod mode;
pub mod region;
pub mod render;
pub mod scaler;
pub mod stats;
pub mod surface;
pub mod types;
pub mod zoom;

// ── Re-exports for ergonomic usage ───────────────────────────────

pub use command::Command;
pub use error::EcoError;
pub use mirror::{Mirror, MirrorSettings};
pub use mode::{Mode, ModeController, Titles};
pub use region::{Chrome, RegionModel, derive_destination_size};
pub use render::{DEFAULT_RENDER_DELAY, RenderDriver, RepaintRequest, repaint_channel};
pub use scaler::ImageScaler;
pub use stats::FrameRateTracker;
pub use surface::{MirrorWindow, ScreenCapturer};
pub use types::{Frame, PixelFormat, Rect, Size};
pub use zoom::{DEFAULT_ZOOM_LEVELS, ZoomController};
