//! Render pacing.
//!
//! The pixel work (capture, scale, draw) has to run where the
//! destination surface lives, i.e. on the UI context. The pieces here
//! only decide *when* that happens.
//!
//! | Module   | Purpose                                              |
//! |----------|------------------------------------------------------|
//! | `driver` | Background task: sleep a fixed delay, request repaint |

pub mod driver;

pub use driver::{DEFAULT_RENDER_DELAY, RenderDriver, RepaintRequest, repaint_channel};
