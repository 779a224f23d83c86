//! Error types for the mirror core.
//!
//! Construction-time validation returns `Result<T, EcoError>`. The running
//! capture/draw path logs and absorbs errors instead of propagating them,
//! so nothing in here ever tears the render loop down.

use thiserror::Error;

/// The canonical error type for the mirror core.
#[derive(Debug, Error)]
pub enum EcoError {
    // ── Platform Errors ──────────────────────────────────────────
    /// Pixels could not be read from the requested screen region.
    #[error("capture failed: {0}")]
    Capture(String),

    /// A frame could not be drawn into the destination surface.
    #[error("render failed: {0}")]
    Render(String),

    /// Window creation or manipulation failed.
    #[error("window error: {0}")]
    Window(String),

    // ── Configuration Errors ─────────────────────────────────────
    /// The zoom ladder violates its construction rules.
    #[error("invalid zoom ladder: {0}")]
    InvalidZoomLadder(&'static str),

    /// The requested zoom level is not a rung of the ladder.
    #[error("zoom level {0} is not in the zoom ladder")]
    ZoomLevelNotInLadder(f64),

    // ── I/O ──────────────────────────────────────────────────────
    /// The OS reported an I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for errors that do not fit another variant.
    #[error("{0}")]
    Other(String),
}

impl From<String> for EcoError {
    fn from(s: String) -> Self {
        EcoError::Other(s)
    }
}

impl From<&str> for EcoError {
    fn from(s: &str) -> Self {
        EcoError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = EcoError::ZoomLevelNotInLadder(1.75);
        assert!(e.to_string().contains("1.75"));

        let e = EcoError::Capture("region off screen".into());
        assert!(e.to_string().starts_with("capture failed"));
    }

    #[test]
    fn from_string() {
        let e: EcoError = "something broke".into();
        assert!(matches!(e, EcoError::Other(_)));
    }

    #[test]
    fn from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e: EcoError = io_err.into();
        assert!(matches!(e, EcoError::Io(_)));
    }
}
