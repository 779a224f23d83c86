//! Mirror configuration.
//!
//! Read once at startup from a TOML file; nothing is written back.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use eco_core::region::{DEFAULT_CHROME_HEIGHT, DEFAULT_CHROME_WIDTH};
use eco_core::scaler::DEFAULT_PASSTHROUGH_TOLERANCE;
use eco_core::{
    Chrome, DEFAULT_RENDER_DELAY, DEFAULT_ZOOM_LEVELS, EcoError, ImageScaler, MirrorSettings,
    Rect, RegionModel, Titles, ZoomController,
};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Window appearance.
    pub window: WindowConfig,
    /// Initial source/destination layout.
    pub regions: RegionConfig,
    /// Zoom ladder.
    pub zoom: ZoomConfig,
    /// Render pacing.
    pub render: RenderConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

/// Window appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title prefix; the version is appended.
    pub title: String,
    /// Keep the window above all others.
    pub always_on_top: bool,
    /// Show a title bar. Without one the window keeps a resize border.
    pub decorated: bool,
}

/// Initial layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Destination top edge; the destination is centred horizontally.
    pub destination_y: i32,
    /// Horizontal decoration overhead of the destination window.
    pub chrome_width: u32,
    /// Vertical decoration overhead of the destination window.
    pub chrome_height: u32,
    /// Explicit source rectangle. Defaults to 600x200 at
    /// (screen width / 2, 900).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Rect>,
}

/// Zoom ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Permitted factors, strictly ascending.
    pub levels: Vec<f64>,
    /// Starting factor; must be one of `levels`.
    pub initial: f64,
    /// Factors this close to 1.0 are drawn unscaled.
    pub passthrough_tolerance: f64,
}

/// Render pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Delay between repaint requests in milliseconds.
    pub delay_ms: u64,
    /// Start with the frame rate shown in the title.
    pub show_fps: bool,
}

/// Logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
}

// ── Defaults ─────────────────────────────────────────────────────

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            regions: RegionConfig::default(),
            zoom: ZoomConfig::default(),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Eye contact online".into(),
            always_on_top: true,
            decorated: true,
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            destination_y: 0,
            chrome_width: DEFAULT_CHROME_WIDTH,
            chrome_height: DEFAULT_CHROME_HEIGHT,
            source: None,
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            initial: 1.0,
            passthrough_tolerance: DEFAULT_PASSTHROUGH_TOLERANCE,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_RENDER_DELAY.as_millis() as u64,
            show_fps: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

impl MirrorConfig {
    /// Load from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("invalid config {}: {e}; using defaults", path.display());
                Self::default()
            }),
            Err(_) => {
                tracing::info!("no config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    // ── Component construction ───────────────────────────────────

    /// Title variants with the crate version appended to the prefix.
    pub fn titles(&self) -> Titles {
        Titles::new(format!("{} {}", self.window.title, env!("CARGO_PKG_VERSION")))
    }

    pub fn chrome(&self) -> Chrome {
        Chrome {
            width: self.regions.chrome_width,
            height: self.regions.chrome_height,
        }
    }

    /// Render delay, at least one millisecond.
    pub fn render_delay(&self) -> Duration {
        Duration::from_millis(self.render.delay_ms.max(1))
    }

    pub fn zoom_controller(&self) -> Result<ZoomController, EcoError> {
        ZoomController::new(self.zoom.levels.clone(), self.zoom.initial)
    }

    /// Startup layout for a screen `screen_width` pixels wide.
    pub fn region_model(&self, screen_width: u32, zoom: f64) -> RegionModel {
        let source = self
            .regions
            .source
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| RegionModel::default_source(screen_width));
        RegionModel::centered(
            source,
            screen_width,
            self.regions.destination_y,
            zoom,
            self.chrome(),
        )
    }

    pub fn mirror_settings(&self) -> MirrorSettings {
        MirrorSettings {
            titles: self.titles(),
            show_fps: self.render.show_fps,
            scaler: ImageScaler::new(self.zoom.passthrough_tolerance),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
