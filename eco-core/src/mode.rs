//! Mode state machine.
//!
//! One window plays two roles. While selecting the source, the window
//! itself *is* the capture area and the user drags/resizes it. While
//! mirroring, the window is the destination and shows the live copy.
//!
//! ```text
//!                 SelectDestination
//!  SourceSelection ───────────────► Mirroring
//!        ▲                              │
//!        └──────────────────────────────┘
//!                  SelectSource
//! ```
//!
//! Each transition first stores the window's current bounds into the
//! rectangle the window was representing, then moves the window to the
//! rectangle of the new role.

use tracing::{debug, info};

use crate::region::RegionModel;
use crate::stats::format_rate;
use crate::surface::MirrorWindow;
use crate::types::Rect;

// ── Mode ─────────────────────────────────────────────────────────

/// Which rectangle the window currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The window marks the area to capture. Initial state.
    #[default]
    SourceSelection,
    /// The window shows the scaled live copy of the source.
    Mirroring,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceSelection => write!(f, "SourceSelection"),
            Self::Mirroring => write!(f, "Mirroring"),
        }
    }
}

// ── Titles ───────────────────────────────────────────────────────

/// Window title variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Titles {
    base: String,
    source_selection: String,
}

impl Titles {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let source_selection = format!("{base}: select source area and press \"D\"");
        Self {
            base,
            source_selection,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn source_selection(&self) -> &str {
        &self.source_selection
    }

    /// `"<base> (fps: <rate>) <frames>"`.
    pub fn with_fps(&self, fps: f64, frames: u64) -> String {
        format!("{} (fps: {}) {frames}", self.base, format_rate(fps))
    }
}

impl Default for Titles {
    fn default() -> Self {
        Self::new(concat!("Eye contact online ", env!("CARGO_PKG_VERSION")))
    }
}

// ── ModeController ───────────────────────────────────────────────

/// Drives the two-state machine and its window side effects.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
    titles: Titles,
}

impl ModeController {
    pub fn new(titles: Titles) -> Self {
        Self {
            mode: Mode::SourceSelection,
            titles,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_mirroring(&self) -> bool {
        self.mode == Mode::Mirroring
    }

    pub fn titles(&self) -> &Titles {
        &self.titles
    }

    /// Put a freshly created window into the initial source-selection
    /// role.
    pub fn show_initial<W: MirrorWindow + ?Sized>(&self, window: &mut W, regions: &RegionModel) {
        window.set_bounds(regions.source());
        window.set_title(self.titles.source_selection());
    }

    /// Switch to source selection.
    ///
    /// The window was the destination, so its bounds become the new
    /// destination rectangle. Returns `false` (and does nothing) if
    /// already selecting.
    pub fn enter_source_selection<W: MirrorWindow + ?Sized>(
        &mut self,
        window: &mut W,
        regions: &mut RegionModel,
    ) -> bool {
        if self.mode == Mode::SourceSelection {
            debug!("already selecting source; ignoring");
            return false;
        }

        regions.set_destination(window.bounds());
        window.set_bounds(regions.source());

        self.mode = Mode::SourceSelection;
        window.set_title(self.titles.source_selection());

        info!(destination = %regions.destination(), "selecting source");
        true
    }

    /// Switch to mirroring at `zoom`.
    ///
    /// The window was the source selection, so its bounds become the new
    /// source rectangle; the destination keeps its top-left corner and is
    /// resized for the source at `zoom`. Returns `false` (and does
    /// nothing) if already mirroring.
    pub fn enter_mirroring<W: MirrorWindow + ?Sized>(
        &mut self,
        window: &mut W,
        regions: &mut RegionModel,
        zoom: f64,
    ) -> bool {
        if self.mode == Mode::Mirroring {
            debug!("already mirroring; ignoring");
            return false;
        }

        regions.set_source(window.bounds());
        let destination = regions.resize_destination(zoom);
        window.set_bounds(destination);

        self.mode = Mode::Mirroring;
        window.set_title(self.titles.base());

        info!(source = %regions.source(), %destination, zoom, "mirroring");
        true
    }

    /// Re-fit the destination after a zoom change.
    ///
    /// Only acts while mirroring; the window's current top-left is kept
    /// so a destination the user moved stays put. Returns the applied
    /// bounds.
    pub fn apply_zoom<W: MirrorWindow + ?Sized>(
        &self,
        window: &mut W,
        regions: &mut RegionModel,
        zoom: f64,
    ) -> Option<Rect> {
        if self.mode != Mode::Mirroring {
            return None;
        }

        regions.set_destination(window.bounds());
        let destination = regions.resize_destination(zoom);
        window.set_bounds(destination);
        Some(destination)
    }
}

// ── Tests ────────────────────────────────────────────────────────
