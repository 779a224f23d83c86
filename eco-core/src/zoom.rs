//! Discrete zoom ladder.
//!
//! The controller owns an ascending list of permitted magnification
//! factors and an index into it. Stepping moves exactly one rung and
//! clamps at both ends; a step past the boundary is a silent no-op.

use crate::error::EcoError;

/// Default magnification factors, ascending.
pub const DEFAULT_ZOOM_LEVELS: [f64; 11] =
    [0.25, 0.33, 0.5, 0.67, 0.8, 1.0, 1.25, 1.5, 2.0, 3.0, 4.0];

/// Owns the zoom ladder and the current position on it.
#[derive(Debug, Clone)]
pub struct ZoomController {
    levels: Vec<f64>,
    index: usize,
}

impl ZoomController {
    /// Build a controller positioned at `initial`.
    ///
    /// The ladder must be non-empty, strictly ascending and positive,
    /// and `initial` must be one of its rungs.
    pub fn new(levels: Vec<f64>, initial: f64) -> Result<Self, EcoError> {
        if levels.is_empty() {
            return Err(EcoError::InvalidZoomLadder("ladder is empty"));
        }
        if levels.iter().any(|l| !l.is_finite() || *l <= 0.0) {
            return Err(EcoError::InvalidZoomLadder("levels must be finite and positive"));
        }
        if levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(EcoError::InvalidZoomLadder("levels must be strictly ascending"));
        }
        let index = levels
            .iter()
            .position(|l| *l == initial)
            .ok_or(EcoError::ZoomLevelNotInLadder(initial))?;

        Ok(Self { levels, index })
    }

    /// The active magnification factor.
    pub fn current_level(&self) -> f64 {
        self.levels[self.index]
    }

    /// Position of the active factor on the ladder.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move one rung up. Returns `true` if the level changed.
    pub fn step_in(&mut self) -> bool {
        self.step(1)
    }

    /// Move one rung down. Returns `true` if the level changed.
    pub fn step_out(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> bool {
        let last = self.levels.len() - 1;
        let next = self.index.saturating_add_signed(delta).min(last);
        let changed = next != self.index;
        self.index = next;
        changed
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            index: 5,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
