//! The mirror: composition of the core components.
//!
//! `Mirror` owns the window and capturer handles together with the mode
//! machine, the rectangles, the zoom ladder and the frame statistics.
//! Everything runs on the UI context:
//!
//! - [`handle_command`](Mirror::handle_command) for user commands,
//! - [`tick`](Mirror::tick) for each request from the render driver,
//! - [`paint`](Mirror::paint) when the platform delivers the repaint.
//!
//! Single ownership means no locks: mutators and the paint handler can
//! never interleave.

use std::ops::ControlFlow;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::command::Command;
use crate::mode::{Mode, ModeController, Titles};
use crate::region::RegionModel;
use crate::scaler::ImageScaler;
use crate::stats::FrameRateTracker;
use crate::surface::{MirrorWindow, ScreenCapturer};
use crate::types::Frame;
use crate::zoom::ZoomController;

/// Knobs that are not owned by any single component.
#[derive(Debug, Clone, Default)]
pub struct MirrorSettings {
    pub titles: Titles,
    /// Show the frame rate in the title while mirroring.
    pub show_fps: bool,
    pub scaler: ImageScaler,
}

/// The capture-scale-render core wired to its collaborators.
pub struct Mirror<W, C> {
    window: W,
    capturer: C,
    mode: ModeController,
    regions: RegionModel,
    zoom: ZoomController,
    stats: FrameRateTracker,
    scaler: ImageScaler,
    show_fps: bool,
    clock: Instant,
    /// Last frame drawn, redrawn while capture is failing.
    last_frame: Option<Frame>,
    capture_failing: bool,
    draw_failing: bool,
    /// Restart the rate sampling window on the next drawn frame, in the
    /// paint clock's time base.
    rebase_pending: bool,
}

impl<W: MirrorWindow, C: ScreenCapturer> Mirror<W, C> {
    /// Wire the components and put the window into source selection.
    pub fn new(
        mut window: W,
        capturer: C,
        regions: RegionModel,
        zoom: ZoomController,
        settings: MirrorSettings,
    ) -> Self {
        let mode = ModeController::new(settings.titles);
        mode.show_initial(&mut window, &regions);

        Self {
            window,
            capturer,
            mode,
            regions,
            zoom,
            stats: FrameRateTracker::new(),
            scaler: settings.scaler,
            show_fps: settings.show_fps,
            clock: Instant::now(),
            last_frame: None,
            capture_failing: false,
            draw_failing: false,
            rebase_pending: false,
        }
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Apply a user command. `Break` means the process should exit now.
    pub fn handle_command(&mut self, command: Command) -> ControlFlow<()> {
        debug!(%command, mode = %self.mode.mode(), "command");

        match command {
            Command::SelectSource => {
                self.mode
                    .enter_source_selection(&mut self.window, &mut self.regions);
            }
            Command::SelectDestination => {
                let zoom = self.zoom.current_level();
                if self
                    .mode
                    .enter_mirroring(&mut self.window, &mut self.regions, zoom)
                {
                    self.rebase_pending = true;
                }
            }
            Command::ZoomIn | Command::ZoomOut => self.step_zoom(command == Command::ZoomIn),
            Command::ToggleFpsDisplay => {
                self.show_fps = !self.show_fps;
                if self.mode.is_mirroring() {
                    self.window.set_title(self.mode.titles().base());
                }
                debug!(show_fps = self.show_fps, "fps display toggled");
            }
            Command::Exit => {
                debug!("exit requested");
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    fn step_zoom(&mut self, zoom_in: bool) {
        let changed = if zoom_in {
            self.zoom.step_in()
        } else {
            self.zoom.step_out()
        };
        if !changed {
            debug!(level = self.zoom.current_level(), "zoom at ladder boundary");
            return;
        }

        let level = self.zoom.current_level();
        debug!(level, "zoom changed");
        if let Some(destination) = self.mode.apply_zoom(&mut self.window, &mut self.regions, level) {
            debug!(%destination, "destination refit");
        }
    }

    // ── Render path ──────────────────────────────────────────────

    /// One render-driver tick: request a repaint, then refresh the title.
    ///
    /// The title is set on every tick while mirroring even when it has
    /// not changed; this keeps the capture/draw pipeline responsive on
    /// some window managers.
    pub fn tick(&mut self) {
        self.window.request_repaint();

        if self.mode.is_mirroring() {
            let title = if self.show_fps {
                self.mode
                    .titles()
                    .with_fps(self.stats.frames_per_second(), self.stats.frame_counter())
            } else {
                self.mode.titles().base().to_string()
            };
            self.window.set_title(&title);
        }
    }

    /// Paint handler, timestamped from the mirror's own clock.
    pub fn paint(&mut self) {
        let now = self.clock.elapsed().as_millis() as u64;
        self.paint_at(now);
    }

    /// Paint handler with an explicit timestamp in milliseconds.
    ///
    /// In source selection nothing is captured; the window just shows
    /// its own frame for the user to position. While mirroring, the
    /// source is captured, scaled and drawn at the origin.
    pub fn paint_at(&mut self, now_ms: u64) {
        if !self.mode.is_mirroring() {
            return;
        }

        let source = self.regions.source();
        match self.capturer.capture(source) {
            Ok(frame) => {
                if self.capture_failing {
                    info!(%source, "capture recovered");
                    self.capture_failing = false;
                }

                let zoom = self.zoom.current_level();
                let frame = if self.scaler.is_active(zoom) {
                    self.scaler.scale(&frame, zoom).into_owned()
                } else {
                    frame
                };

                if self.draw(&frame) {
                    self.stats.record_frame();
                    if self.rebase_pending {
                        // The first frame after (re)entering mirroring opens
                        // the sampling window.
                        self.stats.rebase(now_ms);
                        self.rebase_pending = false;
                    } else {
                        self.stats.maybe_update_rate(now_ms);
                    }
                }
                self.last_frame = Some(frame);
            }
            Err(e) => {
                if self.capture_failing {
                    debug!(%source, "capture still failing: {e}");
                } else {
                    warn!(%source, "capture failed: {e}; showing last good frame");
                    self.capture_failing = true;
                }

                if let Some(frame) = self.last_frame.take() {
                    self.draw(&frame);
                    self.last_frame = Some(frame);
                }
            }
        }
    }

    fn draw(&mut self, frame: &Frame) -> bool {
        match self.window.draw(frame) {
            Ok(()) => {
                self.draw_failing = false;
                true
            }
            Err(e) => {
                if !self.draw_failing {
                    warn!("draw failed: {e}");
                    self.draw_failing = true;
                }
                false
            }
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn regions(&self) -> &RegionModel {
        &self.regions
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn stats(&self) -> &FrameRateTracker {
        &self.stats
    }

    pub fn show_fps(&self) -> bool {
        self.show_fps
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn capturer_mut(&mut self) -> &mut C {
        &mut self.capturer
    }
}
