//! Integration tests: the full mirror wired to fake window and capture
//! collaborators, driven through commands, ticks and paints.

use std::ops::ControlFlow;

use eco_core::{
    Chrome, Command, EcoError, Frame, ImageScaler, Mirror, MirrorSettings, MirrorWindow, Mode,
    PixelFormat, Rect, RegionModel, ScreenCapturer, Titles, ZoomController, DEFAULT_ZOOM_LEVELS,
};

// ── Fakes ────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeWindow {
    bounds: Rect,
    title: String,
    title_updates: usize,
    set_bounds_calls: usize,
    repaints: usize,
    drawn: Vec<(u32, u32, u8)>,
    fail_draw: bool,
}

impl FakeWindow {
    fn calls(&self) -> usize {
        self.title_updates + self.set_bounds_calls + self.repaints + self.drawn.len()
    }
}

impl MirrorWindow for FakeWindow {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, rect: Rect) {
        self.bounds = rect;
        self.set_bounds_calls += 1;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.title_updates += 1;
    }

    fn request_repaint(&mut self) {
        self.repaints += 1;
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), EcoError> {
        if self.fail_draw {
            return Err(EcoError::Render("surface lost".into()));
        }
        self.drawn
            .push((frame.width(), frame.height(), frame.as_bytes()[0]));
        Ok(())
    }
}

/// Produces solid frames whose first byte is a running shade.
#[derive(Default)]
struct FakeCapturer {
    requests: Vec<Rect>,
    shade: u8,
    fail: bool,
}

impl ScreenCapturer for FakeCapturer {
    fn capture(&mut self, region: Rect) -> Result<Frame, EcoError> {
        self.requests.push(region);
        if self.fail {
            return Err(EcoError::Capture("region off screen".into()));
        }
        self.shade = self.shade.wrapping_add(1);
        let len = (region.width * region.height * 4) as usize;
        Ok(Frame::from_raw(region.width, region.height, PixelFormat::Bgra8, vec![self.shade; len]).unwrap())
    }
}

// ── Helpers ──────────────────────────────────────────────────────

const SCREEN_WIDTH: u32 = 1920;

fn mirror_with_zoom(zoom: f64) -> Mirror<FakeWindow, FakeCapturer> {
    let source = RegionModel::default_source(SCREEN_WIDTH);
    let regions = RegionModel::centered(source, SCREEN_WIDTH, 0, zoom, Chrome::default());
    let zoom = ZoomController::new(DEFAULT_ZOOM_LEVELS.to_vec(), zoom).unwrap();
    let settings = MirrorSettings {
        titles: Titles::new("Mirror"),
        show_fps: false,
        scaler: ImageScaler::default(),
    };
    Mirror::new(FakeWindow::default(), FakeCapturer::default(), regions, zoom, settings)
}

fn mirror() -> Mirror<FakeWindow, FakeCapturer> {
    mirror_with_zoom(1.0)
}

fn cont(flow: ControlFlow<()>) {
    assert_eq!(flow, ControlFlow::Continue(()));
}

// ── Mode transitions ─────────────────────────────────────────────

#[test]
fn starts_in_source_selection_on_source_rect() {
    let m = mirror();
    assert_eq!(m.mode(), Mode::SourceSelection);
    assert_eq!(m.window().bounds, Rect::new(960, 900, 600, 200));
    assert_eq!(m.window().title, "Mirror: select source area and press \"D\"");
}

#[test]
fn default_source_to_mirroring_end_to_end() {
    let mut m = mirror();
    let dest_origin = m.regions().destination().origin();

    cont(m.handle_command(Command::SelectDestination));

    assert_eq!(m.mode(), Mode::Mirroring);
    assert_eq!(m.regions().source(), Rect::new(960, 900, 600, 200));
    let expected = Rect::new(dest_origin.0, dest_origin.1, 610, 232);
    assert_eq!(m.regions().destination(), expected);
    assert_eq!(m.window().bounds, expected);
    assert_eq!(m.window().title, "Mirror");
}

#[test]
fn source_taken_from_window_before_transition() {
    let mut m = mirror();
    // User resizes the selection window.
    m.window_mut().bounds = Rect::new(200, 300, 400, 100);

    cont(m.handle_command(Command::SelectDestination));
    assert_eq!(m.regions().source(), Rect::new(200, 300, 400, 100));
    assert_eq!(m.window().bounds.size(), eco_core::Size::new(410, 132));
}

#[test]
fn destination_taken_from_window_on_select_source() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));

    // User drags the destination window.
    m.window_mut().bounds = Rect::new(12, 34, 610, 232);
    cont(m.handle_command(Command::SelectSource));

    assert_eq!(m.mode(), Mode::SourceSelection);
    assert_eq!(m.regions().destination(), Rect::new(12, 34, 610, 232));
    assert_eq!(m.window().bounds, Rect::new(960, 900, 600, 200));

    // Going back keeps the moved position.
    cont(m.handle_command(Command::SelectDestination));
    assert_eq!(m.window().bounds, Rect::new(12, 34, 610, 232));
}

#[test]
fn repeated_select_destination_is_ignored() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));
    let calls = m.window().set_bounds_calls;

    cont(m.handle_command(Command::SelectDestination));
    assert_eq!(m.window().set_bounds_calls, calls);
    assert_eq!(m.regions().source(), Rect::new(960, 900, 600, 200));
}

// ── Zoom ─────────────────────────────────────────────────────────

#[test]
fn zoom_while_mirroring_resizes_live() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));
    let origin = m.window().bounds.origin();

    cont(m.handle_command(Command::ZoomIn));
    assert_eq!(m.zoom().current_level(), 1.25);
    assert_eq!(m.window().bounds, Rect::new(origin.0, origin.1, 760, 282));

    cont(m.handle_command(Command::ZoomOut));
    cont(m.handle_command(Command::ZoomOut));
    assert_eq!(m.zoom().current_level(), 0.8);
    assert_eq!(m.window().bounds, Rect::new(origin.0, origin.1, 490, 192));
}

#[test]
fn zoom_at_boundary_changes_nothing() {
    let mut m = mirror_with_zoom(4.0);
    cont(m.handle_command(Command::SelectDestination));
    let calls = m.window().set_bounds_calls;
    let bounds = m.window().bounds;

    cont(m.handle_command(Command::ZoomIn));
    cont(m.handle_command(Command::ZoomIn));
    assert_eq!(m.zoom().current_level(), 4.0);
    assert_eq!(m.window().set_bounds_calls, calls);
    assert_eq!(m.window().bounds, bounds);
}

#[test]
fn zoom_during_selection_applies_on_next_mirroring() {
    let mut m = mirror();
    let calls = m.window().set_bounds_calls;

    cont(m.handle_command(Command::ZoomOut));
    assert_eq!(m.window().set_bounds_calls, calls);
    assert_eq!(m.window().bounds, Rect::new(960, 900, 600, 200));

    cont(m.handle_command(Command::SelectDestination));
    assert_eq!(m.window().bounds.size(), eco_core::Size::new(490, 192));
}

// ── Render path ──────────────────────────────────────────────────

#[test]
fn paint_in_selection_captures_nothing() {
    let mut m = mirror();
    m.paint_at(0);
    assert!(m.capturer_mut().requests.is_empty());
    assert!(m.window().drawn.is_empty());
    assert_eq!(m.stats().frame_counter(), 0);
}

#[test]
fn paint_while_mirroring_captures_source_and_draws() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));

    m.paint_at(10);
    assert_eq!(m.capturer_mut().requests, vec![Rect::new(960, 900, 600, 200)]);
    assert_eq!(m.window().drawn, vec![(600, 200, 1)]);
    assert_eq!(m.stats().frame_counter(), 1);
}

#[test]
fn zoomed_frame_keeps_capture_dimensions() {
    let mut m = mirror_with_zoom(2.0);
    cont(m.handle_command(Command::SelectDestination));
    assert_eq!(m.window().bounds.size(), eco_core::Size::new(1210, 432));

    m.paint_at(10);
    let (w, h, _) = m.window().drawn[0];
    assert_eq!((w, h), (600, 200));
}

#[test]
fn capture_failure_redraws_last_good_frame() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));
    m.paint_at(10);

    m.capturer_mut().fail = true;
    m.paint_at(30);
    m.paint_at(50);

    assert_eq!(m.window().drawn, vec![(600, 200, 1), (600, 200, 1), (600, 200, 1)]);
    assert_eq!(m.stats().frame_counter(), 1);

    m.capturer_mut().fail = false;
    m.paint_at(70);
    assert_eq!(m.window().drawn.last(), Some(&(600, 200, 2)));
    assert_eq!(m.stats().frame_counter(), 2);
}

#[test]
fn capture_failure_without_history_draws_nothing() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));
    m.capturer_mut().fail = true;

    m.paint_at(10);
    assert!(m.window().drawn.is_empty());
    assert_eq!(m.stats().frame_counter(), 0);
}

#[test]
fn failed_draw_is_not_counted() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));
    m.window_mut().fail_draw = true;

    m.paint_at(10);
    assert_eq!(m.stats().frame_counter(), 0);
    assert_eq!(m.capturer_mut().requests.len(), 1);
}

#[test]
fn fifty_paints_in_one_second_report_fifty_fps() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));

    m.paint_at(0);
    for i in 1..=50u64 {
        m.paint_at(i * 20);
    }
    assert_eq!(m.stats().frame_counter(), 51);
    assert!((m.stats().frames_per_second() - 50.0).abs() < 1e-9);
}

#[test]
fn fps_window_restarts_on_paint_clock_after_reentry() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));
    for i in 0..=50u64 {
        m.paint_at(i * 20);
    }
    assert!((m.stats().frames_per_second() - 50.0).abs() < 1e-9);

    cont(m.handle_command(Command::SelectSource));
    cont(m.handle_command(Command::SelectDestination));

    // A minute of selection must not be averaged into the next sample.
    let base = 61_000;
    m.paint_at(base);
    assert!((m.stats().frames_per_second() - 50.0).abs() < 1e-9);

    for i in 1..=25u64 {
        m.paint_at(base + i * 40);
    }
    assert_eq!(m.stats().frame_counter(), 77);
    assert!((m.stats().frames_per_second() - 25.0).abs() < 1e-9);
}

#[test]
fn fps_window_opens_at_first_drawn_frame() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));
    m.capturer_mut().fail = true;
    m.paint_at(0);
    m.paint_at(500);

    m.capturer_mut().fail = false;
    m.paint_at(2_000);
    for i in 1..=10u64 {
        m.paint_at(2_000 + i * 100);
    }
    assert_eq!(m.stats().frame_counter(), 11);
    assert!((m.stats().frames_per_second() - 10.0).abs() < 1e-9);
}

// ── Tick & title ─────────────────────────────────────────────────

#[test]
fn tick_requests_repaint_and_keeps_selection_title() {
    let mut m = mirror();
    m.tick();
    m.tick();
    assert_eq!(m.window().repaints, 2);
    assert_eq!(m.window().title, "Mirror: select source area and press \"D\"");
}

#[test]
fn tick_refreshes_title_every_time_while_mirroring() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));
    let updates = m.window().title_updates;

    m.tick();
    m.tick();
    assert_eq!(m.window().title_updates, updates + 2);
    assert_eq!(m.window().title, "Mirror");
}

#[test]
fn fps_title_after_toggle() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));
    cont(m.handle_command(Command::ToggleFpsDisplay));
    assert!(m.show_fps());
    assert_eq!(m.window().title, "Mirror");

    let base = 5_000;
    m.paint_at(base);
    for i in 1..=25u64 {
        m.paint_at(base + i * 40);
    }
    m.tick();
    assert_eq!(m.window().title, "Mirror (fps: 25) 26");

    cont(m.handle_command(Command::ToggleFpsDisplay));
    m.tick();
    assert_eq!(m.window().title, "Mirror");
}

// ── Exit ─────────────────────────────────────────────────────────

#[test]
fn exit_breaks_without_touching_the_window() {
    let mut m = mirror();
    cont(m.handle_command(Command::SelectDestination));
    let calls = m.window().calls();

    assert_eq!(m.handle_command(Command::Exit), ControlFlow::Break(()));
    assert_eq!(m.window().calls(), calls);
}
