//! Eye contact online — entry point.
//!
//! ```text
//! eco                      Start with defaults (or ./eco.toml)
//! eco --config <path>     Use custom config TOML
//! eco --gen-config        Dump default config and exit
//! eco --show-fps          Show the frame rate in the title
//! eco --zoom 1.5          Start at another zoom level
//! ```
//!
//! Keys: `S` select source, `D` start mirroring, `Ctrl +`/`Ctrl -`
//! zoom, `F` toggle the frame rate, `Esc` quit.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use eco_core::{Mirror, RenderDriver, repaint_channel};

use eco_gui::capture::GdiCapturer;
use eco_gui::config::MirrorConfig;
use eco_gui::input::translate_event;
use eco_gui::window::{NativeWindow, WindowEvent, WindowOptions, screen_width};

/// How long the UI loop waits for a repaint request before pumping
/// window messages again.
const POLL_INTERVAL: Duration = Duration::from_millis(2);

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "eco", about = "Mirror a screen region into an always-on-top window")]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "eco.toml")]
    config: PathBuf,

    /// Print the default configuration to stdout and exit.
    #[arg(long)]
    gen_config: bool,

    /// Show the frame rate in the title (overrides config).
    #[arg(long)]
    show_fps: bool,

    /// Initial zoom level (overrides config). Must be a ladder rung.
    #[arg(short, long)]
    zoom: Option<f64>,
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        let text = toml::to_string_pretty(&MirrorConfig::default())?;
        println!("{text}");
        return Ok(());
    }

    let mut config = MirrorConfig::load(&cli.config);
    if cli.show_fps {
        config.render.show_fps = true;
    }
    if let Some(zoom) = cli.zoom {
        config.zoom.initial = zoom;
    }

    // Init tracing.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("eco v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Build the core ───────────────────────────────────────

    let zoom = config.zoom_controller()?;
    let screen_width = screen_width();
    let regions = config.region_model(screen_width, zoom.current_level());
    let settings = config.mirror_settings();
    info!(
        screen_width,
        source = %regions.source(),
        destination = %regions.destination(),
        zoom = zoom.current_level(),
        "initial layout"
    );

    // ── 2. Create the window ────────────────────────────────────

    let window = NativeWindow::create(
        settings.titles.source_selection(),
        regions.source(),
        WindowOptions {
            always_on_top: config.window.always_on_top,
            decorated: config.window.decorated,
        },
    )?;

    let mut mirror = Mirror::new(window, GdiCapturer::new(), regions, zoom, settings);

    // ── 3. Start the render driver ──────────────────────────────

    let (repaint_tx, mut repaint_rx) = repaint_channel();
    let driver = RenderDriver::new(config.render_delay(), repaint_tx);
    let cancel = driver.cancel_token();
    let driver_handle = driver.spawn();

    // ── 4. Event loop ───────────────────────────────────────────

    loop {
        let events = mirror.window().poll_events();
        for ev in &events {
            if *ev == WindowEvent::Paint {
                mirror.paint();
                continue;
            }
            if let Some(command) = translate_event(ev) {
                if mirror.handle_command(command).is_break() {
                    std::process::exit(0);
                }
            }
        }

        tokio::select! {
            request = repaint_rx.recv() => match request {
                Some(request) => {
                    mirror.tick();
                    if request.tick % 500 == 0 {
                        debug!(tick = request.tick, fps = %mirror.stats().formatted_rate(), "render");
                    }
                }
                None => break,
            },
            _ = tokio::time::sleep(POLL_INTERVAL) => {}
        }
    }

    // ── 5. Shutdown ─────────────────────────────────────────────

    info!("shutting down");
    cancel.cancel();
    let ticks = driver_handle.await?;
    debug!(ticks, "render driver stopped");

    Ok(())
}
