//! Background render driver.
//!
//! Sleeps a fixed delay, then asks the UI context for a repaint, forever
//! (until cancelled). It is not locked to the display refresh rate and
//! never touches pixels itself. If the UI context has not drained the
//! previous requests the new one is dropped; the next tick is the retry.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// ~50 Hz.
pub const DEFAULT_RENDER_DELAY: Duration = Duration::from_millis(20);

/// Outstanding repaint requests the UI context may lag behind by.
const REPAINT_QUEUE_DEPTH: usize = 2;

/// A request for the UI context to run one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepaintRequest {
    /// Sequence number of the tick that produced the request.
    pub tick: u64,
}

/// Bounded channel carrying repaint requests to the UI context.
pub fn repaint_channel() -> (mpsc::Sender<RepaintRequest>, mpsc::Receiver<RepaintRequest>) {
    mpsc::channel(REPAINT_QUEUE_DEPTH)
}

/// Paces render passes on a fixed delay.
///
/// # Lifetime
///
/// [`run`](Self::run) loops until the token from
/// [`cancel_token`](Self::cancel_token) is cancelled or the receiving
/// half of the channel is dropped.
pub struct RenderDriver {
    delay: Duration,
    tx: mpsc::Sender<RepaintRequest>,
    cancel: CancellationToken,
}

impl RenderDriver {
    pub fn new(delay: Duration, tx: mpsc::Sender<RepaintRequest>) -> Self {
        Self {
            delay,
            tx,
            cancel: CancellationToken::new(),
        }
    }

    /// A token that stops the driver when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Spawn [`run`](Self::run) on the Tokio runtime.
    pub fn spawn(self) -> JoinHandle<u64> {
        tokio::spawn(self.run())
    }

    /// Run the pacing loop. Returns the number of requests delivered.
    pub async fn run(self) -> u64 {
        let mut tick: u64 = 0;
        let mut delivered: u64 = 0;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(self.delay) => {}
            }
            tick += 1;

            match self.tx.try_send(RepaintRequest { tick }) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    trace!(tick, "UI context busy; dropping repaint request");
                }
                Err(TrySendError::Closed(_)) => {
                    debug!("repaint receiver closed; stopping render driver");
                    break;
                }
            }
        }

        debug!(tick, delivered, "render driver stopped");
        delivered
    }
}

// ── Tests ────────────────────────────────────────────────────────
