//! Tokio driver for an [`Engine`].
//!
//! Everything runs on one thread inside a [`LocalSet`](tokio::task::LocalSet):
//! change batches and poll ticks are handled one at a time from a single
//! `select!` loop, and delayed activations are `spawn_local` tasks. Element
//! handles therefore never need to be `Send`.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::engine::Engine;
use crate::host::{Host, Timers};
use crate::types::{BatchOutcome, ChangeNotification, PollOutcome};

/// One delivery from the host's change subscription.
pub type Batch<E> = Vec<ChangeNotification<E>>;

/// [`Timers`] backed by the tokio clock.
///
/// # Panics
///
/// `schedule_once` panics when called outside a
/// [`LocalSet`](tokio::task::LocalSet), so an engine using these timers
/// panics on its first delayed dispatch unless it is driven from one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimers;

impl Timers for TokioTimers {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

/// Create the channel a host pushes change batches into.
#[must_use]
pub fn change_feed<E>() -> (mpsc::UnboundedSender<Batch<E>>, mpsc::UnboundedReceiver<Batch<E>>) {
    mpsc::unbounded_channel()
}

/// Run `engine` until the change feed closes, then hand it back.
///
/// The first poll tick fires immediately.
pub async fn watch<H, T>(
    mut engine: Engine<H, T>,
    mut batches: mpsc::UnboundedReceiver<Batch<H::Element>>,
) -> Engine<H, T>
where
    H: Host + 'static,
    T: Timers,
{
    let mut ticker = tokio::time::interval(engine.config().poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(
        attributes = ?engine.watched_attributes(),
        poll_interval = ?engine.config().poll_interval,
        "watching for interrupts"
    );

    loop {
        tokio::select! {
            maybe = batches.recv() => match maybe {
                Some(batch) => {
                    let outcome = engine.classify(&batch);
                    if outcome != BatchOutcome::Consumed {
                        debug!(%outcome, "batch handled");
                    }
                }
                None => break,
            },
            _ = ticker.tick() => {
                if engine.poll() == PollOutcome::Resolved {
                    debug!(location = engine.session_location(), "poll dismissed interrupt");
                }
            }
        }
    }

    info!("change feed closed; watcher stopped");
    engine
}
