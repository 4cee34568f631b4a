//! Presence tracker driver.
//!
//! One driver task per session: it owns the [`PresenceState`], feeds
//! signals into the machine, runs the heartbeat interval and the
//! idle/offline deadline timer, and reports to the store. All timers hang
//! off one [`CancellationToken`] so `stop()` releases everything at once.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use pulse_core::config::tracker::TrackerConfig;
use pulse_core::presence::{PresenceReport, PresenceStatus};
use pulse_core::result::AppResult;
use pulse_store::PresenceStore;

use crate::context::SessionContext;
use crate::machine::{self, Effect, PresenceState};
use crate::signal::Signal;

/// Signals buffered between the host's event callbacks and the driver.
/// Bursts beyond this are dropped; activity signals are idempotent.
const SIGNAL_BUFFER: usize = 64;

/// Client-side presence tracker for one authenticated session.
///
/// Mountable behavior, not a UI element: the host calls [`start`] once
/// per session, feeds [`Signal`]s as they happen, and calls [`stop`] on
/// teardown. Both `start` and `stop` are idempotent, so a hosting layout
/// that remounts on navigation cannot double-start tracking or leak
/// timers.
///
/// [`start`]: PresenceTracker::start
/// [`stop`]: PresenceTracker::stop
#[derive(Debug)]
pub struct PresenceTracker {
    config: TrackerConfig,
    store: Arc<dyn PresenceStore>,
    signal_tx: mpsc::Sender<Signal>,
    signal_rx: Mutex<Option<mpsc::Receiver<Signal>>>,
    cancel: CancellationToken,
    started: AtomicBool,
}

impl PresenceTracker {
    /// Create a tracker reporting to `store`. Nothing runs until `start`.
    pub fn new(config: TrackerConfig, store: Arc<dyn PresenceStore>) -> Self {
        let (signal_tx, signal_rx) = mpsc::channel(SIGNAL_BUFFER);
        Self {
            config,
            store,
            signal_tx,
            signal_rx: Mutex::new(Some(signal_rx)),
            cancel: CancellationToken::new(),
            started: AtomicBool::new(false),
        }
    }

    /// Begin observation for `ctx`.
    ///
    /// Fails fast with a validation error if the context carries a nil
    /// identity. A second `start` without a matching `stop` is a no-op.
    /// Without a reachable async runtime the tracker degrades to an inert
    /// no-op (never reports, presents as offline) instead of failing the
    /// host.
    pub fn start(&self, ctx: SessionContext) -> AppResult<()> {
        ctx.validate()?;

        if self.started.swap(true, Ordering::SeqCst) {
            debug!(
                "Presence tracker already started for session {}, ignoring",
                ctx.session_id
            );
            return Ok(());
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(
                    "No async runtime available; presence tracking disabled for session {}",
                    ctx.session_id
                );
                // Inert tracker: no driver task will ever run, so mark it
                // stopped up front and let signal() drop everything.
                self.cancel.cancel();
                return Ok(());
            }
        };

        let receiver = self
            .signal_rx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        let Some(signals) = receiver else {
            return Ok(());
        };

        runtime.spawn(drive(
            ctx,
            self.config.clone(),
            Arc::clone(&self.store),
            signals,
            self.cancel.clone(),
        ));
        Ok(())
    }

    /// End observation: cancel all timers and the driver task, which
    /// sends one best-effort final offline report on its way out.
    /// Safe to call any number of times.
    pub fn stop(&self) {
        if !self.started.load(Ordering::SeqCst) {
            return;
        }
        if !self.cancel.is_cancelled() {
            debug!("Stopping presence tracker");
            self.cancel.cancel();
        }
    }

    /// Feed an activity/lifecycle signal. Non-blocking; signals arriving
    /// after `stop` (or beyond the buffer) are dropped.
    pub fn signal(&self, signal: Signal) {
        if self.cancel.is_cancelled() {
            return;
        }
        match self.signal_tx.try_send(signal) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!("Signal buffer full, dropping {:?}", signal);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }

    /// Whether the tracker has been started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::SeqCst) && !self.cancel.is_cancelled()
    }
}

impl Drop for PresenceTracker {
    fn drop(&mut self) {
        // Teardown guarantee: dropping the tracker releases the driver
        // task even if the host never called stop().
        self.cancel.cancel();
    }
}

/// Driver loop. Owns the state; everything else talks to it via signals.
async fn drive(
    ctx: SessionContext,
    config: TrackerConfig,
    store: Arc<dyn PresenceStore>,
    mut signals: mpsc::Receiver<Signal>,
    cancel: CancellationToken,
) {
    let mut state = PresenceState::new(Instant::now());
    let mut heartbeat = time::interval(config.heartbeat_interval());
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut debounce_at: Option<Instant> = None;

    debug!(
        "Presence tracker running: user={} session={}",
        ctx.user_id, ctx.session_id
    );

    loop {
        let (deadline_trigger, deadline_at) = match machine::next_deadline(&state, &config) {
            Some((trigger, at)) => (Some(trigger), at),
            // Branch is disabled below; the instant is never awaited.
            None => (None, Instant::now()),
        };
        let debounce_deadline = debounce_at.unwrap_or_else(Instant::now);

        tokio::select! {
            biased;

            _ = cancel.cancelled() => break,

            maybe_signal = signals.recv() => match maybe_signal {
                Some(signal) => {
                    let effect =
                        machine::apply(&mut state, signal.trigger(), Instant::now(), &config);
                    match effect {
                        Effect::None => {}
                        Effect::ReportDebounced => {
                            // At most one pending debounced report per burst.
                            if debounce_at.is_none() {
                                debounce_at = Some(Instant::now() + config.sync_debounce());
                            }
                        }
                        Effect::ReportImmediate => {
                            debounce_at = None;
                            report(&store, &ctx, &mut state).await;
                        }
                    }
                }
                None => break,
            },

            _ = time::sleep_until(debounce_deadline), if debounce_at.is_some() => {
                debounce_at = None;
                report(&store, &ctx, &mut state).await;
            }

            _ = time::sleep_until(deadline_at), if deadline_trigger.is_some() => {
                if let Some(trigger) = deadline_trigger {
                    let effect = machine::apply(&mut state, trigger, Instant::now(), &config);
                    if effect == Effect::ReportImmediate {
                        debounce_at = None;
                        report(&store, &ctx, &mut state).await;
                    }
                }
            }

            _ = heartbeat.tick() => {
                report(&store, &ctx, &mut state).await;
            }
        }
    }

    // Best-effort final report; at teardown a failure is irrelevant.
    state.status = PresenceStatus::Offline;
    let final_report = PresenceReport::now(ctx.user_id, ctx.session_id, PresenceStatus::Offline);
    if let Err(e) = store.report(final_report).await {
        debug!("Final offline report failed: {e}");
    }

    debug!("Presence tracker stopped: session={}", ctx.session_id);
}

/// Send the current status to the store. Failures defer to the next
/// heartbeat tick; presence is best-effort telemetry, never an error
/// the host sees.
async fn report(store: &Arc<dyn PresenceStore>, ctx: &SessionContext, state: &mut PresenceState) {
    let report = PresenceReport::now(ctx.user_id, ctx.session_id, state.status);
    match store.report(report).await {
        Ok(()) => state.last_synced_at = Some(Instant::now()),
        Err(e) => debug!("Presence report failed (will retry on heartbeat): {e}"),
    }
}
