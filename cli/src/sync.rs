//! Share and view loops.
//!
//! ARCHITECTURE
//! ============
//! Each loop is one tokio task that alternates between a single request and
//! a fixed wait. Request outcomes never change the schedule: failures are
//! logged and the next cycle runs after the same interval.
//!
//! Cancellation is cooperative. [`StopSignal::stop`] sets a flag that is
//! checked before every request, so an in-flight request always completes
//! and no further request is issued. A stop during the wait cuts the wait
//! short.
//!
//! The current [`LoopState`] is published on a `watch` channel and read
//! through [`LoopHandle::state`].

use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use location::{UserId, parse_map_view_response};
use tokio::sync::{Notify, watch};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::api::{FetchOutcome, SyncApi};
use crate::map::MapSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    /// Share loop: a publish is in flight.
    Sending,
    /// View loop: a fetch is in flight.
    Requesting,
    /// Waiting for the next cycle.
    Scheduled,
    Stopped,
}

// =============================================================================
// STOP SIGNAL
// =============================================================================

/// Shared stop flag. Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
    wake: Arc<Notify>,
}

impl StopSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
        self.wake.notify_waiters();
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Sleep for `interval`, returning early if stopped.
    async fn wait(&self, interval: Duration) {
        let mut notified = pin!(self.wake.notified());
        notified.as_mut().enable();
        if self.is_stopped() {
            return;
        }
        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            () = notified => {}
        }
    }
}

// =============================================================================
// LOOP HANDLE
// =============================================================================

pub struct LoopHandle {
    stop: StopSignal,
    state: watch::Receiver<LoopState>,
    task: JoinHandle<()>,
}

impl LoopHandle {
    /// Request a stop at the next cycle boundary.
    pub fn stop(&self) {
        self.stop.stop();
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        *self.state.borrow()
    }

    /// Wait for the loop task to exit.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] if the task panicked or was aborted.
    pub async fn join(self) -> Result<(), JoinError> {
        self.task.await
    }
}

// =============================================================================
// SHARE LOOP
// =============================================================================

/// Publish `map`'s viewport for `id` every `interval` until `stop` fires.
pub fn spawn_share_loop<M: MapSurface>(
    api: Arc<dyn SyncApi>,
    map: M,
    id: UserId,
    interval: Duration,
    stop: StopSignal,
) -> LoopHandle {
    let (state_tx, state) = watch::channel(LoopState::Idle);
    let task = tokio::spawn(run_share_loop(api, map, id, interval, stop.clone(), state_tx));
    LoopHandle { stop, state, task }
}

async fn run_share_loop<M: MapSurface>(
    api: Arc<dyn SyncApi>,
    map: M,
    id: UserId,
    interval: Duration,
    stop: StopSignal,
    state: watch::Sender<LoopState>,
) {
    info!(%id, interval_ms = interval.as_millis(), "share loop started");
    while !stop.is_stopped() {
        state.send_replace(LoopState::Sending);
        let wire = map.map_view().to_wire();
        match api.publish(&id, &wire).await {
            Ok(()) => debug!(%id, "view published"),
            Err(e) => warn!(%id, error = %e, "publish failed"),
        }
        state.send_replace(LoopState::Scheduled);
        stop.wait(interval).await;
    }
    state.send_replace(LoopState::Stopped);
    info!(%id, "share loop stopped");
}

// =============================================================================
// VIEW LOOP
// =============================================================================

/// Fetch `id`'s viewport every `interval` and apply valid ones to `map`.
pub fn spawn_view_loop<M: MapSurface>(
    api: Arc<dyn SyncApi>,
    map: M,
    id: UserId,
    interval: Duration,
    stop: StopSignal,
) -> LoopHandle {
    let (state_tx, state) = watch::channel(LoopState::Idle);
    let task = tokio::spawn(run_view_loop(api, map, id, interval, stop.clone(), state_tx));
    LoopHandle { stop, state, task }
}

async fn run_view_loop<M: MapSurface>(
    api: Arc<dyn SyncApi>,
    map: M,
    id: UserId,
    interval: Duration,
    stop: StopSignal,
    state: watch::Sender<LoopState>,
) {
    info!(%id, interval_ms = interval.as_millis(), "view loop started");
    while !stop.is_stopped() {
        state.send_replace(LoopState::Requesting);
        match api.fetch(&id).await {
            Ok(FetchOutcome::Found(body)) => match parse_map_view_response(&body) {
                Ok(view) => map.set_map_view(&view),
                Err(e) => warn!(%id, error = %e, "ignoring invalid view"),
            },
            Ok(FetchOutcome::NotFound) => debug!(%id, "no view published yet"),
            Err(e) => warn!(%id, error = %e, "fetch failed"),
        }
        state.send_replace(LoopState::Scheduled);
        stop.wait(interval).await;
    }
    state.send_replace(LoopState::Stopped);
    info!(%id, "view loop stopped");
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
