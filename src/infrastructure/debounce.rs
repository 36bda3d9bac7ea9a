//! Trailing-edge debouncer
//!
//! Each [`Debouncer::schedule`] call aborts whatever was pending and starts
//! a new quiet-period timer; the action runs only once the window passes
//! without another call. Work already started is never interrupted.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

type Action = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Pending action shared between the timer task and `flush`.
///
/// `generation` identifies the timer the action belongs to, so a stale
/// timer never picks up a newer action.
#[derive(Default)]
struct Slot {
    action: Option<Action>,
    generation: u64,
}

pub struct Debouncer {
    window: Duration,
    slot: Arc<Mutex<Slot>>,
    timer: Option<JoinHandle<()>>,
    running: Vec<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Debouncer {
            window,
            slot: Arc::new(Mutex::new(Slot::default())),
            timer: None,
            running: Vec::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace the pending action and restart the quiet period.
    ///
    /// Must be called inside a tokio runtime.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut generation = 0;
        if let Ok(mut slot) = self.slot.lock() {
            // An empty slot means the timer already took its action and is
            // running it; that one has to finish.
            let started = slot.action.is_none();
            if let Some(timer) = self.timer.take() {
                if started {
                    self.running.push(timer);
                } else {
                    timer.abort();
                }
            }
            slot.generation = slot.generation.wrapping_add(1);
            slot.action = Some(Box::pin(action));
            generation = slot.generation;
        }
        self.running.retain(|handle| !handle.is_finished());

        let slot = Arc::clone(&self.slot);
        let window = self.window;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let action = slot
                .lock()
                .ok()
                .filter(|s| s.generation == generation)
                .and_then(|mut s| s.action.take());
            if let Some(action) = action {
                action.await;
            }
        }));
    }

    /// Whether an action is still waiting for its quiet period
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .map(|slot| slot.action.is_some())
            .unwrap_or(false)
    }

    /// Drop the pending action without running it
    pub fn cancel(&mut self) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.action = None;
        }
        self.keep_timer_running();
    }

    /// Run the pending action now, and wait for any action the timer
    /// already started.
    pub async fn flush(&mut self) {
        let pending = self.slot.lock().ok().and_then(|mut s| s.action.take());
        self.keep_timer_running();

        if let Some(action) = pending {
            action.await;
        }
        for handle in self.running.drain(..) {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "debounced action did not finish");
            }
        }
    }

    /// The slot is empty at this point, so the timer either already took its
    /// action (must not be aborted mid-flight) or will find nothing to do.
    fn keep_timer_running(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.running.push(timer);
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
