//! Cancellable periodic tick timer.
//!
//! A single background thread waits one period on a stop channel, ticks the
//! shared controller, and waits again.  The wait only starts after the tick
//! returns, so ticks never overlap.  [`PeriodicTicker::stop`] (or dropping
//! the ticker) signals the thread and joins it: once it returns, no further
//! tick can fire.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use cm_flow::FlowModel;

use crate::{SharedController, SimError, SimObserver, SimResult};

/// Owns the timer thread.  The observer lives on that thread while the
/// ticker runs and is handed back by [`stop`][Self::stop].
pub struct PeriodicTicker<O> {
    stop_tx: Option<Sender<()>>,
    handle:  Option<JoinHandle<O>>,
    period:  Duration,
}

impl<O: SimObserver + Send + 'static> PeriodicTicker<O> {
    /// Start ticking `controller` at its configured period.
    pub fn start<F: FlowModel>(controller: SharedController<F>, observer: O) -> SimResult<Self> {
        let period = lock(&controller).clock().period();
        Self::with_period(controller, period, observer)
    }

    /// Start ticking `controller` every `period`.
    pub fn with_period<F: FlowModel>(
        controller: SharedController<F>,
        period:     Duration,
        observer:   O,
    ) -> SimResult<Self> {
        if period.is_zero() {
            return Err(SimError::Config("tick period must be positive".into()));
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("cm-ticker".into())
            .spawn(move || {
                let mut observer = observer;
                loop {
                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => {
                            lock(&controller).tick_with(&mut observer);
                        }
                        // Stop requested, or the ticker handle was leaked
                        // and its sender dropped.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                let final_tick = lock(&controller).current_tick();
                observer.on_sim_end(final_tick);
                debug!(%final_tick, "ticker thread exiting");
                observer
            })?;

        info!(period_ms = period.as_millis() as u64, "ticker started");
        Ok(Self { stop_tx: Some(stop_tx), handle: Some(handle), period })
    }
}

impl<O> PeriodicTicker<O> {
    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop the timer and wait for the thread to finish.
    ///
    /// Returns the observer, or `None` if the timer thread panicked.
    pub fn stop(mut self) -> Option<O> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<O> {
        if let Some(tx) = self.stop_tx.take() {
            // The thread may already be gone; dropping `tx` covers that case.
            let _ = tx.send(());
        }
        let observer = self.handle.take()?.join().ok();
        info!("ticker stopped");
        observer
    }
}

impl<O> Drop for PeriodicTicker<O> {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}

/// Lock the controller, recovering from a poisoned mutex.  A tick publishes
/// zone state in a single assignment, so the inner state stays consistent.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
