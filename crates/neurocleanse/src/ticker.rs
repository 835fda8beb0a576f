//! Scheduled countdown
//!
//! `SessionTimer` drives a [`TimerState`] from a tokio task that ticks once
//! per period. The task handle is kept explicitly: pause, reset and drop
//! abort it, so no tick can land after the caller has stopped the timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::timer::{TimerEvent, TimerState, TimerStatus};

/// Shortest tick period a timer will run with
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Point-in-time view of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub total_secs: u32,
    pub remaining_secs: u32,
    pub progress_percent: u32,
}

impl TimerSnapshot {
    fn of(state: &TimerState) -> Self {
        Self {
            status: state.status(),
            total_secs: state.total_secs(),
            remaining_secs: state.remaining_secs(),
            progress_percent: state.progress_percent(),
        }
    }

    pub fn running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn clock(&self) -> String {
        neuro_core::format::clock(self.remaining_secs)
    }
}

/// A countdown that ticks on its own
///
/// Must be created and driven inside a tokio runtime.
///
/// Events are notifications, not state: a `Tick` sent just before a pause
/// or reset can still be waiting in the channel afterwards. Read
/// [`SessionTimer::snapshot`] (or the snapshot that `pause`/`reset` return)
/// for the current remaining time.
pub struct SessionTimer {
    state: Arc<Mutex<TimerState>>,
    ticker: Option<JoinHandle<()>>,
    tick_interval: Duration,
    events: mpsc::UnboundedSender<TimerEvent>,
}

impl SessionTimer {
    /// Create an idle timer of `total_secs` and the receiver for its events
    pub fn new(total_secs: u32) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let timer = Self {
            state: Arc::new(Mutex::new(TimerState::new(total_secs))),
            ticker: None,
            tick_interval: Duration::from_secs(1),
            events,
        };
        (timer, rx)
    }

    /// Change the tick period (takes effect on the next start)
    ///
    /// Periods shorter than one millisecond are raised to one millisecond.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval.max(MIN_TICK_INTERVAL);
        self
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::of(&*self.state.lock().await)
    }

    /// Start counting down. Returns false if the timer could not start.
    pub async fn start(&mut self) -> bool {
        let started = self.state.lock().await.start();
        if started {
            self.spawn_ticker();
            info!("Timer started");
        }
        started
    }

    /// Stop counting, keeping the remaining time
    pub async fn pause(&mut self) -> TimerSnapshot {
        self.cancel_ticker();
        let mut state = self.state.lock().await;
        if state.pause() {
            info!("Timer paused at {}s", state.remaining_secs());
        }
        TimerSnapshot::of(&state)
    }

    /// Start when stopped, pause when running
    pub async fn toggle(&mut self) -> TimerSnapshot {
        if self.snapshot().await.running() {
            self.pause().await
        } else {
            self.start().await;
            self.snapshot().await
        }
    }

    /// Stop and restore the full duration
    pub async fn reset(&mut self) -> TimerSnapshot {
        self.cancel_ticker();
        let mut state = self.state.lock().await;
        state.reset();
        info!("Timer reset to {}s", state.total_secs());
        TimerSnapshot::of(&state)
    }

    fn spawn_ticker(&mut self) {
        self.cancel_ticker();

        let state = self.state.clone();
        let events = self.events.clone();
        let period = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;

                let mut guard = state.lock().await;
                let Some(event) = guard.tick() else {
                    break;
                };
                // Receiver may be gone; the countdown itself still stands.
                let _ = events.send(event);

                if event == TimerEvent::Completed {
                    info!("Timer completed");
                    break;
                }
            }
            debug!("Ticker finished");
        });

        self.ticker = Some(handle);
    }

    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
