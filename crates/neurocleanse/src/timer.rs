//! Pomodoro countdown state machine
//!
//! `TimerState` knows nothing about clocks. Each call to [`TimerState::tick`]
//! is one elapsed second; the scheduling lives in [`crate::ticker`].

/// Default pomodoro length: 25 minutes
pub const DEFAULT_FOCUS_SECS: u32 = 25 * 60;

/// Where the countdown is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Completed,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Completed => "completed",
        }
    }
}

/// Something observable that happened on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second passed; this many remain
    Tick { remaining: u32 },
    /// The countdown reached zero
    Completed,
}

/// Countdown state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    total_secs: u32,
    remaining_secs: u32,
    status: TimerStatus,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_SECS)
    }
}

impl TimerState {
    /// A fresh, idle countdown of `total_secs`
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            status: TimerStatus::Idle,
        }
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.total_secs.saturating_sub(self.remaining_secs)
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Progress as a percentage (0-100)
    pub fn progress_percent(&self) -> u32 {
        if self.total_secs == 0 {
            return 100;
        }
        ((self.elapsed_secs() as u64 * 100) / self.total_secs as u64) as u32
    }

    /// Begin counting down. Returns false when there is nothing to run.
    pub fn start(&mut self) -> bool {
        if self.status != TimerStatus::Idle || self.remaining_secs == 0 {
            return false;
        }
        self.status = TimerStatus::Running;
        true
    }

    /// Stop counting, keeping the remaining time. Returns false if not running.
    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.status = TimerStatus::Idle;
        true
    }

    /// Start when stopped, pause when running. Returns whether it now runs.
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
        self.is_running()
    }

    /// Back to a full, idle countdown
    pub fn reset(&mut self) {
        self.remaining_secs = self.total_secs;
        self.status = TimerStatus::Idle;
    }

    /// Advance one second
    ///
    /// Only a running timer moves. The tick that reaches zero yields
    /// [`TimerEvent::Completed`] and leaves the timer completed, so
    /// completion is reported once per countdown.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.status != TimerStatus::Running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.status = TimerStatus::Completed;
            Some(TimerEvent::Completed)
        } else {
            Some(TimerEvent::Tick {
                remaining: self.remaining_secs,
            })
        }
    }
}
