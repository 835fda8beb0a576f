//! neurocleanse - Focus filter and pomodoro timer for deep work
//!
//! "Silence everything except the thing you are working on."
//!
//! Pieces:
//! - Notification feed behind a swappable source (built-in demo feed or JSON file)
//! - Keyword focus filter that hides notifications unrelated to the task
//! - Task atomizer that breaks a goal into five-minute micro-steps
//! - Pomodoro countdown, as a pure state machine plus a tokio ticker
//! - Workspace controller tying the focus state to the filtered view
//!
//! Commands (see the `neuro` binary):
//! - feed: List incoming notifications
//! - engage TASK: Filter the feed down to the task
//! - steps GOAL: Break a goal into micro-steps
//! - timer [MINS]: Run a pomodoro countdown
//! - config: Show or initialise configuration

pub mod atomizer;
pub mod filter;
pub mod notification;
pub mod ticker;
pub mod timer;
pub mod workspace;

pub use atomizer::{micro_steps, MicroStep, StepList};
pub use filter::{filter, FilterOutcome, FocusFilter};
pub use notification::{
    JsonFileSource, NotificationRecord, NotificationSource, PriorityTag, SeedSource, SourceError,
};
pub use ticker::{SessionTimer, TimerSnapshot};
pub use timer::{TimerEvent, TimerState, TimerStatus};
pub use workspace::{FocusSession, Workspace, WorkspaceError, WorkspaceView};
