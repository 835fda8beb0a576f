//! Workspace controller
//!
//! Owns the focus state a front end edits (task text, engaged, quiet) and
//! the notification snapshot it filters. Front ends call the commands and
//! render [`WorkspaceView`]; they never touch the filter directly.

use thiserror::Error;
use tracing::info;

use crate::atomizer::{StepError, StepList, StepToggle};
use crate::filter::{FilterOutcome, FocusFilter};
use crate::notification::{NotificationRecord, NotificationSource, SourceError};

/// Status shown while nothing is being filtered
pub const UNFOCUSED_STATUS: &str = "Cognitive Load: High (88%)";

/// Errors from workspace commands
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Enter a focus task before engaging deep work")]
    EmptyFocus,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Step(#[from] StepError),
}

/// Focus state edited by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusSession {
    pub task: String,
    pub engaged: bool,
    pub quiet: bool,
}

/// Everything a front end needs to draw the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceView<'a> {
    pub engaged: bool,
    pub quiet: bool,
    /// Task text, hidden in quiet mode
    pub task: Option<&'a str>,
    /// Notifications to show, empty in quiet mode
    pub notifications: Vec<&'a NotificationRecord>,
    pub suppressed: usize,
    pub status: String,
}

/// The focus workspace
pub struct Workspace {
    notifications: Vec<NotificationRecord>,
    filter: FocusFilter,
    session: FocusSession,
    steps: Option<StepList>,
}

impl Workspace {
    /// Load a snapshot from `source` and start unfocused
    pub fn load(source: &dyn NotificationSource, filter: FocusFilter) -> Result<Self, WorkspaceError> {
        let notifications = source.load()?;
        info!("Workspace loaded {} notifications", notifications.len());
        Ok(Self::with_notifications(notifications, filter))
    }

    pub fn with_notifications(notifications: Vec<NotificationRecord>, filter: FocusFilter) -> Self {
        Self {
            notifications,
            filter,
            session: FocusSession::default(),
            steps: None,
        }
    }

    pub fn notifications(&self) -> &[NotificationRecord] {
        &self.notifications
    }

    pub fn filter(&self) -> &FocusFilter {
        &self.filter
    }

    pub fn session(&self) -> &FocusSession {
        &self.session
    }

    pub fn steps(&self) -> Option<&StepList> {
        self.steps.as_ref()
    }

    /// Replace the task text
    pub fn set_task(&mut self, task: impl Into<String>) {
        self.session.task = task.into();
    }

    /// Enter deep work; needs a non-blank task
    pub fn engage(&mut self) -> Result<(), WorkspaceError> {
        if self.session.task.trim().is_empty() {
            return Err(WorkspaceError::EmptyFocus);
        }
        self.session.engaged = true;
        info!("Engaged focus on {:?}", self.session.task);
        Ok(())
    }

    /// Leave deep work, dropping quiet mode with it
    pub fn exit(&mut self) {
        self.session.engaged = false;
        self.session.quiet = false;
        info!("Exited focus");
    }

    /// Flip quiet mode; returns the new value
    pub fn toggle_quiet(&mut self) -> bool {
        self.session.quiet = !self.session.quiet;
        self.session.quiet
    }

    /// Filter result for the current state
    pub fn outcome(&self) -> FilterOutcome<'_> {
        self.filter
            .apply(&self.notifications, &self.session.task, self.session.engaged)
    }

    pub fn suppressed(&self) -> usize {
        self.outcome().suppressed
    }

    pub fn view(&self) -> WorkspaceView<'_> {
        let outcome = self.outcome();
        let quiet = self.session.quiet;

        let status = if self.session.engaged {
            format!("{} distractions blocked", outcome.suppressed)
        } else {
            UNFOCUSED_STATUS.to_string()
        };

        WorkspaceView {
            engaged: self.session.engaged,
            quiet,
            task: (!quiet).then_some(self.session.task.as_str()),
            notifications: if quiet { Vec::new() } else { outcome.visible },
            suppressed: outcome.suppressed,
            status,
        }
    }

    /// Regenerate micro-steps for the current task
    pub fn break_down(&mut self) -> &StepList {
        self.steps.insert(StepList::for_goal(&self.session.task))
    }

    /// Tick a micro-step on or off, breaking the task down first if needed
    pub fn toggle_step(&mut self, id: &str) -> Result<StepToggle, WorkspaceError> {
        let task = &self.session.task;
        let steps = self.steps.get_or_insert_with(|| StepList::for_goal(task));
        Ok(steps.toggle(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::SeedSource;

    fn workspace() -> Workspace {
        Workspace::load(&SeedSource, FocusFilter::default()).unwrap()
    }

    #[test]
    fn test_toggle_step_breaks_down_first() {
        let mut ws = workspace();
        ws.set_task("Prep sprint meeting");
        assert!(ws.steps().is_none());

        let toggle = ws.toggle_step("3").unwrap();
        assert!(toggle.done);
        assert!(!toggle.all_done);

        let steps = ws.steps().unwrap();
        assert_eq!(steps.goal, "Prep sprint meeting");
        assert!(steps.steps[0].text.starts_with("List 3 key"));
        assert!(steps.steps[2].done);
    }

    #[test]
    fn test_snapshot_accessors() {
        let ws = Workspace::load(&SeedSource, FocusFilter::new(4)).unwrap();
        assert_eq!(ws.notifications().len(), 8);
        assert_eq!(ws.notifications()[0].id, "1");
        assert_eq!(ws.filter().min_keyword_len(), 4);
    }

    #[test]
    fn test_unfocused_shows_everything() {
        let mut ws = workspace();
        ws.set_task("Fixing API bug");

        let view = ws.view();
        assert!(!view.engaged);
        assert_eq!(view.notifications.len(), 8);
        assert_eq!(view.suppressed, 0);
        assert_eq!(view.status, UNFOCUSED_STATUS);
    }

    #[test]
    fn test_engage_filters() {
        let mut ws = workspace();
        ws.set_task("Fixing API bug");
        ws.engage().unwrap();

        let view = ws.view();
        assert!(view.engaged);
        assert_eq!(view.task, Some("Fixing API bug"));
        assert_eq!(
            view.notifications.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            ["3", "7"]
        );
        assert_eq!(view.suppressed, 6);
        assert_eq!(view.status, "6 distractions blocked");
    }

    #[test]
    fn test_engage_requires_task() {
        let mut ws = workspace();
        assert!(matches!(ws.engage(), Err(WorkspaceError::EmptyFocus)));
        ws.set_task("   ");
        assert!(matches!(ws.engage(), Err(WorkspaceError::EmptyFocus)));
        assert!(!ws.session().engaged);
    }

    #[test]
    fn test_typing_while_engaged_refilters() {
        let mut ws = workspace();
        ws.set_task("auth");
        ws.engage().unwrap();
        assert_eq!(ws.outcome().ids(), ["3", "7"]);

        ws.set_task("auth lunch");
        assert_eq!(ws.outcome().ids(), ["1", "3", "7"]);

        // Clearing the text while engaged shows everything again
        ws.set_task("");
        assert_eq!(ws.suppressed(), 0);
    }

    #[test]
    fn test_quiet_hides_details() {
        let mut ws = workspace();
        ws.set_task("Fixing API bug");
        ws.engage().unwrap();
        assert!(ws.toggle_quiet());

        let view = ws.view();
        assert!(view.quiet);
        assert_eq!(view.task, None);
        assert!(view.notifications.is_empty());
        assert_eq!(view.suppressed, 6);

        assert!(!ws.toggle_quiet());
        assert_eq!(ws.view().notifications.len(), 2);
    }

    #[test]
    fn test_exit_clears_modes() {
        let mut ws = workspace();
        ws.set_task("Fixing API bug");
        ws.engage().unwrap();
        ws.toggle_quiet();

        ws.exit();
        assert_eq!(
            ws.session(),
            &FocusSession {
                task: "Fixing API bug".to_string(),
                engaged: false,
                quiet: false,
            }
        );
        assert_eq!(ws.suppressed(), 0);
    }

    #[test]
    fn test_micro_steps_follow_task() {
        let mut ws = workspace();
        ws.set_task("Fixing API bug");

        let toggle = ws.toggle_step("1").unwrap();
        assert!(toggle.done);
        assert_eq!(ws.steps().map(|s| s.completed()), Some(1));

        // Existing steps survive a task edit until broken down again
        ws.set_task("Draft release email");
        assert_eq!(ws.toggle_step("2").map(|t| t.done).ok(), Some(true));
        assert_eq!(ws.steps().map(|s| s.completed()), Some(2));

        let steps = ws.break_down();
        assert_eq!(steps.completed(), 0);
        assert!(steps.steps[0].text.starts_with("Jot down"));

        assert!(matches!(
            ws.toggle_step("4"),
            Err(WorkspaceError::Step(StepError::NotFound(_)))
        ));
    }
}
