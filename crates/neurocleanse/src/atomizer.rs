//! Task atomizer: break a goal into three five-minute micro-steps
//!
//! The goal is matched (case-insensitively) against a few kinds of work;
//! the first kind that matches supplies the steps. Anything else gets a
//! generic "open it, change one thing, review" plan.

use thiserror::Error;

/// Errors from working with a step list
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StepError {
    #[error("No micro-step with id {0}")]
    NotFound(String),
}

/// One small, concrete piece of a goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MicroStep {
    pub id: String,
    pub text: String,
    pub done: bool,
}

impl MicroStep {
    fn new(id: usize, text: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            text: text.into(),
            done: false,
        }
    }
}

/// Step templates keyed by trigger words, checked in order
const PLANS: &[(&[&str], [&str; 3])] = &[
    (
        &["bug", "fix", "error", "debug"],
        [
            "Reproduce the bug in dev environment (5 min)",
            "Read error logs and isolate the root cause (5 min)",
            "Write the fix and verify with a quick test (5 min)",
        ],
    ),
    (
        &["email", "write", "message", "draft"],
        [
            "Jot down the 3 main points to cover (5 min)",
            "Write a rough first draft without editing (5 min)",
            "Proofread once and hit send (5 min)",
        ],
    ),
    (
        &["design", "ui", "page", "layout"],
        [
            "Sketch a quick wireframe on paper (5 min)",
            "Set up the basic layout structure in code (5 min)",
            "Add colors, spacing, and polish one section (5 min)",
        ],
    ),
    (
        &["api", "endpoint", "backend", "route"],
        [
            "Define the request/response shape (5 min)",
            "Write the route handler with basic logic (5 min)",
            "Test the endpoint with a quick curl/fetch (5 min)",
        ],
    ),
    (
        &["meeting", "prep", "present"],
        [
            "List 3 key talking points (5 min)",
            "Gather any data or links you need (5 min)",
            "Do a 2-minute dry run out loud (5 min)",
        ],
    ),
];

/// How much of the goal the generic plan quotes
const GOAL_QUOTE_LEN: usize = 30;

/// Break `goal` into three micro-steps
pub fn micro_steps(goal: &str) -> Vec<MicroStep> {
    let lower = goal.to_lowercase();

    let plan = PLANS
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|t| lower.contains(t)))
        .map(|(_, steps)| steps);

    match plan {
        Some(steps) => steps
            .iter()
            .enumerate()
            .map(|(i, text)| MicroStep::new(i + 1, *text))
            .collect(),
        None => {
            let quoted: String = goal.chars().take(GOAL_QUOTE_LEN).collect();
            vec![
                MicroStep::new(1, format!("Open the file/tool related to \"{}\" (5 min)", quoted)),
                MicroStep::new(2, "Make the first small change or write the first paragraph (5 min)"),
                MicroStep::new(3, "Review what you did and note next steps (5 min)"),
            ]
        }
    }
}

/// Result of ticking a step on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepToggle {
    /// The toggled step is now done
    pub done: bool,
    /// Every step in the list is done
    pub all_done: bool,
}

/// Micro-steps for one goal, with progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepList {
    pub goal: String,
    pub steps: Vec<MicroStep>,
}

impl StepList {
    pub fn for_goal(goal: &str) -> Self {
        Self {
            goal: goal.to_string(),
            steps: micro_steps(goal),
        }
    }

    pub fn toggle(&mut self, id: &str) -> Result<StepToggle, StepError> {
        let step = self
            .steps
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StepError::NotFound(id.to_string()))?;
        step.done = !step.done;
        let done = step.done;

        Ok(StepToggle {
            done,
            all_done: self.all_done(),
        })
    }

    pub fn completed(&self) -> usize {
        self.steps.iter().filter(|s| s.done).count()
    }

    pub fn all_done(&self) -> bool {
        self.steps.iter().all(|s| s.done)
    }

    /// Progress as a percentage (0-100)
    pub fn progress_percent(&self) -> u32 {
        if self.steps.is_empty() {
            return 100;
        }
        ((self.completed() * 100) / self.steps.len()) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_text(goal: &str) -> String {
        micro_steps(goal)[0].text.clone()
    }

    #[test]
    fn test_categories() {
        assert!(first_text("Fixing API bug").starts_with("Reproduce the bug"));
        assert!(first_text("Draft the launch email").starts_with("Jot down"));
        assert!(first_text("Design the settings page").starts_with("Sketch"));
        assert!(first_text("New backend route").starts_with("Define the request"));
        assert!(first_text("Prep for standup meeting").starts_with("List 3 key"));
    }

    #[test]
    fn test_first_category_wins() {
        // "fix" beats "api"
        assert!(first_text("fix the api").starts_with("Reproduce"));
        // "write" beats "endpoint"
        assert!(first_text("WRITE endpoint docs").starts_with("Jot down"));
    }

    #[test]
    fn test_generic_plan_quotes_goal() {
        let steps = micro_steps("Organise the garage shelves and boxes");
        assert_eq!(steps.len(), 3);
        assert_eq!(
            steps[0].text,
            "Open the file/tool related to \"Organise the garage shelves an\" (5 min)"
        );
        assert!(steps.iter().all(|s| s.text.ends_with("(5 min)")));
        assert_eq!(
            steps.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            ["1", "2", "3"]
        );
    }

    #[test]
    fn test_toggle_progress() {
        let mut list = StepList::for_goal("debug flaky test");
        assert_eq!(list.completed(), 0);

        assert_eq!(list.toggle("1"), Ok(StepToggle { done: true, all_done: false }));
        assert_eq!(list.toggle("2"), Ok(StepToggle { done: true, all_done: false }));
        assert_eq!(list.progress_percent(), 66);
        assert_eq!(list.toggle("3"), Ok(StepToggle { done: true, all_done: true }));
        assert!(list.all_done());

        assert_eq!(list.toggle("3"), Ok(StepToggle { done: false, all_done: false }));
        assert_eq!(list.completed(), 2);
    }

    #[test]
    fn test_toggle_unknown_step() {
        let mut list = StepList::for_goal("anything");
        assert_eq!(list.toggle("9"), Err(StepError::NotFound("9".to_string())));
    }
}
