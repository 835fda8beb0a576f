//! Notification records and the sources that provide them
//!
//! The workspace never reads notification data directly. It asks a
//! [`NotificationSource`] for a snapshot, so the built-in seed feed can be
//! swapped for a file (or a real mail/chat integration) without touching
//! the filter.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading notifications
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read notification feed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse notification feed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate notification id: {0}")]
    DuplicateId(String),
}

/// What a notification asks of the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityTag {
    #[serde(rename = "ACTION NEEDED")]
    ActionNeeded,
    #[serde(rename = "URGENT")]
    Urgent,
    #[serde(rename = "INFO ONLY")]
    InfoOnly,
    #[serde(rename = "FYI")]
    Fyi,
}

impl PriorityTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTag::ActionNeeded => "ACTION NEEDED",
            PriorityTag::Urgent => "URGENT",
            PriorityTag::InfoOnly => "INFO ONLY",
            PriorityTag::Fyi => "FYI",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace(['-', '_'], " ").as_str() {
            "ACTION NEEDED" => Some(PriorityTag::ActionNeeded),
            "URGENT" => Some(PriorityTag::Urgent),
            "INFO ONLY" => Some(PriorityTag::InfoOnly),
            "FYI" => Some(PriorityTag::Fyi),
            _ => None,
        }
    }
}

/// A single incoming notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Unique id within its source
    pub id: String,
    /// Application that sent it (Slack, Gmail, ...)
    pub app: String,
    pub title: String,
    pub preview: String,
    /// One-line digest of the preview
    pub summary: String,
    /// Relative timestamp label ("2m ago")
    pub time: String,
    /// Marked as related to the current work by the sender side
    #[serde(default)]
    pub relevant: bool,
    pub tag: PriorityTag,
}

impl NotificationRecord {
    #[allow(clippy::too_many_arguments)]
    fn seed(
        id: &str,
        app: &str,
        title: &str,
        preview: &str,
        time: &str,
        relevant: bool,
        tag: PriorityTag,
        summary: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            app: app.to_string(),
            title: title.to_string(),
            preview: preview.to_string(),
            summary: summary.to_string(),
            time: time.to_string(),
            relevant,
            tag,
        }
    }
}

/// Something that can hand out a snapshot of notifications
pub trait NotificationSource {
    /// Load all notifications in display order
    fn load(&self) -> Result<Vec<NotificationRecord>, SourceError>;
}

/// Reject a feed in which two records share an id
pub fn ensure_unique_ids(records: &[NotificationRecord]) -> Result<(), SourceError> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(SourceError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}

/// The built-in demo feed
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSource;

impl NotificationSource for SeedSource {
    fn load(&self) -> Result<Vec<NotificationRecord>, SourceError> {
        let records = seed_notifications();
        ensure_unique_ids(&records)?;
        Ok(records)
    }
}

/// A JSON array of notification records on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSource for JsonFileSource {
    fn load(&self) -> Result<Vec<NotificationRecord>, SourceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let records: Vec<NotificationRecord> =
            serde_json::from_str(&content).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                source,
            })?;

        ensure_unique_ids(&records)?;
        Ok(records)
    }
}

/// The eight demo notifications, in display order
pub fn seed_notifications() -> Vec<NotificationRecord> {
    use PriorityTag::*;

    vec![
        NotificationRecord::seed(
            "1",
            "Slack",
            "Lunch plans?",
            "Hey, are we still on for sushi today at noon?",
            "2m ago",
            false,
            Fyi,
            "Team lunch at noon - sushi. Reply if joining.",
        ),
        NotificationRecord::seed(
            "2",
            "Gmail",
            "HR Training Reminder",
            "Your compliance training is due by Friday. Please complete the 3 modules in the LMS portal before end of day.",
            "5m ago",
            false,
            ActionNeeded,
            "Complete 3 compliance modules in LMS by Friday.",
        ),
        NotificationRecord::seed(
            "3",
            "Jira",
            "Critical Bug in Auth Controller",
            "AUTH-2847: JWT token validation failing on refresh. Users getting logged out after 5 minutes. Priority P0.",
            "8m ago",
            true,
            Urgent,
            "JWT refresh broken - users logged out after 5 min. P0.",
        ),
        NotificationRecord::seed(
            "4",
            "Discord",
            "Movie night poll",
            "Vote for this weekend's movie: Interstellar vs Arrival vs Dune Part 3. Poll closes Thursday!",
            "12m ago",
            false,
            Fyi,
            "Vote in weekend movie poll by Thursday.",
        ),
        NotificationRecord::seed(
            "5",
            "Slack",
            "Water cooler chat",
            "Did anyone see the game last night? What a comeback in the 4th quarter!",
            "15m ago",
            false,
            InfoOnly,
            "Social chat about last night's game.",
        ),
        NotificationRecord::seed(
            "6",
            "Gmail",
            "Newsletter: Weekly Digest",
            "Top 10 JavaScript frameworks you should know in 2026. Plus: our take on the AI revolution in dev tools.",
            "20m ago",
            false,
            InfoOnly,
            "Weekly JS newsletter - frameworks and AI dev tools.",
        ),
        NotificationRecord::seed(
            "7",
            "Jira",
            "Fix API endpoint validation",
            "API-1293: Request body validation missing for /auth/reset-password. Allows empty payload.",
            "25m ago",
            true,
            ActionNeeded,
            "Missing validation on /auth/reset-password endpoint.",
        ),
        NotificationRecord::seed(
            "8",
            "Slack",
            "Office supply order",
            "Please submit your requests for new monitors by end of week. Budget approved for 27-inch displays.",
            "30m ago",
            false,
            ActionNeeded,
            "Submit monitor requests by end of week.",
        ),
    ]
}
