//! Keyword focus filter
//!
//! Given the task someone is working on, keep only the notifications that
//! mention it. The task text is split on whitespace into lowercase keywords;
//! keywords shorter than the minimum length are dropped, and a notification
//! stays visible when any remaining keyword appears in its title, preview or
//! summary. Input order is preserved.

use tracing::debug;

use crate::notification::NotificationRecord;

/// Keywords of this many characters or fewer never match
pub const DEFAULT_MIN_KEYWORD_LEN: usize = 3;

/// Result of running the filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome<'a> {
    /// Notifications that survive, in input order
    pub visible: Vec<&'a NotificationRecord>,
    /// How many were hidden
    pub suppressed: usize,
}

impl<'a> FilterOutcome<'a> {
    pub fn ids(&self) -> Vec<&'a str> {
        self.visible.iter().map(|r| r.id.as_str()).collect()
    }
}

/// Focus filter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusFilter {
    min_keyword_len: usize,
}

impl Default for FocusFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_KEYWORD_LEN)
    }
}

impl FocusFilter {
    pub fn new(min_keyword_len: usize) -> Self {
        Self { min_keyword_len }
    }

    pub fn min_keyword_len(&self) -> usize {
        self.min_keyword_len
    }

    /// Lowercase keywords of `task` that are long enough to match on
    pub fn keywords(&self, task: &str) -> Vec<String> {
        task.to_lowercase()
            .split_whitespace()
            .filter(|kw| kw.chars().count() >= self.min_keyword_len)
            .map(str::to_string)
            .collect()
    }

    /// Whether any keyword occurs in the record's title, preview or summary
    pub fn matches(&self, record: &NotificationRecord, keywords: &[String]) -> bool {
        let fields = [
            record.title.to_lowercase(),
            record.preview.to_lowercase(),
            record.summary.to_lowercase(),
        ];
        keywords
            .iter()
            .any(|kw| fields.iter().any(|field| field.contains(kw.as_str())))
    }

    /// Filter `records` against `task`
    ///
    /// When not engaged, or when the task is blank, everything stays visible.
    pub fn apply<'a, I>(&self, records: I, task: &str, engaged: bool) -> FilterOutcome<'a>
    where
        I: IntoIterator<Item = &'a NotificationRecord>,
    {
        if !engaged || task.trim().is_empty() {
            return FilterOutcome {
                visible: records.into_iter().collect(),
                suppressed: 0,
            };
        }

        let keywords = self.keywords(task);
        let mut visible = Vec::new();
        let mut suppressed = 0;
        for record in records {
            if self.matches(record, &keywords) {
                visible.push(record);
            } else {
                suppressed += 1;
            }
        }

        debug!(
            "Focus filter {:?}: {} visible, {} suppressed",
            keywords,
            visible.len(),
            suppressed
        );

        FilterOutcome { visible, suppressed }
    }
}

/// Filter with the default keyword length
pub fn filter<'a>(records: &'a [NotificationRecord], task: &str, engaged: bool) -> FilterOutcome<'a> {
    FocusFilter::default().apply(records, task, engaged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::seed_notifications;

    #[test]
    fn test_fixing_api_bug() {
        let records = seed_notifications();
        let outcome = filter(&records, "Fixing API bug", true);

        assert_eq!(outcome.ids(), ["3", "7"]);
        assert_eq!(outcome.suppressed, 6);
    }

    #[test]
    fn test_not_engaged_shows_everything() {
        let records = seed_notifications();
        for task in ["", "Fixing API bug", "zzz", "   "] {
            let outcome = filter(&records, task, false);
            assert_eq!(outcome.visible.len(), records.len());
            assert_eq!(outcome.suppressed, 0);
        }
    }

    #[test]
    fn test_blank_task_shows_everything() {
        let records = seed_notifications();
        let outcome = filter(&records, " \t\n ", true);
        assert_eq!(outcome.visible.len(), 8);
        assert_eq!(outcome.suppressed, 0);
    }

    #[test]
    fn test_short_keywords_match_nothing() {
        let records = seed_notifications();
        let outcome = filter(&records, "ui of an", true);
        assert!(outcome.visible.is_empty());
        assert_eq!(outcome.suppressed, 8);
    }

    #[test]
    fn test_case_insensitive_across_fields() {
        let records = seed_notifications();

        // title
        assert_eq!(filter(&records, "MOVIE", true).ids(), ["4"]);
        // preview only
        assert_eq!(filter(&records, "interstellar", true).ids(), ["4"]);
        // summary only
        assert_eq!(filter(&records, "sushi", true).ids(), ["1"]);
        assert_eq!(filter(&records, "joining", true).ids(), ["1"]);
    }

    #[test]
    fn test_keywords_are_or_combined() {
        let records = seed_notifications();
        let outcome = filter(&records, "lunch monitors", true);
        assert_eq!(outcome.ids(), ["1", "8"]);
        assert_eq!(outcome.suppressed, 6);
    }

    #[test]
    fn test_keywords() {
        let filter = FocusFilter::default();
        assert_eq!(
            filter.keywords("  Fixing   the API bug in UI "),
            ["fixing", "the", "api", "bug"]
        );
        assert!(filter.keywords("a bc").is_empty());
        assert_eq!(FocusFilter::new(4).keywords("fix api bugs"), ["bugs"]);
    }

    #[test]
    fn test_subset_and_count_invariant() {
        let records = seed_notifications();
        for task in ["Fixing API bug", "validation", "week friday", "nothing-matches-this"] {
            let outcome = filter(&records, task, true);
            assert!(outcome.visible.iter().all(|v| records.iter().any(|r| std::ptr::eq(r, *v))));
            assert_eq!(outcome.suppressed, records.len() - outcome.visible.len());
        }
    }

    #[test]
    fn test_order_preserved() {
        let records = seed_notifications();
        let outcome = filter(&records, "week", true);
        assert_eq!(outcome.ids(), ["4", "6", "8"]);
    }

    #[test]
    fn test_idempotent() {
        let records = seed_notifications();
        let focus = FocusFilter::default();
        for task in ["Fixing API bug", "week", "auth"] {
            let first = focus.apply(&records, task, true);
            let second = focus.apply(first.visible.iter().copied(), task, true);
            assert_eq!(second.visible, first.visible);
            assert_eq!(second.suppressed, 0);
        }
    }
}
