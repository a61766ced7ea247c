//! Inclusive date ranges for period queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A date interval with optional, inclusive bounds.
///
/// A missing `start` means no lower bound, a missing `end` means no
/// upper bound. A record dated exactly on either bound is inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Lower bound.
    pub start: Option<DateTime<Utc>>,
    /// Upper bound.
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Both bounds set.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Everything from `start` on.
    pub fn after(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Everything up to `end`.
    pub fn before(end: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| *date >= start) && self.end.is_none_or(|end| *date <= end)
    }
}
