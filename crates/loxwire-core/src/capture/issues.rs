use std::collections::BTreeMap;

use crate::Issue;
use crate::message::MessageIssue;

pub const ID_EVENT_TRAILING_BYTES: &str = "LX-EVENT-TRAILING-BYTES";
pub const ID_UNKNOWN_TYPE: &str = "LX-UNKNOWN-TYPE";
pub const ID_UNSUPPORTED_TYPE: &str = "LX-UNSUPPORTED-TYPE";
pub const ID_WEATHER_MALFORMED: &str = "LX-WEATHER-MALFORMED";

pub const SEVERITY_ERROR: &str = "error";
pub const SEVERITY_WARNING: &str = "warning";

const MAX_EXAMPLES: usize = 3;

struct IssueStats {
    severity: &'static str,
    message: &'static str,
    count: u64,
    examples: Vec<String>,
}

/// Aggregates per-message issues by id, keeping the first few examples.
#[derive(Default)]
pub struct IssueTracker {
    by_id: BTreeMap<&'static str, IssueStats>,
}

impl IssueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, index: u64, issue: &MessageIssue) {
        let (id, severity, message, detail) = describe(issue);
        let stats = self.by_id.entry(id).or_insert_with(|| IssueStats {
            severity,
            message,
            count: 0,
            examples: Vec::new(),
        });
        stats.count += 1;
        if stats.examples.len() < MAX_EXAMPLES {
            stats.examples.push(format!("message #{index}: {detail}"));
        }
    }

    /// Issues sorted by id.
    pub fn into_issues(self) -> Vec<Issue> {
        self.by_id
            .into_iter()
            .map(|(id, stats)| Issue {
                id: id.to_string(),
                severity: stats.severity.to_string(),
                message: stats.message.to_string(),
                count: stats.count,
                examples: stats.examples,
            })
            .collect()
    }
}

fn describe(issue: &MessageIssue) -> (&'static str, &'static str, &'static str, String) {
    match issue {
        MessageIssue::TrailingBytes { count } => (
            ID_EVENT_TRAILING_BYTES,
            SEVERITY_WARNING,
            "Event payload ended with an incomplete record",
            format!("{count} trailing bytes discarded"),
        ),
        MessageIssue::WeatherMalformed(err) => (
            ID_WEATHER_MALFORMED,
            SEVERITY_ERROR,
            "Weather payload rejected",
            err.to_string(),
        ),
        MessageIssue::UnsupportedType(event_type) => (
            ID_UNSUPPORTED_TYPE,
            SEVERITY_WARNING,
            "Event type has no decoder",
            format!("type {} ({})", event_type.code(), event_type.name()),
        ),
        MessageIssue::UnknownType(code) => (
            ID_UNKNOWN_TYPE,
            SEVERITY_WARNING,
            "Unknown event type code",
            format!("type {code}"),
        ),
    }
}
