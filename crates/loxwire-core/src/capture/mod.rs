use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::message::{Message, inspect_message};
use crate::protocol::header::EventType;
use crate::source::{Frame, MessageSource, SourceError, StreamSource};
use crate::{CaptureSummary, MessageRecord, Report, TypeCount, make_stub_report};

mod issues;

pub use issues::{SEVERITY_ERROR, SEVERITY_WARNING};
use issues::IssueTracker;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Decode every message of a recorded capture file.
///
/// # Errors
/// Returns `CaptureError` when the file cannot be read or a frame is cut
/// short. Malformed payloads are not errors; they show up as report issues.
pub fn decode_capture_file(path: &Path) -> Result<Report, CaptureError> {
    let source = StreamSource::open(path)?;
    decode_source(path, source)
}

/// Decode every message produced by `source` into a report for `path`.
pub fn decode_source<S: MessageSource>(path: &Path, mut source: S) -> Result<Report, CaptureError> {
    let mut report = make_stub_report(&path.display().to_string(), path.metadata()?.len());
    let mut per_type: BTreeMap<u8, (EventType, u64)> = BTreeMap::new();
    let mut tracker = IssueTracker::new();
    let mut events_total = 0u64;
    let mut weather_tables_total = 0u64;
    let mut index = 0u64;

    while let Some(Frame { header, payload }) = source.next_message()? {
        let inspection = inspect_message(&header, &payload);
        if let Some(issue) = &inspection.issue {
            tracker.record(index, issue);
        }

        events_total += inspection.message.event_count() as u64;
        if let Message::Weather(tables) = &inspection.message {
            weather_tables_total += tables.len() as u64;
        }
        per_type
            .entry(header.event_type.code())
            .or_insert((header.event_type, 0))
            .1 += 1;

        report.messages.push(MessageRecord {
            index,
            header,
            message: inspection.message,
        });
        index += 1;
    }

    debug!(
        "decoded {index} messages ({events_total} events) from {}",
        path.display()
    );
    report.summary = CaptureSummary {
        messages_total: index,
        events_total,
        weather_tables_total,
        per_type: per_type
            .into_values()
            .map(|(event_type, messages)| TypeCount {
                event_type,
                code: event_type.code(),
                messages,
            })
            .collect(),
    };
    report.issues = tracker.into_issues();
    Ok(report)
}

/// Whether any issue in the report has error severity.
pub fn has_errors(report: &Report) -> bool {
    report
        .issues
        .iter()
        .any(|issue| issue.severity == SEVERITY_ERROR)
}
