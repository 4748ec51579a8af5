//! Human-readable validation messages

use crate::types::{Conflict, ConflictReport};
use crate::utils::format_date_range;

/// First line of a conflict message
pub const CONFLICTS_HEADER: &str = "Error with the following dates:";

/// Appended when the candidate dates fall outside the entity's opening hours
pub const OUTSIDE_OPENING_HOURS: &str = "Not within opening hours";

fn conflict_line(conflict: &Conflict) -> String {
    format!(
        "<br><a href='{}'>{} ({})</a>",
        conflict.link,
        conflict.name,
        format_date_range(conflict.start, conflict.end)
    )
}

/// Message for one checked row, or `None` when the report is clear.
///
/// Conflicts come first (header plus one linked line per conflicting host);
/// an opening-hours violation is appended to the same message.
pub fn conflict_message(report: &ConflictReport) -> Option<String> {
    if report.is_clear() {
        return None;
    }

    let mut message = String::new();
    if !report.conflicts.is_empty() {
        message.push_str(CONFLICTS_HEADER);
        for conflict in &report.conflicts {
            message.push_str(&conflict_line(conflict));
        }
    }
    if report.outside_opening_hours {
        if !message.is_empty() {
            message.push_str("<br>");
        }
        message.push_str(OUTSIDE_OPENING_HOURS);
    }
    Some(message)
}
