//! Time and timestamp utilities

use chrono::{DateTime, Utc};

/// Get current Unix timestamp in seconds
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Human-readable date range, e.g. `5 March 2024, 10:00 - 12:00`.
///
/// The end date is only repeated when the range spans several days.
pub fn format_date_range(start: i64, end: i64) -> String {
    let (Some(from), Some(to)) = (
        DateTime::<Utc>::from_timestamp(start, 0),
        DateTime::<Utc>::from_timestamp(end, 0),
    ) else {
        return format!("{} - {}", start, end);
    };

    if from.date_naive() == to.date_naive() {
        format!(
            "{}, {} - {}",
            from.format("%-d %B %Y"),
            from.format("%H:%M"),
            to.format("%H:%M")
        )
    } else {
        format!(
            "{} - {}",
            from.format("%-d %B %Y, %H:%M"),
            to.format("%-d %B %Y, %H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_day_range() {
        // 2024-03-05 10:00 to 12:00 UTC
        assert_eq!(
            format_date_range(1_709_632_800, 1_709_640_000),
            "5 March 2024, 10:00 - 12:00"
        );
    }

    #[test]
    fn test_multi_day_range() {
        // 2024-03-05 10:00 to 2024-03-06 09:30 UTC
        assert_eq!(
            format_date_range(1_709_632_800, 1_709_717_400),
            "5 March 2024, 10:00 - 6 March 2024, 09:30"
        );
    }

    #[test]
    fn test_current_timestamp_is_recent() {
        assert!(current_timestamp() > 1_700_000_000);
    }
}
