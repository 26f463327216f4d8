//! Gantt window computation

use super::model::DateWindow;
use crate::types::Task;
use chrono::{Duration, NaiveDate};

/// Compute the visible timeline for a set of dated tasks.
///
/// The window always covers today plus two weeks ahead so an empty or
/// sparsely dated board still shows a usable timeline. Task dates widen it:
/// two days of padding before the earliest date, five after the latest.
pub fn gantt_window<'a>(
    today: NaiveDate,
    tasks: impl IntoIterator<Item = &'a Task>,
) -> DateWindow {
    let mut earliest = today;
    let mut latest = today + Duration::days(14);

    for task in tasks {
        for date in [task.start_date, task.due_date].into_iter().flatten() {
            earliest = earliest.min(date);
            latest = latest.max(date);
        }
    }

    DateWindow {
        start: earliest - Duration::days(2),
        end: latest + Duration::days(5),
    }
}
