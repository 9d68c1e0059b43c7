use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::Task;

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parses a 24h `HH:MM` time, with optional seconds.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Parses a `YYYY-MM-DDTHH:MM` moment (the shape of assignment and exam dates).
pub fn parse_moment(s: &str) -> Option<NaiveDateTime> {
    let (date, time) = s.trim().split_once('T')?;
    Some(parse_date(date)?.and_time(parse_time(time)?))
}

/// Combines a task's `date` and `time` into its due instant on the local wall
/// clock. Both parts must parse.
pub fn due_instant(task: &Task) -> Option<NaiveDateTime> {
    Some(parse_date(&task.date)?.and_time(parse_time(&task.time)?))
}

/// Whether completing `task` at `now` counts as on time.
///
/// Returns `false` when the due instant does not parse.
pub fn is_on_time(task: &Task, now: NaiveDateTime) -> bool {
    match due_instant(task) {
        Some(due) => now <= due,
        None => false,
    }
}

/// Orders tasks by due instant, earliest first. Tasks without a valid due
/// instant compare greater than every dated task and equal to each other, so
/// a stable sort keeps them in insertion order at the end.
pub fn cmp_by_due(a: &Task, b: &Task) -> Ordering {
    match (due_instant(a), due_instant(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Whether the task is scheduled on `day` with a usable due time.
pub fn scheduled_on(task: &Task, day: NaiveDate) -> bool {
    parse_date(&task.date) == Some(day) && parse_time(&task.time).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Priority};
    use chrono::DateTime;

    fn task(date: &str, time: &str) -> Task {
        Task {
            id: 1,
            title: "t".into(),
            date: date.into(),
            time: time.into(),
            priority: Priority::Medium,
            frequency: Frequency::Once,
            completed: false,
            completed_at: None,
            is_on_time: true,
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn due_instant_needs_both_parts() {
        assert!(due_instant(&task("2024-03-01", "09:00")).is_some());
        assert!(due_instant(&task("2024-03-01", "")).is_none());
        assert!(due_instant(&task("", "09:00")).is_none());
        assert!(due_instant(&task("2024-13-40", "09:00")).is_none());
        assert!(due_instant(&task("2024-03-01", "25:00")).is_none());
    }

    #[test]
    fn on_time_is_inclusive_of_the_due_minute() {
        let t = task("2024-03-01", "09:00");
        assert!(is_on_time(&t, at("2024-03-01T08:59")));
        assert!(is_on_time(&t, at("2024-03-01T09:00")));
        assert!(!is_on_time(&t, at("2024-03-01T09:01")));
    }

    #[test]
    fn unparseable_tasks_sort_last() {
        let mut v = vec![
            task("", "10:00"),
            task("2024-03-02", "08:00"),
            task("bad", "bad"),
            task("2024-03-01", "23:00"),
        ];
        v[0].id = 10;
        v[2].id = 30;
        v.sort_by(cmp_by_due);
        assert_eq!(v[0].date, "2024-03-01");
        assert_eq!(v[1].date, "2024-03-02");
        assert_eq!(v[2].id, 10);
        assert_eq!(v[3].id, 30);
    }

    #[test]
    fn parses_moments_with_a_t_separator() {
        assert_eq!(parse_moment("2024-05-10T14:30"), Some(at("2024-05-10T14:30")));
        assert_eq!(parse_moment("2024-05-10"), None);
    }
}
