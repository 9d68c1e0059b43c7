//! Read-only views across collections: the month calendar, a day's agenda,
//! and the dashboard summary.

use chrono::{Datelike, Duration, NaiveDate};

use crate::finance::FinanceLedger;
use crate::habits::HabitStore;
use crate::models::{Assignment, Exam, Task};
use crate::student::StudentRecords;
use crate::tasks::TaskStore;

/// Everything scheduled on one day.
#[derive(Debug, Clone)]
pub struct Agenda<'a> {
    pub day: NaiveDate,
    pub tasks: Vec<&'a Task>,
    pub assignments: Vec<&'a Assignment>,
    pub exams: Vec<&'a Exam>,
}

impl Agenda<'_> {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.assignments.is_empty() && self.exams.is_empty()
    }
}

pub fn agenda<'a>(day: NaiveDate, tasks: &'a TaskStore, student: &'a StudentRecords) -> Agenda<'a> {
    Agenda {
        day,
        tasks: tasks.on_date(day),
        assignments: student.assignments_due(day),
        exams: student.exams_on(day),
    }
}

/// The days shown for a month: whole weeks, Sunday to Saturday, covering the
/// first through the last day of the month. `None` for an invalid month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_first - Duration::days(1);

    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    let end = last + Duration::days(6 - last.weekday().num_days_from_sunday() as i64);

    Some(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone)]
pub struct Summary<'a> {
    pub today: NaiveDate,
    /// Tasks due today, by time.
    pub todays_tasks: Vec<&'a Task>,
    pub completed_today: usize,
    pub on_time: usize,
    pub habits_done: usize,
    pub habits_total: usize,
    pub best_streak: u32,
    pub balance: f64,
}

pub fn summary<'a>(
    today: NaiveDate,
    tasks: &'a TaskStore,
    habits: &HabitStore,
    finance: &FinanceLedger,
) -> Summary<'a> {
    let todays_tasks = tasks.due_on(today);
    let completed_today = todays_tasks.iter().filter(|t| t.completed).count();
    Summary {
        today,
        completed_today,
        todays_tasks,
        on_time: tasks.on_time_count(),
        habits_done: habits.done_count(today),
        habits_total: habits.all().len(),
        best_streak: habits.best_streak(),
        balance: finance.balance(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn march_2024_grid_spans_whole_weeks() {
        let days = month_grid(2024, 3).unwrap();
        // Fri 1 March; the grid starts on Sun 25 Feb and ends on Sat 6 April
        assert_eq!(days.first(), NaiveDate::from_ymd_opt(2024, 2, 25).as_ref());
        assert_eq!(days.last(), NaiveDate::from_ymd_opt(2024, 4, 6).as_ref());
        assert_eq!(days.len() % 7, 0);
        assert_eq!(days[0].weekday(), Weekday::Sun);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let days = month_grid(2023, 12).unwrap();
        assert_eq!(days.last(), NaiveDate::from_ymd_opt(2024, 1, 6).as_ref());
        assert!(month_grid(2023, 13).is_none());
    }
}
