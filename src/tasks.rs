use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::due::{cmp_by_due, is_on_time, parse_date, parse_time, scheduled_on};
use crate::models::{Frequency, Task, TaskDraft, TaskPatch};

/// Which tasks a list view shows.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn matches(self, t: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !t.completed,
            TaskFilter::Completed => t.completed,
        }
    }

    /// The next filter in the all -> active -> completed cycle.
    pub fn next(self) -> Self {
        match self {
            TaskFilter::All => TaskFilter::Active,
            TaskFilter::Active => TaskFilter::Completed,
            TaskFilter::Completed => TaskFilter::All,
        }
    }
}

/// Outcome of a completion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The task is now completed. `successor` is the id of the occurrence
    /// spawned for a daily task.
    Completed { on_time: bool, successor: Option<u64> },
    /// The task is open again.
    Reopened,
}

/// Ordered collection of tasks. Serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskStore { tasks }
    }

    /// All tasks in insertion order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Appends a new open task and returns its id. Malformed dates and times
    /// are kept as given.
    pub fn add(&mut self, draft: TaskDraft, now: DateTime<FixedOffset>) -> u64 {
        let id = self.next_id();
        self.tasks.push(Task {
            id,
            title: draft.title,
            date: draft.date,
            time: draft.time,
            priority: draft.priority,
            frequency: draft.frequency,
            completed: false,
            completed_at: None,
            is_on_time: true,
            created_at: now,
        });
        id
    }

    /// Merges `patch` into the task. Returns `false` if there is no such task.
    pub fn update(&mut self, id: u64, patch: &TaskPatch) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                patch.apply(t);
                true
            }
            None => false,
        }
    }

    /// Removes the task. Returns `false` if there is no such task.
    pub fn delete(&mut self, id: u64) -> bool {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != len_before
    }

    /// Flips the completion state of a task.
    ///
    /// Completing stamps `completed_at` and decides `is_on_time` against the
    /// due instant. Completing a daily task also appends a fresh occurrence
    /// scheduled for the day after `now` (not the day after the task's own
    /// date). Reopening clears the stamp and never touches a successor that
    /// was already spawned.
    pub fn toggle_completion(&mut self, id: u64, now: DateTime<FixedOffset>) -> Option<Toggle> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        let next_id = self.next_id();

        let t = &mut self.tasks[idx];
        t.completed = !t.completed;
        if !t.completed {
            t.completed_at = None;
            t.is_on_time = false;
            return Some(Toggle::Reopened);
        }

        let on_time = is_on_time(t, now.naive_local());
        t.is_on_time = on_time;
        t.completed_at = Some(now);

        let successor = if t.frequency == Frequency::Daily {
            let tomorrow = now.date_naive() + Duration::days(1);
            let next = Task {
                id: next_id,
                title: t.title.clone(),
                date: tomorrow.format("%Y-%m-%d").to_string(),
                time: t.time.clone(),
                priority: t.priority,
                frequency: t.frequency,
                completed: false,
                completed_at: None,
                is_on_time: true,
                created_at: now,
            };
            debug!(task = id, successor = next_id, date = %next.date, "daily task rolled over");
            self.tasks.push(next);
            Some(next_id)
        } else {
            None
        };

        Some(Toggle::Completed { on_time, successor })
    }

    /// Tasks matching `filter`, sorted by due instant ascending. Tasks without
    /// a valid due instant come last; ties keep insertion order.
    pub fn list(&self, filter: TaskFilter) -> Vec<&Task> {
        let mut v: Vec<&Task> = self.tasks.iter().filter(|t| filter.matches(t)).collect();
        v.sort_by(|a, b| cmp_by_due(a, b));
        v
    }

    /// Tasks whose date is exactly `day`, in insertion order.
    pub fn on_date(&self, day: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| parse_date(&t.date) == Some(day))
            .collect()
    }

    /// Tasks scheduled on `day` with a valid time, sorted by time. Tasks
    /// missing a date or a time are left out.
    pub fn due_on(&self, day: NaiveDate) -> Vec<&Task> {
        let mut v: Vec<&Task> = self.tasks.iter().filter(|t| scheduled_on(t, day)).collect();
        v.sort_by_key(|t| parse_time(&t.time));
        v
    }

    /// Number of tasks that were completed on time.
    pub fn on_time_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_on_time && t.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn draft(title: &str, date: &str, time: &str, frequency: Frequency) -> TaskDraft {
        TaskDraft {
            title: title.into(),
            date: date.into(),
            time: time.into(),
            priority: Priority::High,
            frequency,
        }
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let mut s = TaskStore::default();
        let now = at("2024-03-01T07:00:00+00:00");
        let a = s.add(draft("a", "2024-03-01", "09:00", Frequency::Once), now);
        let b = s.add(draft("b", "2024-03-01", "09:00", Frequency::Once), now);
        assert_ne!(a, b);
        let t = s.get(a).unwrap();
        assert!(!t.completed);
        assert!(t.completed_at.is_none());
        assert_eq!(t.created_at, now);
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut s = TaskStore::default();
        let id = s.add(draft("a", "2024-03-01", "09:00", Frequency::Once), at("2024-03-01T07:00:00+00:00"));
        let patch = TaskPatch { time: Some("10:30".into()), ..TaskPatch::default() };
        assert!(s.update(id, &patch));
        let t = s.get(id).unwrap();
        assert_eq!(t.time, "10:30");
        assert_eq!(t.title, "a");
        assert!(!s.update(id + 100, &patch));
    }

    #[test]
    fn successor_id_is_fresh_even_within_one_instant() {
        let mut s = TaskStore::default();
        let now = at("2024-03-01T07:00:00+00:00");
        let a = s.add(draft("a", "2024-03-01", "09:00", Frequency::Daily), now);
        let b = s.add(draft("b", "2024-03-01", "09:00", Frequency::Daily), now);
        let sa = match s.toggle_completion(a, now) {
            Some(Toggle::Completed { successor: Some(id), .. }) => id,
            other => panic!("unexpected {other:?}"),
        };
        let sb = match s.toggle_completion(b, now) {
            Some(Toggle::Completed { successor: Some(id), .. }) => id,
            other => panic!("unexpected {other:?}"),
        };
        let mut ids: Vec<u64> = s.all().iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert_ne!(sa, sb);
    }

    #[test]
    fn successor_copies_schedule_fields() {
        let mut s = TaskStore::default();
        let now = at("2024-03-05T20:00:00+00:00");
        let id = s.add(draft("Meditate", "2024-03-01", "07:00", Frequency::Daily), now);
        s.toggle_completion(id, now);
        let next = s.all().last().unwrap();
        assert_eq!(next.title, "Meditate");
        assert_eq!(next.time, "07:00");
        assert_eq!(next.priority, Priority::High);
        assert_eq!(next.frequency, Frequency::Daily);
        // anchored on the completion day, not on the task's own date
        assert_eq!(next.date, "2024-03-06");
        assert!(next.is_on_time);
    }

    #[test]
    fn repeated_toggles_spawn_a_successor_each_time() {
        let mut s = TaskStore::default();
        let now = at("2024-03-01T06:00:00+00:00");
        let id = s.add(draft("Walk", "2024-03-01", "07:00", Frequency::Daily), now);
        s.toggle_completion(id, now);
        s.toggle_completion(id, now);
        s.toggle_completion(id, now);
        assert_eq!(s.len(), 3);
        assert_eq!(s.all().iter().filter(|t| t.date == "2024-03-02").count(), 2);
    }

    #[test]
    fn toggle_missing_id_is_a_no_op() {
        let mut s = TaskStore::default();
        s.add(draft("a", "2024-03-01", "09:00", Frequency::Once), at("2024-03-01T07:00:00+00:00"));
        let before = s.clone();
        assert_eq!(s.toggle_completion(42, at("2024-03-01T07:00:00+00:00")), None);
        assert_eq!(s, before);
    }

    #[test]
    fn list_filters_and_sorts() {
        let mut s = TaskStore::default();
        let now = at("2024-03-01T07:00:00+00:00");
        let late = s.add(draft("late", "2024-03-03", "09:00", Frequency::Once), now);
        let undated = s.add(draft("undated", "", "", Frequency::Once), now);
        let early = s.add(draft("early", "2024-03-01", "09:00", Frequency::Once), now);
        s.toggle_completion(early, now);

        let all: Vec<u64> = s.list(TaskFilter::All).iter().map(|t| t.id).collect();
        assert_eq!(all, vec![early, late, undated]);
        let active: Vec<u64> = s.list(TaskFilter::Active).iter().map(|t| t.id).collect();
        assert_eq!(active, vec![late, undated]);
        let done: Vec<u64> = s.list(TaskFilter::Completed).iter().map(|t| t.id).collect();
        assert_eq!(done, vec![early]);
    }

    #[test]
    fn due_on_skips_tasks_without_a_time() {
        let mut s = TaskStore::default();
        let now = at("2024-03-01T07:00:00+00:00");
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let b = s.add(draft("b", "2024-03-01", "18:00", Frequency::Once), now);
        let a = s.add(draft("a", "2024-03-01", "08:00", Frequency::Once), now);
        let no_time = s.add(draft("c", "2024-03-01", "", Frequency::Once), now);
        let ids: Vec<u64> = s.due_on(day).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, b]);
        // the calendar still shows it
        assert!(s.on_date(day).iter().any(|t| t.id == no_time));
        // and so does the unfiltered list
        assert!(s.list(TaskFilter::All).iter().any(|t| t.id == no_time));
    }

    #[test]
    fn filter_cycles() {
        assert_eq!(TaskFilter::All.next(), TaskFilter::Active);
        assert_eq!(TaskFilter::Active.next(), TaskFilter::Completed);
        assert_eq!(TaskFilter::Completed.next(), TaskFilter::All);
    }
}
