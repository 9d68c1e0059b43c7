//! Habits with daily streaks, and long-running goals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Goal, Habit, HabitFrequency};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitStore {
    habits: Vec<Habit>,
}

impl HabitStore {
    pub fn all(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: u64) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn add(&mut self, title: String, frequency: HabitFrequency) -> u64 {
        let id = self.habits.iter().map(|h| h.id).max().unwrap_or(0) + 1;
        self.habits.push(Habit { id, title, frequency, streak: 0, checked_on: None });
        id
    }

    /// Checks the habit off for `today`, or unchecks it if it already was.
    /// Checking extends the streak by one; unchecking takes that day back.
    /// Returns the new "done today" state, or `None` if there is no such habit.
    pub fn toggle(&mut self, id: u64, today: NaiveDate) -> Option<bool> {
        let h = self.habits.iter_mut().find(|h| h.id == id)?;
        if h.done_on(today) {
            h.checked_on = None;
            h.streak = h.streak.saturating_sub(1);
            Some(false)
        } else {
            h.checked_on = Some(today);
            h.streak += 1;
            Some(true)
        }
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let len_before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        self.habits.len() != len_before
    }

    pub fn done_count(&self, today: NaiveDate) -> usize {
        self.habits.iter().filter(|h| h.done_on(today)).count()
    }

    /// Share of habits done today, in percent.
    pub fn completion_rate(&self, today: NaiveDate) -> f64 {
        if self.habits.is_empty() {
            return 0.0;
        }
        self.done_count(today) as f64 / self.habits.len() as f64 * 100.0
    }

    pub fn best_streak(&self) -> u32 {
        self.habits.iter().map(|h| h.streak).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalStore {
    goals: Vec<Goal>,
}

impl GoalStore {
    pub fn all(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: u64) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn add(&mut self, title: String, target: String) -> u64 {
        let id = self.goals.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        self.goals.push(Goal { id, title, target, progress: 0 });
        id
    }

    /// Sets progress, clamped to 100.
    pub fn set_progress(&mut self, id: u64, progress: u8) -> bool {
        match self.goals.iter_mut().find(|g| g.id == id) {
            Some(g) => {
                g.progress = progress.min(100);
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let len_before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        self.goals.len() != len_before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn toggling_moves_the_streak_both_ways() {
        let mut s = HabitStore::default();
        let id = s.add("Read".into(), HabitFrequency::Daily);
        assert_eq!(s.toggle(id, day(1)), Some(true));
        assert_eq!(s.get(id).unwrap().streak, 1);
        assert_eq!(s.toggle(id, day(1)), Some(false));
        assert_eq!(s.get(id).unwrap().streak, 0);
        // never below zero
        assert_eq!(s.toggle(id, day(1)), Some(true));
        assert_eq!(s.toggle(id, day(1)), Some(false));
        assert_eq!(s.get(id).unwrap().streak, 0);
    }

    #[test]
    fn a_new_day_starts_unchecked() {
        let mut s = HabitStore::default();
        let id = s.add("Water".into(), HabitFrequency::Daily);
        s.toggle(id, day(1));
        assert_eq!(s.done_count(day(1)), 1);
        assert_eq!(s.done_count(day(2)), 0);
        assert_eq!(s.toggle(id, day(2)), Some(true));
        assert_eq!(s.get(id).unwrap().streak, 2);
    }

    #[test]
    fn stats() {
        let mut s = HabitStore::default();
        assert_eq!(s.completion_rate(day(1)), 0.0);
        let a = s.add("a".into(), HabitFrequency::Daily);
        s.add("b".into(), HabitFrequency::Weekly);
        s.toggle(a, day(1));
        assert_eq!(s.completion_rate(day(1)), 50.0);
        assert_eq!(s.best_streak(), 1);
        assert!(s.delete(a));
        assert!(!s.delete(a));
    }

    #[test]
    fn goal_progress_is_clamped() {
        let mut g = GoalStore::default();
        let id = g.add("Save".into(), "Save $500".into());
        assert!(g.set_progress(id, 250));
        assert_eq!(g.get(id).unwrap().progress, 100);
        assert!(!g.set_progress(id + 1, 10));
    }
}
