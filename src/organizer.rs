//! Application state: every collection, the storage adapter they are
//! committed through, and the clock.
//!
//! Each mutation runs on a copy of one collection. The copy is written to its
//! slot and only then replaces the in-memory value, so a failed write leaves
//! both sides as they were. A mutation that changes nothing writes nothing.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::clock::Clock;
use crate::error::StorageError;
use crate::finance::FinanceLedger;
use crate::habits::{GoalStore, HabitStore};
use crate::models::{
    AssignmentStatus, Currency, HabitFrequency, ItemDraft, ItemPatch, TaskDraft, TaskPatch,
    TransactionKind,
};
use crate::notes::Notebook;
use crate::settings::{Settings, SettingsPatch};
use crate::shopping::ShoppingList;
use crate::storage::{load_slot, save_slot, Slot, Storage};
use crate::student::StudentRecords;
use crate::tasks::{TaskStore, Toggle};

fn commit<T, R>(
    storage: &mut dyn Storage,
    slot: Slot,
    current: &mut T,
    f: impl FnOnce(&mut T) -> R,
) -> Result<R, StorageError>
where
    T: Clone + PartialEq + Serialize,
{
    let mut next = current.clone();
    let out = f(&mut next);
    if next != *current {
        save_slot(storage, slot, &next)?;
        *current = next;
        debug!(%slot, "committed");
    }
    Ok(out)
}

pub struct Organizer {
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    tasks: TaskStore,
    habits: HabitStore,
    goals: GoalStore,
    finance: FinanceLedger,
    shopping: ShoppingList,
    notes: Notebook,
    student: StudentRecords,
    settings: Settings,
}

impl Organizer {
    /// Loads every collection from `storage`.
    pub fn load(storage: Box<dyn Storage>, clock: Box<dyn Clock>) -> Result<Self, StorageError> {
        let s = storage.as_ref();
        let tasks: TaskStore = load_slot(s, Slot::Tasks)?;
        let habits = load_slot(s, Slot::Habits)?;
        let goals = load_slot(s, Slot::Goals)?;
        let finance = load_slot(s, Slot::Finance)?;
        let shopping = load_slot(s, Slot::Shopping)?;
        let notes = load_slot(s, Slot::Notes)?;
        let student = load_slot(s, Slot::Student)?;
        let settings = load_slot(s, Slot::Settings)?;
        debug!(tasks = tasks.len(), "collections loaded");
        Ok(Organizer {
            storage,
            clock,
            tasks,
            habits,
            goals,
            finance,
            shopping,
            notes,
            student,
            settings,
        })
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Gives the storage back, e.g. to load it again.
    pub fn into_storage(self) -> Box<dyn Storage> {
        self.storage
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn tasks(&self) -> &TaskStore { &self.tasks }
    pub fn habits(&self) -> &HabitStore { &self.habits }
    pub fn goals(&self) -> &GoalStore { &self.goals }
    pub fn finance(&self) -> &FinanceLedger { &self.finance }
    pub fn shopping(&self) -> &ShoppingList { &self.shopping }
    pub fn notes(&self) -> &Notebook { &self.notes }
    pub fn student(&self) -> &StudentRecords { &self.student }
    pub fn settings(&self) -> &Settings { &self.settings }

    // --- tasks ---

    pub fn add_task(&mut self, draft: TaskDraft) -> Result<u64, StorageError> {
        let now = self.clock.now();
        commit(self.storage.as_mut(), Slot::Tasks, &mut self.tasks, |t| t.add(draft, now))
    }

    /// Returns `false` when there is no such task.
    pub fn update_task(&mut self, id: u64, patch: &TaskPatch) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Tasks, &mut self.tasks, |t| t.update(id, patch))
    }

    /// Returns `false` when there is no such task.
    pub fn delete_task(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Tasks, &mut self.tasks, |t| t.delete(id))
    }

    /// Returns `None` when there is no such task.
    pub fn toggle_task_completion(&mut self, id: u64) -> Result<Option<Toggle>, StorageError> {
        let now = self.clock.now();
        commit(self.storage.as_mut(), Slot::Tasks, &mut self.tasks, |t| {
            t.toggle_completion(id, now)
        })
    }

    // --- habits and goals ---

    pub fn add_habit(&mut self, title: String, frequency: HabitFrequency) -> Result<u64, StorageError> {
        commit(self.storage.as_mut(), Slot::Habits, &mut self.habits, |h| h.add(title, frequency))
    }

    pub fn toggle_habit(&mut self, id: u64) -> Result<Option<bool>, StorageError> {
        let today = self.clock.today();
        commit(self.storage.as_mut(), Slot::Habits, &mut self.habits, |h| h.toggle(id, today))
    }

    pub fn delete_habit(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Habits, &mut self.habits, |h| h.delete(id))
    }

    pub fn add_goal(&mut self, title: String, target: String) -> Result<u64, StorageError> {
        commit(self.storage.as_mut(), Slot::Goals, &mut self.goals, |g| g.add(title, target))
    }

    pub fn set_goal_progress(&mut self, id: u64, progress: u8) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Goals, &mut self.goals, |g| g.set_progress(id, progress))
    }

    pub fn delete_goal(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Goals, &mut self.goals, |g| g.delete(id))
    }

    // --- finance ---

    pub fn add_transaction(
        &mut self,
        amount: f64,
        description: String,
        kind: TransactionKind,
    ) -> Result<u64, StorageError> {
        let now = self.clock.now();
        commit(self.storage.as_mut(), Slot::Finance, &mut self.finance, |l| {
            l.add(amount, description, kind, now)
        })
    }

    pub fn delete_transaction(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Finance, &mut self.finance, |l| l.delete(id))
    }

    // --- shopping ---

    pub fn add_shopping_item(&mut self, draft: ItemDraft) -> Result<u64, StorageError> {
        commit(self.storage.as_mut(), Slot::Shopping, &mut self.shopping, |s| s.add(draft))
    }

    pub fn update_shopping_item(&mut self, id: u64, patch: &ItemPatch) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Shopping, &mut self.shopping, |s| s.update(id, patch))
    }

    pub fn delete_shopping_item(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Shopping, &mut self.shopping, |s| s.delete(id))
    }

    pub fn mark_item_purchased(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Shopping, &mut self.shopping, |s| s.mark_purchased(id))
    }

    pub fn restore_recommendation(&mut self, id: u64) -> Result<Option<u64>, StorageError> {
        commit(self.storage.as_mut(), Slot::Shopping, &mut self.shopping, |s| {
            s.restore_recommendation(id)
        })
    }

    pub fn forget_recommendation(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Shopping, &mut self.shopping, |s| {
            s.forget_recommendation(id)
        })
    }

    pub fn set_shopping_budget(&mut self, amount: f64, currency: Currency) -> Result<(), StorageError> {
        commit(self.storage.as_mut(), Slot::Shopping, &mut self.shopping, |s| {
            s.set_budget(amount, currency)
        })
    }

    // --- notes and journal ---

    pub fn add_note(&mut self, title: String, content: String) -> Result<Option<u64>, StorageError> {
        let now = self.clock.now();
        commit(self.storage.as_mut(), Slot::Notes, &mut self.notes, |n| n.add_note(title, content, now))
    }

    pub fn add_journal_entry(&mut self, text: String) -> Result<Option<u64>, StorageError> {
        let now = self.clock.now();
        commit(self.storage.as_mut(), Slot::Notes, &mut self.notes, |n| n.add_journal_entry(text, now))
    }

    pub fn delete_note(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Notes, &mut self.notes, |n| n.delete(id))
    }

    // --- student ---

    pub fn add_class(
        &mut self,
        subject: String,
        location: String,
        days: String,
        time: String,
    ) -> Result<u64, StorageError> {
        commit(self.storage.as_mut(), Slot::Student, &mut self.student, |s| {
            s.add_class(subject, location, days, time)
        })
    }

    pub fn add_assignment(&mut self, subject: String, title: String, due: String) -> Result<u64, StorageError> {
        commit(self.storage.as_mut(), Slot::Student, &mut self.student, |s| {
            s.add_assignment(subject, title, due)
        })
    }

    pub fn add_exam(&mut self, subject: String, date: String, notes: String) -> Result<u64, StorageError> {
        commit(self.storage.as_mut(), Slot::Student, &mut self.student, |s| s.add_exam(subject, date, notes))
    }

    pub fn delete_class(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Student, &mut self.student, |s| s.delete_class(id))
    }

    pub fn delete_assignment(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Student, &mut self.student, |s| s.delete_assignment(id))
    }

    pub fn delete_exam(&mut self, id: u64) -> Result<bool, StorageError> {
        commit(self.storage.as_mut(), Slot::Student, &mut self.student, |s| s.delete_exam(id))
    }

    pub fn toggle_assignment(&mut self, id: u64) -> Result<Option<AssignmentStatus>, StorageError> {
        commit(self.storage.as_mut(), Slot::Student, &mut self.student, |s| s.toggle_assignment(id))
    }

    // --- settings ---

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<(), StorageError> {
        commit(self.storage.as_mut(), Slot::Settings, &mut self.settings, |s| s.apply(patch))
    }

    pub fn reset_colors(&mut self) -> Result<(), StorageError> {
        commit(self.storage.as_mut(), Slot::Settings, &mut self.settings, |s| s.reset_colors())
    }

    /// Deletes every slot and empties all collections.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.storage.clear()?;
        self.tasks = TaskStore::default();
        self.habits = HabitStore::default();
        self.goals = GoalStore::default();
        self.finance = FinanceLedger::default();
        self.shopping = ShoppingList::default();
        self.notes = Notebook::default();
        self.student = StudentRecords::default();
        self.settings = Settings::default();
        Ok(())
    }
}
