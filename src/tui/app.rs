use ratatui::widgets::TableState;
use tracing::warn;

use crate::commands::DEFAULT_TIME;
use crate::error::StorageError;
use crate::models::{Frequency, Priority, Task, TaskDraft, TaskPatch};
use crate::organizer::Organizer;
use crate::tasks::{TaskFilter, Toggle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    None,
    Title,
    Date,
    Time,
}

/// State for the multi-step "Add Task" wizard.
#[derive(Debug, Default)]
pub struct AddState {
    pub title: String,
    pub date: String,
    pub time: String,
    pub priority: Priority,
    pub step: usize, // 0: Title, 1: Date, 2: Time, 3: Priority, 4: Repeat
}

pub struct App<'a> {
    pub org: &'a mut Organizer,
    /// Visible tasks under the current filter, by due time.
    pub tasks: Vec<Task>,
    pub state: TableState,
    pub filter: TaskFilter,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub target_id: Option<u64>,
    pub add_state: AddState,
    /// Outcome of the last action, shown above the help bar.
    pub status: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(org: &'a mut Organizer) -> App<'a> {
        let mut app = App {
            org,
            tasks: Vec::new(),
            state: TableState::default(),
            filter: TaskFilter::All,
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            target_id: None,
            add_state: AddState::default(),
            status: None,
        };
        app.reload();
        app
    }

    pub fn next(&mut self) {
        if self.tasks.is_empty() { return; }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.tasks.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.tasks.is_empty() { return; }
        let i = match self.state.selected() {
            Some(0) | None => self.tasks.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn selected(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.tasks.get(i))
    }

    fn selected_id(&self) -> Option<u64> {
        self.selected().map(|t| t.id)
    }

    /// Refreshes the visible list from the organizer, keeping the selection in range.
    pub fn reload(&mut self) {
        self.tasks = self.org.tasks().list(self.filter).into_iter().cloned().collect();
        if self.tasks.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.tasks.len() {
                self.state.select(Some(self.tasks.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Records the outcome of a storage operation and reloads.
    fn settle<T>(&mut self, res: Result<T, StorageError>, ok: impl FnOnce(T) -> Option<String>) {
        self.status = match res {
            Ok(v) => ok(v),
            Err(e) => {
                warn!(error = %e, "change not saved");
                Some(format!("Not saved: {e}"))
            }
        };
        self.reload();
    }

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let res = self.org.toggle_task_completion(id);
        self.settle(res, |t| match t? {
            Toggle::Completed { on_time: true, successor } => Some(match successor {
                Some(_) => "Done on time. Tomorrow's is scheduled.".to_string(),
                None => "Done on time!".to_string(),
            }),
            Toggle::Completed { on_time: false, successor } => Some(match successor {
                Some(_) => "Done. Tomorrow's is scheduled.".to_string(),
                None => "Done.".to_string(),
            }),
            Toggle::Reopened => Some("Reopened.".to_string()),
        });
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let res = self.org.delete_task(id);
        self.settle(res, |_| Some(format!("Task {id} deleted.")));
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.reload();
    }

    pub fn cycle_priority(&mut self) {
        let Some((id, priority)) = self.selected().map(|t| (t.id, t.priority)) else { return };
        let priority = match priority {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        };
        self.apply_patch(id, TaskPatch { priority: Some(priority), ..TaskPatch::default() });
    }

    pub fn cycle_repeat(&mut self) {
        let Some((id, frequency)) = self.selected().map(|t| (t.id, t.frequency)) else { return };
        let frequency = match frequency {
            Frequency::Once => Frequency::Daily,
            Frequency::Daily => Frequency::Once,
        };
        self.apply_patch(id, TaskPatch { frequency: Some(frequency), ..TaskPatch::default() });
    }

    fn apply_patch(&mut self, id: u64, patch: TaskPatch) {
        let res = self.org.update_task(id, &patch);
        self.settle(res, |_| None);
    }

    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
    }

    /// Starts editing a text field of the selected task, prefilled with its value.
    pub fn start_edit(&mut self, field: InputField) {
        let Some(t) = self.state.selected().and_then(|i| self.tasks.get(i)) else { return };
        self.input_buffer = match field {
            InputField::Title => t.title.clone(),
            InputField::Date => t.date.clone(),
            InputField::Time => t.time.clone(),
            InputField::None => String::new(),
        };
        self.target_id = Some(t.id);
        self.input_mode = InputMode::Editing;
        self.input_field = field;
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
    }

    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            InputMode::Normal => {}
        }
    }

    fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input_buffer).trim().to_string()
    }

    fn handle_adding_input(&mut self) {
        match self.add_state.step {
            0 => {
                let title = self.take_input();
                if title.is_empty() { return; }
                self.add_state.title = title;
            }
            1 => {
                let date = self.take_input();
                self.add_state.date = if date.is_empty() {
                    self.org.today().format("%Y-%m-%d").to_string()
                } else {
                    date
                };
            }
            2 => {
                let time = self.take_input();
                self.add_state.time = if time.is_empty() { DEFAULT_TIME.to_string() } else { time };
            }
            3 => {
                self.add_state.priority = match self.take_input().to_lowercase().as_str() {
                    "l" | "low" => Priority::Low,
                    "h" | "high" => Priority::High,
                    _ => Priority::Medium,
                };
            }
            _ => {
                let frequency = match self.take_input().to_lowercase().as_str() {
                    "d" | "daily" => Frequency::Daily,
                    _ => Frequency::Once,
                };
                let draft = TaskDraft {
                    title: std::mem::take(&mut self.add_state.title),
                    date: std::mem::take(&mut self.add_state.date),
                    time: std::mem::take(&mut self.add_state.time),
                    priority: self.add_state.priority,
                    frequency,
                };
                self.input_mode = InputMode::Normal;
                let res = self.org.add_task(draft);
                self.settle(res, |id| Some(format!("Task {id} added.")));
                return;
            }
        }
        self.add_state.step += 1;
    }

    fn handle_editing_input(&mut self) {
        let Some(id) = self.target_id.take() else { return };
        let value = self.take_input();
        let patch = match self.input_field {
            InputField::Title if !value.is_empty() => TaskPatch { title: Some(value), ..TaskPatch::default() },
            InputField::Date => TaskPatch { date: Some(value), ..TaskPatch::default() },
            InputField::Time => TaskPatch { time: Some(value), ..TaskPatch::default() },
            _ => TaskPatch::default(),
        };
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        if !patch.is_empty() {
            self.apply_patch(id, patch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStorage;

    fn organizer() -> Organizer {
        let clock = FixedClock::at("2024-05-10T09:00:00+00:00").unwrap();
        Organizer::load(Box::new(MemoryStorage::new()), Box::new(clock)).unwrap()
    }

    fn type_and_enter(app: &mut App, text: &str) {
        app.input_buffer.push_str(text);
        app.handle_input();
    }

    #[test]
    fn add_wizard_fills_defaults() {
        let mut org = organizer();
        let mut app = App::new(&mut org);
        app.start_add();
        type_and_enter(&mut app, "Stretch");
        type_and_enter(&mut app, "");
        type_and_enter(&mut app, "");
        type_and_enter(&mut app, "h");
        type_and_enter(&mut app, "daily");

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.tasks.len(), 1);
        let t = &app.tasks[0];
        assert_eq!(t.title, "Stretch");
        assert_eq!(t.date, "2024-05-10");
        assert_eq!(t.time, DEFAULT_TIME);
        assert_eq!(t.priority, Priority::High);
        assert_eq!(t.frequency, Frequency::Daily);
    }

    #[test]
    fn empty_title_keeps_wizard_on_first_step() {
        let mut org = organizer();
        let mut app = App::new(&mut org);
        app.start_add();
        type_and_enter(&mut app, "   ");
        assert_eq!(app.add_state.step, 0);
        assert_eq!(app.input_mode, InputMode::Adding);
    }

    #[test]
    fn toggling_a_daily_task_adds_tomorrow() {
        let mut org = organizer();
        org.add_task(TaskDraft {
            title: "Run".into(),
            date: "2024-05-10".into(),
            time: "18:00".into(),
            frequency: Frequency::Daily,
            ..TaskDraft::default()
        })
        .unwrap();
        let mut app = App::new(&mut org);
        app.toggle_selected();
        assert_eq!(app.tasks.len(), 2);
        assert!(app.tasks.iter().any(|t| t.date == "2024-05-11" && !t.completed));

        app.cycle_filter();
        assert_eq!(app.filter, TaskFilter::Active);
        assert_eq!(app.tasks.len(), 1);
    }
}
