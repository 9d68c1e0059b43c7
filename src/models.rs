use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Importance of a task.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// How often a task repeats.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Once,
    Daily,
}

/// Represents a single scheduled task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: u64,
    pub title: String,
    /// Scheduled day as `YYYY-MM-DD`. Kept verbatim; may not parse.
    #[serde(default)]
    pub date: String,
    /// Due time on `date` as `HH:MM`. Kept verbatim; may not parse.
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub completed: bool,
    /// Set when the task is completed, cleared when it is reopened.
    #[serde(default)]
    pub completed_at: Option<DateTime<FixedOffset>>,
    /// Whether the task was completed at or before its due instant.
    /// Computed once, at completion.
    #[serde(default)]
    pub is_on_time: bool,
    pub created_at: DateTime<FixedOffset>,
}

/// Fields supplied when a task is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub priority: Priority,
    pub frequency: Frequency,
}

/// A partial update merged into an existing task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub priority: Option<Priority>,
    pub frequency: Option<Frequency>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }

    pub fn apply(&self, t: &mut Task) {
        if let Some(v) = &self.title { t.title = v.clone(); }
        if let Some(v) = &self.date { t.date = v.clone(); }
        if let Some(v) = &self.time { t.time = v.clone(); }
        if let Some(v) = self.priority { t.priority = v; }
        if let Some(v) = self.frequency { t.frequency = v; }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    #[default]
    Daily,
    Weekly,
    Weekdays,
}

/// A habit with a running streak.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Habit {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub frequency: HabitFrequency,
    #[serde(default)]
    pub streak: u32,
    /// Day the habit was last checked off.
    #[serde(default)]
    pub checked_on: Option<NaiveDate>,
}

impl Habit {
    pub fn done_on(&self, day: NaiveDate) -> bool {
        self.checked_on == Some(day)
    }
}

/// A long-running goal with a percentage of progress.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: u64,
    pub title: String,
    /// Free-form description of the target, e.g. "Save $500".
    #[serde(default)]
    pub target: String,
    /// 0 to 100.
    #[serde(default)]
    pub progress: u8,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

/// One entry of the finance ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub kind: TransactionKind,
    pub date: DateTime<FixedOffset>,
}

impl Transaction {
    /// Amount with its sign: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Currency {
    #[default]
    #[serde(rename = "₦")]
    Naira,
    #[serde(rename = "$")]
    Dollar,
    #[serde(rename = "€")]
    Euro,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Naira => "₦",
            Currency::Dollar => "$",
            Currency::Euro => "€",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ItemFrequency {
    #[default]
    OneTime,
    /// Bought regularly; promoted to the recommendations once purchased.
    Frequent,
}

/// An entry of the shopping list or of its recommendations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShoppingItem {
    pub id: u64,
    pub name: String,
    /// Planned cost in `currency`.
    pub cost: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub frequency: ItemFrequency,
}

/// Fields supplied when a shopping item is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub cost: f64,
    pub currency: Currency,
    pub note: String,
    pub frequency: ItemFrequency,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub cost: Option<f64>,
    pub currency: Option<Currency>,
    pub note: Option<String>,
    pub frequency: Option<ItemFrequency>,
}

impl ItemPatch {
    pub fn apply(&self, item: &mut ShoppingItem) {
        if let Some(v) = &self.name { item.name = v.clone(); }
        if let Some(v) = self.cost { item.cost = v; }
        if let Some(v) = self.currency { item.currency = v; }
        if let Some(v) = &self.note { item.note = v.clone(); }
        if let Some(v) = self.frequency { item.frequency = v; }
    }
}

/// Overall shopping budget. An amount of zero means "no limit".
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct ShoppingBudget {
    pub amount: f64,
    pub currency: Currency,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    #[default]
    General,
    /// Wellness journal entry.
    Journal,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Note {
    pub id: u64,
    #[serde(default)]
    pub kind: NoteKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Okay,
    Down,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Class {
    pub id: u64,
    pub subject: String,
    /// Room or meeting link.
    #[serde(default)]
    pub location: String,
    /// Free text, e.g. "Mon, Wed".
    #[serde(default)]
    pub days: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    #[default]
    Pending,
    Done,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: u64,
    pub subject: String,
    #[serde(default)]
    pub title: String,
    /// Due moment as `YYYY-MM-DDTHH:MM`.
    pub due: String,
    #[serde(default)]
    pub status: AssignmentStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exam {
    pub id: u64,
    pub subject: String,
    /// Exam moment as `YYYY-MM-DDTHH:MM`.
    pub date: String,
    /// Syllabus or other notes.
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

pub const DEFAULT_ACCENT: &str = "#6366f1";

/// User color overrides. Empty strings fall back to the theme.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CustomColors {
    pub text: String,
    pub background: String,
    pub card: String,
    pub accent: String,
}

impl Default for CustomColors {
    fn default() -> Self {
        CustomColors {
            text: String::new(),
            background: String::new(),
            card: String::new(),
            accent: DEFAULT_ACCENT.to_string(),
        }
    }
}
