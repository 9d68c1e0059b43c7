//! Personal life organizer: tasks with daily recurrence, habits and goals, a
//! calendar, a finance ledger, a shopping list, notes and a wellness journal,
//! student records and settings. Every collection is stored as its own JSON
//! slot in a local data directory.

pub mod calendar;
pub mod clock;
pub mod commands;
pub mod due;
pub mod error;
pub mod finance;
pub mod habits;
pub mod models;
pub mod notes;
pub mod organizer;
pub mod settings;
pub mod shopping;
pub mod storage;
pub mod student;
pub mod tasks;
pub mod tui;

pub use error::{AppError, StorageError};
pub use organizer::Organizer;
