use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::models::{Mood, Note, NoteKind};

/// General notes and wellness journal entries, newest first. Both kinds share
/// one slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notebook {
    notes: Vec<Note>,
}

impl Notebook {
    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    fn push_front(&mut self, kind: NoteKind, title: String, content: String, now: DateTime<FixedOffset>) -> u64 {
        let id = self.notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        self.notes.insert(0, Note { id, kind, title, content, date: now });
        id
    }

    /// Adds a general note. Refused when both title and content are blank.
    pub fn add_note(&mut self, title: String, content: String, now: DateTime<FixedOffset>) -> Option<u64> {
        if title.trim().is_empty() && content.trim().is_empty() {
            return None;
        }
        Some(self.push_front(NoteKind::General, title, content, now))
    }

    /// Adds a journal entry. Refused when blank.
    pub fn add_journal_entry(&mut self, text: String, now: DateTime<FixedOffset>) -> Option<u64> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.push_front(NoteKind::Journal, String::new(), text, now))
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let len_before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != len_before
    }

    /// General notes whose title or content contains `term`, ignoring case.
    /// An empty term matches every general note.
    pub fn search(&self, term: &str) -> Vec<&Note> {
        let term = term.to_lowercase();
        self.notes
            .iter()
            .filter(|n| n.kind == NoteKind::General)
            .filter(|n| {
                n.title.to_lowercase().contains(&term) || n.content.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn journal(&self) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.kind == NoteKind::Journal).collect()
    }
}

/// A short suggestion for the mood the user checked in with.
pub fn mood_advice(mood: Mood) -> &'static str {
    match mood {
        Mood::Great => "That's wonderful! Keep up the momentum and maybe share your positive energy with someone today.",
        Mood::Okay => "Just okay? That's fine. Maybe take a short walk, drink some water, or listen to your favorite song to boost your mood.",
        Mood::Down => "It's okay not to be okay. Be kind to yourself. Consider talking to a friend, doing a breathing exercise, or writing down your thoughts in the journal.",
    }
}
