use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::due::parse_moment;
use crate::models::{Assignment, AssignmentStatus, Class, Exam};

/// Classes, assignments and exams. Each kind keeps its own id sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentRecords {
    classes: Vec<Class>,
    assignments: Vec<Assignment>,
    exams: Vec<Exam>,
}

macro_rules! next_id {
    ($v:expr) => {
        $v.iter().map(|x| x.id).max().unwrap_or(0) + 1
    };
}

macro_rules! remove_by_id {
    ($v:expr, $id:expr) => {{
        let len_before = $v.len();
        $v.retain(|x| x.id != $id);
        $v.len() != len_before
    }};
}

impl StudentRecords {
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    pub fn add_class(&mut self, subject: String, location: String, days: String, time: String) -> u64 {
        let id = next_id!(self.classes);
        self.classes.push(Class { id, subject, location, days, time });
        id
    }

    pub fn add_assignment(&mut self, subject: String, title: String, due: String) -> u64 {
        let id = next_id!(self.assignments);
        self.assignments.push(Assignment {
            id,
            subject,
            title,
            due,
            status: AssignmentStatus::Pending,
        });
        id
    }

    pub fn add_exam(&mut self, subject: String, date: String, notes: String) -> u64 {
        let id = next_id!(self.exams);
        self.exams.push(Exam { id, subject, date, notes });
        id
    }

    pub fn delete_class(&mut self, id: u64) -> bool {
        remove_by_id!(self.classes, id)
    }

    pub fn delete_assignment(&mut self, id: u64) -> bool {
        remove_by_id!(self.assignments, id)
    }

    pub fn delete_exam(&mut self, id: u64) -> bool {
        remove_by_id!(self.exams, id)
    }

    /// Flips an assignment between pending and done.
    pub fn toggle_assignment(&mut self, id: u64) -> Option<AssignmentStatus> {
        let a = self.assignments.iter_mut().find(|a| a.id == id)?;
        a.status = match a.status {
            AssignmentStatus::Pending => AssignmentStatus::Done,
            AssignmentStatus::Done => AssignmentStatus::Pending,
        };
        Some(a.status)
    }

    /// Assignments due on `day`.
    pub fn assignments_due(&self, day: NaiveDate) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| parse_moment(&a.due).map(|m| m.date()) == Some(day))
            .collect()
    }

    /// Exams held on `day`.
    pub fn exams_on(&self, day: NaiveDate) -> Vec<&Exam> {
        self.exams
            .iter()
            .filter(|e| parse_moment(&e.date).map(|m| m.date()) == Some(day))
            .collect()
    }
}
