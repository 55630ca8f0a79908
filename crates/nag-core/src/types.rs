//! Core data structures for the nag to-do manager.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task is a single to-do item.
///
/// The on-disk record carries exactly these three fields; ids are dense
/// and sequential (`1..=N`) at all times, maintained by the store's
/// renumbering pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub description: String,
    pub status: Status,
}

impl Task {
    /// Create a task with status `Incomplete`, the state every new task
    /// starts in.
    pub fn new(id: u32, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            status: Status::Incomplete,
        }
    }

    /// Whether this task still wants a reminder.
    pub fn is_pending(&self) -> bool {
        self.status != Status::Complete
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {} ({})", self.id, self.description, self.status)
    }
}

/// Task status, cycled in a fixed circular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Incomplete,
    #[serde(rename = "In-Progress")]
    InProgress,
    Complete,
}

impl Status {
    /// The next status in the cycle
    /// `Incomplete -> In-Progress -> Complete -> Incomplete`.
    pub fn cycled(self) -> Self {
        match self {
            Status::Incomplete => Status::InProgress,
            Status::InProgress => Status::Complete,
            Status::Complete => Status::Incomplete,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Incomplete => write!(f, "Incomplete"),
            Status::InProgress => write!(f, "In-Progress"),
            Status::Complete => write!(f, "Complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_starts_incomplete() {
        let task = Task::new(1, "Buy milk");
        assert_eq!(task.id, 1);
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.status, Status::Incomplete);
        assert!(task.is_pending());
    }

    #[test]
    fn test_status_cycle_order() {
        assert_eq!(Status::Incomplete.cycled(), Status::InProgress);
        assert_eq!(Status::InProgress.cycled(), Status::Complete);
        assert_eq!(Status::Complete.cycled(), Status::Incomplete);
    }

    #[test]
    fn test_status_cycle_closes_after_three() {
        for start in [Status::Incomplete, Status::InProgress, Status::Complete] {
            assert_eq!(start.cycled().cycled().cycled(), start);
        }
    }

    #[test]
    fn test_status_display_text() {
        assert_eq!(Status::Incomplete.to_string(), "Incomplete");
        assert_eq!(Status::InProgress.to_string(), "In-Progress");
        assert_eq!(Status::Complete.to_string(), "Complete");
    }

    #[test]
    fn test_status_wire_text_matches_display() {
        for status in [Status::Incomplete, Status::InProgress, Status::Complete] {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, serde_json::json!(status.to_string()));
        }
    }

    #[test]
    fn test_task_record_has_exactly_three_fields() {
        let task = Task::new(3, "Call Alice");
        let value = serde_json::to_value(&task).unwrap();
        let record = value.as_object().unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record["id"], serde_json::json!(3));
        assert_eq!(record["description"], serde_json::json!("Call Alice"));
        assert_eq!(record["status"], serde_json::json!("Incomplete"));
    }

    #[test]
    fn test_task_display_line() {
        let mut task = Task::new(2, "Water plants");
        task.status = Status::InProgress;
        assert_eq!(task.to_string(), "#2: Water plants (In-Progress)");
    }
}
