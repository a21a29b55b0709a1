use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::datetime;

pub type TaskId = i64;

/// Workflow status of a task
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Wire name, as used in payloads and the `status` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Badge label
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(TaskStatus::Todo),
            "in_progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Next status in form order, wrapping around
    pub fn cycle(self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }
}

/// A task as returned by `/api/tasks`.
///
/// Deserialization goes through [`TaskRecord`] so that legacy rows carrying a
/// boolean `completed` instead of `status` map onto `done`/`todo`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub position: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Due strictly before `today` and not done
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.due_date.is_some_and(|due| due < today)
    }

    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(datetime::parse_timestamp)
    }
}

/// Raw wire shape of a task row
#[derive(Debug, Deserialize)]
struct TaskRecord {
    id: TaskId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    position: Option<i64>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let status = record
            .status
            .as_deref()
            .and_then(TaskStatus::parse)
            .unwrap_or(match record.completed {
                Some(true) => TaskStatus::Done,
                _ => TaskStatus::Todo,
            });

        let due_date = record
            .due_date
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| match datetime::parse_date(raw) {
                Ok(date) => Some(date),
                Err(e) => {
                    log::warn!("Task {}: ignoring unparseable due_date '{}': {}", record.id, raw, e);
                    None
                }
            });

        Self {
            id: record.id,
            title: record.title,
            description: record.description.filter(|d| !d.is_empty()),
            due_date,
            status,
            position: record.position.unwrap_or_default(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Body of `POST /api/tasks` and `PUT /api/tasks/{id}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub status: TaskStatus,
}
