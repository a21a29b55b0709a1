//! Pure view model for the task list.
//!
//! [`build_view`] maps controller state to rows, toolbar and placeholder
//! without touching the terminal, so sorting and filtering are testable on
//! their own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::entities::{Task, TaskId, TaskStatus};
use crate::utils::datetime;

/// Status filter applied to the displayed list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    Todo,
    InProgress,
    Done,
}

impl TaskFilter {
    /// The concrete status this filter names, if any
    pub fn status(self) -> Option<TaskStatus> {
        match self {
            TaskFilter::All => None,
            TaskFilter::Todo => Some(TaskStatus::Todo),
            TaskFilter::InProgress => Some(TaskStatus::InProgress),
            TaskFilter::Done => Some(TaskStatus::Done),
        }
    }

    pub fn matches(self, status: TaskStatus) -> bool {
        self.status().map_or(true, |wanted| wanted == status)
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskFilter::All => "All Tasks",
            TaskFilter::Todo => "To Do",
            TaskFilter::InProgress => "In Progress",
            TaskFilter::Done => "Done",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            TaskFilter::All => TaskFilter::Todo,
            TaskFilter::Todo => TaskFilter::InProgress,
            TaskFilter::InProgress => TaskFilter::Done,
            TaskFilter::Done => TaskFilter::All,
        }
    }
}

/// Ordering of the displayed list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Ascending `position`, the only order rows can be dragged in
    #[default]
    Manual,
    /// Ascending due date, undated tasks last
    DueAsc,
    /// Descending creation time
    Newest,
    /// Ascending title
    Alpha,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Manual => "Manual",
            SortMode::DueAsc => "Due date",
            SortMode::Newest => "Newest",
            SortMode::Alpha => "A-Z",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            SortMode::Manual => SortMode::DueAsc,
            SortMode::DueAsc => SortMode::Newest,
            SortMode::Newest => SortMode::Alpha,
            SortMode::Alpha => SortMode::Manual,
        }
    }

    /// Rows can only be reordered by hand under the manual sort
    pub fn allows_reorder(self) -> bool {
        self == SortMode::Manual
    }

    /// Comparator for this sort mode. Ties compare equal so a stable sort keeps
    /// the snapshot order.
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortMode::Manual => a.position.cmp(&b.position),
            SortMode::DueAsc => some_first(a.due_date, b.due_date, |x, y| x.cmp(&y)),
            SortMode::Newest => some_first(a.created_at_time(), b.created_at_time(), |x, y| y.cmp(&x)),
            SortMode::Alpha => a.title.cmp(&b.title),
        }
    }
}

/// Orders present values with `cmp` and pushes absent ones after them
fn some_first<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Tasks in display order: a stably sorted copy of the snapshot, then filtered
pub fn display_sequence(tasks: &[Task], filter: TaskFilter, sort: SortMode) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| sort.compare(a, b));
    sorted.retain(|task| filter.matches(task.status));
    sorted
}

/// Due date shown next to a task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DueIndicator {
    pub date: NaiveDate,
    pub label: String,
    pub overdue: bool,
}

/// One rendered task row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub badge: &'static str,
    pub due: Option<DueIndicator>,
    pub description: Option<String>,
    pub selected: bool,
}

impl TaskRow {
    fn from_task(task: &Task, selected: bool, today: NaiveDate) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            status: task.status,
            badge: task.status.label(),
            due: task.due_date.map(|date| DueIndicator {
                date,
                label: datetime::format_human_date_from(date, today),
                overdue: task.is_overdue(today),
            }),
            description: task.description.clone(),
            selected,
        }
    }
}

/// Header region above the list, a pure function of the selection size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toolbar {
    Default,
    Selection { count: usize },
}

impl Toolbar {
    pub fn for_selection(count: usize) -> Self {
        if count == 0 {
            Toolbar::Default
        } else {
            Toolbar::Selection { count }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListBody {
    Rows(Vec<TaskRow>),
    /// Nothing matches the current filter
    Empty,
    /// The last load failed
    Error(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskListView {
    pub toolbar: Toolbar,
    pub filter: TaskFilter,
    pub sort: SortMode,
    pub reorder_enabled: bool,
    pub body: ListBody,
}

impl TaskListView {
    /// Ids of the rendered rows, top to bottom
    pub fn row_ids(&self) -> Vec<TaskId> {
        match &self.body {
            ListBody::Rows(rows) => rows.iter().map(|row| row.id).collect(),
            _ => Vec::new(),
        }
    }
}

/// Map list state to its view model
pub fn build_view(
    tasks: &[Task],
    filter: TaskFilter,
    sort: SortMode,
    selected: &BTreeSet<TaskId>,
    load_error: Option<&str>,
    today: NaiveDate,
) -> TaskListView {
    let body = match load_error {
        Some(error) => ListBody::Error(error.to_string()),
        None => {
            let rows: Vec<TaskRow> = display_sequence(tasks, filter, sort)
                .into_iter()
                .map(|task| TaskRow::from_task(task, selected.contains(&task.id), today))
                .collect();
            if rows.is_empty() {
                ListBody::Empty
            } else {
                ListBody::Rows(rows)
            }
        }
    };

    TaskListView {
        toolbar: Toolbar::for_selection(selected.len()),
        filter,
        sort,
        reorder_enabled: sort.allows_reorder(),
        body,
    }
}
