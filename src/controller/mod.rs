//! Client-side state machines.
//!
//! Each controller owns a snapshot of server data plus ephemeral view state
//! and exposes its user actions as methods, so they can be driven directly
//! from tests or from the terminal UI. Backend failures never escape a
//! controller: they become a [`Notice`] or an inline error.

pub mod note_board;
pub mod notes;
pub mod stats;
pub mod task_form;
pub mod task_view;
pub mod tasks;
pub mod workspaces;

pub use note_board::{BoardField, BoardNoteForm, NoteBoard, NoteCard};
pub use notes::{AutosaveSchedule, NotesEditor, SaveOutcome, SaveState};
pub use stats::TaskStats;
pub use task_form::{FormField, FormMode, TaskForm};
pub use task_view::{ListBody, SortMode, TaskFilter, TaskListView, TaskRow, Toolbar};
pub use tasks::{SubmitOutcome, TaskListController};
pub use workspaces::WorkspaceList;

use crate::backend::BackendError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient user-visible message about the outcome of an action
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.to_string(),
        }
    }

    /// Error notice for a failed request: `"<context>: <error>"`
    pub fn failure(context: &str, error: &BackendError) -> Self {
        log::error!("{}: {}", context, error);
        Self {
            kind: NoticeKind::Error,
            message: format!("{}: {}", context, error),
        }
    }

    /// Error notice without an underlying request failure
    pub fn error(message: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
