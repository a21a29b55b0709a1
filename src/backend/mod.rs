//! Backend abstraction over the productivity app's REST API.
//!
//! Controllers only talk to the [`Backend`] trait; [`http::HttpBackend`] is the
//! production implementation and tests substitute an in-memory one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::{
    BoardNote, BoardNoteId, BoardNotePayload, Note, NoteId, NotePayload, Task, TaskId, TaskPayload, Workspace,
    WorkspaceId,
};

pub mod http;

pub use http::HttpBackend;

/// Error types for backend operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// `{ids: [...]}` body shared by bulk delete and reorder requests
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdList {
    pub ids: Vec<i64>,
}

/// Body of the workspace rename request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenameWorkspace {
    pub name: String,
}

/// Interface to the tasks, notes board, workspace notes and workspaces endpoints.
#[async_trait]
pub trait Backend: Send + Sync {
    // Tasks
    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError>;
    async fn create_task(&self, payload: &TaskPayload) -> Result<Task, BackendError>;
    async fn update_task(&self, id: TaskId, payload: &TaskPayload) -> Result<Task, BackendError>;
    async fn delete_task(&self, id: TaskId) -> Result<(), BackendError>;
    async fn bulk_delete_tasks(&self, ids: &[TaskId]) -> Result<(), BackendError>;
    async fn reorder_tasks(&self, ids: &[TaskId]) -> Result<(), BackendError>;

    // Notes board
    async fn fetch_board_notes(&self) -> Result<Vec<BoardNote>, BackendError>;
    async fn create_board_note(&self, payload: &BoardNotePayload) -> Result<(), BackendError>;
    async fn update_board_note(&self, id: BoardNoteId, payload: &BoardNotePayload) -> Result<(), BackendError>;
    async fn delete_board_note(&self, id: BoardNoteId) -> Result<(), BackendError>;

    // Workspace notes
    async fn fetch_notes(&self, workspace: WorkspaceId) -> Result<Vec<Note>, BackendError>;
    async fn create_note(&self, workspace: WorkspaceId, payload: &NotePayload) -> Result<Note, BackendError>;
    async fn update_note(&self, workspace: WorkspaceId, id: NoteId, payload: &NotePayload) -> Result<(), BackendError>;
    async fn delete_note(&self, workspace: WorkspaceId, id: NoteId) -> Result<(), BackendError>;

    // Workspaces
    async fn fetch_workspaces(&self) -> Result<Vec<Workspace>, BackendError>;
    async fn create_workspace(&self) -> Result<(), BackendError>;
    async fn rename_workspace(&self, id: WorkspaceId, name: &str) -> Result<(), BackendError>;
    async fn delete_workspace(&self, id: WorkspaceId) -> Result<(), BackendError>;
    async fn reorder_workspaces(&self, ids: &[WorkspaceId]) -> Result<(), BackendError>;
    async fn fetch_workspace_trash(&self) -> Result<Vec<Workspace>, BackendError>;
    async fn restore_workspace(&self, id: WorkspaceId) -> Result<(), BackendError>;
    async fn delete_workspace_permanently(&self, id: WorkspaceId) -> Result<(), BackendError>;
}
