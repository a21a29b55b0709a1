//! In-memory backend shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use taskdesk::backend::{Backend, BackendError};
use taskdesk::entities::{
    BoardNote, BoardNoteId, BoardNotePayload, Note, NoteId, NotePayload, Task, TaskId, TaskPayload, TaskStatus,
    Workspace, WorkspaceId,
};

/// One request as seen by the fake server
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    FetchTasks,
    CreateTask(TaskPayload),
    UpdateTask(TaskId, TaskPayload),
    DeleteTask(TaskId),
    BulkDeleteTasks(Vec<TaskId>),
    ReorderTasks(Vec<TaskId>),
    FetchBoardNotes,
    CreateBoardNote(BoardNotePayload),
    UpdateBoardNote(BoardNoteId, BoardNotePayload),
    DeleteBoardNote(BoardNoteId),
    FetchNotes(WorkspaceId),
    CreateNote(WorkspaceId, NotePayload),
    UpdateNote(WorkspaceId, NoteId, NotePayload),
    DeleteNote(WorkspaceId, NoteId),
    FetchWorkspaces,
    CreateWorkspace,
    RenameWorkspace(WorkspaceId, String),
    DeleteWorkspace(WorkspaceId),
    ReorderWorkspaces(Vec<WorkspaceId>),
    FetchTrash,
    RestoreWorkspace(WorkspaceId),
    DeleteWorkspaceForever(WorkspaceId),
}

impl Call {
    /// Requests that change server state
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Call::FetchTasks
                | Call::FetchBoardNotes
                | Call::FetchNotes(_)
                | Call::FetchWorkspaces
                | Call::FetchTrash
        )
    }
}

#[derive(Default)]
struct State {
    tasks: Vec<Task>,
    board: Vec<BoardNote>,
    notes: Vec<Note>,
    workspaces: Vec<Workspace>,
    trash: Vec<Workspace>,
    next_id: i64,
    calls: Vec<Call>,
    failing: HashSet<&'static str>,
}

/// Backend that keeps everything in memory and records every call
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn with_tasks(tasks: Vec<Task>) -> Arc<Self> {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            state.tasks = tasks;
        }
        Arc::new(backend)
    }

    pub fn with_notes(notes: Vec<Note>) -> Arc<Self> {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.next_id = notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
            state.notes = notes;
        }
        Arc::new(backend)
    }

    pub fn with_board(board: Vec<BoardNote>) -> Arc<Self> {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.next_id = board.iter().map(|n| n.id).max().unwrap_or(0) + 1;
            state.board = board;
        }
        Arc::new(backend)
    }

    pub fn with_workspaces(workspaces: Vec<Workspace>, trash: Vec<Workspace>) -> Arc<Self> {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.next_id = workspaces.iter().chain(trash.iter()).map(|w| w.id).max().unwrap_or(0) + 1;
            state.workspaces = workspaces;
            state.trash = trash;
        }
        Arc::new(backend)
    }

    /// Make the named operation fail with a 500 until [`FakeBackend::recover`]
    pub fn fail(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.remove(operation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.state.lock().unwrap().tasks.iter().map(|t| t.id).collect()
    }

    pub fn stored_task(&self, id: TaskId) -> Option<Task> {
        self.state.lock().unwrap().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn stored_board_note(&self, id: BoardNoteId) -> Option<BoardNote> {
        self.state.lock().unwrap().board.iter().find(|n| n.id == id).cloned()
    }

    pub fn board_ids(&self) -> Vec<BoardNoteId> {
        self.state.lock().unwrap().board.iter().map(|n| n.id).collect()
    }

    pub fn stored_note(&self, id: NoteId) -> Option<Note> {
        self.state.lock().unwrap().notes.iter().find(|n| n.id == id).cloned()
    }

    pub fn workspace_names(&self) -> Vec<String> {
        self.state.lock().unwrap().workspaces.iter().map(|w| w.name.clone()).collect()
    }

    /// Replace the stored tasks as if another client had changed them
    pub fn set_tasks(&self, tasks: Vec<Task>) {
        self.state.lock().unwrap().tasks = tasks;
    }

    fn record(&self, call: Call, operation: &'static str) -> Result<std::sync::MutexGuard<'_, State>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing.contains(operation) {
            return Err(BackendError::Http {
                status: 500,
                message: format!("{} failed", operation),
            });
        }
        Ok(state)
    }
}

fn task_from_payload(id: TaskId, position: i64, payload: &TaskPayload) -> Task {
    Task {
        id,
        title: payload.title.clone(),
        description: Some(payload.description.clone()).filter(|d| !d.is_empty()),
        due_date: payload.due_date.as_deref().and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        status: payload.status,
        position,
        created_at: Some("2024-05-01T10:00:00Z".to_string()),
        updated_at: None,
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
        let state = self.record(Call::FetchTasks, "fetch_tasks")?;
        Ok(state.tasks.clone())
    }

    async fn create_task(&self, payload: &TaskPayload) -> Result<Task, BackendError> {
        let mut state = self.record(Call::CreateTask(payload.clone()), "create_task")?;
        let id = state.next_id;
        state.next_id += 1;
        let position = state.tasks.iter().map(|t| t.position).max().unwrap_or(0) + 1;
        let task = task_from_payload(id, position, payload);
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, payload: &TaskPayload) -> Result<Task, BackendError> {
        let mut state = self.record(Call::UpdateTask(id, payload.clone()), "update_task")?;
        let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) else {
            return Err(BackendError::Http {
                status: 404,
                message: "Task not found".to_string(),
            });
        };
        *task = task_from_payload(id, task.position, payload);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), BackendError> {
        let mut state = self.record(Call::DeleteTask(id), "delete_task")?;
        state.tasks.retain(|t| t.id != id);
        Ok(())
    }

    async fn bulk_delete_tasks(&self, ids: &[TaskId]) -> Result<(), BackendError> {
        let mut state = self.record(Call::BulkDeleteTasks(ids.to_vec()), "bulk_delete_tasks")?;
        state.tasks.retain(|t| !ids.contains(&t.id));
        Ok(())
    }

    async fn reorder_tasks(&self, ids: &[TaskId]) -> Result<(), BackendError> {
        let mut state = self.record(Call::ReorderTasks(ids.to_vec()), "reorder_tasks")?;
        for task in state.tasks.iter_mut() {
            if let Some(index) = ids.iter().position(|id| *id == task.id) {
                task.position = index as i64 + 1;
            }
        }
        Ok(())
    }

    async fn fetch_board_notes(&self) -> Result<Vec<BoardNote>, BackendError> {
        let state = self.record(Call::FetchBoardNotes, "fetch_board_notes")?;
        Ok(state.board.clone())
    }

    async fn create_board_note(&self, payload: &BoardNotePayload) -> Result<(), BackendError> {
        let mut state = self.record(Call::CreateBoardNote(payload.clone()), "create_board_note")?;
        let id = state.next_id;
        state.next_id += 1;
        state.board.push(BoardNote {
            id,
            title: payload.title.clone(),
            content: payload.content.clone(),
            date_created: Some("2024-05-01T10:00:00Z".to_string()),
        });
        Ok(())
    }

    async fn update_board_note(&self, id: BoardNoteId, payload: &BoardNotePayload) -> Result<(), BackendError> {
        let mut state = self.record(Call::UpdateBoardNote(id, payload.clone()), "update_board_note")?;
        if let Some(note) = state.board.iter_mut().find(|n| n.id == id) {
            note.title = payload.title.clone();
            note.content = payload.content.clone();
        }
        Ok(())
    }

    async fn delete_board_note(&self, id: BoardNoteId) -> Result<(), BackendError> {
        let mut state = self.record(Call::DeleteBoardNote(id), "delete_board_note")?;
        state.board.retain(|n| n.id != id);
        Ok(())
    }

    async fn fetch_notes(&self, workspace: WorkspaceId) -> Result<Vec<Note>, BackendError> {
        let state = self.record(Call::FetchNotes(workspace), "fetch_notes")?;
        Ok(state.notes.clone())
    }

    async fn create_note(&self, workspace: WorkspaceId, payload: &NotePayload) -> Result<Note, BackendError> {
        let mut state = self.record(Call::CreateNote(workspace, payload.clone()), "create_note")?;
        let id = state.next_id;
        state.next_id += 1;
        let note = Note {
            id,
            title: payload.title.clone(),
            content: payload.content.clone(),
            updated_at: Some("2024-05-01T10:00:00Z".to_string()),
        };
        state.notes.insert(0, note.clone());
        Ok(note)
    }

    async fn update_note(&self, workspace: WorkspaceId, id: NoteId, payload: &NotePayload) -> Result<(), BackendError> {
        let mut state = self.record(Call::UpdateNote(workspace, id, payload.clone()), "update_note")?;
        if let Some(note) = state.notes.iter_mut().find(|n| n.id == id) {
            note.title = payload.title.clone();
            note.content = payload.content.clone();
        }
        Ok(())
    }

    async fn delete_note(&self, workspace: WorkspaceId, id: NoteId) -> Result<(), BackendError> {
        let mut state = self.record(Call::DeleteNote(workspace, id), "delete_note")?;
        state.notes.retain(|n| n.id != id);
        Ok(())
    }

    async fn fetch_workspaces(&self) -> Result<Vec<Workspace>, BackendError> {
        let state = self.record(Call::FetchWorkspaces, "fetch_workspaces")?;
        Ok(state.workspaces.clone())
    }

    async fn create_workspace(&self) -> Result<(), BackendError> {
        let mut state = self.record(Call::CreateWorkspace, "create_workspace")?;
        let id = state.next_id;
        state.next_id += 1;
        let name = format!("Workspace {}", state.workspaces.len() + 1);
        state.workspaces.push(Workspace { id, name, position: None });
        Ok(())
    }

    async fn rename_workspace(&self, id: WorkspaceId, name: &str) -> Result<(), BackendError> {
        let mut state = self.record(Call::RenameWorkspace(id, name.to_string()), "rename_workspace")?;
        if let Some(ws) = state.workspaces.iter_mut().find(|w| w.id == id) {
            ws.name = name.to_string();
        }
        Ok(())
    }

    async fn delete_workspace(&self, id: WorkspaceId) -> Result<(), BackendError> {
        let mut state = self.record(Call::DeleteWorkspace(id), "delete_workspace")?;
        if let Some(index) = state.workspaces.iter().position(|w| w.id == id) {
            let ws = state.workspaces.remove(index);
            state.trash.push(ws);
        }
        Ok(())
    }

    async fn reorder_workspaces(&self, ids: &[WorkspaceId]) -> Result<(), BackendError> {
        let mut state = self.record(Call::ReorderWorkspaces(ids.to_vec()), "reorder_workspaces")?;
        state
            .workspaces
            .sort_by_key(|w| ids.iter().position(|id| *id == w.id).unwrap_or(usize::MAX));
        Ok(())
    }

    async fn fetch_workspace_trash(&self) -> Result<Vec<Workspace>, BackendError> {
        let state = self.record(Call::FetchTrash, "fetch_workspace_trash")?;
        Ok(state.trash.clone())
    }

    async fn restore_workspace(&self, id: WorkspaceId) -> Result<(), BackendError> {
        let mut state = self.record(Call::RestoreWorkspace(id), "restore_workspace")?;
        if let Some(index) = state.trash.iter().position(|w| w.id == id) {
            let ws = state.trash.remove(index);
            state.workspaces.push(ws);
        }
        Ok(())
    }

    async fn delete_workspace_permanently(&self, id: WorkspaceId) -> Result<(), BackendError> {
        let mut state = self.record(Call::DeleteWorkspaceForever(id), "delete_workspace_permanently")?;
        state.trash.retain(|w| w.id != id);
        Ok(())
    }
}

/// Task with the given id, title, status and manual position
pub fn task(id: TaskId, title: &str, status: TaskStatus, position: i64) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        due_date: None,
        status,
        position,
        created_at: None,
        updated_at: None,
    }
}

pub fn due(mut task: Task, date: &str) -> Task {
    task.due_date = Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap());
    task
}

pub fn created(mut task: Task, timestamp: &str) -> Task {
    task.created_at = Some(timestamp.to_string());
    task
}

pub fn note(id: NoteId, title: &str, content: &str) -> Note {
    Note {
        id,
        title: title.to_string(),
        content: content.to_string(),
        updated_at: None,
    }
}

pub fn board_note(id: BoardNoteId, title: &str, content: &str) -> BoardNote {
    BoardNote {
        id,
        title: title.to_string(),
        content: content.to_string(),
        date_created: None,
    }
}

pub fn workspace(id: WorkspaceId, name: &str) -> Workspace {
    Workspace {
        id,
        name: name.to_string(),
        position: None,
    }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}
