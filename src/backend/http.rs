//! REST implementation of [`Backend`] using `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{Backend, BackendError, IdList, RenameWorkspace};
use crate::config::ApiConfig;
use crate::entities::{
    BoardNote, BoardNoteId, BoardNotePayload, Note, NoteId, NotePayload, Task, TaskId, TaskPayload, Workspace,
    WorkspaceId,
};

/// Header carrying the cross-site request forgery token on mutating requests
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Structured error body returned by the API on failure
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP client for the productivity app API.
pub struct HttpBackend {
    http: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, csrf_token: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf_token,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        let csrf_token = config.resolve_csrf_token();
        if csrf_token.is_none() {
            log::warn!("No CSRF token configured; mutating requests will be sent without {}", CSRF_HEADER);
        }
        Self::new(config.base_url.clone(), csrf_token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the CSRF token to a mutating request
    fn mutating(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.csrf_token {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        }
    }

    /// Send a request and turn non-success statuses into [`BackendError::Http`]
    async fn send(builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body
            .message
            .or(body.error)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

        log::error!("{} -> {}: {}", status.as_u16(), message, text);
        Err(BackendError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidData(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        log::debug!("GET {}", path);
        let response = Self::send(self.http.get(self.url(path))).await?;
        Self::read_json(response).await
    }

    async fn post_ids(&self, path: &str, ids: &[i64]) -> Result<(), BackendError> {
        log::debug!("POST {} ({} ids)", path, ids.len());
        let body = IdList { ids: ids.to_vec() };
        Self::send(self.mutating(self.http.post(self.url(path)).json(&body))).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), BackendError> {
        log::debug!("DELETE {}", path);
        Self::send(self.mutating(self.http.delete(self.url(path)))).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, BackendError> {
        self.get_json("/api/tasks").await
    }

    async fn create_task(&self, payload: &TaskPayload) -> Result<Task, BackendError> {
        log::debug!("POST /api/tasks");
        let request = self.mutating(self.http.post(self.url("/api/tasks")).json(payload));
        Self::read_json(Self::send(request).await?).await
    }

    async fn update_task(&self, id: TaskId, payload: &TaskPayload) -> Result<Task, BackendError> {
        let path = format!("/api/tasks/{}", id);
        log::debug!("PUT {}", path);
        let request = self.mutating(self.http.put(self.url(&path)).json(payload));
        Self::read_json(Self::send(request).await?).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), BackendError> {
        self.delete(&format!("/api/tasks/{}", id)).await
    }

    async fn bulk_delete_tasks(&self, ids: &[TaskId]) -> Result<(), BackendError> {
        self.post_ids("/api/tasks/bulk_delete", ids).await
    }

    async fn reorder_tasks(&self, ids: &[TaskId]) -> Result<(), BackendError> {
        self.post_ids("/api/tasks/reorder", ids).await
    }

    async fn fetch_board_notes(&self) -> Result<Vec<BoardNote>, BackendError> {
        self.get_json("/api/notes").await
    }

    async fn create_board_note(&self, payload: &BoardNotePayload) -> Result<(), BackendError> {
        log::debug!("POST /api/notes");
        Self::send(self.mutating(self.http.post(self.url("/api/notes")).json(payload))).await?;
        Ok(())
    }

    async fn update_board_note(&self, id: BoardNoteId, payload: &BoardNotePayload) -> Result<(), BackendError> {
        let path = format!("/api/notes/{}", id);
        log::debug!("PUT {}", path);
        Self::send(self.mutating(self.http.put(self.url(&path)).json(payload))).await?;
        Ok(())
    }

    async fn delete_board_note(&self, id: BoardNoteId) -> Result<(), BackendError> {
        self.delete(&format!("/api/notes/{}", id)).await
    }

    async fn fetch_notes(&self, workspace: WorkspaceId) -> Result<Vec<Note>, BackendError> {
        self.get_json(&format!("/api/workspaces/{}/notes", workspace)).await
    }

    async fn create_note(&self, workspace: WorkspaceId, payload: &NotePayload) -> Result<Note, BackendError> {
        let path = format!("/api/workspaces/{}/notes", workspace);
        log::debug!("POST {}", path);
        let request = self.mutating(self.http.post(self.url(&path)).json(payload));
        Self::read_json(Self::send(request).await?).await
    }

    async fn update_note(&self, workspace: WorkspaceId, id: NoteId, payload: &NotePayload) -> Result<(), BackendError> {
        let path = format!("/api/workspaces/{}/notes/{}", workspace, id);
        log::debug!("PUT {}", path);
        Self::send(self.mutating(self.http.put(self.url(&path)).json(payload))).await?;
        Ok(())
    }

    async fn delete_note(&self, workspace: WorkspaceId, id: NoteId) -> Result<(), BackendError> {
        self.delete(&format!("/api/workspaces/{}/notes/{}", workspace, id)).await
    }

    async fn fetch_workspaces(&self) -> Result<Vec<Workspace>, BackendError> {
        self.get_json("/api/workspaces").await
    }

    async fn create_workspace(&self) -> Result<(), BackendError> {
        log::debug!("POST /api/workspaces");
        let request = self.mutating(self.http.post(self.url("/api/workspaces")).json(&serde_json::json!({})));
        Self::send(request).await?;
        Ok(())
    }

    async fn rename_workspace(&self, id: WorkspaceId, name: &str) -> Result<(), BackendError> {
        let path = format!("/api/workspaces/{}", id);
        log::debug!("PUT {}", path);
        let body = RenameWorkspace { name: name.to_string() };
        Self::send(self.mutating(self.http.put(self.url(&path)).json(&body))).await?;
        Ok(())
    }

    async fn delete_workspace(&self, id: WorkspaceId) -> Result<(), BackendError> {
        self.delete(&format!("/api/workspaces/{}", id)).await
    }

    async fn reorder_workspaces(&self, ids: &[WorkspaceId]) -> Result<(), BackendError> {
        self.post_ids("/api/workspaces/reorder", ids).await
    }

    async fn fetch_workspace_trash(&self) -> Result<Vec<Workspace>, BackendError> {
        self.get_json("/api/trash/workspaces").await
    }

    async fn restore_workspace(&self, id: WorkspaceId) -> Result<(), BackendError> {
        let path = format!("/api/workspaces/{}/restore", id);
        log::debug!("POST {}", path);
        Self::send(self.mutating(self.http.post(self.url(&path)))).await?;
        Ok(())
    }

    async fn delete_workspace_permanently(&self, id: WorkspaceId) -> Result<(), BackendError> {
        self.delete(&format!("/api/workspaces/{}/permanent", id)).await
    }
}
