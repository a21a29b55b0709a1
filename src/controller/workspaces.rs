//! Workspace sidebar: list, rename, reorder, trash and restore.

use std::sync::Arc;

use crate::backend::Backend;
use crate::constants::{
    CONFIRM_DELETE_WORKSPACE, CONFIRM_DELETE_WORKSPACE_FOREVER, ERROR_LOAD_TRASH_FAILED, ERROR_LOAD_WORKSPACES_FAILED,
    ERROR_NAME_REQUIRED, ERROR_WORKSPACE_CREATE_FAILED, ERROR_WORKSPACE_DELETE_FAILED, ERROR_WORKSPACE_RENAME_FAILED,
    ERROR_WORKSPACE_REORDER_FAILED, ERROR_WORKSPACE_RESTORE_FAILED, SUCCESS_WORKSPACE_DELETED,
    SUCCESS_WORKSPACE_RENAMED, SUCCESS_WORKSPACE_RESTORED,
};
use crate::controller::Notice;
use crate::entities::{Workspace, WorkspaceId};

/// Destructive workspace action waiting for confirmation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkspaceConfirmation {
    /// Soft delete to trash
    Delete(WorkspaceId),
    /// Remove from trash for good
    DeleteForever(WorkspaceId),
}

impl WorkspaceConfirmation {
    pub fn prompt(self) -> &'static str {
        match self {
            WorkspaceConfirmation::Delete(_) => CONFIRM_DELETE_WORKSPACE,
            WorkspaceConfirmation::DeleteForever(_) => CONFIRM_DELETE_WORKSPACE_FOREVER,
        }
    }
}

/// Rename form state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameForm {
    pub id: WorkspaceId,
    pub name: String,
    pub error: Option<String>,
}

pub struct WorkspaceList {
    backend: Arc<dyn Backend>,
    workspaces: Vec<Workspace>,
    trash: Vec<Workspace>,
    load_error: Option<String>,
    trash_error: Option<String>,
    rename: Option<RenameForm>,
    confirmation: Option<WorkspaceConfirmation>,
    notice: Option<Notice>,
}

impl WorkspaceList {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            workspaces: Vec::new(),
            trash: Vec::new(),
            load_error: None,
            trash_error: None,
            rename: None,
            confirmation: None,
            notice: None,
        }
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn trash(&self) -> &[Workspace] {
        &self.trash
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn trash_error(&self) -> Option<&str> {
        self.trash_error.as_deref()
    }

    pub fn rename_form(&self) -> Option<&RenameForm> {
        self.rename.as_ref()
    }

    pub fn rename_form_mut(&mut self) -> Option<&mut RenameForm> {
        self.rename.as_mut()
    }

    pub fn confirmation(&self) -> Option<WorkspaceConfirmation> {
        self.confirmation
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub async fn load(&mut self) -> bool {
        match self.backend.fetch_workspaces().await {
            Ok(workspaces) => {
                log::info!("Loaded {} workspaces", workspaces.len());
                self.workspaces = workspaces;
                self.load_error = None;
                true
            }
            Err(e) => {
                log::error!("{}: {}", ERROR_LOAD_WORKSPACES_FAILED, e);
                self.load_error = Some(format!("{}: {}", ERROR_LOAD_WORKSPACES_FAILED, e));
                false
            }
        }
    }

    pub async fn load_trash(&mut self) -> bool {
        match self.backend.fetch_workspace_trash().await {
            Ok(trash) => {
                self.trash = trash;
                self.trash_error = None;
                true
            }
            Err(e) => {
                log::error!("{}: {}", ERROR_LOAD_TRASH_FAILED, e);
                self.trash_error = Some(format!("{}: {}", ERROR_LOAD_TRASH_FAILED, e));
                false
            }
        }
    }

    /// Create a workspace with the server's default name
    pub async fn create(&mut self) -> bool {
        match self.backend.create_workspace().await {
            Ok(()) => {
                self.load().await;
                true
            }
            Err(e) => {
                self.notice = Some(Notice::failure(ERROR_WORKSPACE_CREATE_FAILED, &e));
                false
            }
        }
    }

    /// Open the rename form pre-filled with the current name
    pub fn begin_rename(&mut self, id: WorkspaceId) -> bool {
        let Some(workspace) = self.workspaces.iter().find(|ws| ws.id == id) else {
            return false;
        };
        self.rename = Some(RenameForm {
            id,
            name: workspace.name.clone(),
            error: None,
        });
        true
    }

    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    /// Send the rename. An empty name is rejected without a request.
    pub async fn submit_rename(&mut self) -> bool {
        let Some(form) = self.rename.as_mut() else {
            return false;
        };
        let name = form.name.trim().to_string();
        if name.is_empty() {
            form.error = Some(ERROR_NAME_REQUIRED.to_string());
            return false;
        }
        let id = form.id;

        match self.backend.rename_workspace(id, &name).await {
            Ok(()) => {
                self.rename = None;
                self.notice = Some(Notice::success(SUCCESS_WORKSPACE_RENAMED));
                self.load().await;
                true
            }
            Err(e) => {
                let notice = Notice::failure(ERROR_WORKSPACE_RENAME_FAILED, &e);
                if let Some(form) = self.rename.as_mut() {
                    form.error = Some(notice.message);
                }
                false
            }
        }
    }

    pub fn request_delete(&mut self, id: WorkspaceId) -> bool {
        if !self.workspaces.iter().any(|ws| ws.id == id) {
            return false;
        }
        self.confirmation = Some(WorkspaceConfirmation::Delete(id));
        true
    }

    pub fn request_delete_forever(&mut self, id: WorkspaceId) -> bool {
        if !self.trash.iter().any(|ws| ws.id == id) {
            return false;
        }
        self.confirmation = Some(WorkspaceConfirmation::DeleteForever(id));
        true
    }

    pub fn cancel_confirmation(&mut self) {
        self.confirmation = None;
    }

    /// Carry out the pending delete
    pub async fn confirm(&mut self) -> bool {
        match self.confirmation.take() {
            Some(WorkspaceConfirmation::Delete(id)) => match self.backend.delete_workspace(id).await {
                Ok(()) => {
                    log::info!("Moved workspace {} to trash", id);
                    self.notice = Some(Notice::success(SUCCESS_WORKSPACE_DELETED));
                    self.load().await;
                    true
                }
                Err(e) => {
                    self.notice = Some(Notice::failure(ERROR_WORKSPACE_DELETE_FAILED, &e));
                    false
                }
            },
            Some(WorkspaceConfirmation::DeleteForever(id)) => {
                match self.backend.delete_workspace_permanently(id).await {
                    Ok(()) => {
                        log::info!("Permanently deleted workspace {}", id);
                        self.load_trash().await;
                        true
                    }
                    Err(e) => {
                        self.notice = Some(Notice::failure(ERROR_WORKSPACE_DELETE_FAILED, &e));
                        false
                    }
                }
            }
            None => false,
        }
    }

    /// Persist a new sidebar order. `ids` must be a permutation of the loaded workspaces.
    pub async fn reorder(&mut self, ids: &[WorkspaceId]) -> bool {
        let mut expected: Vec<WorkspaceId> = self.workspaces.iter().map(|ws| ws.id).collect();
        if expected.is_empty() || expected == ids {
            return false;
        }
        expected.sort_unstable();
        let mut given = ids.to_vec();
        given.sort_unstable();
        if expected != given {
            log::warn!("Workspace reorder ignored: {:?} does not match the list", ids);
            return false;
        }

        match self.backend.reorder_workspaces(ids).await {
            Ok(()) => {
                self.load().await;
                true
            }
            Err(e) => {
                self.notice = Some(Notice::failure(ERROR_WORKSPACE_REORDER_FAILED, &e));
                false
            }
        }
    }

    /// Bring a workspace back from trash; both lists are reloaded
    pub async fn restore(&mut self, id: WorkspaceId) -> bool {
        match self.backend.restore_workspace(id).await {
            Ok(()) => {
                self.notice = Some(Notice::success(SUCCESS_WORKSPACE_RESTORED));
                self.load_trash().await;
                self.load().await;
                true
            }
            Err(e) => {
                self.notice = Some(Notice::failure(ERROR_WORKSPACE_RESTORE_FAILED, &e));
                false
            }
        }
    }
}
