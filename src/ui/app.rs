//! Application state shared by the renderer and the event handlers

use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::widgets::ListState;

use crate::backend::Backend;
use crate::config::{Config, NotesConfig};
use crate::controller::workspaces::WorkspaceConfirmation;
use crate::controller::{ListBody, NoteBoard, Notice, NotesEditor, TaskListController, WorkspaceList};
use crate::entities::{BoardNoteId, TaskId, WorkspaceId};
use crate::logger::Logger;

/// Top-level screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Tasks,
    Workspaces,
    Notes,
    Board,
}

/// Which part of the notes screen receives keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteFocus {
    List,
    Title,
    Body,
}

/// Application state
pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub tasks: TaskListController,
    pub workspaces: WorkspaceList,
    pub notes: Option<NotesEditor>,
    pub board: NoteBoard,
    pub task_list_state: ListState,
    pub workspace_list_state: ListState,
    pub note_list_state: ListState,
    pub board_list_state: ListState,
    pub note_focus: NoteFocus,
    pub show_trash: bool,
    pub show_help: bool,
    pub show_logs: bool,
    pub notice: Option<Notice>,
    pub logger: Logger,
    pub mouse_enabled: bool,
    /// Body area of the last frame, used to map clicks to list rows
    pub list_area: Rect,
    backend: Arc<dyn Backend>,
    notes_config: NotesConfig,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, config: &Config, logger: Logger) -> Self {
        let mut task_list_state = ListState::default();
        task_list_state.select(Some(0));

        Self {
            should_quit: false,
            screen: Screen::Tasks,
            tasks: TaskListController::with_view(Arc::clone(&backend), config.ui.default_filter, config.ui.default_sort),
            workspaces: WorkspaceList::new(Arc::clone(&backend)),
            notes: None,
            board: NoteBoard::new(Arc::clone(&backend)),
            task_list_state,
            workspace_list_state: ListState::default(),
            note_list_state: ListState::default(),
            board_list_state: ListState::default(),
            note_focus: NoteFocus::List,
            show_trash: false,
            show_help: false,
            show_logs: false,
            notice: None,
            logger,
            mouse_enabled: config.ui.mouse_enabled,
            list_area: Rect::default(),
            backend,
            notes_config: config.notes.clone(),
        }
    }

    /// Initial load of tasks, workspaces and the notes board, plus the
    /// configured notes workspace
    pub async fn init(&mut self) {
        self.tasks.load().await;
        self.workspaces.load().await;
        self.board.load().await;
        self.clamp_cursors();
        if let Some(workspace) = self.notes_config.workspace_id {
            self.open_workspace(workspace).await;
            self.screen = Screen::Tasks;
        }
    }

    /// Move notices from the controllers into the status bar
    pub fn collect_notices(&mut self) {
        let notices = [
            self.tasks.take_notice(),
            self.workspaces.take_notice(),
            self.board.take_notice(),
            self.notes.as_mut().and_then(NotesEditor::take_notice),
        ];
        for notice in notices.into_iter().flatten() {
            self.logger.log(notice.message.clone());
            self.notice = Some(notice);
        }
    }

    /// Background work driven by the UI loop
    pub async fn tick(&mut self, now: Instant) {
        if let Some(notes) = self.notes.as_mut() {
            notes.tick(now).await;
        }
    }

    // Task list

    pub fn task_cursor(&self) -> usize {
        self.task_list_state.selected().unwrap_or(0)
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.tasks.display_ids().get(self.task_cursor()).copied()
    }

    pub fn move_task_cursor(&mut self, delta: isize) {
        let len = self.tasks.display_ids().len();
        let next = step(self.task_cursor(), delta, len);
        self.task_list_state.select(Some(next));
    }

    /// Highlight the task drawn `line` lines below the top border of the list.
    /// Rows with a description take two lines.
    pub fn select_task_at_line(&mut self, line: usize) -> bool {
        let ListBody::Rows(rows) = self.tasks.view().body else {
            return false;
        };
        let mut top = 0;
        for (index, row) in rows.iter().enumerate().skip(self.task_list_state.offset()) {
            let height = if row.description.is_some() { 2 } else { 1 };
            if line < top + height {
                self.task_list_state.select(Some(index));
                return true;
            }
            top += height;
        }
        false
    }

    /// Move the highlighted row by `delta` places and persist the new order.
    /// Only has an effect under the manual sort.
    pub async fn move_task(&mut self, delta: isize) {
        if !self.tasks.reorder_enabled() {
            return;
        }
        let mut order = self.tasks.display_ids();
        let from = self.task_cursor();
        if from >= order.len() {
            return;
        }
        let to = step(from, delta, order.len());
        if to == from {
            return;
        }
        let id = order.remove(from);
        order.insert(to, id);
        if self.tasks.on_reorder(&order).await {
            if let Some(index) = self.tasks.display_ids().iter().position(|task| *task == id) {
                self.task_list_state.select(Some(index));
            }
        }
    }

    // Workspaces

    pub fn workspace_cursor(&self) -> usize {
        self.workspace_list_state.selected().unwrap_or(0)
    }

    pub fn workspace_len(&self) -> usize {
        if self.show_trash {
            self.workspaces.trash().len()
        } else {
            self.workspaces.workspaces().len()
        }
    }

    pub fn selected_workspace_id(&self) -> Option<WorkspaceId> {
        let list = if self.show_trash {
            self.workspaces.trash()
        } else {
            self.workspaces.workspaces()
        };
        list.get(self.workspace_cursor()).map(|ws| ws.id)
    }

    pub fn move_workspace_cursor(&mut self, delta: isize) {
        let next = step(self.workspace_cursor(), delta, self.workspace_len());
        self.workspace_list_state.select(Some(next));
    }

    pub fn select_workspace_at_line(&mut self, line: usize) -> bool {
        let index = self.workspace_list_state.offset() + line;
        if index >= self.workspace_len() {
            return false;
        }
        self.workspace_list_state.select(Some(index));
        true
    }

    pub async fn move_workspace(&mut self, delta: isize) {
        if self.show_trash {
            return;
        }
        let mut order: Vec<WorkspaceId> = self.workspaces.workspaces().iter().map(|ws| ws.id).collect();
        let from = self.workspace_cursor();
        if from >= order.len() {
            return;
        }
        let to = step(from, delta, order.len());
        if to == from {
            return;
        }
        let id = order.remove(from);
        order.insert(to, id);
        if self.workspaces.reorder(&order).await {
            self.workspace_list_state.select(Some(to));
        }
    }

    pub async fn toggle_trash(&mut self) {
        self.show_trash = !self.show_trash;
        if self.show_trash {
            self.workspaces.load_trash().await;
        }
        self.workspace_list_state.select(Some(0));
    }

    /// Carry out the pending workspace confirmation. Notes of a workspace
    /// moved to trash are flushed and closed.
    pub async fn confirm_workspace_action(&mut self) {
        let trashing = match self.workspaces.confirmation() {
            Some(WorkspaceConfirmation::Delete(id)) => Some(id),
            _ => None,
        };
        let open_notes = self.notes.as_ref().map(NotesEditor::workspace);
        if trashing.is_some() && trashing == open_notes {
            if let Some(notes) = self.notes.as_mut() {
                notes.save_now().await;
            }
        }

        if self.workspaces.confirm().await && trashing.is_some() && trashing == open_notes {
            log::info!("Closing notes of trashed workspace {:?}", trashing);
            self.collect_notices();
            self.notes = None;
            if self.screen == Screen::Notes {
                self.screen = Screen::Workspaces;
            }
        }
        self.clamp_cursors();
    }

    /// Switch to the notes screen for `workspace`
    pub async fn open_workspace(&mut self, workspace: WorkspaceId) {
        let reuse = self.notes.as_ref().is_some_and(|notes| notes.workspace() == workspace);
        if !reuse {
            if let Some(previous) = self.notes.as_mut() {
                previous.save_now().await;
            }
            self.notes = Some(NotesEditor::new(Arc::clone(&self.backend), workspace, &self.notes_config));
        }
        if let Some(notes) = self.notes.as_mut() {
            notes.load().await;
        }
        self.note_focus = NoteFocus::List;
        self.sync_note_cursor();
        self.screen = Screen::Notes;
    }

    // Notes board

    pub fn move_board_cursor(&mut self, delta: isize) {
        let len = self.board.notes().len();
        let current = self.board_list_state.selected().unwrap_or(0);
        self.board_list_state.select(Some(step(current, delta, len)));
    }

    pub fn highlighted_board_note(&self) -> Option<BoardNoteId> {
        self.board
            .notes()
            .get(self.board_list_state.selected().unwrap_or(0))
            .map(|note| note.id)
    }

    // Notes

    pub fn move_note_cursor(&mut self, delta: isize) {
        let len = self.notes.as_ref().map_or(0, |notes| notes.notes().len());
        let current = self.note_list_state.selected().unwrap_or(0);
        self.note_list_state.select(Some(step(current, delta, len)));
    }

    pub fn highlighted_note(&self) -> Option<crate::entities::NoteId> {
        let notes = self.notes.as_ref()?;
        notes.notes().get(self.note_list_state.selected().unwrap_or(0)).map(|note| note.id)
    }

    /// Point the note cursor at the open note
    pub fn sync_note_cursor(&mut self) {
        let index = self.notes.as_ref().and_then(|notes| {
            let current = notes.current()?;
            notes.notes().iter().position(|note| note.id == current)
        });
        self.note_list_state.select(Some(index.unwrap_or(0)));
    }

    /// Whether a dialog currently covers the list
    pub fn has_overlay(&self) -> bool {
        if self.show_help || self.show_logs {
            return true;
        }
        match self.screen {
            Screen::Tasks => self.tasks.form().is_some() || self.tasks.confirmation().is_some(),
            Screen::Workspaces => self.workspaces.rename_form().is_some() || self.workspaces.confirmation().is_some(),
            Screen::Notes => self.notes.as_ref().is_some_and(|notes| notes.delete_prompt().is_some()),
            Screen::Board => self.board.form().is_some() || self.board.delete_prompt().is_some(),
        }
    }

    /// Keep list cursors inside their lists after a reload
    pub fn clamp_cursors(&mut self) {
        let tasks = self.tasks.display_ids().len();
        self.task_list_state.select(Some(self.task_cursor().min(tasks.saturating_sub(1))));
        let workspaces = self.workspace_len();
        self.workspace_list_state
            .select(Some(self.workspace_cursor().min(workspaces.saturating_sub(1))));
        let board = self.board.notes().len();
        let board_cursor = self.board_list_state.selected().unwrap_or(0);
        self.board_list_state.select(Some(board_cursor.min(board.saturating_sub(1))));
    }
}

/// Cursor arithmetic clamped to `0..len`
fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}
