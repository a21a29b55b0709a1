//! Workspace notes editor with debounced and periodic autosave.
//!
//! Time is passed in explicitly: the UI loop calls [`NotesEditor::tick`] with
//! the current instant and the editor decides whether a save is due.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::backend::Backend;
use crate::config::NotesConfig;
use crate::constants::{
    CONFIRM_DELETE_NOTE, ERROR_LOAD_NOTES_FAILED, ERROR_NOTE_CREATE_FAILED, ERROR_NOTE_DELETE_FAILED,
    NOTE_STATE_FAILED, NOTE_STATE_LOADED, NOTE_STATE_SAVED, NOTE_STATE_SAVING, NOTE_STATE_UNSAVED,
};
use crate::controller::Notice;
use crate::entities::note::UNTITLED;
use crate::entities::{Note, NoteId, NotePayload, WorkspaceId};
use crate::utils::datetime;

/// Save indicator shown next to the editor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveState {
    #[default]
    Idle,
    Loaded,
    Unsaved,
    Saving,
    Saved,
    Failed,
}

impl SaveState {
    pub fn label(self) -> &'static str {
        match self {
            SaveState::Idle => "",
            SaveState::Loaded => NOTE_STATE_LOADED,
            SaveState::Unsaved => NOTE_STATE_UNSAVED,
            SaveState::Saving => NOTE_STATE_SAVING,
            SaveState::Saved => NOTE_STATE_SAVED,
            SaveState::Failed => NOTE_STATE_FAILED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing to save, no open note, or a save already in flight
    Skipped,
    Saved,
    Failed,
}

/// Deadlines for the debounced save and the periodic autosave
#[derive(Clone, Debug)]
pub struct AutosaveSchedule {
    interval: Duration,
    debounce: Duration,
    next_autosave: Instant,
    debounce_deadline: Option<Instant>,
}

impl AutosaveSchedule {
    pub fn new(interval: Duration, debounce: Duration, now: Instant) -> Self {
        Self {
            interval,
            debounce,
            next_autosave: now + interval,
            debounce_deadline: None,
        }
    }

    /// Restart the debounce window after an edit
    pub fn touch(&mut self, now: Instant) {
        self.debounce_deadline = Some(now + self.debounce);
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.debounce_deadline.is_some_and(|deadline| now >= deadline) || now >= self.next_autosave
    }

    /// Consume whichever deadlines have passed. Returns whether any had.
    pub fn fire(&mut self, now: Instant) -> bool {
        let mut fired = false;
        if self.debounce_deadline.is_some_and(|deadline| now >= deadline) {
            self.debounce_deadline = None;
            fired = true;
        }
        if now >= self.next_autosave {
            self.next_autosave = now + self.interval;
            fired = true;
        }
        fired
    }

    pub fn cancel_debounce(&mut self) {
        self.debounce_deadline = None;
    }
}

/// One entry of the note list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteRow {
    pub id: NoteId,
    pub title: String,
    pub updated: String,
    pub active: bool,
}

pub struct NotesEditor {
    backend: Arc<dyn Backend>,
    workspace: WorkspaceId,
    notes: Vec<Note>,
    current: Option<NoteId>,
    title: String,
    body: String,
    dirty: bool,
    saving: bool,
    state: SaveState,
    schedule: AutosaveSchedule,
    load_error: Option<String>,
    confirm_delete: bool,
    notice: Option<Notice>,
}

impl NotesEditor {
    pub fn new(backend: Arc<dyn Backend>, workspace: WorkspaceId, config: &NotesConfig) -> Self {
        Self::with_schedule(
            backend,
            workspace,
            AutosaveSchedule::new(config.autosave_interval(), config.save_debounce(), Instant::now()),
        )
    }

    pub fn with_schedule(backend: Arc<dyn Backend>, workspace: WorkspaceId, schedule: AutosaveSchedule) -> Self {
        Self {
            backend,
            workspace,
            notes: Vec::new(),
            current: None,
            title: String::new(),
            body: String::new(),
            dirty: false,
            saving: false,
            state: SaveState::Idle,
            schedule,
            load_error: None,
            confirm_delete: false,
            notice: None,
        }
    }

    pub fn workspace(&self) -> WorkspaceId {
        self.workspace
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn current(&self) -> Option<NoteId> {
        self.current
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn rows(&self) -> Vec<NoteRow> {
        self.notes
            .iter()
            .map(|note| NoteRow {
                id: note.id,
                title: note.display_title().to_string(),
                updated: note.updated_at.as_deref().map(datetime::format_timestamp).unwrap_or_default(),
                active: self.current == Some(note.id),
            })
            .collect()
    }

    /// Fetch the workspace's notes and open the first one if none is open
    pub async fn load(&mut self) -> bool {
        match self.backend.fetch_notes(self.workspace).await {
            Ok(notes) => {
                log::info!("Loaded {} notes for workspace {}", notes.len(), self.workspace);
                self.notes = notes;
                self.load_error = None;
                if let Some(id) = self.current {
                    if !self.notes.iter().any(|note| note.id == id) {
                        self.close();
                    }
                }
                if self.current.is_none() {
                    if let Some(first) = self.notes.first().map(|note| note.id) {
                        self.open(first);
                    }
                }
                true
            }
            Err(e) => {
                log::error!("{}: {}", ERROR_LOAD_NOTES_FAILED, e);
                self.load_error = Some(format!("{}: {}", ERROR_LOAD_NOTES_FAILED, e));
                false
            }
        }
    }

    /// Load a note into the editor. Unsaved edits to the previous note are discarded.
    pub fn open(&mut self, id: NoteId) -> bool {
        let Some(note) = self.notes.iter().find(|note| note.id == id) else {
            return false;
        };
        self.title = note.title.clone();
        self.body = note.content.clone();
        self.current = Some(id);
        self.dirty = false;
        self.confirm_delete = false;
        self.schedule.cancel_debounce();
        self.state = SaveState::Loaded;
        true
    }

    fn close(&mut self) {
        self.current = None;
        self.title.clear();
        self.body.clear();
        self.dirty = false;
        self.schedule.cancel_debounce();
        self.state = SaveState::Idle;
    }

    /// Replace the title buffer. Ignored while no note is open.
    pub fn set_title(&mut self, title: impl Into<String>, now: Instant) {
        if self.current.is_none() {
            return;
        }
        self.title = title.into();
        self.mark_dirty(now);
    }

    /// Replace the body buffer. Ignored while no note is open.
    pub fn set_body(&mut self, body: impl Into<String>, now: Instant) {
        if self.current.is_none() {
            return;
        }
        self.body = body.into();
        self.mark_dirty(now);
    }

    fn mark_dirty(&mut self, now: Instant) {
        self.dirty = true;
        self.state = SaveState::Unsaved;
        self.schedule.touch(now);
    }

    /// Save the open note if it has unsaved changes
    pub async fn save_now(&mut self) -> SaveOutcome {
        let Some(id) = self.current else {
            return SaveOutcome::Skipped;
        };
        if !self.dirty || self.saving {
            return SaveOutcome::Skipped;
        }

        self.saving = true;
        self.state = SaveState::Saving;
        let payload = NotePayload::from_buffer(&self.title, &self.body);
        let result = self.backend.update_note(self.workspace, id, &payload).await;
        self.saving = false;

        match result {
            Ok(()) => {
                log::debug!("Saved note {}", id);
                if let Some(note) = self.notes.iter_mut().find(|note| note.id == id) {
                    note.title = payload.title;
                    note.content = payload.content;
                    note.updated_at = Some(chrono::Utc::now().to_rfc3339());
                }
                self.dirty = false;
                self.state = SaveState::Saved;
                SaveOutcome::Saved
            }
            Err(e) => {
                log::error!("Failed to save note {}: {}", id, e);
                self.state = SaveState::Failed;
                SaveOutcome::Failed
            }
        }
    }

    /// Run a save when the debounce window or autosave interval has elapsed
    pub async fn tick(&mut self, now: Instant) -> SaveOutcome {
        if !self.schedule.fire(now) {
            return SaveOutcome::Skipped;
        }
        self.save_now().await
    }

    /// Create an "Untitled" note at the top of the list and open it.
    /// Unsaved edits to the open note are saved first.
    pub async fn create(&mut self) -> bool {
        if self.dirty {
            self.save_now().await;
        }

        let payload = NotePayload {
            title: UNTITLED.to_string(),
            content: String::new(),
        };
        match self.backend.create_note(self.workspace, &payload).await {
            Ok(note) => {
                log::info!("Created note {}", note.id);
                let id = note.id;
                self.notes.insert(0, note);
                self.open(id)
            }
            Err(e) => {
                self.notice = Some(Notice::failure(ERROR_NOTE_CREATE_FAILED, &e));
                false
            }
        }
    }

    /// Ask to delete the open note
    pub fn request_delete(&mut self) -> bool {
        self.confirm_delete = self.current.is_some();
        self.confirm_delete
    }

    pub fn delete_prompt(&self) -> Option<&'static str> {
        self.confirm_delete.then_some(CONFIRM_DELETE_NOTE)
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    /// Delete the open note after confirmation and open the first remaining one
    pub async fn confirm_delete(&mut self) -> bool {
        if !std::mem::take(&mut self.confirm_delete) {
            return false;
        }
        let Some(id) = self.current else {
            return false;
        };

        match self.backend.delete_note(self.workspace, id).await {
            Ok(()) => {
                log::info!("Deleted note {}", id);
                self.notes.retain(|note| note.id != id);
                self.close();
                if let Some(first) = self.notes.first().map(|note| note.id) {
                    self.open(first);
                }
                true
            }
            Err(e) => {
                self.notice = Some(Notice::failure(ERROR_NOTE_DELETE_FAILED, &e));
                false
            }
        }
    }
}
