//! Notes board controller.
//!
//! Standalone notes shown as cards, created and edited through a modal form
//! and deleted after a confirmation. Like the task list, every successful
//! change is followed by a full reload.

use std::sync::Arc;

use crate::backend::Backend;
use crate::constants::{
    CONFIRM_DELETE_BOARD_NOTE, ERROR_BOARD_NOTE_DELETE_FAILED, ERROR_BOARD_NOTE_SAVE_FAILED, ERROR_LOAD_BOARD_FAILED,
    ERROR_TITLE_REQUIRED, SUCCESS_NOTE_DELETED, SUCCESS_NOTE_SAVED, TITLE_EDIT_NOTE, TITLE_NEW_NOTE,
};
use crate::controller::{Notice, SubmitOutcome};
use crate::entities::{BoardNote, BoardNoteId, BoardNotePayload};
use crate::utils::datetime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoardField {
    #[default]
    Title,
    Content,
}

/// Modal form for a board note. `note_id` is set when editing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardNoteForm {
    pub note_id: Option<BoardNoteId>,
    pub title: String,
    pub content: String,
    pub focus: BoardField,
    pub title_error: Option<String>,
    /// Inline error from the last failed request
    pub error: Option<String>,
}

impl BoardNoteForm {
    pub fn for_create() -> Self {
        Self::default()
    }

    pub fn for_edit(note: &BoardNote) -> Self {
        Self {
            note_id: Some(note.id),
            title: note.title.clone(),
            content: note.content.clone(),
            ..Self::default()
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.note_id.is_some() {
            TITLE_EDIT_NOTE
        } else {
            TITLE_NEW_NOTE
        }
    }

    pub fn validate(&mut self) -> Option<BoardNotePayload> {
        let title = self.title.trim();
        if title.is_empty() {
            self.title_error = Some(ERROR_TITLE_REQUIRED.to_string());
            self.focus = BoardField::Title;
            return None;
        }
        self.title_error = None;
        Some(BoardNotePayload {
            title: title.to_string(),
            content: self.content.clone(),
        })
    }

    fn focused_text(&mut self) -> &mut String {
        match self.focus {
            BoardField::Title => &mut self.title,
            BoardField::Content => &mut self.content,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_text().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused_text().pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            BoardField::Title => BoardField::Content,
            BoardField::Content => BoardField::Title,
        };
    }
}

/// One rendered card
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteCard {
    pub id: BoardNoteId,
    pub title: String,
    pub content: String,
    /// Creation time in local time, empty when the server sent none
    pub created: String,
}

pub struct NoteBoard {
    backend: Arc<dyn Backend>,
    notes: Vec<BoardNote>,
    load_error: Option<String>,
    form: Option<BoardNoteForm>,
    pending_delete: Option<BoardNoteId>,
    notice: Option<Notice>,
}

impl NoteBoard {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            notes: Vec::new(),
            load_error: None,
            form: None,
            pending_delete: None,
            notice: None,
        }
    }

    pub fn notes(&self) -> &[BoardNote] {
        &self.notes
    }

    pub fn note(&self, id: BoardNoteId) -> Option<&BoardNote> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn form(&self) -> Option<&BoardNoteForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut BoardNoteForm> {
        self.form.as_mut()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn cards(&self) -> Vec<NoteCard> {
        self.notes
            .iter()
            .map(|note| NoteCard {
                id: note.id,
                title: note.title.clone(),
                content: note.content.clone(),
                created: note
                    .date_created
                    .as_deref()
                    .map(datetime::format_timestamp)
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Replace the cards with the server's list. On failure the board shows
    /// an inline error instead of the cards.
    pub async fn load(&mut self) -> bool {
        match self.backend.fetch_board_notes().await {
            Ok(notes) => {
                log::info!("Loaded {} board notes", notes.len());
                self.notes = notes;
                self.load_error = None;
                true
            }
            Err(e) => {
                log::error!("{}: {}", ERROR_LOAD_BOARD_FAILED, e);
                self.notes.clear();
                self.load_error = Some(format!("{}: {}", ERROR_LOAD_BOARD_FAILED, e));
                false
            }
        }
    }

    pub fn on_create(&mut self) {
        self.pending_delete = None;
        self.form = Some(BoardNoteForm::for_create());
    }

    pub fn on_edit(&mut self, id: BoardNoteId) -> bool {
        let Some(note) = self.note(id) else {
            log::warn!("Edit requested for unknown board note {}", id);
            return false;
        };
        let form = BoardNoteForm::for_edit(note);
        self.pending_delete = None;
        self.form = Some(form);
        true
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// POST a new note or PUT the edited one, then reload
    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let Some(form) = self.form.as_mut() else {
            return SubmitOutcome::NoForm;
        };
        let Some(payload) = form.validate() else {
            return SubmitOutcome::Invalid;
        };
        let note_id = form.note_id;

        let result = match note_id {
            Some(id) => self.backend.update_board_note(id, &payload).await,
            None => self.backend.create_board_note(&payload).await,
        };

        match result {
            Ok(()) => {
                log::info!("Saved board note {:?}", note_id);
                self.form = None;
                self.notice = Some(Notice::success(SUCCESS_NOTE_SAVED));
                self.load().await;
                SubmitOutcome::Saved
            }
            Err(e) => {
                let notice = Notice::failure(ERROR_BOARD_NOTE_SAVE_FAILED, &e);
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(notice.message);
                }
                SubmitOutcome::Failed
            }
        }
    }

    /// Ask before deleting `id`. Returns false for an unknown id.
    pub fn request_delete(&mut self, id: BoardNoteId) -> bool {
        if self.note(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn delete_prompt(&self) -> Option<&'static str> {
        self.pending_delete.map(|_| CONFIRM_DELETE_BOARD_NOTE)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };
        match self.backend.delete_board_note(id).await {
            Ok(()) => {
                log::info!("Deleted board note {}", id);
                self.notice = Some(Notice::success(SUCCESS_NOTE_DELETED));
                self.load().await;
                true
            }
            Err(e) => {
                self.notice = Some(Notice::failure(ERROR_BOARD_NOTE_DELETE_FAILED, &e));
                false
            }
        }
    }
}
