pub mod board_note;
pub mod note;
pub mod task;
pub mod workspace;

pub use board_note::{BoardNote, BoardNoteId, BoardNotePayload};
pub use note::{Note, NoteId, NotePayload};
pub use task::{Task, TaskId, TaskPayload, TaskStatus};
pub use workspace::{Workspace, WorkspaceId};
