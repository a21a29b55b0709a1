pub mod common;
pub mod dialogs;
pub mod help_panel;
pub mod note_board;
pub mod notes;
pub mod status_bar;
pub mod task_list;
pub mod workspaces;

pub use dialogs::{BoardNoteDialog, ConfirmDialog, RenameDialog, TaskFormDialog};
pub use help_panel::{HelpPanel, LogPanel};
pub use note_board::NoteBoardPanel;
pub use notes::NotesPanel;
pub use status_bar::StatusBar;
pub use task_list::{TaskToolbar, TasksList};
pub use workspaces::WorkspacesPanel;
