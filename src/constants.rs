//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Configuration defaults
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CSRF_TOKEN_ENV: &str = "TASKDESK_CSRF_TOKEN";
pub const DEFAULT_AUTOSAVE_INTERVAL_SECONDS: u64 = 60;
pub const DEFAULT_SAVE_DEBOUNCE_MILLIS: u64 = 1500;
pub const MAX_AUTOSAVE_INTERVAL_SECONDS: u64 = 3600;
pub const MAX_SAVE_DEBOUNCE_MILLIS: u64 = 60_000;

// Placeholders
pub const EMPTY_TASK_LIST: &str = "No tasks found. Create one!";
pub const EMPTY_NOTE_LIST: &str = "No notes yet.";
pub const EMPTY_WORKSPACE_LIST: &str = "No workspaces yet. Press 'n' to add.";
pub const EMPTY_TRASH: &str = "Trash is empty.";
pub const EMPTY_NOTE_BOARD: &str = "You have no notes yet. Press 'n' to get started!";

// Confirmation prompts
pub const CONFIRM_DELETE_TASK: &str = "Delete this task?";
pub const CONFIRM_DELETE_NOTE: &str = "Delete this note?";
pub const CONFIRM_DELETE_BOARD_NOTE: &str = "Are you sure you want to delete this note?";
pub const CONFIRM_DELETE_WORKSPACE: &str = "Move this workspace to trash?";
pub const CONFIRM_DELETE_WORKSPACE_FOREVER: &str = "Delete permanently? This cannot be undone.";

// Dialog titles
pub const TITLE_NEW_TASK: &str = "New Task";
pub const TITLE_EDIT_TASK: &str = "Edit Task";
pub const TITLE_NEW_NOTE: &str = "New Note";
pub const TITLE_EDIT_NOTE: &str = "Edit Note";

// Success Messages
pub const SUCCESS_TASK_CREATED: &str = "✅ Task created";
pub const SUCCESS_TASK_UPDATED: &str = "✅ Task updated";
pub const SUCCESS_TASK_DELETED: &str = "✅ Task deleted";
pub const SUCCESS_TASKS_DELETED: &str = "✅ Tasks moved to bin";
pub const SUCCESS_NOTE_SAVED: &str = "✅ Note saved";
pub const SUCCESS_NOTE_DELETED: &str = "✅ Note deleted";
pub const SUCCESS_WORKSPACE_RENAMED: &str = "✅ Workspace renamed";
pub const SUCCESS_WORKSPACE_DELETED: &str = "✅ Workspace moved to trash";
pub const SUCCESS_WORKSPACE_RESTORED: &str = "✅ Workspace restored";

// Error Messages
pub const ERROR_LOAD_TASKS_FAILED: &str = "❌ Failed to load tasks";
pub const ERROR_TASK_CREATE_FAILED: &str = "❌ Failed to create task";
pub const ERROR_TASK_UPDATE_FAILED: &str = "❌ Failed to update task";
pub const ERROR_TASK_DELETE_FAILED: &str = "❌ Failed to delete task";
pub const ERROR_BULK_DELETE_FAILED: &str = "❌ Failed to delete selected tasks";
pub const ERROR_REORDER_FAILED: &str = "❌ Failed to save order";
pub const ERROR_LOAD_NOTES_FAILED: &str = "❌ Failed to load notes";
pub const ERROR_NOTE_CREATE_FAILED: &str = "❌ Failed to create note";
pub const ERROR_NOTE_DELETE_FAILED: &str = "❌ Failed to delete note";
pub const ERROR_LOAD_BOARD_FAILED: &str = "❌ Could not load notes";
pub const ERROR_BOARD_NOTE_SAVE_FAILED: &str = "❌ Could not save the note";
pub const ERROR_BOARD_NOTE_DELETE_FAILED: &str = "❌ Could not delete the note";
pub const ERROR_LOAD_WORKSPACES_FAILED: &str = "❌ Failed to load workspaces";
pub const ERROR_WORKSPACE_CREATE_FAILED: &str = "❌ Failed to create workspace";
pub const ERROR_WORKSPACE_RENAME_FAILED: &str = "❌ Failed to rename workspace";
pub const ERROR_WORKSPACE_DELETE_FAILED: &str = "❌ Could not delete workspace";
pub const ERROR_WORKSPACE_RESTORE_FAILED: &str = "❌ Failed to restore workspace";
pub const ERROR_WORKSPACE_REORDER_FAILED: &str = "❌ Failed to save workspace order";
pub const ERROR_LOAD_TRASH_FAILED: &str = "❌ Failed to load trash";

// Validation Error Messages
pub const ERROR_TITLE_REQUIRED: &str = "Title is required";
pub const ERROR_INVALID_DUE_DATE: &str = "Due date must be YYYY-MM-DD";
pub const ERROR_NAME_REQUIRED: &str = "Name is required";

// Note save states
pub const NOTE_STATE_LOADED: &str = "Loaded";
pub const NOTE_STATE_UNSAVED: &str = "Unsaved changes";
pub const NOTE_STATE_SAVING: &str = "Saving…";
pub const NOTE_STATE_SAVED: &str = "Saved";
pub const NOTE_STATE_FAILED: &str = "Save failed";

// Configuration Messages
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
