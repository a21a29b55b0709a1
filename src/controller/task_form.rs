//! Create/edit form state for a single task

use crate::constants::{ERROR_INVALID_DUE_DATE, ERROR_TITLE_REQUIRED, TITLE_EDIT_TASK, TITLE_NEW_TASK};
use crate::controller::task_view::TaskFilter;
use crate::entities::{Task, TaskId, TaskPayload, TaskStatus};
use crate::utils::datetime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TaskId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Description,
    DueDate,
    Status,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::DueDate,
            FormField::DueDate => FormField::Status,
            FormField::Status => FormField::Title,
        }
    }
}

/// Editable task form. Values survive a failed submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskForm {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    /// Raw YYYY-MM-DD input, empty for no due date
    pub due_date: String,
    pub status: TaskStatus,
    pub focus: FormField,
    pub title_error: Option<String>,
    pub due_error: Option<String>,
    /// Inline error from the last failed request
    pub error: Option<String>,
}

impl TaskForm {
    /// Blank form; status defaults to the active filter's status when it names one
    pub fn for_create(filter: TaskFilter) -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            due_date: String::new(),
            status: filter.status().unwrap_or_default(),
            focus: FormField::Title,
            title_error: None,
            due_error: None,
            error: None,
        }
    }

    pub fn for_edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date.map(datetime::format_ymd).unwrap_or_default(),
            status: task.status,
            focus: FormField::Title,
            title_error: None,
            due_error: None,
            error: None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => TITLE_NEW_TASK,
            FormMode::Edit(_) => TITLE_EDIT_TASK,
        }
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match self.mode {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.title_error.is_some() || self.due_error.is_some()
    }

    /// Check the inputs, flagging offending fields. Returns the request body
    /// when everything is valid.
    pub fn validate(&mut self) -> Option<TaskPayload> {
        let title = self.title.trim();
        self.title_error = title.is_empty().then(|| ERROR_TITLE_REQUIRED.to_string());

        let due_input = self.due_date.trim();
        let due_date = if due_input.is_empty() {
            self.due_error = None;
            None
        } else {
            match datetime::parse_date(due_input) {
                Ok(date) => {
                    self.due_error = None;
                    Some(datetime::format_ymd(date))
                }
                Err(_) => {
                    self.due_error = Some(ERROR_INVALID_DUE_DATE.to_string());
                    None
                }
            }
        };

        if self.has_errors() {
            if self.title_error.is_some() {
                self.focus = FormField::Title;
            } else {
                self.focus = FormField::DueDate;
            }
            return None;
        }

        Some(TaskPayload {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            due_date,
            status: self.status,
        })
    }

    /// Text buffer behind the focused field, if it is a text field
    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Status => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn cycle_status(&mut self) {
        self.status = self.status.cycle();
    }
}
