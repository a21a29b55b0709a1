//! Modal dialogs: task and note forms, delete confirmations, workspace rename

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::common::{create_dialog_block, create_input_paragraph, create_instructions_paragraph, shortcuts};
use crate::controller::note_board::{BoardField, BoardNoteForm};
use crate::controller::task_form::{FormField, TaskForm};
use crate::controller::workspaces::RenameForm;
use crate::ui::layout::LayoutManager;

pub struct TaskFormDialog;

impl TaskFormDialog {
    pub fn render(f: &mut Frame, form: &TaskForm) {
        let area = LayoutManager::centered_rect_lines(60, 19, f.area());
        f.render_widget(Clear, area);

        let block = create_dialog_block(form.heading(), Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        let focus = form.focus;
        f.render_widget(
            create_input_paragraph(&form.title, "Title", focus == FormField::Title, form.title_error.as_deref()),
            chunks[0],
        );
        f.render_widget(
            create_input_paragraph(&form.description, "Description", focus == FormField::Description, None),
            chunks[1],
        );
        f.render_widget(
            create_input_paragraph(
                &form.due_date,
                "Due date (YYYY-MM-DD)",
                focus == FormField::DueDate,
                form.due_error.as_deref(),
            ),
            chunks[2],
        );
        f.render_widget(
            create_input_paragraph(
                &format!("◀ {} ▶", form.status.label()),
                "Status",
                focus == FormField::Status,
                None,
            ),
            chunks[3],
        );

        if let Some(error) = &form.error {
            let error = Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            f.render_widget(error, chunks[4]);
        }

        let instructions = create_instructions_paragraph(&[
            shortcuts::ENTER_SAVE,
            shortcuts::SEPARATOR,
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ]);
        f.render_widget(instructions, chunks[5]);
    }
}

pub struct BoardNoteDialog;

impl BoardNoteDialog {
    pub fn render(f: &mut Frame, form: &BoardNoteForm) {
        let area = LayoutManager::centered_rect_lines(60, 12, f.area());
        f.render_widget(Clear, area);

        let block = create_dialog_block(form.heading(), Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        f.render_widget(
            create_input_paragraph(
                &form.title,
                "Title",
                form.focus == BoardField::Title,
                form.title_error.as_deref(),
            ),
            chunks[0],
        );
        f.render_widget(
            create_input_paragraph(&form.content, "Content", form.focus == BoardField::Content, None),
            chunks[1],
        );

        if let Some(error) = &form.error {
            let error = Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            f.render_widget(error, chunks[2]);
        }

        let instructions = create_instructions_paragraph(&[
            shortcuts::ENTER_SAVE,
            shortcuts::SEPARATOR,
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ]);
        f.render_widget(instructions, chunks[3]);
    }
}

/// Yes/no prompt for destructive actions
pub struct ConfirmDialog;

impl ConfirmDialog {
    pub fn render(f: &mut Frame, prompt: &str) {
        let area = LayoutManager::centered_rect_lines(50, 7, f.area());
        f.render_widget(Clear, area);

        let block = create_dialog_block("⚠️  Confirm Delete", Color::Red);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let text = Paragraph::new(prompt.to_string())
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(text, chunks[0]);

        let instructions = create_instructions_paragraph(&[shortcuts::Y_CONFIRM, shortcuts::SEPARATOR, shortcuts::N_CANCEL]);
        f.render_widget(instructions, chunks[1]);
    }
}

pub struct RenameDialog;

impl RenameDialog {
    pub fn render(f: &mut Frame, form: &RenameForm) {
        let area = LayoutManager::centered_rect_lines(50, 7, f.area());
        f.render_widget(Clear, area);

        let block = create_dialog_block("Rename Workspace", Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(inner);

        f.render_widget(
            create_input_paragraph(&form.name, "New name", true, form.error.as_deref()),
            chunks[0],
        );
        let instructions =
            create_instructions_paragraph(&[shortcuts::ENTER_SAVE, shortcuts::SEPARATOR, shortcuts::ESC_CANCEL]);
        f.render_widget(instructions, chunks[1]);
    }
}
