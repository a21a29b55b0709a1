//! Event handling and key bindings

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::app::{App, NoteFocus, Screen};
use crate::controller::task_form::FormField;
use crate::controller::SubmitOutcome;

/// Handle all user input events. Returns whether the event was consumed.
pub async fn handle_events(event: Event, app: &mut App) -> Result<bool, anyhow::Error> {
    let key = match event {
        Event::Key(key) => key,
        Event::Mouse(mouse) => return Ok(handle_mouse(mouse, app)),
        _ => return Ok(false),
    };
    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }

    app.notice = None;

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(true);
    }

    if app.show_help || app.show_logs {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q' | '?' | 'L')) {
            app.show_help = false;
            app.show_logs = false;
        }
        return Ok(true);
    }

    let handled = match app.screen {
        Screen::Tasks => handle_tasks_screen(key, app).await,
        Screen::Workspaces => handle_workspaces_screen(key, app).await,
        Screen::Notes => handle_notes_screen(key, app).await,
        Screen::Board => handle_board_screen(key, app).await,
    };

    app.collect_notices();
    Ok(handled)
}

/// Wheel moves the list cursor, left click highlights the row under the pointer
fn handle_mouse(mouse: MouseEvent, app: &mut App) -> bool {
    if !app.mouse_enabled || app.has_overlay() {
        return false;
    }

    let area = app.list_area;
    let is_in_area = mouse.column >= area.x
        && mouse.column < area.x + area.width
        && mouse.row >= area.y
        && mouse.row < area.y + area.height;
    if !is_in_area {
        return false;
    }

    match (app.screen, mouse.kind) {
        (Screen::Tasks, MouseEventKind::ScrollDown) => app.move_task_cursor(1),
        (Screen::Tasks, MouseEventKind::ScrollUp) => app.move_task_cursor(-1),
        (Screen::Workspaces, MouseEventKind::ScrollDown) => app.move_workspace_cursor(1),
        (Screen::Workspaces, MouseEventKind::ScrollUp) => app.move_workspace_cursor(-1),
        (Screen::Board, MouseEventKind::ScrollDown) => app.move_board_cursor(1),
        (Screen::Board, MouseEventKind::ScrollUp) => app.move_board_cursor(-1),
        (screen, MouseEventKind::Down(MouseButton::Left)) => {
            // Borders take the first and last line
            if mouse.row == area.y || mouse.row + 1 >= area.y + area.height {
                return false;
            }
            let line = (mouse.row - area.y - 1) as usize;
            return match screen {
                Screen::Tasks => app.select_task_at_line(line),
                Screen::Workspaces => app.select_workspace_at_line(line),
                Screen::Notes | Screen::Board => false,
            };
        }
        _ => return false,
    }
    true
}

async fn handle_tasks_screen(key: KeyEvent, app: &mut App) -> bool {
    if app.tasks.confirmation().is_some() {
        return handle_task_confirmation(key, app).await;
    }
    if app.tasks.form().is_some() {
        return handle_task_form(key, app).await;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('L') => app.show_logs = true,
        KeyCode::Tab => app.screen = Screen::Workspaces,
        KeyCode::Down | KeyCode::Char('j') => app.move_task_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_task_cursor(-1),
        KeyCode::Char('J') => app.move_task(1).await,
        KeyCode::Char('K') => app.move_task(-1).await,
        KeyCode::Char(' ') => {
            if let Some(id) = app.selected_task_id() {
                app.tasks.toggle_selected(id);
            }
        }
        KeyCode::Char('c') => app.tasks.clear_selection(),
        KeyCode::Char('n') => app.tasks.on_create(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.selected_task_id() {
                app.tasks.on_edit(id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_task_id() {
                app.tasks.on_delete(id);
            }
        }
        KeyCode::Char('D') => {
            app.tasks.on_bulk_delete();
        }
        KeyCode::Char('f') => {
            app.tasks.on_filter_change(app.tasks.filter().cycle());
            app.clamp_cursors();
        }
        KeyCode::Char('s') => app.tasks.on_sort_change(app.tasks.sort().cycle()),
        KeyCode::Char('r') => {
            app.tasks.load().await;
            app.clamp_cursors();
        }
        _ => return false,
    }
    true
}

async fn handle_task_confirmation(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('y' | 'Y') => {
            app.tasks.confirm().await;
            app.clamp_cursors();
            true
        }
        KeyCode::Char('n' | 'N') | KeyCode::Esc => {
            app.tasks.cancel_confirmation();
            true
        }
        _ => false,
    }
}

async fn handle_task_form(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc => app.tasks.cancel_form(),
        KeyCode::Enter => {
            if app.tasks.submit_form().await == SubmitOutcome::Saved {
                app.clamp_cursors();
            }
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.tasks.form_mut() {
                form.focus_next();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.tasks.form_mut() {
                form.pop_char();
            }
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if app.tasks.form().is_some_and(|form| form.focus == FormField::Status) =>
        {
            if let Some(form) = app.tasks.form_mut() {
                form.cycle_status();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.tasks.form_mut() {
                form.push_char(c);
            }
        }
        _ => return false,
    }
    true
}

async fn handle_workspaces_screen(key: KeyEvent, app: &mut App) -> bool {
    if app.workspaces.confirmation().is_some() {
        match key.code {
            KeyCode::Char('y' | 'Y') => app.confirm_workspace_action().await,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => app.workspaces.cancel_confirmation(),
            _ => return false,
        }
        return true;
    }

    if app.workspaces.rename_form().is_some() {
        match key.code {
            KeyCode::Esc => app.workspaces.cancel_rename(),
            KeyCode::Enter => {
                app.workspaces.submit_rename().await;
            }
            KeyCode::Backspace => {
                if let Some(form) = app.workspaces.rename_form_mut() {
                    form.name.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(form) = app.workspaces.rename_form_mut() {
                    form.name.push(c);
                }
            }
            _ => return false,
        }
        return true;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('L') => app.show_logs = true,
        KeyCode::Tab => app.screen = Screen::Board,
        KeyCode::Esc => app.screen = Screen::Tasks,
        KeyCode::Down | KeyCode::Char('j') => app.move_workspace_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_workspace_cursor(-1),
        KeyCode::Char('t') => app.toggle_trash().await,
        _ if app.show_trash => return handle_trash_keys(key, app).await,
        KeyCode::Char('J') => app.move_workspace(1).await,
        KeyCode::Char('K') => app.move_workspace(-1).await,
        KeyCode::Char('n') => {
            app.workspaces.create().await;
        }
        KeyCode::Char('r') => {
            if let Some(id) = app.selected_workspace_id() {
                app.workspaces.begin_rename(id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_workspace_id() {
                app.workspaces.request_delete(id);
            }
        }
        KeyCode::Enter => {
            if let Some(id) = app.selected_workspace_id() {
                app.open_workspace(id).await;
            }
        }
        _ => return false,
    }
    true
}

async fn handle_trash_keys(key: KeyEvent, app: &mut App) -> bool {
    let Some(id) = app.selected_workspace_id() else {
        return false;
    };
    match key.code {
        KeyCode::Char('u') => {
            app.workspaces.restore(id).await;
            app.clamp_cursors();
        }
        KeyCode::Char('X') => {
            app.workspaces.request_delete_forever(id);
        }
        _ => return false,
    }
    true
}

async fn handle_notes_screen(key: KeyEvent, app: &mut App) -> bool {
    let Some(notes) = app.notes.as_mut() else {
        app.screen = Screen::Workspaces;
        return true;
    };

    if notes.delete_prompt().is_some() {
        match key.code {
            KeyCode::Char('y' | 'Y') => {
                notes.confirm_delete().await;
                app.sync_note_cursor();
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => notes.cancel_delete(),
            _ => return false,
        }
        return true;
    }

    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        notes.save_now().await;
        return true;
    }

    let now = Instant::now();
    match app.note_focus {
        NoteFocus::List => match key.code {
            KeyCode::Esc => app.screen = Screen::Workspaces,
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => app.move_note_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => app.move_note_cursor(-1),
            KeyCode::Char('n') => {
                if notes.create().await {
                    app.sync_note_cursor();
                    app.note_focus = NoteFocus::Title;
                }
            }
            KeyCode::Char('d') => {
                notes.request_delete();
            }
            KeyCode::Enter => {
                if let Some(id) = app.highlighted_note() {
                    if let Some(notes) = app.notes.as_mut() {
                        notes.save_now().await;
                        notes.open(id);
                    }
                    app.note_focus = NoteFocus::Title;
                }
            }
            KeyCode::Tab => app.note_focus = NoteFocus::Title,
            _ => return false,
        },
        NoteFocus::Title => match key.code {
            KeyCode::Esc => app.note_focus = NoteFocus::List,
            KeyCode::Tab | KeyCode::Enter => app.note_focus = NoteFocus::Body,
            KeyCode::Backspace => {
                let mut title = notes.title().to_string();
                title.pop();
                notes.set_title(title, now);
            }
            KeyCode::Char(c) => {
                let title = format!("{}{}", notes.title(), c);
                notes.set_title(title, now);
            }
            _ => return false,
        },
        NoteFocus::Body => match key.code {
            KeyCode::Esc => app.note_focus = NoteFocus::List,
            KeyCode::Tab => app.note_focus = NoteFocus::List,
            KeyCode::Enter => {
                let body = format!("{}\n", notes.body());
                notes.set_body(body, now);
            }
            KeyCode::Backspace => {
                let mut body = notes.body().to_string();
                body.pop();
                notes.set_body(body, now);
            }
            KeyCode::Char(c) => {
                let body = format!("{}{}", notes.body(), c);
                notes.set_body(body, now);
            }
            _ => return false,
        },
    }
    true
}

async fn handle_board_screen(key: KeyEvent, app: &mut App) -> bool {
    if app.board.delete_prompt().is_some() {
        match key.code {
            KeyCode::Char('y' | 'Y') => {
                app.board.confirm_delete().await;
                app.clamp_cursors();
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => app.board.cancel_delete(),
            _ => return false,
        }
        return true;
    }

    if app.board.form().is_some() {
        match key.code {
            KeyCode::Esc => app.board.cancel_form(),
            KeyCode::Enter => {
                if app.board.submit_form().await == SubmitOutcome::Saved {
                    app.clamp_cursors();
                }
            }
            KeyCode::Tab => {
                if let Some(form) = app.board.form_mut() {
                    form.focus_next();
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = app.board.form_mut() {
                    form.pop_char();
                }
            }
            KeyCode::Char(c) => {
                if let Some(form) = app.board.form_mut() {
                    form.push_char(c);
                }
            }
            _ => return false,
        }
        return true;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('L') => app.show_logs = true,
        KeyCode::Tab | KeyCode::Esc => app.screen = Screen::Tasks,
        KeyCode::Down | KeyCode::Char('j') => app.move_board_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_board_cursor(-1),
        KeyCode::Char('n') => app.board.on_create(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.highlighted_board_note() {
                app.board.on_edit(id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.highlighted_board_note() {
                app.board.request_delete(id);
            }
        }
        KeyCode::Char('r') => {
            app.board.load().await;
            app.clamp_cursors();
        }
        _ => return false,
    }
    true
}
