//! Main UI rendering and coordination

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::Duration;

use super::app::{App, Screen};
use super::components::{
    BoardNoteDialog, ConfirmDialog, HelpPanel, LogPanel, NoteBoardPanel, NotesPanel, RenameDialog, StatusBar,
    TaskFormDialog, TaskToolbar, TasksList, WorkspacesPanel,
};
use super::events::handle_events;
use super::layout::LayoutManager;
use crate::backend::HttpBackend;
use crate::config::Config;
use crate::logger::Logger;

/// Run the main TUI application
pub async fn run_app(config: Config, logger: Logger) -> Result<()> {
    let backend = Arc::new(HttpBackend::from_config(&config.api));
    log::info!("Using API at {}", backend.base_url());

    let mut app = App::new(backend, &config, logger);
    app.init().await;
    app.collect_notices();

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    if app.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_ui(&mut terminal, &mut app).await;

    // Flush unsaved note edits before leaving
    if let Some(notes) = app.notes.as_mut() {
        notes.save_now().await;
    }

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

/// Main UI loop
async fn run_ui(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        // Poll with a timeout so autosave deadlines are checked between keys
        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            if matches!(event, Event::Key(_) | Event::Mouse(_)) {
                handle_events(event, app).await?;
            }
        }

        app.tick(Instant::now()).await;
        app.collect_notices();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Main UI rendering function
pub fn render_ui(f: &mut ratatui::Frame, app: &mut App) {
    let chunks = LayoutManager::main_layout(f.area());
    app.list_area = chunks[1];

    match app.screen {
        Screen::Tasks => {
            TaskToolbar::render(f, chunks[0], app);
            TasksList::render(f, chunks[1], app);
        }
        Screen::Workspaces => {
            TaskToolbar::render(f, chunks[0], app);
            WorkspacesPanel::render(f, chunks[1], app);
        }
        Screen::Notes => {
            TaskToolbar::render(f, chunks[0], app);
            NotesPanel::render(f, chunks[1], app);
        }
        Screen::Board => {
            TaskToolbar::render(f, chunks[0], app);
            NoteBoardPanel::render(f, chunks[1], app);
        }
    }
    StatusBar::render(f, chunks[2], app);

    // Overlays
    match app.screen {
        Screen::Tasks => {
            if let Some(form) = app.tasks.form() {
                TaskFormDialog::render(f, form);
            }
            if let Some(confirmation) = app.tasks.confirmation() {
                ConfirmDialog::render(f, confirmation.prompt());
            }
        }
        Screen::Workspaces => {
            if let Some(form) = app.workspaces.rename_form() {
                RenameDialog::render(f, form);
            }
            if let Some(confirmation) = app.workspaces.confirmation() {
                ConfirmDialog::render(f, confirmation.prompt());
            }
        }
        Screen::Notes => {
            if let Some(prompt) = app.notes.as_ref().and_then(|notes| notes.delete_prompt()) {
                ConfirmDialog::render(f, prompt);
            }
        }
        Screen::Board => {
            if let Some(form) = app.board.form() {
                BoardNoteDialog::render(f, form);
            }
            if let Some(prompt) = app.board.delete_prompt() {
                ConfirmDialog::render(f, prompt);
            }
        }
    }

    // Render help panel last to ensure it's on top of everything
    if app.show_help {
        HelpPanel::render(f);
    } else if app.show_logs {
        LogPanel::render(f, app);
    }
}
