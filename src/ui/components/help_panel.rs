//! Help and log overlays

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::common::create_dialog_block;
use crate::ui::app::App;
use crate::ui::layout::LayoutManager;

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Tasks",
        &[
            ("j/k", "Move cursor"),
            ("J/K", "Move task down/up (manual sort only)"),
            ("Space", "Toggle selection"),
            ("c", "Clear selection"),
            ("n", "New task"),
            ("e/Enter", "Edit task"),
            ("d", "Delete task"),
            ("D", "Delete selected tasks"),
            ("f", "Cycle status filter"),
            ("s", "Cycle sort order"),
            ("r", "Reload"),
        ],
    ),
    (
        "Workspaces",
        &[
            ("Enter", "Open notes"),
            ("n", "New workspace"),
            ("r", "Rename"),
            ("d", "Move to trash"),
            ("J/K", "Move workspace down/up"),
            ("t", "Toggle trash (u: restore, X: delete forever)"),
        ],
    ),
    (
        "Notes",
        &[
            ("Tab", "Cycle list/title/body"),
            ("n", "New note"),
            ("d", "Delete note"),
            ("Ctrl-S", "Save now"),
        ],
    ),
    (
        "Notes board",
        &[
            ("n", "New note"),
            ("e/Enter", "Edit note"),
            ("d", "Delete note"),
            ("r", "Reload"),
        ],
    ),
    (
        "General",
        &[
            ("Tab", "Switch tasks/workspaces/board"),
            ("Mouse", "Wheel scrolls, click highlights (mouse_enabled)"),
            ("L", "Show log"),
            ("q", "Quit"),
        ],
    ),
];

pub struct HelpPanel;

impl HelpPanel {
    pub fn render(f: &mut Frame) {
        let area = LayoutManager::centered_rect(70, 80, f.area());
        f.render_widget(Clear, area);

        let mut lines = Vec::new();
        for (section, bindings) in HELP_SECTIONS {
            lines.push(Line::from(Span::styled(
                *section,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            for (key, description) in *bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<8}", key), Style::default().fg(Color::Cyan)),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::default());
        }

        let help = Paragraph::new(lines)
            .block(create_dialog_block(" Help ", Color::Cyan))
            .wrap(Wrap { trim: false });
        f.render_widget(help, area);
    }
}

pub struct LogPanel;

impl LogPanel {
    pub fn render(f: &mut Frame, app: &App) {
        let area = LayoutManager::centered_rect(80, 80, f.area());
        f.render_widget(Clear, area);

        let items: Vec<ListItem> = app.logger.get_logs().into_iter().map(ListItem::new).collect();
        let list = List::new(items).block(create_dialog_block(" Log (newest first) ", Color::Gray));
        f.render_widget(list, area);
    }
}
