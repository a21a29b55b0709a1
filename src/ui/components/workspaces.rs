//! Workspace sidebar and trash view

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::constants::{EMPTY_TRASH, EMPTY_WORKSPACE_LIST};
use crate::ui::app::App;

pub struct WorkspacesPanel;

impl WorkspacesPanel {
    pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
        let (title, items, error, empty) = if app.show_trash {
            (
                " Trash ",
                app.workspaces.trash(),
                app.workspaces.trash_error(),
                EMPTY_TRASH,
            )
        } else {
            (
                " Workspaces ",
                app.workspaces.workspaces(),
                app.workspaces.load_error(),
                EMPTY_WORKSPACE_LIST,
            )
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if let Some(error) = error {
            let error = Paragraph::new(error.to_string())
                .block(block)
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            f.render_widget(error, area);
            return;
        }

        if items.is_empty() {
            let placeholder = Paragraph::new(empty)
                .block(block)
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(placeholder, area);
            return;
        }

        let list_items: Vec<ListItem> = items
            .iter()
            .map(|ws| ListItem::new(format!("📓 {}", ws.name)))
            .collect();
        let list = List::new(list_items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("› ");
        f.render_stateful_widget(list, area, &mut app.workspace_list_state);
    }
}
