//! Note list and editor for the open workspace

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::constants::EMPTY_NOTE_LIST;
use crate::controller::SaveState;
use crate::ui::app::{App, NoteFocus};
use crate::ui::layout::LayoutManager;

pub struct NotesPanel;

impl NotesPanel {
    pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
        let Some(notes) = app.notes.as_ref() else {
            return;
        };
        let panes = LayoutManager::split_pane_layout(area);
        let list_block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Notes • workspace {} ", notes.workspace()))
            .border_style(Self::focus_style(app.note_focus == NoteFocus::List));

        if let Some(error) = notes.load_error() {
            let error = Paragraph::new(error.to_string())
                .block(list_block)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            f.render_widget(error, panes[0]);
        } else if notes.notes().is_empty() {
            let placeholder = Paragraph::new(EMPTY_NOTE_LIST)
                .block(list_block)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(placeholder, panes[0]);
        } else {
            let items: Vec<ListItem> = notes
                .rows()
                .into_iter()
                .map(|row| {
                    let marker = if row.active { "● " } else { "  " };
                    ListItem::new(vec![
                        Line::from(Span::styled(
                            format!("{}{}", marker, row.title),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        )),
                        Line::from(Span::styled(
                            format!("  {}", row.updated),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ])
                })
                .collect();
            let list = List::new(items)
                .block(list_block)
                .highlight_style(Style::default().bg(Color::DarkGray));
            f.render_stateful_widget(list, panes[0], &mut app.note_list_state);
        }

        let Some(notes) = app.notes.as_ref() else {
            return;
        };
        let editor = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(panes[1]);

        let state = notes.state();
        let state_color = match state {
            SaveState::Unsaved | SaveState::Saving => Color::Yellow,
            SaveState::Saved => Color::Green,
            SaveState::Failed => Color::Red,
            SaveState::Idle | SaveState::Loaded => Color::Gray,
        };

        let title = Paragraph::new(notes.title().to_string()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![
                    Span::raw(" Title "),
                    Span::styled(format!("● {} ", state.label()), Style::default().fg(state_color)),
                ]))
                .border_style(Self::focus_style(app.note_focus == NoteFocus::Title)),
        );
        f.render_widget(title, editor[0]);

        let body = Paragraph::new(notes.body().to_string())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Body ")
                    .border_style(Self::focus_style(app.note_focus == NoteFocus::Body)),
            );
        f.render_widget(body, editor[1]);
    }

    fn focus_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}
