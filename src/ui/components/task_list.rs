//! Task list and its header toolbar

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::constants::EMPTY_TASK_LIST;
use crate::controller::{ListBody, TaskListView, TaskRow, Toolbar};
use crate::entities::TaskStatus;
use crate::ui::app::App;

pub struct TasksList;

impl TasksList {
    pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
        let view = app.tasks.view();
        let title = Self::title(&view);

        match view.body {
            ListBody::Rows(rows) => {
                let items: Vec<ListItem> = rows.iter().map(Self::row_item).collect();
                let list = List::new(items)
                    .block(Block::default().borders(Borders::ALL).title(title))
                    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
                    .highlight_symbol(if view.reorder_enabled { "≡ " } else { "› " });
                f.render_stateful_widget(list, area, &mut app.task_list_state);
            }
            ListBody::Empty => {
                let placeholder = Paragraph::new(EMPTY_TASK_LIST)
                    .block(Block::default().borders(Borders::ALL).title(title))
                    .style(Style::default().fg(Color::Gray))
                    .alignment(Alignment::Center);
                f.render_widget(placeholder, area);
            }
            ListBody::Error(message) => {
                let error = Paragraph::new(message)
                    .block(Block::default().borders(Borders::ALL).title(title))
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center);
                f.render_widget(error, area);
            }
        }
    }

    fn title(view: &TaskListView) -> String {
        let reorder = if view.reorder_enabled { "" } else { " • reorder off" };
        format!(" Filter: {} • Sort: {}{} ", view.filter.label(), view.sort.label(), reorder)
    }

    fn status_color(status: TaskStatus) -> Color {
        match status {
            TaskStatus::Todo => Color::Gray,
            TaskStatus::InProgress => Color::Yellow,
            TaskStatus::Done => Color::Green,
        }
    }

    fn row_item(row: &TaskRow) -> ListItem<'static> {
        let checkbox = if row.selected { "[x] " } else { "[ ] " };
        let title_style = if row.status == TaskStatus::Done {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(Color::White)
        };

        let mut spans = vec![
            Span::styled(checkbox, Style::default().fg(Color::Cyan)),
            Span::styled(row.title.clone(), title_style),
            Span::raw(" "),
            Span::styled(format!("[{}]", row.badge), Style::default().fg(Self::status_color(row.status))),
        ];

        if let Some(due) = &row.due {
            let color = if due.overdue { Color::Red } else { Color::Blue };
            let marker = if due.overdue { " ⏰ " } else { " 📅 " };
            spans.push(Span::styled(format!("{}{}", marker, due.label), Style::default().fg(color)));
        }

        let mut lines = vec![Line::from(spans)];
        if let Some(description) = &row.description {
            lines.push(Line::from(Span::styled(
                format!("    {}", description),
                Style::default().fg(Color::Gray),
            )));
        }

        ListItem::new(lines)
    }
}

/// Header region: default toolbar with counters, or the bulk-action toolbar
pub struct TaskToolbar;

impl TaskToolbar {
    pub fn render(f: &mut Frame, area: Rect, app: &App) {
        let block = Block::default().borders(Borders::ALL).title(" Tasks ");

        let line = match app.tasks.toolbar() {
            Toolbar::Default => {
                let stats = app.tasks.stats();
                Line::from(vec![
                    Span::styled("n", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw(" New task  "),
                    Span::styled(format!("Today {}", stats.due_today), Style::default().fg(Color::Blue)),
                    Span::raw("  "),
                    Span::styled(format!("Overdue {}", stats.overdue), Style::default().fg(Color::Red)),
                    Span::raw("  "),
                    Span::styled(format!("Done {}", stats.completed), Style::default().fg(Color::Green)),
                    Span::raw("  "),
                    Span::styled(format!("Pending {}", stats.pending), Style::default().fg(Color::Gray)),
                ])
            }
            Toolbar::Selection { count } => Line::from(vec![
                Span::styled(
                    format!("{} selected", count),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled("D", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::raw(" Delete selected  "),
                Span::styled("c", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw(" Clear selection"),
            ]),
        };

        f.render_widget(Paragraph::new(line).block(block), area);
    }
}
