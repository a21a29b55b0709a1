//! Notes board: one card per note

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::constants::EMPTY_NOTE_BOARD;
use crate::controller::NoteCard;
use crate::ui::app::App;

pub struct NoteBoardPanel;

impl NoteBoardPanel {
    pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
        let block = Block::default().borders(Borders::ALL).title(" Notes ");

        if let Some(error) = app.board.load_error() {
            let error = Paragraph::new(error.to_string())
                .block(block)
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            f.render_widget(error, area);
            return;
        }

        let cards = app.board.cards();
        if cards.is_empty() {
            let placeholder = Paragraph::new(EMPTY_NOTE_BOARD)
                .block(block)
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(placeholder, area);
            return;
        }

        let items: Vec<ListItem> = cards.iter().map(Self::card_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("› ");
        f.render_stateful_widget(list, area, &mut app.board_list_state);
    }

    fn card_item(card: &NoteCard) -> ListItem<'static> {
        let mut lines = vec![Line::from(Span::styled(
            card.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))];
        if !card.content.is_empty() {
            lines.push(Line::from(Span::raw(format!("  {}", card.content))));
        }
        if !card.created.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  Created: {}", card.created),
                Style::default().fg(Color::DarkGray),
            )));
        }
        ListItem::new(lines)
    }
}
