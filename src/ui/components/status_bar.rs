//! Status bar component

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::controller::NoticeKind;
use crate::ui::app::{App, Screen};

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar: the latest notice, else the screen's shortcuts
    pub fn render(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
        let (status_text, status_color) = match &app.notice {
            Some(notice) => (
                notice.message.clone(),
                match notice.kind {
                    NoticeKind::Success => Color::Green,
                    NoticeKind::Error => Color::Red,
                },
            ),
            None => (Self::shortcuts(app).to_string(), Color::Gray),
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }

    fn shortcuts(app: &App) -> &'static str {
        match app.screen {
            Screen::Tasks => "n: new • e: edit • d: delete • Space: select • f: filter • s: sort • ?: help • q: quit",
            Screen::Workspaces if app.show_trash => "u: restore • X: delete forever • t: back • Tab: tasks",
            Screen::Workspaces => "Enter: notes • n: new • r: rename • d: delete • t: trash • Tab: board",
            Screen::Board => "n: new note • e: edit • d: delete • r: reload • Tab: tasks",
            Screen::Notes => "n: new note • d: delete • Tab: focus • Ctrl-S: save • Esc: back",
        }
    }
}
