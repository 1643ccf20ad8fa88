use crate::list::StatusMessage;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Bottom line: the current status message if any, else the key hints
pub struct StatusBarWidget<'a> {
    status: Option<&'a StatusMessage>,
    hint: String,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(status: Option<&'a StatusMessage>, hint: String) -> Self {
        Self { status, hint }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.status {
            Some(status) if status.is_error() => Line::from(Span::styled(
                format!(" {}", status.text),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Some(status) => Line::from(Span::styled(
                format!(" {}", status.text),
                Style::default().fg(Color::Green),
            )),
            None => Line::from(Span::styled(
                format!(" {}", self.hint),
                Style::default().fg(Color::DarkGray),
            )),
        };

        Paragraph::new(line).render(area, buf);
    }
}
