use crate::keymap::KeyBinding;
use ratatui::{
    layout::Alignment,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Centered overlay listing every key binding of the active view
pub struct HelpWidget {
    bindings: Vec<KeyBinding>,
}

impl HelpWidget {
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }
}

impl Widget for HelpWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_width = self
            .bindings
            .iter()
            .map(|b| b.keys.chars().count())
            .max()
            .unwrap_or(0);

        let width = (key_width as u16 + 24).min(area.width);
        let height = (self.bindings.len() as u16 + 4).min(area.height);
        let popup = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };

        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));

        let mut lines: Vec<Line> = self
            .bindings
            .iter()
            .map(|binding| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>width$}", binding.keys, width = key_width),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(binding.action),
                ])
            })
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "esc or ? to close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).block(block).render(popup, buf);
    }
}
