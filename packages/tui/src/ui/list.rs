use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::keymap::{bindings, short_help};
use crate::list::{FilterState, ListEntry};
use crate::menu::{Menu, MenuKind};
use crate::ui::widgets::{HelpWidget, StatusBarWidget};

/// Render one menu: title, entries, input line and status bar
pub fn render_menu<K: MenuKind>(frame: &mut Frame, area: Rect, menu: &Menu<K>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(1),    // Entries
            Constraint::Length(1), // Input or filter
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_title(frame, chunks[0], menu);
    render_entries(frame, chunks[1], menu);
    render_input_line(frame, chunks[2], menu);

    let list = menu.list();
    let hint = short_help(menu.view(), menu.input_state(), list.filter_state());
    frame.render_widget(StatusBarWidget::new(list.status(), hint), chunks[3]);

    if menu.show_help() {
        let help = HelpWidget::new(bindings(menu.view(), menu.kind().capabilities()));
        frame.render_widget(help, area);
    }
}

fn render_title<K: MenuKind>(frame: &mut Frame, area: Rect, menu: &Menu<K>) {
    let list = menu.list();
    let mut spans = vec![Span::styled(
        format!(" {} ", list.title()),
        Style::default()
            .fg(Color::White)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];

    let count = list.visible_len();
    spans.push(Span::styled(
        format!(
            "  {} {}{}",
            count,
            menu.kind().noun(),
            if count == 1 { "" } else { "s" }
        ),
        Style::default().fg(Color::DarkGray),
    ));
    if list.is_hiding() {
        spans.push(Span::styled(" • done hidden", Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_entries<K: MenuKind>(frame: &mut Frame, area: Rect, menu: &Menu<K>) {
    let list = menu.list();

    if list.is_empty() {
        let empty = Paragraph::new(format!("  No {}s.", menu.kind().noun()))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = list
        .visible_items()
        .into_iter()
        .map(|entry| {
            // Done items are drawn struck through
            let title_style = if entry.hide_value() {
                Style::default().add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            let dim = Style::default().fg(Color::DarkGray);

            let description = entry.description();
            let mut lines = vec![
                Line::from(Span::styled(entry.title().to_string(), title_style)),
                Line::from(Span::styled(
                    description.lines().next().unwrap_or_default().to_string(),
                    dim,
                )),
            ];
            if let Some(footer) = entry.footer() {
                lines.push(Line::from(Span::styled(
                    footer,
                    dim.add_modifier(Modifier::ITALIC),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let widget = List::new(items)
        .highlight_symbol("│ ")
        .highlight_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .highlight_spacing(ratatui::widgets::HighlightSpacing::Always);

    let mut state = ListState::default();
    state.select(list.index());
    frame.render_stateful_widget(widget, area, &mut state);
}

fn render_input_line<K: MenuKind>(frame: &mut Frame, area: Rect, menu: &Menu<K>) {
    let list = menu.list();

    let (label, input) = match (menu.prompt(), list.filter_state()) {
        (Some(prompt), _) => (prompt, menu.input()),
        (None, FilterState::Filtering) => ("Filter".to_string(), list.filter_input()),
        (None, FilterState::FilterApplied) => {
            let applied = Line::from(vec![
                Span::styled(" Filter: ", Style::default().fg(Color::DarkGray)),
                Span::styled(list.filter_text().to_string(), Style::default().fg(Color::Yellow)),
            ]);
            frame.render_widget(Paragraph::new(applied), area);
            return;
        }
        (None, FilterState::Unfiltered) => return,
    };

    let prefix = format!(" {}: ", label);
    let line = Line::from(vec![
        Span::styled(prefix.clone(), Style::default().fg(Color::Cyan)),
        Span::raw(input.content().to_string()),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let x = area.x + prefix.chars().count() as u16 + input.cursor_display_column();
    frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
}
