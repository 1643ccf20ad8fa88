pub mod list;
pub mod widgets;

use crate::app::App;
use crate::message::View;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Main UI rendering function. Reads the app state only.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match app.active_view() {
        View::Boards => list::render_menu(frame, area, app.boards()),
        View::Tags => list::render_menu(frame, area, app.tags()),
        View::ItemsByBoard => match app.items_by_board() {
            Some(menu) => list::render_menu(frame, area, menu),
            None => render_missing(frame, area),
        },
        View::ItemsByTag => match app.items_by_tag() {
            Some(menu) => list::render_menu(frame, area, menu),
            None => render_missing(frame, area),
        },
    }
}

fn render_missing(frame: &mut Frame, area: Rect) {
    let placeholder =
        Paragraph::new("Nothing selected").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(placeholder, area);
}
