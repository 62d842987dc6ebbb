//! Main layout

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::model::App;

use super::components;
use super::pages;
use super::theme::colors;

pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // Title bar + page + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    render_title_bar(app, frame, main_layout[0]);

    // Domain table on the left, labs of the expanded domain on the right
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(main_layout[1]);

    pages::dashboard::render(app, frame, columns[0]);
    pages::labs::render(app, frame, columns[1]);

    components::statusbar::render(app, frame, main_layout[2]);

    // Dialogs on top
    components::modal::render(app, frame);
}

fn render_title_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let text = format!(
        " Lab Dashboard v{}  ·  {}",
        env!("CARGO_PKG_VERSION"),
        app.backend.owner()
    );
    let title = Paragraph::new(text).style(Style::default().bg(c.highlight).fg(c.selected_fg));
    frame.render_widget(title, area);
}
