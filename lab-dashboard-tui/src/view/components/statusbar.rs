//! Status bar

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::model::{App, Modal};
use crate::view::theme::Styles;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (i, (key, desc)) in hints(app).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    let Some(ref msg) = app.status_message else {
        frame.render_widget(Paragraph::new(Line::from(spans)).style(Styles::statusbar()), area);
        return;
    };

    // Message on the right, hints get what is left
    let width = u16::try_from(msg.text.width()).unwrap_or(u16::MAX).saturating_add(2);
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(area);
    frame.render_widget(Paragraph::new(Line::from(spans)).style(Styles::statusbar()), left);
    frame.render_widget(
        Paragraph::new(format!(" {} ", msg.text))
            .style(Styles::statusbar().patch(Styles::tone(msg.tone))),
        right,
    );
}

fn hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.modal.active {
        Some(Modal::CreateInstance { .. }) => {
            vec![("Tab", "Field"), ("Ctrl+S", "Create"), ("Esc", "Cancel")]
        }
        Some(Modal::ConfirmDelete { .. }) => {
            vec![("←→", "Choose"), ("Enter", "Confirm"), ("Esc", "Cancel")]
        }
        Some(Modal::Help | Modal::Error { .. }) => vec![("Esc", "Close")],
        None if app.focus.is_labs() => vec![
            ("↑↓", "Lab"),
            ("Enter", "Details"),
            ("y", "Copy"),
            ("s", "Save"),
            ("Tab", "Table"),
            ("?", "Help"),
        ],
        None => vec![
            ("↑↓", "Move"),
            ("Enter", "Expand"),
            ("n", "New"),
            ("c", "Clone"),
            ("d", "Delete"),
            ("←→", "Page"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    }
}
