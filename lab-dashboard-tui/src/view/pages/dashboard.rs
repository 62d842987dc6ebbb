//! Domain table

use chrono::{DateTime, Utc};
use lab_dashboard_core::{DomainRow, SortColumn, SortDirection};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::model::App;
use crate::view::theme::{Styles, colors};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let total = app.domains.rows().len();
    let title = if app.domains.is_loading() {
        format!(" Domains ({total}) · loading… ")
    } else {
        format!(" Domains ({total}) ")
    };
    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(app.focus.is_domains() && !app.modal.is_open()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    if app.domains.page_rows().is_empty() {
        render_empty(app, frame, table_area);
    } else {
        render_table(app, frame, table_area);
    }
    render_footer(app, frame, footer_area);
}

fn render_empty(app: &App, frame: &mut Frame, area: Rect) {
    let text = if app.domains.is_loading() {
        "  Loading domains…"
    } else {
        "  No instances. Press n to create one."
    };
    let content = vec![Line::from(""), Line::styled(text, Styles::muted())];
    frame.render_widget(Paragraph::new(content), area);
}

fn header_cell(app: &App, index: usize, column: SortColumn) -> Cell<'static> {
    let arrow = match app.domains.sort() {
        Some(sort) if sort.column == column => match sort.direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        },
        _ => "",
    };
    Cell::from(Line::from(vec![
        Span::styled(format!("{} ", index + 1), Styles::hint_key()),
        Span::styled(format!("{}{arrow}", column.title()), Styles::title()),
    ]))
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `"<n> days - <expiration>"`
pub fn ttl_text(row: &DomainRow) -> String {
    let unit = if row.ttl_days.abs() == 1 { "day" } else { "days" };
    format!(
        "{} {unit} - {}",
        row.ttl_days,
        format_date(row.domain.expiration_date)
    )
}

fn render_table(app: &App, frame: &mut Frame, area: Rect) {
    let header = Row::new(
        SortColumn::ALL
            .iter()
            .enumerate()
            .map(|(i, column)| header_cell(app, i, *column)),
    )
    .height(1);

    let expanded = app.domains.expanded();
    let rows = app.domains.page_rows().iter().map(|row| {
        let marker = if expanded == Some(row.name()) { "▾ " } else { "▸ " };
        Row::new(vec![
            Cell::from(format!("{marker}{}", row.name())),
            Cell::from(row.domain.instance_type.as_str()),
            Cell::from(row.domain.owner.clone()),
            Cell::from(format_date(row.domain.creation_date)),
            Cell::from(ttl_text(row)).style(Styles::ttl(row.ttl_days)),
        ])
    });

    let widths = [
        Constraint::Percentage(26),
        Constraint::Percentage(12),
        Constraint::Percentage(14),
        Constraint::Percentage(18),
        Constraint::Percentage(30),
    ];

    let highlight = if app.focus.is_domains() {
        Styles::selected()
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    };

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(highlight)
        .column_spacing(1);

    let mut state = TableState::default();
    state.select(Some(app.dashboard.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let total = app.domains.rows().len();
    let pagination = app.domains.pagination();
    let range = pagination.range(total);
    let shown = if total == 0 {
        "0 of 0".to_string()
    } else {
        format!("{}–{} of {total}", range.start + 1, range.end)
    };
    let line = Line::from(vec![
        Span::styled(
            format!(
                " Page {}/{} · {shown} · ",
                pagination.page_index() + 1,
                pagination.page_count(total)
            ),
            Styles::muted(),
        ),
        Span::styled(
            format!("{} per page", pagination.page_size()),
            Style::default().fg(colors().fg),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
