//! Labs of the expanded domain

use chrono::{DateTime, Utc};
use lab_dashboard_client::{Domain, Lab};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::model::App;
use crate::view::theme::{Styles, colors};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus.is_labs() && !app.modal.is_open();
    let block = Block::default()
        .title(" Labs ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(focused));

    let Some(row) = app.expanded_row() else {
        let hint = vec![
            Line::from(""),
            Line::styled("  Select a domain and press Enter", Styles::muted()),
            Line::styled("  to see its labs.", Styles::muted()),
        ];
        frame.render_widget(Paragraph::new(hint).block(block), area);
        return;
    };

    let mut lines = domain_summary(&row.domain);
    lines.push(Line::from(""));

    if row.domain.labs.is_empty() {
        lines.push(Line::styled("  No labs provisioned yet.", Styles::muted()));
    }

    for (i, info) in row.domain.labs.iter().enumerate() {
        let open = app.domains.is_lab_open(&info.name);
        let marker = if open { "▾" } else { "▸" };
        let style = if focused && i == app.dashboard.lab_selected {
            Styles::selected()
        } else {
            Styles::title()
        };
        lines.push(Line::styled(format!(" {marker} {}", info.name), style));

        if !open {
            continue;
        }
        match app.domains.lab(&info.name) {
            Some(lab) => lines.extend(lab_lines(lab)),
            None if app.domains.is_lab_pending(&info.name) => {
                lines.push(Line::styled("     Loading…", Styles::muted()));
            }
            None => lines.push(Line::styled("     Details unavailable", Styles::muted())),
        }
    }

    if !row.domain.labs.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  y", Styles::hint_key()),
            Span::styled(" copy · ", Styles::hint_desc()),
            Span::styled("s", Styles::hint_key()),
            Span::styled(" save", Styles::hint_desc()),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn field<'a>(label: &'a str, value: impl Into<String>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {label:<12}"), Styles::label()),
        Span::styled(value.into(), Style::default().fg(colors().fg)),
    ])
}

fn domain_summary(domain: &Domain) -> Vec<Line<'static>> {
    let apps = if domain.vulnerable_applications.is_empty() {
        "-".to_string()
    } else {
        domain.vulnerable_applications.join(", ")
    };
    vec![
        Line::styled(format!(" {}", domain.domain_name), Styles::title()),
        field("Type", domain.instance_type.as_str()),
        field("Amount", domain.amount.to_string()),
        field("Apps", apps),
    ]
}

fn time(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn lab_lines(lab: &Lab) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for app in &lab.vulnerable_applications {
        lines.push(field("   App", format!("{}  {}", app.name, app.url)));
    }
    lines.push(field("   Salt user", lab.salt_login_details.username.clone()));
    lines.push(field("   Salt pass", lab.salt_login_details.password.clone()));
    lines.push(field("   AWS url", lab.aws_console_login.url.clone()));
    lines.push(field("   AWS user", lab.aws_console_login.username.clone()));
    lines.push(field("   AWS pass", lab.aws_console_login.password.clone()));
    if let Some(url) = &lab.traffic_generator_url {
        lines.push(field("   Traffic", url.clone()));
    }
    lines.push(field("   Generated", time(lab.generation_time)));
    lines.push(field("   Verified", time(lab.verification_time)));
    lines
}
