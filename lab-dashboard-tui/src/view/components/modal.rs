//! Dialogs

use lab_dashboard_core::{CreationForm, InstanceStatus};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::model::{App, FormField, Modal};
use crate::view::theme::{Styles, colors};

/// Suggestions shown under the applications input
const MAX_SUGGESTIONS: usize = 5;

pub fn render(app: &App, frame: &mut Frame) {
    let Some(ref modal) = app.modal.active else {
        return;
    };

    match modal {
        Modal::CreateInstance {
            focus,
            suggestion,
            show_errors,
        } => render_create_instance(app, frame, *focus, *suggestion, *show_errors),
        Modal::ConfirmDelete { domain_name, focus } => {
            render_confirm_delete(frame, domain_name, *focus);
        }
        Modal::Help => render_help(frame),
        Modal::Error { title, message } => render_error(frame, title, message),
    }
}

/// Centered area of at most `width` x `height`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn dialog_block(title: String, border: Color) -> Block<'static> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(Color::Black))
}

fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    )
}

// ============ Creation form ============

fn label_line(field: FormField, focused: bool) -> Line<'static> {
    let marker = if focused { "› " } else { "  " };
    let style = if focused {
        Styles::hint_key()
    } else {
        Styles::label()
    };
    Line::styled(format!("{marker}{}", field.field().label()), style)
}

fn input_line(value: String, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::White).bg(colors().selected_bg)
    } else {
        Style::default().fg(colors().fg)
    };
    let caret = if focused { "▏" } else { "" };
    Line::from(vec![Span::raw("  "), Span::styled(format!(" {value}{caret} "), style)])
}

fn type_line(form: &CreationForm, focused: bool) -> Line<'static> {
    if form.is_type_locked() {
        return Line::from(vec![
            Span::raw("   "),
            Span::styled(form.instance_type().to_string(), Style::default().fg(colors().fg)),
            Span::styled("  (locked)", Styles::muted()),
        ]);
    }
    let arrow = if focused {
        Styles::hint_key()
    } else {
        Styles::muted()
    };
    let value = if form.instance_type().is_empty() {
        Span::styled("choose a type", Styles::muted())
    } else {
        Span::styled(
            form.instance_type().to_string(),
            Style::default()
                .fg(colors().fg)
                .add_modifier(Modifier::BOLD),
        )
    };
    Line::from(vec![
        Span::styled("  ◀ ", arrow),
        value,
        Span::styled(" ▶", arrow),
    ])
}

fn chip_lines(form: &CreationForm, focused: bool, suggestion: usize) -> Vec<Line<'static>> {
    let chips = form.chips();
    let mut spans = vec![Span::raw("  ")];
    for item in chips.selected() {
        spans.push(Span::styled(
            format!("[{item}]"),
            Style::default().fg(Color::Black).bg(colors().success),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!("{}{}", chips.query(), if focused { "▏" } else { "" }),
        Style::default().fg(colors().fg),
    ));
    if chips.selected().is_empty() && chips.query().is_empty() && !focused {
        spans.push(Span::styled("none", Styles::muted()));
    }

    let mut lines = vec![Line::from(spans)];
    if focused {
        for (i, item) in chips.filtered().iter().take(MAX_SUGGESTIONS).enumerate() {
            let style = if i == suggestion {
                Styles::selected()
            } else {
                Styles::hint_desc()
            };
            lines.push(Line::styled(format!("    {item}"), style));
        }
        if chips.filtered().len() > MAX_SUGGESTIONS {
            lines.push(Line::styled(
                format!("    … {} more", chips.filtered().len() - MAX_SUGGESTIONS),
                Styles::muted(),
            ));
        }
    }
    lines
}

fn status_lines(status: &InstanceStatus) -> Vec<Line<'static>> {
    let c = colors();
    match status {
        InstanceStatus::Form => vec![Line::from(vec![
            Span::styled("  Ctrl+S", Styles::hint_key()),
            Span::styled(" create  ", Styles::hint_desc()),
            Span::styled("Tab", Styles::hint_key()),
            Span::styled(" next field  ", Styles::hint_desc()),
            Span::styled("Esc", Styles::hint_key()),
            Span::styled(" cancel", Styles::hint_desc()),
        ])],
        InstanceStatus::Loading => vec![Line::styled(
            "  Creating instance…",
            Style::default().fg(c.warning),
        )],
        InstanceStatus::Success => vec![
            Line::styled(
                "  ✓ Instance requested",
                Style::default().fg(c.success).add_modifier(Modifier::BOLD),
            ),
            Line::styled("  Press Enter to close", Styles::muted()),
        ],
        InstanceStatus::Error { message } => vec![
            Line::styled(
                format!("  ✗ {message}"),
                Style::default().fg(c.error).add_modifier(Modifier::BOLD),
            ),
            Line::styled("  Press Enter to close", Styles::muted()),
        ],
    }
}

fn render_create_instance(
    app: &App,
    frame: &mut Frame,
    focus: FormField,
    suggestion: usize,
    show_errors: bool,
) {
    let Some(form) = app.dialog.form() else {
        return;
    };
    let status = app.dialog.status();
    let editing = status == InstanceStatus::Form;
    let validation = form.validate();

    let mut lines = vec![Line::from("")];
    for field in FormField::ORDER {
        let focused = editing && field == focus;
        lines.push(label_line(field, focused));
        match field {
            FormField::InstanceType => lines.push(type_line(form, focused)),
            FormField::Applications => {
                lines.extend(chip_lines(form, focused, suggestion));
            }
            _ => {
                if let Some(text_field) = field.text_field() {
                    lines.push(input_line(form.text(text_field).to_string(), focused));
                }
            }
        }
        if show_errors && let Some(error) = validation.error(field.field()) {
            lines.push(Line::styled(
                format!("  {error}"),
                Style::default().fg(colors().error),
            ));
        }
    }
    lines.push(Line::from(""));
    lines.extend(status_lines(&status));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_rect(60, height, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        dialog_block(format!(" {} ", form.title()), colors().border_focused),
        area,
    );
    frame.render_widget(Paragraph::new(lines), inner(area));
}

// ============ Delete confirmation ============

fn render_confirm_delete(frame: &mut Frame, domain_name: &str, focus: usize) {
    let prompt = format!("Delete \"{domain_name}\" and all of its labs?");
    let width = u16::try_from(prompt.width())
        .unwrap_or(u16::MAX)
        .saturating_add(8)
        .max(44);
    let area = centered_rect(width, 9, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        dialog_block(" Confirm Deletion ".to_string(), colors().error),
        area,
    );

    let cancel_style = if focus == 0 {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default().fg(Color::White)
    };
    let confirm_style = if focus == 1 {
        Style::default().fg(Color::Black).bg(colors().error)
    } else {
        Style::default().fg(colors().error)
    };

    let lines = vec![
        Line::from(""),
        Line::styled(format!("  {prompt}"), Style::default().fg(Color::White)),
        Line::styled("  This cannot be undone.", Styles::muted()),
        Line::from(""),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(" Cancel ", cancel_style),
            Span::raw("    "),
            Span::styled(" Delete ", confirm_style),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner(area));
}

// ============ Help ============

const HELP_KEYS: [(&str, &str); 16] = [
    ("↑↓/jk", "Move"),
    ("Enter", "Expand domain / open lab"),
    ("Tab", "Switch table / labs"),
    ("←→", "Previous / next page"),
    ("p", "Rows per page"),
    ("1-5", "Sort by column"),
    ("n", "New instance"),
    ("c", "Clone selected instance"),
    ("d", "Delete selected instance"),
    ("y", "Copy lab details"),
    ("s", "Save lab details to a file"),
    ("r", "Refresh"),
    ("Ctrl+S", "Create (in the form)"),
    ("Esc", "Close dialog"),
    ("?", "Help"),
    ("q", "Quit"),
];

fn render_help(frame: &mut Frame) {
    let height = u16::try_from(HELP_KEYS.len()).unwrap_or(u16::MAX) + 6;
    let area = centered_rect(50, height, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(dialog_block(" Help ".to_string(), Color::Cyan), area);

    let mut lines = vec![
        Line::styled(
            "Shortcuts",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];
    lines.extend(HELP_KEYS.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("  {key:<8}"), Style::default().fg(Color::Yellow)),
            Span::styled(*desc, Style::default().fg(Color::White)),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::styled("Press Esc to close the help", Styles::muted()));

    frame.render_widget(Paragraph::new(lines), inner(area));
}

// ============ Error ============

fn render_error(frame: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(56, 9, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(dialog_block(format!(" {title} "), colors().error), area);

    let lines = vec![
        Line::from(""),
        Line::styled(message.to_string(), Style::default().fg(Color::White)),
        Line::from(""),
        Line::styled("Press Enter to close", Styles::muted()),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner(area));
}
