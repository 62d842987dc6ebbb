//! Event handler

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lab_dashboard_core::SortColumn;

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, ContentMessage, ModalMessage};
use crate::model::{App, Modal};

/// Wait up to `timeout` for an input event.
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // Resize redraws on the next loop iteration
        _ => AppMessage::Noop,
    }
}

fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // Release/Repeat events would double every key on Windows terminals
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    if let Some(modal) = &app.modal.active {
        return handle_modal_keys(key, modal);
    }

    if DefaultKeymap::FORCE_QUIT.matches(&key) || DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::HELP.matches(&key)
        || (key.modifiers == KeyModifiers::SHIFT && key.code == KeyCode::Char('?'))
    {
        return AppMessage::ShowHelp;
    }
    if DefaultKeymap::REFRESH.matches(&key) {
        return AppMessage::Refresh;
    }
    if DefaultKeymap::BACK.matches(&key) {
        return AppMessage::ClearStatus;
    }
    if DefaultKeymap::SWITCH_PANEL.matches(&key) {
        return AppMessage::ToggleFocus;
    }

    if let Some(msg) = handle_action_keys(key) {
        return AppMessage::Content(msg);
    }

    let msg = if app.focus.is_domains() {
        handle_domain_keys(key)
    } else {
        handle_lab_keys(key)
    };
    msg.map_or(AppMessage::Noop, AppMessage::Content)
}

/// Bindings that work whichever panel has focus.
fn handle_action_keys(key: KeyEvent) -> Option<ContentMessage> {
    if DefaultKeymap::NEW_INSTANCE.matches(&key) {
        return Some(ContentMessage::NewInstance);
    }
    if DefaultKeymap::CLONE_INSTANCE.matches(&key) {
        return Some(ContentMessage::CloneInstance);
    }
    if DefaultKeymap::DELETE.matches(&key) {
        return Some(ContentMessage::Delete);
    }
    if DefaultKeymap::NEXT_PAGE.matches(&key) || key.code == KeyCode::PageDown {
        return Some(ContentMessage::NextPage);
    }
    if DefaultKeymap::PREV_PAGE.matches(&key) || key.code == KeyCode::PageUp {
        return Some(ContentMessage::PreviousPage);
    }
    if DefaultKeymap::PAGE_SIZE.matches(&key) {
        return Some(ContentMessage::CyclePageSize);
    }
    if DefaultKeymap::COPY.matches(&key) {
        return Some(ContentMessage::CopyLab);
    }
    if DefaultKeymap::DOWNLOAD.matches(&key) {
        return Some(ContentMessage::DownloadLab);
    }
    // 1-5: sort by the n-th column
    if let (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='5')) = (key.modifiers, key.code) {
        let index = c as usize - '1' as usize;
        return SortColumn::ALL.get(index).copied().map(ContentMessage::SortBy);
    }
    None
}

fn handle_domain_keys(key: KeyEvent) -> Option<ContentMessage> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(ContentMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => Some(ContentMessage::SelectNext),
        KeyCode::Home => Some(ContentMessage::SelectFirst),
        KeyCode::End => Some(ContentMessage::SelectLast),
        KeyCode::Enter => Some(ContentMessage::Confirm),
        _ => None,
    }
}

fn handle_lab_keys(key: KeyEvent) -> Option<ContentMessage> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(ContentMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => Some(ContentMessage::SelectNext),
        KeyCode::Enter => Some(ContentMessage::Confirm),
        _ => None,
    }
}

fn handle_modal_keys(key: KeyEvent, modal: &Modal) -> AppMessage {
    // Esc and Ctrl+C always close the dialog
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (KeyModifiers::NONE, KeyCode::Esc) => {
            return AppMessage::Modal(ModalMessage::Close);
        }
        _ => {}
    }

    let msg = match modal {
        Modal::CreateInstance { .. } => handle_form_keys(key),
        Modal::ConfirmDelete { .. } => handle_confirm_keys(key),
        Modal::Help | Modal::Error { .. } => match key.code {
            KeyCode::Enter | KeyCode::Char('q') => Some(ModalMessage::Close),
            _ => None,
        },
    };
    msg.map_or(AppMessage::Noop, AppMessage::Modal)
}

fn handle_form_keys(key: KeyEvent) -> Option<ModalMessage> {
    if DefaultKeymap::SUBMIT.matches(&key) {
        return Some(ModalMessage::Submit);
    }
    match (key.modifiers, key.code) {
        (_, KeyCode::BackTab) => Some(ModalMessage::PrevField),
        (_, KeyCode::Tab) => Some(ModalMessage::NextField),
        (_, KeyCode::Enter) => Some(ModalMessage::Confirm),
        (_, KeyCode::Backspace) => Some(ModalMessage::Backspace),
        (_, KeyCode::Left) => Some(ModalMessage::Left),
        (_, KeyCode::Right) => Some(ModalMessage::Right),
        (_, KeyCode::Up) => Some(ModalMessage::Up),
        (_, KeyCode::Down) => Some(ModalMessage::Down),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            Some(ModalMessage::Input(c))
        }
        _ => None,
    }
}

fn handle_confirm_keys(key: KeyEvent) -> Option<ModalMessage> {
    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Tab => Some(ModalMessage::Right),
        KeyCode::Enter => Some(ModalMessage::Confirm),
        KeyCode::Char('y') => Some(ModalMessage::Input('y')),
        KeyCode::Char('n') => Some(ModalMessage::Close),
        _ => None,
    }
}
