//! Key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    /// Whether `key` triggers this binding
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.modifiers == self.modifiers && key.code == self.code
    }
}

pub struct DefaultKeymap;

impl DefaultKeymap {
    // Global
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));
    pub const HELP: KeyBinding = KeyBinding::key(KeyCode::Char('?'));
    pub const REFRESH: KeyBinding = KeyBinding::key(KeyCode::Char('r'));
    pub const BACK: KeyBinding = KeyBinding::key(KeyCode::Esc);
    pub const SWITCH_PANEL: KeyBinding = KeyBinding::key(KeyCode::Tab);

    // Domain actions
    pub const NEW_INSTANCE: KeyBinding = KeyBinding::key(KeyCode::Char('n'));
    pub const CLONE_INSTANCE: KeyBinding = KeyBinding::key(KeyCode::Char('c'));
    pub const DELETE: KeyBinding = KeyBinding::key(KeyCode::Char('d'));

    // Paging
    pub const NEXT_PAGE: KeyBinding = KeyBinding::key(KeyCode::Right);
    pub const PREV_PAGE: KeyBinding = KeyBinding::key(KeyCode::Left);
    pub const PAGE_SIZE: KeyBinding = KeyBinding::key(KeyCode::Char('p'));

    // Lab actions
    pub const COPY: KeyBinding = KeyBinding::key(KeyCode::Char('y'));
    pub const DOWNLOAD: KeyBinding = KeyBinding::key(KeyCode::Char('s'));

    // Forms
    pub const SUBMIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('s'));
}
