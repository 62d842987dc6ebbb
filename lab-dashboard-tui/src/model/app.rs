//! Application state

use std::time::Instant;

use lab_dashboard_client::LabInfo;
use lab_dashboard_core::{CreationDialog, DomainListController, DomainRow, FormOptions};

use super::{DashboardState, FocusPanel, ModalState};
use crate::backend::CoreService;

/// Tone of a status bar message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

/// Status bar message, optionally expiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
    pub expires_at: Option<Instant>,
}

pub struct App {
    pub should_quit: bool,

    pub focus: FocusPanel,

    pub backend: CoreService,

    /// Domain table, row expansion and lab details
    pub domains: DomainListController,

    /// Creation form session
    pub dialog: CreationDialog,

    /// Type and application choices for the form
    pub options: FormOptions,

    pub dashboard: DashboardState,

    pub modal: ModalState,

    pub status_message: Option<StatusMessage>,
}

impl App {
    pub fn new(backend: CoreService) -> Self {
        Self {
            should_quit: false,
            focus: FocusPanel::default(),
            domains: backend.domain_list(),
            dialog: backend.creation_dialog(),
            options: backend.form_options(),
            backend,
            dashboard: DashboardState::new(),
            modal: ModalState::new(),
            status_message: None,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: Tone) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            tone,
            expires_at: None,
        });
    }

    /// Message that disappears once `expires_at` has passed.
    pub fn flash_status(&mut self, text: impl Into<String>, tone: Tone, expires_at: Instant) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            tone,
            expires_at: Some(expires_at),
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Row under the cursor on the current page.
    pub fn selected_row(&self) -> Option<&DomainRow> {
        self.domains.page_rows().get(self.dashboard.selected)
    }

    /// Row whose labs are shown.
    pub fn expanded_row(&self) -> Option<&DomainRow> {
        self.domains.expanded().and_then(|name| self.domains.find(name))
    }

    pub fn expanded_labs(&self) -> &[LabInfo] {
        self.expanded_row()
            .map_or(&[], |row| row.domain.labs.as_slice())
    }

    /// Lab under the cursor in the labs panel.
    pub fn selected_lab(&self) -> Option<&LabInfo> {
        self.expanded_labs().get(self.dashboard.lab_selected)
    }
}
