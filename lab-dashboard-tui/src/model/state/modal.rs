//! Modal / dialog state

use lab_dashboard_core::{Field, TextField};

/// Input focus inside the creation form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    DomainName,
    Amount,
    InstanceType,
    TtlInDays,
    Applications,
}

impl FormField {
    pub const ORDER: [Self; 5] = [
        Self::DomainName,
        Self::Amount,
        Self::InstanceType,
        Self::TtlInDays,
        Self::Applications,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    /// The form's text field behind this input, if it is a plain text input.
    pub fn text_field(self) -> Option<TextField> {
        match self {
            Self::DomainName => Some(TextField::DomainName),
            Self::Amount => Some(TextField::Amount),
            Self::TtlInDays => Some(TextField::TtlInDays),
            Self::InstanceType | Self::Applications => None,
        }
    }

    /// Validation field reported for this input.
    pub fn field(self) -> Field {
        match self {
            Self::DomainName => Field::DomainName,
            Self::Amount => Field::Amount,
            Self::InstanceType => Field::InstanceType,
            Self::TtlInDays => Field::TtlInDays,
            Self::Applications => Field::VulnerableApplications,
        }
    }

    /// Whether only digits are accepted.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Amount | Self::TtlInDays)
    }
}

/// Dialog kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// New or cloned instance. The form itself lives in the creation dialog.
    CreateInstance {
        focus: FormField,
        /// Highlighted entry of the filtered application suggestions
        suggestion: usize,
        /// Show field errors (after the first submit attempt)
        show_errors: bool,
    },
    /// Confirm deletion of a domain
    ConfirmDelete {
        domain_name: String,
        /// 0 = cancel, 1 = delete
        focus: usize,
    },
    Help,
    Error {
        title: String,
        message: String,
    },
}

/// Active dialog
#[derive(Debug, Default)]
pub struct ModalState {
    pub active: Option<Modal>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_create_instance(&self) -> bool {
        matches!(self.active, Some(Modal::CreateInstance { .. }))
    }

    pub fn show_create_instance(&mut self) {
        self.active = Some(Modal::CreateInstance {
            focus: FormField::DomainName,
            suggestion: 0,
            show_errors: false,
        });
    }

    pub fn show_confirm_delete(&mut self, domain_name: &str) {
        self.active = Some(Modal::ConfirmDelete {
            domain_name: domain_name.to_string(),
            focus: 0,
        });
    }

    pub fn show_help(&mut self) {
        self.active = Some(Modal::Help);
    }

    pub fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.active = Some(Modal::Error {
            title: title.into(),
            message: message.into(),
        });
    }
}
