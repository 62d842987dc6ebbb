//! Focus state

/// Panel receiving list keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPanel {
    /// Domain table
    #[default]
    Domains,
    /// Labs of the expanded domain
    Labs,
}

impl FocusPanel {
    /// Switch to the other panel
    pub fn toggle(self) -> Self {
        match self {
            Self::Domains => Self::Labs,
            Self::Labs => Self::Domains,
        }
    }

    pub fn is_domains(self) -> bool {
        matches!(self, Self::Domains)
    }

    pub fn is_labs(self) -> bool {
        matches!(self, Self::Labs)
    }
}
