//! Cursor state of the dashboard page

/// Cursors into the current page of the domain table and into the labs of
/// the expanded domain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DashboardState {
    /// Row index within the current page
    pub selected: usize,
    /// Lab index within the expanded domain
    pub lab_selected: usize,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub fn lab_previous(&mut self) {
        self.lab_selected = self.lab_selected.saturating_sub(1);
    }

    pub fn lab_next(&mut self, len: usize) {
        if self.lab_selected + 1 < len {
            self.lab_selected += 1;
        }
    }

    /// Keep both cursors inside lists that may have shrunk.
    pub fn clamp(&mut self, rows: usize, labs: usize) {
        self.selected = self.selected.min(rows.saturating_sub(1));
        self.lab_selected = self.lab_selected.min(labs.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_in_bounds() {
        let mut state = DashboardState::new();
        state.select_previous();
        assert_eq!(state.selected, 0);
        state.select_next(2);
        state.select_next(2);
        assert_eq!(state.selected, 1);
        state.select_last(5);
        assert_eq!(state.selected, 4);
        state.clamp(3, 0);
        assert_eq!(state.selected, 2);
        state.clamp(0, 0);
        assert_eq!(state.selected, 0);
    }
}
