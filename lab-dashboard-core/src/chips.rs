//! Multi-select chip input for vulnerable applications

/// Vocabulary used until the server's options arrive.
pub const DEFAULT_VULNERABLE_APIS: [&str; 2] = ["Hackazon", "Crapi"];

/// Case-insensitive substring filter, keeping `options` order.
#[must_use]
pub fn filter_options(options: &[String], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|o| o.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// `available` and `selected` partition the vocabulary; `filtered` is the
/// part of `available` matching the current query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipInput {
    available: Vec<String>,
    selected: Vec<String>,
    query: String,
    filtered: Vec<String>,
}

impl Default for ChipInput {
    fn default() -> Self {
        Self::new(DEFAULT_VULNERABLE_APIS.iter().map(ToString::to_string).collect())
    }
}

impl ChipInput {
    #[must_use]
    pub fn new(vocabulary: Vec<String>) -> Self {
        Self::with_selection(vocabulary, Vec::new())
    }

    /// Start with `selected` already chosen. Selected items need not be part
    /// of the vocabulary.
    #[must_use]
    pub fn with_selection(vocabulary: Vec<String>, selected: Vec<String>) -> Self {
        let available: Vec<String> = vocabulary
            .into_iter()
            .filter(|v| !selected.contains(v))
            .collect();
        Self {
            filtered: available.clone(),
            available,
            selected,
            query: String::new(),
        }
    }

    /// Replace the vocabulary, keeping the current selection.
    pub fn set_vocabulary(&mut self, vocabulary: Vec<String>) {
        self.available = vocabulary
            .into_iter()
            .filter(|v| !self.selected.contains(v))
            .collect();
        self.refilter();
    }

    #[must_use]
    pub fn available(&self) -> &[String] {
        &self.available
    }

    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    #[must_use]
    pub fn filtered(&self) -> &[String] {
        &self.filtered
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        query.clone_into(&mut self.query);
        self.refilter();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_options(&self.available, &self.query);
    }

    /// Move `item` from available to selected and clear the query.
    pub fn select(&mut self, item: &str) -> bool {
        let Some(pos) = self.available.iter().position(|a| a == item) else {
            return false;
        };
        let item = self.available.remove(pos);
        self.selected.push(item);
        self.query.clear();
        self.refilter();
        true
    }

    /// Move `item` back to the end of the available list.
    pub fn remove(&mut self, item: &str) -> bool {
        let Some(pos) = self.selected.iter().position(|s| s == item) else {
            return false;
        };
        let item = self.selected.remove(pos);
        self.available.push(item);
        self.refilter();
        true
    }

    /// Remove the most recently selected chip.
    pub fn remove_last(&mut self) -> Option<String> {
        let last = self.selected.last().cloned()?;
        self.remove(&last);
        Some(last)
    }

    /// Error text when a selection is required and nothing is selected.
    #[must_use]
    pub fn required_error(&self, required: bool) -> Option<&'static str> {
        (required && self.selected.is_empty()).then_some(REQUIRED_MESSAGE)
    }

    /// Selection joined for display.
    #[must_use]
    pub fn display_value(&self) -> String {
        self.selected.join(", ")
    }
}

pub(crate) const REQUIRED_MESSAGE: &str = "At least one vulnerable application is required";
