pub const SEARCH_PLACEHOLDER: &str = "Search by name, job title, or status...";

/// Free-text query box. Every change is handed back to the caller immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBar {
    query: String,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the query and returns it for the parent.
    pub fn input(&mut self, value: impl Into<String>) -> &str {
        self.query = value.into();
        &self.query
    }

    pub fn clear(&mut self) -> &str {
        self.query.clear();
        &self.query
    }

    /// The clear action is offered only while there is something to clear.
    pub fn can_clear(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn render(&self) -> String {
        if self.query.is_empty() {
            format!("Search: [{}]", SEARCH_PLACEHOLDER)
        } else {
            format!("Search: [{}] (clear)", self.query)
        }
    }
}
