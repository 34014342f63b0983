#![forbid(unsafe_code)]

//! Per-run visitor state.

/// What the page knows about the current visitor. Lives for one run;
/// nothing is persisted to disk.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    visitor_name: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the visitor's name. Whitespace is trimmed; an empty or
    /// blank name leaves the previous one in place.
    pub fn set_name(&mut self, name: &str) {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.visitor_name = Some(trimmed.to_string());
        }
    }

    /// Name to greet with, falling back to a generic visitor.
    pub fn display_name(&self) -> &str {
        self.visitor_name.as_deref().unwrap_or("Visitor")
    }

    pub fn has_name(&self) -> bool {
        self.visitor_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_does_not_overwrite() {
        let mut state = SessionState::new();
        state.set_name("Budi");
        state.set_name("   ");
        assert_eq!(state.display_name(), "Budi");
    }

    #[test]
    fn name_is_trimmed() {
        let mut state = SessionState::new();
        state.set_name("  Sari  ");
        assert_eq!(state.display_name(), "Sari");
        assert!(state.has_name());
    }

    #[test]
    fn default_greets_a_visitor() {
        assert_eq!(SessionState::new().display_name(), "Visitor");
        assert!(!SessionState::new().has_name());
    }
}
