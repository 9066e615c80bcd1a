//! Prompt styles.
//!
//! A style is an opaque `{name, instruction}` record. The store is an
//! ordinary value owned by whoever needs it; changes are announced to
//! listeners registered with [`StyleStore::subscribe`].

use serde::{Deserialize, Serialize};

use crate::signal::{Signal, SubscriptionId};

/// A named rewrite instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptStyle {
    pub name: String,
    pub instruction: String,
}

impl PromptStyle {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
        }
    }
}

/// The built-in styles; the first one is the protected default
pub fn builtin_styles() -> Vec<PromptStyle> {
    vec![
        PromptStyle::new(
            "Default",
            "Use a neutral, clear style that balances structure and brevity.",
        ),
        PromptStyle::new(
            "Concise",
            "Make the rewritten prompt as concise and minimal as possible while keeping all \
             important constraints and requirements.",
        ),
        PromptStyle::new(
            "Detailed",
            "Expand structure and clarify assumptions. Prefer detailed bullet points, explicit \
             constraints, and step-by-step tasks that make the prompt easy for an AI to follow.",
        ),
        PromptStyle::new(
            "Code Helper",
            "Optimize the prompt for coding help. Emphasize clear input/output expectations, \
             examples, edge cases, and any specific libraries, versions, or platforms involved.",
        ),
    ]
}

/// Ordered, mutable list of styles with change notification
#[derive(Debug)]
pub struct StyleStore {
    styles: Vec<PromptStyle>,
    changed: Signal<Vec<PromptStyle>>,
}

impl StyleStore {
    /// Store seeded with the built-in styles
    pub fn new() -> Self {
        Self::with_styles(Vec::new())
    }

    /// Store seeded with `styles`; an empty list falls back to the built-ins
    pub fn with_styles(styles: Vec<PromptStyle>) -> Self {
        let styles = if styles.is_empty() {
            builtin_styles()
        } else {
            styles
        };
        Self {
            styles,
            changed: Signal::new(),
        }
    }

    pub fn styles(&self) -> &[PromptStyle] {
        &self.styles
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&PromptStyle> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Instruction for `name`, or the default style's instruction if unknown
    pub fn instruction_for(&self, name: &str) -> &str {
        self.find(name)
            .or_else(|| self.styles.first())
            .map(|s| s.instruction.as_str())
            .unwrap_or_default()
    }

    /// Register a listener called with the full list after every change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Vec<PromptStyle>) + 'static,
    {
        self.changed.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changed.unsubscribe(id)
    }

    pub fn add(&mut self, style: PromptStyle) {
        log::info!("Adding style '{}'", style.name);
        self.styles.push(style);
        self.notify();
    }

    /// Replace the style at `index`; returns false if out of range
    pub fn update(&mut self, index: usize, style: PromptStyle) -> bool {
        match self.styles.get_mut(index) {
            Some(slot) => {
                log::info!("Updating style {} ('{}' -> '{}')", index, slot.name, style.name);
                *slot = style;
                self.notify();
                true
            }
            None => {
                log::warn!("No style at index {}", index);
                false
            }
        }
    }

    /// Remove the style at `index`. The first style cannot be removed.
    pub fn remove(&mut self, index: usize) -> Option<PromptStyle> {
        if index == 0 {
            log::warn!("Refusing to remove the default style");
            return None;
        }
        if index >= self.styles.len() {
            log::warn!("No style at index {}", index);
            return None;
        }
        let removed = self.styles.remove(index);
        log::info!("Removed style '{}'", removed.name);
        self.notify();
        Some(removed)
    }

    fn notify(&mut self) {
        self.changed.emit(&self.styles);
    }
}

impl Default for StyleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_seeded_with_builtins() {
        let store = StyleStore::new();
        let names: Vec<&str> = store.styles().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Default", "Concise", "Detailed", "Code Helper"]);
    }

    #[test]
    fn test_add_update_remove_notify() {
        let mut store = StyleStore::new();
        let lengths = Rc::new(RefCell::new(Vec::new()));
        let sink = lengths.clone();
        store.subscribe(move |styles| sink.borrow_mut().push(styles.len()));

        store.add(PromptStyle::new("Pirate", "Talk like a pirate."));
        assert!(store.update(4, PromptStyle::new("Pirate", "Arr.")));
        assert_eq!(store.remove(4).map(|s| s.instruction), Some("Arr.".to_string()));

        assert_eq!(*lengths.borrow(), vec![5, 5, 4]);
    }

    #[test]
    fn test_default_style_is_protected() {
        let mut store = StyleStore::new();
        assert!(store.remove(0).is_none());
        assert!(store.remove(99).is_none());
        assert!(!store.update(99, PromptStyle::new("x", "y")));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_instruction_lookup_falls_back_to_default() {
        let store = StyleStore::new();
        assert!(store.instruction_for("Concise").starts_with("Make the rewritten prompt"));
        assert_eq!(
            store.instruction_for("Unknown"),
            store.instruction_for("Default")
        );
    }

    #[test]
    fn test_empty_seed_uses_builtins() {
        let store = StyleStore::with_styles(Vec::new());
        assert_eq!(store.len(), 4);

        let custom = StyleStore::with_styles(vec![PromptStyle::new("Only", "Just this.")]);
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.instruction_for("Missing"), "Just this.");
    }
}
