//! Option items and their identifiers.
//!
//! Items are plain data. Whether an item is selected or holds the tab stop
//! is tracked by the listbox, keyed by [`OptionId`].

/// Stable identifier of an option within a listbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(pub String);

impl OptionId {
    /// Create a new option ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for OptionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single entry of the listbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    /// Identity used for selection, tab stop and event targeting.
    pub id: OptionId,
    /// Value reported through `Listbox::value`.
    pub value: String,
    /// Display text, matched by typeahead.
    pub text: String,
    /// Disabled options can't be clicked and are skipped by arrow keys.
    pub disabled: bool,
}

impl OptionItem {
    /// Create an enabled option. The value doubles as the ID.
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            id: OptionId::new(value.clone()),
            value,
            text: text.into(),
            disabled: false,
        }
    }

    /// Use an explicit ID instead of the value.
    pub fn id(mut self, id: impl Into<OptionId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Position of `id` in `options`.
pub(crate) fn position(options: &[OptionItem], id: &OptionId) -> Option<usize> {
    options.iter().position(|o| &o.id == id)
}
