//! Listbox configuration and the attributes that drive it.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ParseAttributeError;
use crate::selection::SelectionMode;

/// How long typed keys are remembered after the last keystroke.
pub const DEFAULT_TYPEAHEAD_TIMEOUT: Duration = Duration::from_millis(500);

/// Initial listbox configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListboxConfig {
    /// Single or multiple selection.
    pub mode: SelectionMode,

    /// Ignore all input while set.
    pub disabled: bool,

    /// ID of the media controller to associate with on attach.
    pub controller: Option<String>,

    /// Explicit accessibility role. `None` gets `"listbox"` on attach.
    pub role: Option<String>,

    /// Decay delay of the typeahead buffer.
    pub typeahead_timeout: Duration,
}

impl Default for ListboxConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            disabled: false,
            controller: None,
            role: None,
            typeahead_timeout: DEFAULT_TYPEAHEAD_TIMEOUT,
        }
    }
}

impl ListboxConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow multiple selected options.
    pub fn multiselect(mut self) -> Self {
        self.mode = SelectionMode::Multiple;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set the media controller ID.
    pub fn controller(mut self, id: impl Into<String>) -> Self {
        self.controller = Some(id.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn typeahead_timeout(mut self, timeout: Duration) -> Self {
        self.typeahead_timeout = timeout;
        self
    }
}

/// Attributes observed by the listbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Presence disables input handling.
    Disabled,
    /// `"true"` enables multiple selection; anything else is single.
    AriaMultiselectable,
    /// ID of the media controller.
    MediaController,
    /// Accessibility role.
    Role,
}

impl Attribute {
    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Disabled => "disabled",
            Attribute::AriaMultiselectable => "aria-multiselectable",
            Attribute::MediaController => "mediacontroller",
            Attribute::Role => "role",
        }
    }
}

impl FromStr for Attribute {
    type Err = ParseAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(Attribute::Disabled),
            "aria-multiselectable" => Ok(Attribute::AriaMultiselectable),
            "mediacontroller" => Ok(Attribute::MediaController),
            "role" => Ok(Attribute::Role),
            _ => Err(ParseAttributeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection mode for an `aria-multiselectable` value.
pub fn mode_from_attribute(value: Option<&str>) -> SelectionMode {
    match value {
        Some("true") => SelectionMode::Multiple,
        _ => SelectionMode::Single,
    }
}
