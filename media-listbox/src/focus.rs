//! Roving tab stop.
//!
//! Exactly one option is the keyboard tab stop once the stop has been set;
//! before the first interaction none is.

use crate::option::{position, OptionId, OptionItem};

/// Tab stop manager
#[derive(Debug, Default)]
pub struct TabStop {
    /// Option currently holding the tab stop
    current: Option<OptionId>,
}

impl TabStop {
    pub fn new() -> Self {
        Self::default()
    }

    /// The option holding the tab stop, if any.
    pub fn current(&self) -> Option<&OptionId> {
        self.current.as_ref()
    }

    /// Check if `id` is the tab stop.
    pub fn is_tab_stop(&self, id: &OptionId) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Move the tab stop to `target`. The caller requests input focus.
    pub fn move_to(&mut self, target: &OptionId) {
        log::debug!(
            "[tab_stop] {:?} -> {}",
            self.current.as_ref().map(OptionId::as_str),
            target
        );
        self.current = Some(target.clone());
    }

    /// Position of the tab stop, `None` when unset or no longer present.
    pub fn current_index(&self, options: &[OptionItem]) -> Option<usize> {
        self.current.as_ref().and_then(|id| position(options, id))
    }

    /// Forget the tab stop if its option was removed.
    pub fn retain(&mut self, options: &[OptionItem]) {
        if self.current_index(options).is_none() {
            self.current = None;
        }
    }
}

/// Starting point for navigation when no option holds the tab stop.
pub fn implicit_start(options: &[OptionItem]) -> Option<usize> {
    options.iter().position(|o| !o.disabled)
}
