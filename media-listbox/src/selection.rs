//! Selection state for the listbox.
//!
//! Selection is tracked by [`OptionId`] so it stays stable while options are
//! added or removed. Order is always derived from the option collection, never
//! from insertion into the set.

use std::collections::HashSet;

use crate::option::{OptionId, OptionItem};

/// Selection mode, derived from the `aria-multiselectable` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Selecting an option clears every other one
    #[default]
    Single,
    /// Any number of options can be selected
    Multiple,
}

/// ID-based selection state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<OptionId>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &OptionId) -> bool {
        self.selected.contains(id)
    }

    /// Selected IDs in document order. Stale IDs are skipped.
    pub fn snapshot(&self, options: &[OptionItem]) -> Vec<OptionId> {
        options
            .iter()
            .filter(|o| self.selected.contains(&o.id))
            .map(|o| o.id.clone())
            .collect()
    }

    /// Mark an ID selected without any exclusivity or change tracking.
    /// Used when options are created already selected.
    pub fn insert(&mut self, id: OptionId) {
        self.selected.insert(id);
    }

    /// Clear all selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop IDs that are no longer part of `options`.
    pub fn retain(&mut self, options: &[OptionItem]) {
        self.selected.retain(|id| options.iter().any(|o| &o.id == id));
    }

    /// Select `target`, toggling it when `toggle` is set.
    ///
    /// In single mode every other option is deselected first, toggle or not.
    /// Returns true when the ordered set of selected options changed, which is
    /// when a `change` notification is due.
    pub fn select(
        &mut self,
        options: &[OptionItem],
        target: &OptionId,
        toggle: bool,
        mode: SelectionMode,
    ) -> bool {
        let before = self.snapshot(options);

        if mode == SelectionMode::Single {
            self.selected.retain(|id| id == target);
        }

        if toggle {
            if !self.selected.remove(target) {
                self.selected.insert(target.clone());
            }
        } else {
            self.selected.insert(target.clone());
        }

        let after = self.snapshot(options);
        log::trace!(
            "[select] target={} toggle={} mode={:?} before={:?} after={:?}",
            target,
            toggle,
            mode,
            before,
            after
        );
        before != after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<OptionItem> {
        vec![
            OptionItem::new("a", "A"),
            OptionItem::new("b", "B"),
            OptionItem::new("c", "C"),
        ]
    }

    #[test]
    fn single_mode_keeps_one() {
        let opts = options();
        let mut sel = Selection::new();
        assert!(sel.select(&opts, &"a".into(), false, SelectionMode::Single));
        assert!(sel.select(&opts, &"c".into(), false, SelectionMode::Single));
        assert_eq!(sel.snapshot(&opts), vec![OptionId::from("c")]);
    }

    #[test]
    fn reselecting_sole_option_is_not_a_change() {
        let opts = options();
        let mut sel = Selection::new();
        sel.select(&opts, &"b".into(), false, SelectionMode::Single);
        assert!(!sel.select(&opts, &"b".into(), false, SelectionMode::Single));
    }

    #[test]
    fn single_mode_toggle_still_clears_others() {
        let opts = options();
        let mut sel = Selection::new();
        sel.insert("a".into());
        sel.insert("b".into());
        assert!(sel.select(&opts, &"c".into(), true, SelectionMode::Single));
        assert_eq!(sel.snapshot(&opts), vec![OptionId::from("c")]);

        // Toggling the sole selection off leaves nothing selected
        assert!(sel.select(&opts, &"c".into(), true, SelectionMode::Single));
        assert!(sel.snapshot(&opts).is_empty());
    }

    #[test]
    fn multiple_mode_toggle_flips() {
        let opts = options();
        let mut sel = Selection::new();
        assert!(sel.select(&opts, &"b".into(), true, SelectionMode::Multiple));
        assert!(sel.select(&opts, &"a".into(), true, SelectionMode::Multiple));
        assert_eq!(
            sel.snapshot(&opts),
            vec![OptionId::from("a"), OptionId::from("b")]
        );
        assert!(sel.select(&opts, &"b".into(), true, SelectionMode::Multiple));
        assert_eq!(sel.snapshot(&opts), vec![OptionId::from("a")]);
    }

    #[test]
    fn retain_prunes_removed_ids() {
        let mut opts = options();
        let mut sel = Selection::new();
        sel.insert("b".into());
        opts.remove(1);
        sel.retain(&opts);
        assert!(!sel.is_selected(&"b".into()));
    }
}
