//! Type-to-search.
//!
//! Keystrokes accumulate in a [`TypeaheadBuffer`] until the decay timer
//! clears it. Each keystroke resolves the buffer to an option, preferring
//! matches at or after the active option and wrapping to the top afterwards.
//! Pressing the same key repeatedly cycles through the options starting with
//! that key even once the accumulated buffer ("ccc") stops matching.

use std::ops::Range;

use crate::option::OptionItem;

/// Keys typed since the last decay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeaheadBuffer {
    chars: String,
}

impl TypeaheadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn push(&mut self, key: char) {
        self.chars.push(key);
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    /// True when every accumulated key is `key`.
    fn is_repeat_of(&self, key: char) -> bool {
        self.chars.chars().all(|c| c == key)
    }
}

/// Append `key` to `buffer` and find the option it selects.
///
/// `active` is the position of the tab stop. Restarting the decay timer is up
/// to the caller.
pub fn match_key(
    buffer: &mut TypeaheadBuffer,
    key: char,
    active: Option<usize>,
    options: &[OptionItem],
) -> Option<usize> {
    buffer.push(key);
    let repeated = buffer.is_repeat_of(key);

    // The active option stays eligible while refining a prefix. A repeated key
    // shifts both windows by one, so the option just before it is skipped too.
    let (after, before) = match active.filter(|&i| i < options.len()) {
        Some(active) if repeated => (active + 1..options.len(), 0..active.saturating_sub(1)),
        Some(active) => (active..options.len(), 0..active),
        None => (0..options.len(), 0..0),
    };

    let prefix = buffer.as_str().to_lowercase();
    let matches_prefix = |o: &OptionItem| o.text.to_lowercase().starts_with(&prefix);
    let matches_key = |o: &OptionItem| starts_with_key(&o.text, key);

    let mut found = first_in(options, after.clone(), matches_prefix)
        .or_else(|| first_in(options, before.clone(), matches_prefix));
    if found.is_none() && repeated {
        found = first_in(options, after, matches_key)
            .or_else(|| first_in(options, before, matches_key));
    }

    log::debug!(
        "[typeahead] buffer={:?} repeated={} active={:?} found={:?}",
        buffer.as_str(),
        repeated,
        active,
        found
    );
    found
}

fn first_in(
    options: &[OptionItem],
    mut range: Range<usize>,
    pred: impl Fn(&OptionItem) -> bool,
) -> Option<usize> {
    range.find(|&i| pred(&options[i]))
}

fn starts_with_key(text: &str, key: char) -> bool {
    text.chars()
        .next()
        .is_some_and(|first| first.to_lowercase().eq(key.to_lowercase()))
}
