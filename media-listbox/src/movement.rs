//! Movement between options.

use crate::option::OptionItem;

/// A navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Down,
    Up,
    Home,
    End,
}

/// Compute the option to move to from `current`.
///
/// Up and Down step to the adjacent option, skipping one disabled option.
/// They never wrap and never land on a disabled option. Home and End jump to
/// the first and last option whether or not it is disabled.
///
/// `None` means there is nowhere to go and nothing should change.
pub fn resolve_next(options: &[OptionItem], current: usize, movement: Movement) -> Option<usize> {
    let next = match movement {
        Movement::Down => step(options, current, 1),
        Movement::Up => step(options, current, -1),
        Movement::Home => (!options.is_empty()).then_some(0),
        Movement::End => options.len().checked_sub(1),
    };
    log::trace!("[resolve_next] current={} movement={:?} next={:?}", current, movement, next);
    next
}

fn step(options: &[OptionItem], from: usize, delta: isize) -> Option<usize> {
    let adjacent = offset(options, from, delta)?;
    if !options[adjacent].disabled {
        return Some(adjacent);
    }
    let further = offset(options, adjacent, delta)?;
    (!options[further].disabled).then_some(further)
}

fn offset(options: &[OptionItem], from: usize, delta: isize) -> Option<usize> {
    from.checked_add_signed(delta).filter(|&i| i < options.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(disabled: &[bool]) -> Vec<OptionItem> {
        disabled
            .iter()
            .enumerate()
            .map(|(i, &d)| OptionItem::new(format!("v{i}"), format!("Option {i}")).disabled(d))
            .collect()
    }

    #[test]
    fn arrows_stop_at_boundaries() {
        let options = opts(&[false, false, false]);
        assert_eq!(resolve_next(&options, 0, Movement::Up), None);
        assert_eq!(resolve_next(&options, 2, Movement::Down), None);
        assert_eq!(resolve_next(&options, 1, Movement::Down), Some(2));
        assert_eq!(resolve_next(&options, 1, Movement::Up), Some(0));
    }

    #[test]
    fn arrows_skip_one_disabled() {
        let options = opts(&[false, true, false]);
        assert_eq!(resolve_next(&options, 0, Movement::Down), Some(2));
        assert_eq!(resolve_next(&options, 2, Movement::Up), Some(0));
    }

    #[test]
    fn arrows_never_land_on_disabled() {
        let options = opts(&[false, true, true, false]);
        assert_eq!(resolve_next(&options, 0, Movement::Down), None);

        // Disabled last option: skipping it runs off the end
        let options = opts(&[false, true]);
        assert_eq!(resolve_next(&options, 0, Movement::Down), None);
    }

    #[test]
    fn home_and_end_ignore_disabled() {
        let options = opts(&[true, false, false, true]);
        assert_eq!(resolve_next(&options, 2, Movement::Home), Some(0));
        assert_eq!(resolve_next(&options, 1, Movement::End), Some(3));
    }

    #[test]
    fn empty_collection_has_no_target() {
        assert_eq!(resolve_next(&[], 0, Movement::Home), None);
        assert_eq!(resolve_next(&[], 0, Movement::End), None);
        assert_eq!(resolve_next(&[], 0, Movement::Down), None);
    }
}
