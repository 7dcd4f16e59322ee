use std::collections::HashMap;
use std::time::Duration;

use media_listbox::{
    Controller, Key, KeyEvent, Lifecycle, Listbox, ListboxConfig, ListboxId, ManualTimer,
    OptionId, OptionItem, SelectionMode, TokioDecayTimer,
};

#[derive(Debug, Default)]
struct RecordingController {
    associated: Vec<ListboxId>,
    unassociated: Vec<ListboxId>,
}

impl Controller for RecordingController {
    fn associate_element(&mut self, listbox: ListboxId) {
        self.associated.push(listbox);
    }

    fn unassociate_element(&mut self, listbox: ListboxId) {
        self.unassociated.push(listbox);
    }
}

/// A controller without either capability.
struct Inert;

impl Controller for Inert {}

fn controllers(ids: &[&str]) -> HashMap<String, RecordingController> {
    ids.iter()
        .map(|id| (id.to_string(), RecordingController::default()))
        .collect()
}

fn listbox(config: ListboxConfig) -> Listbox<ManualTimer> {
    let mut listbox = Listbox::new(config, ManualTimer::new());
    listbox.push_option(OptionItem::new("a", "A"), false);
    listbox.push_option(OptionItem::new("b", "B"), false);
    listbox
}

// ============================================================================
// Role
// ============================================================================

#[test]
fn test_attach_sets_listbox_role() {
    let mut lb = listbox(ListboxConfig::new());
    assert_eq!(lb.role(), None);

    lb.on_attach(&mut ());

    assert_eq!(lb.role(), Some("listbox"));
}

#[test]
fn test_attach_keeps_existing_role() {
    let mut lb = listbox(ListboxConfig::new().role("menu"));
    lb.on_attach(&mut ());
    assert_eq!(lb.role(), Some("menu"));
}

// ============================================================================
// Controller association
// ============================================================================

#[test]
fn test_attach_and_detach_associate() {
    let mut registry = controllers(&["player"]);
    let mut lb = listbox(ListboxConfig::new().controller("player"));

    lb.on_attach(&mut registry);
    assert_eq!(registry["player"].associated, vec![lb.id()]);

    lb.on_detach(&mut registry);
    assert_eq!(registry["player"].unassociated, vec![lb.id()]);
}

#[test]
fn test_unknown_controller_is_no_association() {
    let mut registry = controllers(&["player"]);
    let mut lb = listbox(ListboxConfig::new().controller("elsewhere"));

    lb.on_attach(&mut registry);
    lb.on_detach(&mut registry);

    assert!(registry["player"].associated.is_empty());
    assert!(registry["player"].unassociated.is_empty());
}

#[test]
fn test_controller_without_capabilities() {
    let mut registry = HashMap::from([("player".to_string(), Inert)]);
    let mut lb = listbox(ListboxConfig::new().controller("player"));

    lb.on_attach(&mut registry);
    lb.on_detach(&mut registry);

    assert!(!lb.is_attached());
}

#[test]
fn test_controller_change_moves_association() {
    let mut registry = controllers(&["first", "second"]);
    let mut lb = listbox(ListboxConfig::new().controller("first"));
    lb.on_attach(&mut registry);

    lb.on_config_change("mediacontroller", Some("first"), Some("second"), &mut registry);

    assert_eq!(registry["first"].unassociated, vec![lb.id()]);
    assert_eq!(registry["second"].associated, vec![lb.id()]);
    assert_eq!(lb.controller(), Some("second"));

    lb.on_config_change("mediacontroller", Some("second"), None, &mut registry);
    assert_eq!(registry["second"].unassociated, vec![lb.id()]);
    assert_eq!(lb.controller(), None);
}

#[test]
fn test_controller_change_while_detached_only_records() {
    let mut registry = controllers(&["player"]);
    let mut lb = listbox(ListboxConfig::new());

    lb.on_config_change("mediacontroller", None, Some("player"), &mut registry);
    assert!(registry["player"].associated.is_empty());

    lb.on_attach(&mut registry);
    assert_eq!(registry["player"].associated, vec![lb.id()]);
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_multiselect_attribute() {
    let mut lb = listbox(ListboxConfig::new());
    lb.on_attach(&mut ());

    lb.on_config_change("aria-multiselectable", None, Some("true"), &mut ());
    assert_eq!(lb.mode(), SelectionMode::Multiple);

    lb.click(&OptionId::from("a"));
    lb.click(&OptionId::from("b"));
    assert_eq!(lb.selected_options().len(), 2);

    lb.on_config_change("aria-multiselectable", Some("true"), Some("yes"), &mut ());
    assert_eq!(lb.mode(), SelectionMode::Single);

    lb.click(&OptionId::from("a"));
    assert_eq!(lb.selected_options().len(), 1);
}

#[test]
fn test_disabled_attribute_toggles_input() {
    let mut lb = listbox(ListboxConfig::new());
    lb.on_attach(&mut ());

    lb.on_config_change("disabled", None, Some(""), &mut ());
    assert!(!lb.is_listening());
    lb.click(&OptionId::from("a"));
    assert_eq!(lb.value(), "");

    lb.on_config_change("disabled", Some(""), None, &mut ());
    assert!(lb.is_listening());
    lb.click(&OptionId::from("a"));
    assert_eq!(lb.value(), "a");
}

#[test]
fn test_disabling_drops_pending_key() {
    let mut lb = listbox(ListboxConfig::new());
    lb.on_attach(&mut ());
    lb.click(&OptionId::from("a"));

    lb.key_down(&KeyEvent::new(Key::Down));
    lb.on_config_change("disabled", None, Some(""), &mut ());
    lb.on_config_change("disabled", Some(""), None, &mut ());
    lb.key_up(&KeyEvent::new(Key::Down));

    assert!(lb.is_tab_stop(&OptionId::from("a")));
}

#[test]
fn test_unknown_attribute_ignored() {
    let mut lb = listbox(ListboxConfig::new());
    lb.on_attach(&mut ());

    lb.on_config_change("data-foo", None, Some("bar"), &mut ());

    assert!(lb.is_listening());
    assert_eq!(lb.mode(), SelectionMode::Single);
}

// ============================================================================
// Tokio timer
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_tokio_timer_clears_buffer() {
    let (timer, mut fired) = TokioDecayTimer::channel();
    let mut lb = Listbox::new(ListboxConfig::new(), timer);
    lb.push_option(OptionItem::new("a", "Apple"), false);
    lb.on_attach(&mut ());

    let event = KeyEvent::new(Key::Char('a'));
    lb.key_down(&event);
    lb.key_up(&event);
    assert_eq!(lb.typeahead(), "a");

    let start = tokio::time::Instant::now();
    let handle = fired.recv().await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(500));

    lb.on_typeahead_timeout(handle);
    assert_eq!(lb.typeahead(), "");
}

#[tokio::test(start_paused = true)]
async fn test_tokio_timer_restart_fires_once() {
    let (timer, mut fired) = TokioDecayTimer::channel();
    let mut lb = Listbox::new(ListboxConfig::new(), timer);
    lb.push_option(OptionItem::new("a", "Apple"), false);
    lb.on_attach(&mut ());

    for c in ['a', 'p'] {
        let event = KeyEvent::new(Key::Char(c));
        lb.key_down(&event);
        lb.key_up(&event);
        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    let handle = fired.recv().await.unwrap();
    lb.on_typeahead_timeout(handle);
    assert_eq!(lb.typeahead(), "");

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(fired.try_recv().is_none());
}
