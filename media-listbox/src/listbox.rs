//! The listbox component.
//!
//! `Listbox` owns the options, the selection, the roving tab stop and the
//! typeahead buffer, and routes raw input to them:
//!
//! - clicks move the tab stop and select
//! - Enter/Space select the focused option
//! - arrows, Home and End move the tab stop
//! - any other character searches by display text
//!
//! Keys are handled on release so composed shortcuts (Alt+key) never reach the
//! listbox. While the meta key is held, used keys are handled on press.
//!
//! Notifications ([`ListboxEvent`]) queue up until the host drains them with
//! [`Listbox::take_events`].

use std::time::Duration;

use crate::config::{mode_from_attribute, Attribute, ListboxConfig};
use crate::controller::{self, ControllerRegistry, ListboxId};
use crate::event::{EventResult, Key, KeyEvent, KeyInput, ListboxEvent};
use crate::focus::{implicit_start, TabStop};
use crate::lifecycle::Lifecycle;
use crate::movement::{resolve_next, Movement};
use crate::option::{position, OptionId, OptionItem};
use crate::selection::{Selection, SelectionMode};
use crate::timer::{DecayTimer, ManualTimer, TimerHandle};
use crate::typeahead::{match_key, TypeaheadBuffer};

/// Role set on attach when the host didn't provide one.
pub const LISTBOX_ROLE: &str = "listbox";

/// A selectable list of options with keyboard and pointer interaction.
///
/// Option IDs are expected to be unique.
#[derive(Debug)]
pub struct Listbox<T: DecayTimer> {
    id: ListboxId,
    options: Vec<OptionItem>,
    selection: Selection,
    tab_stop: TabStop,
    mode: SelectionMode,
    disabled: bool,
    attached: bool,
    controller: Option<String>,
    role: Option<String>,

    typeahead: TypeaheadBuffer,
    typeahead_timeout: Duration,
    timer: T,
    /// The one outstanding decay timer.
    decay: Option<TimerHandle>,

    meta_held: bool,
    /// A key press is waiting for its release.
    pending_key_up: bool,

    events: Vec<ListboxEvent>,
}

impl<T: DecayTimer> Listbox<T> {
    pub fn new(config: ListboxConfig, timer: T) -> Self {
        Self {
            id: ListboxId::new(),
            options: Vec::new(),
            selection: Selection::new(),
            tab_stop: TabStop::new(),
            mode: config.mode,
            disabled: config.disabled,
            attached: false,
            controller: config.controller,
            role: config.role,
            typeahead: TypeaheadBuffer::new(),
            typeahead_timeout: config.typeahead_timeout,
            timer,
            decay: None,
            meta_held: false,
            pending_key_up: false,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> ListboxId {
        self.id
    }

    // -------------------------------------------------------------------------
    // Options
    // -------------------------------------------------------------------------

    /// All options in display order.
    pub fn options(&self) -> &[OptionItem] {
        &self.options
    }

    pub fn option(&self, id: &OptionId) -> Option<&OptionItem> {
        self.options.iter().find(|o| &o.id == id)
    }

    /// Append an option, optionally already selected.
    pub fn push_option(&mut self, item: OptionItem, selected: bool) {
        self.insert_option(self.options.len(), item, selected);
    }

    /// Insert an option at `index` (clamped to the end).
    pub fn insert_option(&mut self, index: usize, item: OptionItem, selected: bool) {
        if selected {
            self.selection.insert(item.id.clone());
        }
        let index = index.min(self.options.len());
        self.options.insert(index, item);
    }

    /// Remove an option. Its selection and tab stop go with it.
    pub fn remove_option(&mut self, id: &OptionId) -> Option<OptionItem> {
        let index = position(&self.options, id)?;
        let item = self.options.remove(index);
        self.selection.retain(&self.options);
        self.tab_stop.retain(&self.options);
        Some(item)
    }

    /// Replace all options. Selection and tab stop survive for IDs that are
    /// still present.
    pub fn set_options(&mut self, options: Vec<OptionItem>) {
        self.options = options;
        self.selection.retain(&self.options);
        self.tab_stop.retain(&self.options);
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_multiselect(&self) -> bool {
        self.mode == SelectionMode::Multiple
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Input is only handled while attached and enabled.
    pub fn is_listening(&self) -> bool {
        self.attached && !self.disabled
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn controller(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    pub fn is_selected(&self, id: &OptionId) -> bool {
        self.option(id).is_some() && self.selection.is_selected(id)
    }

    pub fn is_tab_stop(&self, id: &OptionId) -> bool {
        self.tab_stop.is_tab_stop(id)
    }

    /// The option holding the tab stop.
    pub fn tab_stop(&self) -> Option<&OptionId> {
        self.tab_stop.current()
    }

    /// Keys typed since the last typeahead decay.
    pub fn typeahead(&self) -> &str {
        self.typeahead.as_str()
    }

    /// Keys the listbox handles itself.
    pub fn keys_used(&self) -> &'static [Key] {
        &Key::USED
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Drain queued notifications.
    pub fn take_events(&mut self) -> Vec<ListboxEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Selected options in display order.
    pub fn selected_options(&self) -> Vec<&OptionItem> {
        self.options
            .iter()
            .filter(|o| self.selection.is_selected(&o.id))
            .collect()
    }

    /// Value of the first selected option, or `""`.
    pub fn value(&self) -> &str {
        self.options
            .iter()
            .find(|o| self.selection.is_selected(&o.id))
            .map_or("", |o| o.value.as_str())
    }

    /// Select the first option with `value`. Unknown values are ignored.
    pub fn set_value(&mut self, value: &str) {
        let Some(id) = self
            .options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.id.clone())
        else {
            log::debug!("[set_value] no option with value {:?}", value);
            return;
        };
        self.select_option(&id, false);
    }

    /// Request input focus for the first selected option.
    pub fn focus(&mut self) {
        if let Some(id) = self.selected_options().first().map(|o| o.id.clone()) {
            self.events.push(ListboxEvent::Focus(id));
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    pub fn handle_key_input(&mut self, input: &KeyInput) -> EventResult {
        match input {
            KeyInput::Down(event) => self.key_down(event),
            KeyInput::Up(event) => self.key_up(event),
        }
    }

    /// Handle a key press.
    ///
    /// `Consumed` means the platform default should be suppressed; the key may
    /// still be handled only on release.
    pub fn key_down(&mut self, event: &KeyEvent) -> EventResult {
        if !self.is_listening() {
            return EventResult::Ignored;
        }

        if event.modifiers.alt {
            // Shortcut, not listbox input
            self.pending_key_up = false;
            return EventResult::Ignored;
        }

        if event.key == Key::Meta {
            self.meta_held = true;
            return EventResult::Ignored;
        }

        let used = event.key.is_used();
        if self.meta_held && used {
            self.handle_key(event);
            return EventResult::Consumed;
        }

        self.pending_key_up = true;
        if used {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// Handle a key release.
    pub fn key_up(&mut self, event: &KeyEvent) -> EventResult {
        if !self.is_listening() {
            return EventResult::Ignored;
        }

        if event.key == Key::Meta {
            self.meta_held = false;
            return EventResult::Ignored;
        }

        if event.key == Key::Escape {
            self.pending_key_up = false;
            self.cancel_decay();
            self.typeahead.clear();
            return EventResult::Ignored;
        }

        if !std::mem::take(&mut self.pending_key_up) {
            return EventResult::Ignored;
        }

        self.handle_key(event)
    }

    /// Handle a click on an option.
    pub fn click(&mut self, target: &OptionId) -> EventResult {
        if !self.is_listening() {
            return EventResult::Ignored;
        }

        let Some(index) = position(&self.options, target) else {
            return EventResult::Ignored;
        };
        if self.options[index].disabled {
            log::trace!("[click] {} is disabled", target);
            return EventResult::Ignored;
        }

        self.move_tab_stop(index);
        self.select_option(target, self.is_multiselect());
        EventResult::Consumed
    }

    /// The decay timer `handle` fired. Clears the typeahead buffer if it is
    /// the outstanding timer; stale handles are ignored.
    pub fn on_typeahead_timeout(&mut self, handle: TimerHandle) {
        if self.decay != Some(handle) {
            log::trace!("[typeahead] stale timer {:?}", handle);
            return;
        }
        self.decay = None;
        self.typeahead.clear();
    }

    fn handle_key(&mut self, event: &KeyEvent) -> EventResult {
        let movement = match event.key {
            Key::Enter | Key::Space => return self.handle_selection(event),
            Key::Down => Movement::Down,
            Key::Up => Movement::Up,
            Key::Home => Movement::Home,
            Key::End => Movement::End,
            Key::Char(c) => return self.search_option(c),
            _ => return EventResult::Ignored,
        };

        let Some(current) = self
            .target_index(event)
            .or_else(|| implicit_start(&self.options))
        else {
            return EventResult::Consumed;
        };

        if let Some(next) = resolve_next(&self.options, current, movement) {
            self.move_tab_stop(next);
        }
        EventResult::Consumed
    }

    fn handle_selection(&mut self, event: &KeyEvent) -> EventResult {
        let Some(index) = self.target_index(event) else {
            return EventResult::Consumed;
        };
        let id = self.options[index].id.clone();
        self.select_option(&id, self.is_multiselect());
        EventResult::Consumed
    }

    fn search_option(&mut self, key: char) -> EventResult {
        self.restart_decay();

        let active = self.tab_stop.current_index(&self.options);
        match match_key(&mut self.typeahead, key, active, &self.options) {
            Some(index) => {
                self.move_tab_stop(index);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// The option the event targets, falling back to the tab stop.
    fn target_index(&self, event: &KeyEvent) -> Option<usize> {
        event
            .target
            .as_ref()
            .and_then(|id| position(&self.options, id))
            .or_else(|| self.tab_stop.current_index(&self.options))
    }

    fn select_option(&mut self, target: &OptionId, toggle: bool) {
        if self.selection.select(&self.options, target, toggle, self.mode) {
            log::debug!("[select] change, value={:?}", self.value());
            self.events.push(ListboxEvent::Change);
        }
    }

    fn move_tab_stop(&mut self, index: usize) {
        let id = self.options[index].id.clone();
        self.tab_stop.move_to(&id);
        self.events.push(ListboxEvent::Focus(id));
    }

    fn restart_decay(&mut self) {
        self.cancel_decay();
        self.decay = Some(self.timer.schedule(self.typeahead_timeout));
    }

    fn cancel_decay(&mut self) {
        if let Some(handle) = self.decay.take() {
            self.timer.cancel(handle);
        }
    }

    fn reset_input(&mut self) {
        self.pending_key_up = false;
        self.meta_held = false;
    }
}

impl Listbox<ManualTimer> {
    /// Advance the manual clock and deliver any fired decay timers.
    pub fn advance_time(&mut self, by: Duration) {
        for handle in self.timer.advance(by) {
            self.on_typeahead_timeout(handle);
        }
    }
}

impl<T: DecayTimer> Lifecycle for Listbox<T> {
    fn on_attach(&mut self, controllers: &mut dyn ControllerRegistry) {
        self.attached = true;
        log::debug!("[lifecycle] attach {} disabled={}", self.id, self.disabled);

        if self.role.is_none() {
            self.role = Some(LISTBOX_ROLE.to_string());
        }

        if let Some(id) = &self.controller {
            controller::associate(controllers, id, self.id);
        }
    }

    fn on_detach(&mut self, controllers: &mut dyn ControllerRegistry) {
        self.attached = false;
        log::debug!("[lifecycle] detach {}", self.id);

        self.reset_input();
        self.cancel_decay();
        self.typeahead.clear();

        if let Some(id) = &self.controller {
            controller::unassociate(controllers, id, self.id);
        }
    }

    fn on_config_change(
        &mut self,
        key: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
        controllers: &mut dyn ControllerRegistry,
    ) {
        let attribute = match key.parse::<Attribute>() {
            Ok(attribute) => attribute,
            Err(err) => {
                log::trace!("[lifecycle] {}", err);
                return;
            }
        };
        log::debug!(
            "[lifecycle] {} {:?} -> {:?}",
            attribute,
            old_value,
            new_value
        );

        match attribute {
            Attribute::Disabled => {
                let disabled = new_value.is_some();
                if disabled != self.disabled {
                    self.disabled = disabled;
                    self.reset_input();
                }
            }
            Attribute::AriaMultiselectable => {
                self.mode = mode_from_attribute(new_value);
            }
            Attribute::MediaController => {
                if self.attached {
                    if let Some(old) = old_value {
                        controller::unassociate(controllers, old, self.id);
                    }
                    if let Some(new) = new_value {
                        controller::associate(controllers, new, self.id);
                    }
                }
                self.controller = new_value.map(str::to_string);
            }
            Attribute::Role => {
                self.role = new_value.map(str::to_string);
            }
        }
    }
}

impl<T: DecayTimer> Drop for Listbox<T> {
    fn drop(&mut self) {
        self.cancel_decay();
    }
}
