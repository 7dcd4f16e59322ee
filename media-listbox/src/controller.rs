//! Association with an external media controller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Unique identifier for a listbox instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListboxId(usize);

impl ListboxId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ListboxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__listbox_{}", self.0)
    }
}

/// A media controller that listboxes can attach to.
///
/// Both capabilities are optional; controllers that don't care keep the
/// default no-ops.
pub trait Controller {
    fn associate_element(&mut self, _listbox: ListboxId) {}

    fn unassociate_element(&mut self, _listbox: ListboxId) {}
}

/// Resolves controller IDs, like a document's `getElementById`.
pub trait ControllerRegistry {
    fn controller_mut(&mut self, id: &str) -> Option<&mut dyn Controller>;
}

/// No controllers at all.
impl ControllerRegistry for () {
    fn controller_mut(&mut self, _id: &str) -> Option<&mut dyn Controller> {
        None
    }
}

impl<C: Controller> ControllerRegistry for HashMap<String, C> {
    fn controller_mut(&mut self, id: &str) -> Option<&mut dyn Controller> {
        self.get_mut(id).map(|c| c as &mut dyn Controller)
    }
}

/// Associate `listbox` with the controller named `id`, if it exists.
pub(crate) fn associate(registry: &mut dyn ControllerRegistry, id: &str, listbox: ListboxId) {
    match registry.controller_mut(id) {
        Some(controller) => {
            log::debug!("[controller] associate {} with {:?}", listbox, id);
            controller.associate_element(listbox);
        }
        None => log::debug!("[controller] no controller {:?} for {}", id, listbox),
    }
}

/// Undo [`associate`].
pub(crate) fn unassociate(registry: &mut dyn ControllerRegistry, id: &str, listbox: ListboxId) {
    if let Some(controller) = registry.controller_mut(id) {
        log::debug!("[controller] unassociate {} from {:?}", listbox, id);
        controller.unassociate_element(listbox);
    }
}
