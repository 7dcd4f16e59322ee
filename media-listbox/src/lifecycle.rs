//! Lifecycle hooks invoked by the host.
//!
//! The host owns the listbox and tells it when it enters or leaves the
//! environment and when one of its attributes changes. Controller lookups go
//! through the registry passed to each hook.

use crate::controller::ControllerRegistry;

/// Host-driven lifecycle of a component.
pub trait Lifecycle {
    /// The component entered its environment.
    fn on_attach(&mut self, controllers: &mut dyn ControllerRegistry);

    /// The component left its environment. Pending timers must be cancelled.
    fn on_detach(&mut self, controllers: &mut dyn ControllerRegistry);

    /// An attribute changed. `None` means absent.
    fn on_config_change(
        &mut self,
        key: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
        controllers: &mut dyn ControllerRegistry,
    );
}
