pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod focus;
pub mod lifecycle;
pub mod listbox;
pub mod movement;
pub mod option;
pub mod selection;
pub mod timer;
pub mod typeahead;

pub use config::{Attribute, ListboxConfig, DEFAULT_TYPEAHEAD_TIMEOUT};
pub use controller::{Controller, ControllerRegistry, ListboxId};
pub use error::{ParseAttributeError, ParseKeyError, TimerError};
pub use event::{EventResult, Key, KeyEvent, KeyInput, ListboxEvent, Modifiers};
pub use focus::TabStop;
pub use lifecycle::Lifecycle;
pub use listbox::{Listbox, LISTBOX_ROLE};
pub use movement::{resolve_next, Movement};
pub use option::{OptionId, OptionItem};
pub use selection::{Selection, SelectionMode};
pub use timer::{DecayTimer, FiredTimers, ManualTimer, TimerHandle, TokioDecayTimer};
pub use typeahead::{match_key, TypeaheadBuffer};
