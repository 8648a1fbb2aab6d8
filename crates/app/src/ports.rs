//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the reconciler and
//! the adapter layer can depend on them without creating circular
//! dependencies.

pub mod command;
pub mod event_bus;
pub mod template;

pub use command::{CommandExecutor, ExecError};
pub use event_bus::EventPublisher;
pub use template::{Passthrough, RenderError, ValueRenderer};
