//! # cmdlight-app
//!
//! Application layer — the reconciliation core and **port definitions**
//! (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (outbound ports):
//!   - `CommandExecutor` — run a configured shell command
//!   - `ValueRenderer` — transform raw command output into a canonical value
//!   - `EventPublisher` — deliver state-changed notifications to the host
//! - Provide the **Reconciler** driving each light: optimistic vs polled
//!   power state, brightness and color updates, the white clamp, effects
//! - Provide the **EffectEngine** running the cancellable color loop
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `cmdlight-domain` only (plus `tokio::sync` / `tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod effect;
pub mod event_bus;
pub mod extract;
pub mod ports;
pub mod reconciler;
