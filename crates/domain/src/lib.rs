//! # cmdlight-domain
//!
//! Pure domain model for the cmdlight shell-command light controller.
//!
//! ## Responsibilities
//! - Foundational types: light identifiers, error conventions, timestamps
//! - Define **colors** and the near-white clamp rule
//! - Define the **light state** snapshot (power, brightness, color, effect)
//! - Define **capability flags** derived from the configured commands
//! - Define the **command specification** (which shell commands drive a light)
//! - Define **events** (state-change records pushed to the host)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod color;
pub mod command;
pub mod error;
pub mod event;
pub mod features;
pub mod id;
pub mod state;
