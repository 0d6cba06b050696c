//! # Shared Types Crate
//!
//! Types shared between the host state machine and the transition monitor.
//!
//! ## Design Principles
//!
//! - **Host owns the state machine**: the host detects and commits transitions,
//!   then calls [`TransitionHook::on_transition`] exactly once per commit on its
//!   own execution context.
//! - **No re-entrancy**: a hook never calls back into the host.
//! - **Opaque entities**: the host hands over an [`EntityRef`]; the monitor only
//!   asks it for a canonical identifier.

pub mod entities;
pub mod hook;

pub use entities::{EntityId, EntityRef, StateLabel};
pub use hook::{TransitionHook, TransitionNotice};
