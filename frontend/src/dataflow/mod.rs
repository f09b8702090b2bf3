//! Core dataflow primitives for reactive state management
//!
//! Actor+Relay architecture: every piece of widget state is owned by exactly
//! one [`Actor`] and mutated only through events streamed in via [`Relay`]s.
//! UI code binds to signals and never touches state directly.
//!
//! # Architecture Principles
//!
//! 1. **No Raw Mutables** - All state uses Actor+Relay or Atom
//! 2. **Event-Source Naming** - Relays follow `{source}_{event}_relay` pattern
//! 3. **No Direct Access** - State is read through signals, not getters

pub mod actor;
pub mod atom;
pub mod relay;

pub use actor::Actor;
pub use atom::Atom;
pub use relay::{Relay, relay};
