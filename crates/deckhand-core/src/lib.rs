//! deckhand Core - Shared types for Stream Deck plugins
//!
//! This crate provides the domain types shared between the wire
//! protocol (deckhand-protocol), the runtime (deckhand) and the
//! action implementations.
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod error;
pub mod ids;
pub mod layout;

// Re-exports for convenience
pub use error::{DomainError, DomainResult};
pub use ids::{ActionId, Context, DeviceId, EMPTY_ACTION_PLACEHOLDER};
pub use layout::{Coordinates, Target};
