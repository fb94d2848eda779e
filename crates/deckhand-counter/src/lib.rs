//! deckhand-counter - a key that counts its presses
//!
//! The title shows the current count. Each release of the key increments
//! it and persists it in the placement's settings, so the count survives
//! the host restarting. The property inspector can read the count and
//! overwrite it.

pub mod counter;

pub use counter::{CounterAction, CounterState, InspectorRequest, COUNTER_ACTION_ID};
