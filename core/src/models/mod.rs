//! Data models shared across the panel helpers.

mod choice;

pub use choice::{ChoiceSet, ChoiceUpdate, ListMode};
