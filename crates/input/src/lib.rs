//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GridAction`] and tracks the
//! keyboard cursor that stands in for a pointer on the grid. Independent of
//! any rendering code.

pub mod cursor;
pub mod map;

pub use vowel_grid_types as types;

pub use cursor::GridCursor;
pub use map::{handle_key_event, should_quit};
