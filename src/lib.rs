//! Vowel grid (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and hosts the pieces
//! shared by the terminal binary and the integration tests.

pub mod host;
pub mod logging;

pub use vowel_grid_audio as audio;
pub use vowel_grid_core as core;
pub use vowel_grid_input as input;
pub use vowel_grid_term as term;
pub use vowel_grid_types as types;
