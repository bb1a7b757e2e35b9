//! Core quiz logic - pure, deterministic, and testable
//!
//! This crate holds the placement rules, state and scoring of a vowel grid
//! quiz. It has **no dependencies** on a terminal, audio device or network,
//! which makes it:
//!
//! - **Deterministic**: same seed produces the same scramble
//! - **Testable**: every reducer is a plain function over owned state
//! - **Portable**: any host (terminal, GUI, headless) can drive it
//!
//! # Module Structure
//!
//! - [`source`]: raw dataset schema and validation into a [`Catalog`]
//! - [`catalog`]: immutable item arena and canonical layout, with placeholder fallback
//! - [`grid`]: cells with canonical/current positions and the swap/reorder primitives
//! - [`shuffle`]: scramble policies
//! - [`scoring`]: correctness aggregation and partial credit
//! - [`quiz`]: the quiz state and its reducers
//! - [`session`]: drag lifecycle, submission, reset and observer callbacks
//! - [`config`]: session options, including environment overrides
//! - [`snapshot`]: render-ready copy of a session
//! - [`rng`]: seeded LCG used for scrambling
//!
//! # Interaction Modes
//!
//! | Mode | Gesture | Cell capacity |
//! |------|---------|---------------|
//! | `swap` (pairs) | drag a cell onto another cell | 2 |
//! | `swap1` | drag a cell onto another cell | 1 |
//! | `reorder` | drag an item to a list index | 1 |
//!
//! # Example
//!
//! ```
//! use vowel_grid_core::{Catalog, QuizSession, SessionConfig};
//! use vowel_grid_core::types::{CellId, InteractionMode};
//!
//! let mode = InteractionMode::Reorder;
//! let mut session = QuizSession::new(Catalog::placeholder(mode), SessionConfig::new(mode));
//! assert!(!session.is_complete());
//!
//! let ids: Vec<CellId> = (0..8).map(CellId).collect();
//! session.arrange(&ids);
//! assert_eq!(session.submit().score, 100);
//! ```

pub mod catalog;
pub mod config;
pub mod grid;
mod placeholder;
pub mod quiz;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod snapshot;
pub mod source;

pub use vowel_grid_types as types;

pub use catalog::{Catalog, DataOrigin, Item};
pub use config::SessionConfig;
pub use grid::{Cell, GridState, MoveRejected};
pub use quiz::{Applied, QuizAction, QuizState};
pub use rng::SimpleRng;
pub use scoring::{calculate_score, evaluate, Evaluation};
pub use session::{DragOutcome, NoopObserver, Phase, QuizObserver, QuizSession};
pub use shuffle::{shuffle_grid, ShuffleOutcome};
pub use snapshot::{CellView, QuizSnapshot};
pub use source::{DataError, PlacedGrid, PlacedItem, SourceGrid, SourceItem};
