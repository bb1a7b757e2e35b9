//! Core types module - shared ids, positions, modes and constants
//!
//! Everything in here is plain data with no external dependencies, so it can be
//! used by the engine, the terminal front-end and any other host alike.
//!
//! # Grid addressing
//!
//! Grids are dense: every `(row, col)` in `0..height x 0..width` is occupied by
//! exactly one cell. Cells are addressed by [`CellId`], which is the cell's
//! *canonical* row-major index, and items by [`ItemId`], a dense index into the
//! session's item arena.
//!
//! # Scoring thresholds
//!
//! | Score | Tier |
//! |-------|------|
//! | 100 | [`FeedbackTier::Perfect`] |
//! | 70..=99 | [`FeedbackTier::Almost`] |
//! | 40..=69 | [`FeedbackTier::Progress`] |
//! | 0..=39 | [`FeedbackTier::KeepTrying`] |
//!
//! # Examples
//!
//! ```
//! use vowel_grid_types::{FeedbackTier, GridAction, InteractionMode, Position};
//!
//! let p = Position::from_index(5, 3);
//! assert_eq!(p, Position::new(1, 2));
//! assert_eq!(p.index(3), 5);
//!
//! assert_eq!(FeedbackTier::from_score(72), FeedbackTier::Almost);
//! assert_eq!(GridAction::from_str("submit"), Some(GridAction::Submit));
//! assert_eq!(InteractionMode::from_str("reorder"), Some(InteractionMode::Reorder));
//! ```

use std::fmt;

/// Maximum number of co-located items a single cell can carry.
pub const MAX_CELL_OCCUPANTS: usize = 2;

/// Score awarded when every item sits on its canonical position.
pub const PERFECT_SCORE: u8 = 100;

/// Lowest score that earns [`FeedbackTier::Almost`].
pub const ALMOST_THRESHOLD: u8 = 70;

/// Lowest score that earns [`FeedbackTier::Progress`].
pub const PROGRESS_THRESHOLD: u8 = 40;

/// Fisher-Yates passes attempted before falling back to a one-slot rotation
/// when the scramble policy requires at least one displaced item.
pub const MAX_SCRAMBLE_ATTEMPTS: u32 = 8;

/// Dense index of an item inside a session's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u16);

impl ItemId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Cell identifier: the cell's canonical row-major index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(pub u16);

impl CellId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}

/// A `(row, col)` slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Position of the `index`-th slot in row-major order.
    pub fn from_index(index: usize, width: u16) -> Self {
        let width = width.max(1) as usize;
        Self {
            row: (index / width) as u16,
            col: (index % width) as u16,
        }
    }

    /// Row-major index of this position.
    pub fn index(self, width: u16) -> usize {
        (self.row as usize) * (width as usize) + (self.col as usize)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// How many items a swap-mode cell may group together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupingArity {
    Single,
    Pair,
}

impl GroupingArity {
    pub fn max_occupants(self) -> usize {
        match self {
            GroupingArity::Single => 1,
            GroupingArity::Pair => MAX_CELL_OCCUPANTS,
        }
    }
}

/// Interaction variant, chosen once when a session is built.
///
/// - **Swap**: dragging cell A onto cell B exchanges their positions (2-D
///   tongue-position chart).
/// - **Reorder**: dragging an item within a flat list moves it to the target
///   index and shifts everything in between (lip-shape / length groupings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    Swap { grouping_arity: GroupingArity },
    Reorder,
}

impl InteractionMode {
    /// Parse a mode name (case-insensitive).
    ///
    /// `"swap"` groups up to two items per cell, `"swap1"` one item per cell.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "swap" | "swap2" => Some(InteractionMode::Swap {
                grouping_arity: GroupingArity::Pair,
            }),
            "swap1" => Some(InteractionMode::Swap {
                grouping_arity: GroupingArity::Single,
            }),
            "reorder" => Some(InteractionMode::Reorder),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Swap {
                grouping_arity: GroupingArity::Pair,
            } => "swap",
            InteractionMode::Swap {
                grouping_arity: GroupingArity::Single,
            } => "swap1",
            InteractionMode::Reorder => "reorder",
        }
    }

    /// Items allowed per cell under this mode. Reorder lists hold one item per entry.
    pub fn max_occupants(&self) -> usize {
        match self {
            InteractionMode::Swap { grouping_arity } => grouping_arity.max_occupants(),
            InteractionMode::Reorder => 1,
        }
    }

    pub fn is_swap(&self) -> bool {
        matches!(self, InteractionMode::Swap { .. })
    }
}

impl Default for InteractionMode {
    fn default() -> Self {
        InteractionMode::Swap {
            grouping_arity: GroupingArity::Pair,
        }
    }
}

/// Whether a freshly shuffled board may come out (partially or fully) solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScramblePolicy {
    /// A single uniform Fisher-Yates pass; the result may leave every item in place.
    Uniform,
    /// Reshuffle until at least one item is displaced (when the grid allows it).
    #[default]
    AtLeastOneDisplaced,
}

impl ScramblePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" | "any" => Some(ScramblePolicy::Uniform),
            "displace" | "displaced" => Some(ScramblePolicy::AtLeastOneDisplaced),
            _ => None,
        }
    }
}

/// Learner-facing feedback tier derived from the percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackTier {
    Perfect,
    Almost,
    Progress,
    KeepTrying,
}

impl FeedbackTier {
    /// Classify a score. Tiers are checked from the top down.
    pub fn from_score(score: u8) -> Self {
        if score == PERFECT_SCORE {
            FeedbackTier::Perfect
        } else if score >= ALMOST_THRESHOLD {
            FeedbackTier::Almost
        } else if score >= PROGRESS_THRESHOLD {
            FeedbackTier::Progress
        } else {
            FeedbackTier::KeepTrying
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackTier::Perfect => "perfect",
            FeedbackTier::Almost => "almost",
            FeedbackTier::Progress => "progress",
            FeedbackTier::KeepTrying => "keep_trying",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Perfect => "Perfect! Every vowel is in place.",
            FeedbackTier::Almost => "Almost there!",
            FeedbackTier::Progress => "Good progress, keep going.",
            FeedbackTier::KeepTrying => "Keep trying!",
        }
    }
}

/// What a drag gesture picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragSource {
    /// A whole cell (swap mode).
    Cell(CellId),
    /// A single item (reorder mode).
    Item(ItemId),
}

/// Where a drag gesture was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// Another cell (swap mode).
    Cell(CellId),
    /// A list index (reorder mode).
    Index(usize),
}

/// Host-level actions produced by input devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Pick up whatever is under the cursor, or drop what is being dragged.
    Grab,
    /// Abandon the current drag.
    Cancel,
    /// Replay the audio cue of the cell under the cursor.
    PlayCue,
    Submit,
    Reset,
}

impl GridAction {
    /// Parse action from a camelCase name (case-insensitive).
    ///
    /// ```
    /// use vowel_grid_types::GridAction;
    ///
    /// assert_eq!(GridAction::from_str("cursorLeft"), Some(GridAction::CursorLeft));
    /// assert_eq!(GridAction::from_str("GRAB"), Some(GridAction::Grab));
    /// assert_eq!(GridAction::from_str("vowel"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GridAction::CursorUp),
            "cursordown" => Some(GridAction::CursorDown),
            "cursorleft" => Some(GridAction::CursorLeft),
            "cursorright" => Some(GridAction::CursorRight),
            "grab" => Some(GridAction::Grab),
            "cancel" => Some(GridAction::Cancel),
            "playcue" => Some(GridAction::PlayCue),
            "submit" => Some(GridAction::Submit),
            "reset" => Some(GridAction::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GridAction::CursorUp => "cursorUp",
            GridAction::CursorDown => "cursorDown",
            GridAction::CursorLeft => "cursorLeft",
            GridAction::CursorRight => "cursorRight",
            GridAction::Grab => "grab",
            GridAction::Cancel => "cancel",
            GridAction::PlayCue => "playCue",
            GridAction::Submit => "submit",
            GridAction::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_tiers_are_checked_top_down() {
        assert_eq!(FeedbackTier::from_score(100), FeedbackTier::Perfect);
        assert_eq!(FeedbackTier::from_score(99), FeedbackTier::Almost);
        assert_eq!(FeedbackTier::from_score(70), FeedbackTier::Almost);
        assert_eq!(FeedbackTier::from_score(69), FeedbackTier::Progress);
        assert_eq!(FeedbackTier::from_score(40), FeedbackTier::Progress);
        assert_eq!(FeedbackTier::from_score(39), FeedbackTier::KeepTrying);
        assert_eq!(FeedbackTier::from_score(0), FeedbackTier::KeepTrying);
    }

    #[test]
    fn position_index_roundtrip_on_wide_grid() {
        for i in 0..12 {
            let p = Position::from_index(i, 4);
            assert_eq!(p.index(4), i);
        }
        assert_eq!(Position::from_index(7, 4), Position::new(1, 3));
    }

    #[test]
    fn mode_occupancy_limits() {
        assert_eq!(InteractionMode::default().max_occupants(), 2);
        assert_eq!(InteractionMode::from_str("swap1").unwrap().max_occupants(), 1);
        assert_eq!(InteractionMode::Reorder.max_occupants(), 1);
        assert!(!InteractionMode::Reorder.is_swap());
    }

    #[test]
    fn mode_names_roundtrip() {
        for name in ["swap", "swap1", "reorder"] {
            let mode = InteractionMode::from_str(name).unwrap();
            assert_eq!(mode.as_str(), name);
        }
        assert_eq!(InteractionMode::from_str("tongue"), None);
    }

    #[test]
    fn scramble_policy_names() {
        assert_eq!(ScramblePolicy::from_str("uniform"), Some(ScramblePolicy::Uniform));
        assert_eq!(
            ScramblePolicy::from_str("Displace"),
            Some(ScramblePolicy::AtLeastOneDisplaced)
        );
        assert_eq!(ScramblePolicy::default(), ScramblePolicy::AtLeastOneDisplaced);
        assert_eq!(ScramblePolicy::from_str("bogus"), None);
    }
}
