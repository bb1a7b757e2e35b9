use arrayvec::ArrayVec;

use crate::types::{CellId, DragSource, FeedbackTier, ItemId, Position, MAX_CELL_OCCUPANTS};

/// Render-ready view of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub id: CellId,
    pub position: Position,
    pub occupants: ArrayVec<ItemId, MAX_CELL_OCCUPANTS>,
    /// Currently being dragged.
    pub is_active: bool,
    /// Carries items and sits on its canonical position.
    pub is_correct: bool,
}

/// Everything a presentation layer needs to draw a quiz.
///
/// `cells` are in current row-major order, so `cells[row * width + col]` is the
/// cell displayed at `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizSnapshot {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<CellView>,
    pub correct: u32,
    pub total: u32,
    pub score: u8,
    pub is_complete: bool,
    pub submitted: bool,
    /// Only present once the learner has submitted.
    pub feedback: Option<FeedbackTier>,
    pub dragging: Option<DragSource>,
    /// Edits are refused (complete and edits-after-complete disabled).
    pub locked: bool,
}

impl QuizSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.correct = 0;
        self.total = 0;
        self.score = 0;
        self.is_complete = false;
        self.submitted = false;
        self.feedback = None;
        self.dragging = None;
        self.locked = false;
    }

    pub fn cell_at(&self, position: Position) -> Option<&CellView> {
        if position.row >= self.height || position.col >= self.width {
            return None;
        }
        self.cells.get(position.index(self.width))
    }

    pub fn playable(&self) -> bool {
        !self.locked
    }
}
