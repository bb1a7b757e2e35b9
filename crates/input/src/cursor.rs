//! Keyboard cursor over a grid.

use crate::types::{GridAction, Position};

/// Selection cursor clamped to a `width` x `height` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    position: Position,
    width: u16,
    height: u16,
}

impl GridCursor {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            position: Position::new(0, 0),
            width,
            height,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Row-major index under the cursor.
    pub fn index(&self) -> usize {
        self.position.index(self.width)
    }

    /// Change the grid size, pulling the cursor back inside.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.position.row = self.position.row.min(height.saturating_sub(1));
        self.position.col = self.position.col.min(width.saturating_sub(1));
    }

    /// Apply a cursor action. Returns whether the cursor moved; other actions
    /// and moves against an edge return false.
    pub fn apply(&mut self, action: GridAction) -> bool {
        let before = self.position;
        let Position { row, col } = &mut self.position;
        match action {
            GridAction::CursorUp => *row = row.saturating_sub(1),
            GridAction::CursorDown => {
                if *row + 1 < self.height {
                    *row += 1;
                }
            }
            GridAction::CursorLeft => *col = col.saturating_sub(1),
            GridAction::CursorRight => {
                if *col + 1 < self.width {
                    *col += 1;
                }
            }
            _ => return false,
        }
        self.position != before
    }
}
