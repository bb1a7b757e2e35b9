//! Scoring module - correctness aggregation and partial credit
//!
//! An item is correct when the cell carrying it sits on that cell's canonical
//! position. The score is the rounded percentage of correct items; empty cells
//! never count.

use crate::grid::GridState;
use crate::types::{FeedbackTier, PERFECT_SCORE};

/// Aggregate correctness of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: u32,
    pub total: u32,
    /// `round(100 * correct / total)`
    pub score: u8,
    pub is_complete: bool,
}

impl Evaluation {
    pub fn tier(&self) -> FeedbackTier {
        FeedbackTier::from_score(self.score)
    }
}

/// Percentage score, rounded half up.
///
/// The result is kept within `1..=99` for partially solved boards so that 100
/// means complete and 0 means nothing placed, even on very large grids where
/// plain rounding would hit either end. An empty item set counts as solved.
pub fn calculate_score(correct: u32, total: u32) -> u8 {
    if total == 0 || correct >= total {
        return PERFECT_SCORE;
    }
    if correct == 0 {
        return 0;
    }
    let rounded = (200 * correct as u64 + total as u64) / (2 * total as u64);
    rounded.clamp(1, PERFECT_SCORE as u64 - 1) as u8
}

/// Evaluate every item of `grid`. Pure; O(cells).
pub fn evaluate(grid: &GridState) -> Evaluation {
    let total = grid.item_count() as u32;
    let correct = grid.correct_item_count() as u32;
    Evaluation {
        correct,
        total,
        score: calculate_score(correct, total),
        is_complete: correct == total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_rounding() {
        assert_eq!(calculate_score(0, 9), 0);
        assert_eq!(calculate_score(1, 9), 11);
        assert_eq!(calculate_score(2, 9), 22);
        assert_eq!(calculate_score(3, 9), 33);
        assert_eq!(calculate_score(5, 9), 56);
        assert_eq!(calculate_score(9, 9), 100);
        // 1/8 = 12.5 rounds up.
        assert_eq!(calculate_score(1, 8), 13);
        assert_eq!(calculate_score(2, 3), 67);
    }

    #[test]
    fn test_score_edges() {
        assert_eq!(calculate_score(0, 0), 100);
        assert_eq!(calculate_score(12, 10), 100);
        assert_eq!(calculate_score(0, 1), 0);
        // 100 only when solved, 0 only when nothing is placed.
        assert_eq!(calculate_score(199, 200), 99);
        assert_eq!(calculate_score(399, 400), 99);
        assert_eq!(calculate_score(1, 201), 1);
    }

    #[test]
    fn test_tier_from_evaluation() {
        let eval = Evaluation {
            correct: 7,
            total: 10,
            score: calculate_score(7, 10),
            is_complete: false,
        };
        assert_eq!(eval.tier(), FeedbackTier::Almost);
    }
}
