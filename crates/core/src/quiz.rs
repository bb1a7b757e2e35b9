//! Quiz state and its reducers.
//!
//! `QuizState` is the single piece of mutable state of a quiz: the grid, the
//! latest evaluation and the `submitted` flag. It changes only through the
//! reducers below (`shuffled`, `apply`/`swap`/`reorder`, `submit`, `reset`),
//! each of which is synchronous and deterministic for a given RNG state.

use crate::catalog::Catalog;
use crate::grid::{GridState, MoveRejected};
use crate::rng::SimpleRng;
use crate::scoring::{evaluate, Evaluation};
use crate::shuffle::{shuffle_grid, ShuffleOutcome};
use crate::types::{CellId, InteractionMode, ItemId, ScramblePolicy};

/// A placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    /// Exchange the positions of two cells (swap mode).
    Swap { from: CellId, to: CellId },
    /// Move an item to a list index (reorder mode).
    Reorder { item: ItemId, to: usize },
}

/// Result of an accepted placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub before: Evaluation,
    pub after: Evaluation,
    /// Items that were misplaced before and are correct now.
    pub newly_correct: Vec<ItemId>,
}

impl Applied {
    /// Whether this placement finished the quiz.
    pub fn completed(&self) -> bool {
        !self.before.is_complete && self.after.is_complete
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    mode: InteractionMode,
    grid: GridState,
    evaluation: Evaluation,
    submitted: bool,
}

impl QuizState {
    /// Wrap an already arranged grid.
    pub fn new(grid: GridState, mode: InteractionMode) -> Self {
        let evaluation = evaluate(&grid);
        Self {
            mode,
            grid,
            evaluation,
            submitted: false,
        }
    }

    /// Fresh state for `catalog`, scrambled with `rng`.
    pub fn shuffled(
        catalog: &Catalog,
        mode: InteractionMode,
        rng: &mut SimpleRng,
        policy: ScramblePolicy,
    ) -> (Self, ShuffleOutcome) {
        let mut grid = GridState::canonical(catalog);
        let outcome = shuffle_grid(&mut grid, rng, policy);
        (Self::new(grid, mode), outcome)
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    pub fn score(&self) -> u8 {
        self.evaluation.score
    }

    pub fn is_complete(&self) -> bool {
        self.evaluation.is_complete
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Recompute the evaluation from the grid.
    pub fn evaluate(&self) -> Evaluation {
        evaluate(&self.grid)
    }

    /// Apply a placement. Accepted placements clear `submitted` and refresh the
    /// evaluation; rejected ones change nothing.
    pub fn apply(&mut self, action: QuizAction) -> Result<Applied, MoveRejected> {
        let touched: Vec<CellId> = match (action, self.mode) {
            (QuizAction::Swap { from, to }, InteractionMode::Swap { .. }) => {
                if self.grid.cell(from).is_none() || self.grid.cell(to).is_none() {
                    return Err(MoveRejected::UnknownCell);
                }
                if from == to {
                    return Err(MoveRejected::SameTarget);
                }
                vec![from, to]
            }
            (QuizAction::Reorder { item, to }, InteractionMode::Reorder) => {
                self.grid.reorder_span(item, to)?.to_vec()
            }
            _ => return Err(MoveRejected::WrongMode),
        };

        let was_correct: Vec<bool> = touched.iter().map(|id| self.cell_in_place(*id)).collect();

        match action {
            QuizAction::Swap { from, to } => self.grid.swap_cells(from, to)?,
            QuizAction::Reorder { item, to } => self.grid.move_item(item, to)?,
        }

        let mut newly_correct = Vec::new();
        for (id, was) in touched.iter().zip(was_correct) {
            if was || !self.cell_in_place(*id) {
                continue;
            }
            if let Some(cell) = self.grid.cell(*id) {
                newly_correct.extend_from_slice(cell.occupants());
            }
        }

        let before = self.evaluation;
        self.evaluation = evaluate(&self.grid);
        self.submitted = false;

        Ok(Applied {
            before,
            after: self.evaluation,
            newly_correct,
        })
    }

    pub fn swap(&mut self, from: CellId, to: CellId) -> Result<Applied, MoveRejected> {
        self.apply(QuizAction::Swap { from, to })
    }

    pub fn reorder(&mut self, item: ItemId, to: usize) -> Result<Applied, MoveRejected> {
        self.apply(QuizAction::Reorder { item, to })
    }

    /// Mark the current arrangement as submitted for feedback.
    pub fn submit(&mut self) -> Evaluation {
        self.submitted = true;
        self.evaluation
    }

    /// Replace this state with a fresh scramble of the same catalog.
    pub fn reset(
        &mut self,
        catalog: &Catalog,
        rng: &mut SimpleRng,
        policy: ScramblePolicy,
    ) -> ShuffleOutcome {
        let (fresh, outcome) = Self::shuffled(catalog, self.mode, rng, policy);
        *self = fresh;
        outcome
    }

    fn cell_in_place(&self, id: CellId) -> bool {
        self.grid.cell(id).map(|c| c.is_in_place()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SourceGrid, SourceItem};
    use crate::types::GroupingArity;

    fn line_catalog(n: usize, mode: InteractionMode) -> Catalog {
        let row = (0..n)
            .map(|i| vec![SourceItem::new(format!("v{i}"), format!("v{i}"))])
            .collect();
        SourceGrid::Nested(vec![row]).parse(mode).unwrap()
    }

    fn reversed(catalog: &Catalog, mode: InteractionMode) -> QuizState {
        let mut grid = GridState::canonical(catalog);
        let order: Vec<CellId> = (0..grid.len()).rev().map(|i| CellId(i as u16)).collect();
        assert!(grid.arrange(&order));
        QuizState::new(grid, mode)
    }

    #[test]
    fn swap_reports_newly_correct_items() {
        let mode = InteractionMode::default();
        let catalog = line_catalog(4, mode);
        let mut state = reversed(&catalog, mode);
        assert_eq!(state.score(), 0);

        let applied = state.swap(CellId(0), CellId(3)).unwrap();
        assert_eq!(applied.newly_correct, vec![ItemId(0), ItemId(3)]);
        assert_eq!(applied.after.correct, 2);
        assert_eq!(state.score(), 50);
        assert!(!applied.completed());

        let applied = state.swap(CellId(1), CellId(2)).unwrap();
        assert!(applied.completed());
        assert!(state.is_complete());
    }

    #[test]
    fn wrong_mode_actions_are_rejected() {
        let catalog = line_catalog(3, InteractionMode::Reorder);
        let mut state = reversed(&catalog, InteractionMode::Reorder);
        let before = state.clone();
        assert_eq!(state.swap(CellId(0), CellId(1)), Err(MoveRejected::WrongMode));
        assert_eq!(state, before);

        let swap_mode = InteractionMode::Swap {
            grouping_arity: GroupingArity::Single,
        };
        let mut state = reversed(&catalog, swap_mode);
        assert_eq!(state.reorder(ItemId(0), 1), Err(MoveRejected::WrongMode));
    }

    #[test]
    fn reorder_updates_evaluation_and_clears_submission() {
        let mode = InteractionMode::Reorder;
        let catalog = line_catalog(3, mode);
        let mut grid = GridState::canonical(&catalog);
        grid.arrange(&[CellId(1), CellId(2), CellId(0)]);
        let mut state = QuizState::new(grid, mode);
        state.submit();
        assert!(state.submitted());
        assert_eq!(state.score(), 0);

        let applied = state.reorder(ItemId(0), 0).unwrap();
        assert!(applied.completed());
        assert_eq!(applied.newly_correct.len(), 3);
        assert!(!state.submitted());
        assert_eq!(state.score(), 100);
    }

    #[test]
    fn rejected_moves_keep_submission() {
        let mode = InteractionMode::default();
        let catalog = line_catalog(3, mode);
        let mut state = reversed(&catalog, mode);
        state.submit();
        assert_eq!(state.swap(CellId(1), CellId(1)), Err(MoveRejected::SameTarget));
        assert_eq!(state.swap(CellId(1), CellId(9)), Err(MoveRejected::UnknownCell));
        assert!(state.submitted());
    }

    #[test]
    fn reset_rescrambles_and_clears_flags() {
        let mode = InteractionMode::default();
        let catalog = line_catalog(5, mode);
        let mut state = QuizState::new(GridState::canonical(&catalog), mode);
        state.submit();
        assert!(state.is_complete());

        let mut rng = SimpleRng::new(11);
        state.reset(&catalog, &mut rng, ScramblePolicy::AtLeastOneDisplaced);
        assert!(!state.is_complete());
        assert!(!state.submitted());
        assert!(state.score() < 100);
        assert_eq!(state.evaluate(), state.evaluation());
    }
}
