//! Session controller - drag lifecycle, submission, reset and callbacks
//!
//! State machine:
//!
//! ```text
//! Idle --begin_drag--> Dragging --end_drag--> Idle | Submitted
//! Idle --submit--> Submitted --(accepted edit)--> Idle
//! any --reset--> Idle (fresh scramble)
//! ```
//!
//! Completion is a predicate over the quiz state, not a phase. Only one drag
//! can be in flight; a second `begin_drag` is rejected.

use crate::catalog::{Catalog, Item};
use crate::config::SessionConfig;
use crate::grid::MoveRejected;
use crate::quiz::{Applied, QuizAction, QuizState};
use crate::rng::SimpleRng;
use crate::scoring::Evaluation;
use crate::snapshot::{CellView, QuizSnapshot};
use crate::source::SourceGrid;
use crate::types::{CellId, DragSource, DropTarget, FeedbackTier, InteractionMode, ItemId};

/// Callbacks fired by the session as placement progresses.
pub trait QuizObserver {
    /// An item moved from a wrong position onto its canonical one.
    fn on_correct_placement(&mut self, _item: ItemId) {}

    /// The quiz went from incomplete to complete.
    fn on_complete(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl QuizObserver for NoopObserver {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging(DragSource),
    Submitted,
}

/// How a drag gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released outside any drop target; nothing moved.
    Cancelled,
    Moved(Applied),
}

/// One learner's pass over a catalog.
#[derive(Debug, Clone)]
pub struct QuizSession<O = NoopObserver> {
    catalog: Catalog,
    config: SessionConfig,
    state: QuizState,
    rng: SimpleRng,
    phase: Phase,
    observer: O,
    rounds: u32,
}

impl QuizSession<NoopObserver> {
    pub fn new(catalog: Catalog, config: SessionConfig) -> Self {
        Self::with_observer(catalog, config, NoopObserver)
    }

    /// Build from raw source data, substituting the placeholder on bad input.
    pub fn from_source(source: &SourceGrid, config: SessionConfig) -> Self {
        Self::new(Catalog::from_source_or_placeholder(source, config.mode), config)
    }
}

impl<O: QuizObserver> QuizSession<O> {
    pub fn with_observer(catalog: Catalog, config: SessionConfig, observer: O) -> Self {
        let mut rng = SimpleRng::new(config.seed);
        let (state, _) = QuizState::shuffled(&catalog, config.mode, &mut rng, config.scramble);
        log::debug!(
            "session started: {} mode, {} cells, {} items, seed {}",
            config.mode.as_str(),
            catalog.cell_count(),
            catalog.item_count(),
            config.seed
        );
        Self {
            catalog,
            config,
            state,
            rng,
            phase: Phase::Idle,
            observer,
            rounds: 1,
        }
    }

    /// Replace the scrambled board with a fixed arrangement (cell `order[i]` at slot `i`).
    ///
    /// Returns false if `order` is not a permutation of the cell ids.
    pub fn arrange(&mut self, order: &[CellId]) -> bool {
        let mut grid = self.state.grid().clone();
        if !grid.arrange(order) {
            return false;
        }
        self.state = QuizState::new(grid, self.config.mode);
        self.phase = Phase::Idle;
        true
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> InteractionMode {
        self.config.mode
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Number of boards dealt so far (1 + resets).
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn evaluation(&self) -> Evaluation {
        self.state.evaluation()
    }

    pub fn score(&self) -> u8 {
        self.state.score()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// Complete with edits-after-complete disabled.
    pub fn is_locked(&self) -> bool {
        !self.config.allow_edits_after_complete && self.state.is_complete()
    }

    /// Feedback tier, available only after submission.
    pub fn feedback(&self) -> Option<FeedbackTier> {
        self.state
            .submitted()
            .then(|| self.state.evaluation().tier())
    }

    /// Items carried by `cell`.
    pub fn items_in(&self, cell: CellId) -> impl Iterator<Item = &Item> + '_ {
        self.state
            .grid()
            .cell(cell)
            .map(|c| c.occupants())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |id| self.catalog.item(*id))
    }

    /// Start a drag.
    pub fn begin_drag(&mut self, source: DragSource) -> Result<(), MoveRejected> {
        if let Phase::Dragging(active) = self.phase {
            log::warn!("begin_drag({source:?}) while already dragging {active:?}");
            return Err(MoveRejected::AlreadyDragging);
        }
        self.check_unlocked()?;

        let grid = self.state.grid();
        let known = match (source, self.config.mode) {
            (DragSource::Cell(id), InteractionMode::Swap { .. }) => grid.cell(id).is_some(),
            (DragSource::Item(id), InteractionMode::Reorder) => grid.cell_of_item(id).is_some(),
            _ => return self.reject(MoveRejected::WrongMode),
        };
        if !known {
            let reason = match source {
                DragSource::Cell(_) => MoveRejected::UnknownCell,
                DragSource::Item(_) => MoveRejected::UnknownItem,
            };
            return self.reject(reason);
        }

        self.phase = Phase::Dragging(source);
        Ok(())
    }

    /// Finish the current drag. `None` means released outside any drop target.
    pub fn end_drag(&mut self, target: Option<DropTarget>) -> Result<DragOutcome, MoveRejected> {
        let Phase::Dragging(source) = self.phase else {
            return Err(MoveRejected::NotDragging);
        };
        self.phase = self.resting_phase();

        let Some(target) = target else {
            log::debug!("drag of {source:?} released outside the grid");
            return Ok(DragOutcome::Cancelled);
        };

        let action = match (source, target) {
            (DragSource::Cell(from), DropTarget::Cell(to)) => QuizAction::Swap { from, to },
            (DragSource::Item(item), DropTarget::Index(to)) => QuizAction::Reorder { item, to },
            _ => return self.reject(MoveRejected::WrongMode),
        };
        self.commit(action).map(DragOutcome::Moved)
    }

    /// Abandon the current drag, if any.
    pub fn cancel_drag(&mut self) -> bool {
        if self.is_dragging() {
            self.phase = self.resting_phase();
            true
        } else {
            false
        }
    }

    /// Swap two cells without a drag gesture.
    pub fn swap_cells(&mut self, from: CellId, to: CellId) -> Result<Applied, MoveRejected> {
        self.direct(QuizAction::Swap { from, to })
    }

    /// Move an item to a list index without a drag gesture.
    pub fn move_item(&mut self, item: ItemId, to: usize) -> Result<Applied, MoveRejected> {
        self.direct(QuizAction::Reorder { item, to })
    }

    /// Surface the evaluation to the learner. Cancels an in-flight drag.
    pub fn submit(&mut self) -> Evaluation {
        let eval = self.state.submit();
        self.phase = Phase::Submitted;
        log::debug!("submitted: {}/{} correct, score {}", eval.correct, eval.total, eval.score);
        eval
    }

    /// Deal a fresh scramble of the same items.
    pub fn reset(&mut self) {
        let outcome = self
            .state
            .reset(&self.catalog, &mut self.rng, self.config.scramble);
        self.phase = Phase::Idle;
        self.rounds += 1;
        log::debug!(
            "round {} dealt with {} item(s) displaced",
            self.rounds,
            outcome.displaced
        );
    }

    pub fn snapshot_into(&self, out: &mut QuizSnapshot) {
        let grid = self.state.grid();
        let eval = self.state.evaluation();
        let active = self.active_cell();

        out.clear();
        out.width = grid.width();
        out.height = grid.height();
        out.cells.extend(grid.iter_row_major().map(|cell| CellView {
            id: cell.id(),
            position: cell.current(),
            occupants: cell.occupants().iter().copied().collect(),
            is_active: active == Some(cell.id()),
            is_correct: cell.is_correct(),
        }));
        out.correct = eval.correct;
        out.total = eval.total;
        out.score = eval.score;
        out.is_complete = eval.is_complete;
        out.submitted = self.state.submitted();
        out.feedback = self.feedback();
        out.dragging = match self.phase {
            Phase::Dragging(source) => Some(source),
            _ => None,
        };
        out.locked = self.is_locked();
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        let mut s = QuizSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Cell being dragged (the carrying cell for item drags).
    fn active_cell(&self) -> Option<CellId> {
        match self.phase {
            Phase::Dragging(DragSource::Cell(id)) => Some(id),
            Phase::Dragging(DragSource::Item(id)) => {
                self.state.grid().cell_of_item(id).map(|c| c.id())
            }
            _ => None,
        }
    }

    fn resting_phase(&self) -> Phase {
        if self.state.submitted() {
            Phase::Submitted
        } else {
            Phase::Idle
        }
    }

    fn check_unlocked(&self) -> Result<(), MoveRejected> {
        if self.is_locked() {
            log::debug!("edit refused: quiz is complete and locked");
            return Err(MoveRejected::Locked);
        }
        Ok(())
    }

    fn direct(&mut self, action: QuizAction) -> Result<Applied, MoveRejected> {
        if self.is_dragging() {
            return self.reject(MoveRejected::AlreadyDragging);
        }
        self.check_unlocked()?;
        self.commit(action)
    }

    fn commit(&mut self, action: QuizAction) -> Result<Applied, MoveRejected> {
        let applied = match self.state.apply(action) {
            Ok(applied) => applied,
            Err(reason) => return self.reject(reason),
        };
        self.phase = Phase::Idle;

        for item in &applied.newly_correct {
            self.observer.on_correct_placement(*item);
        }
        if applied.completed() {
            log::debug!("quiz complete in round {}", self.rounds);
            self.observer.on_complete();
        }
        Ok(applied)
    }

    fn reject<T>(&self, reason: MoveRejected) -> Result<T, MoveRejected> {
        if reason.is_unknown_id() {
            log::warn!("placement ignored: {} ({})", reason.message(), reason.code());
        } else {
            log::debug!("placement ignored: {} ({})", reason.message(), reason.code());
        }
        Err(reason)
    }
}
