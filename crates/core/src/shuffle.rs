//! Board scrambling.
//!
//! A scramble is a Fisher-Yates permutation of the cells followed by
//! sequential position reassignment (cell `i` of the shuffled order goes to
//! `row = i / width, col = i % width`). A uniform permutation can leave some or
//! all cells in place; [`ScramblePolicy::AtLeastOneDisplaced`] rules out a
//! board that spawns fully solved.

use crate::grid::GridState;
use crate::rng::SimpleRng;
use crate::types::{CellId, ScramblePolicy, MAX_SCRAMBLE_ATTEMPTS};

/// How a scramble was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleOutcome {
    /// Fisher-Yates passes performed.
    pub attempts: u32,
    /// Whether the one-slot rotation fallback was needed.
    pub rotated: bool,
    /// Items left off their canonical positions.
    pub displaced: usize,
}

/// Scramble `grid` in place.
pub fn shuffle_grid(grid: &mut GridState, rng: &mut SimpleRng, policy: ScramblePolicy) -> ShuffleOutcome {
    let mut order: Vec<CellId> = grid.order().to_vec();
    let mut attempts = 0;

    loop {
        rng.shuffle(&mut order);
        attempts += 1;
        grid.arrange(&order);

        let settled = match policy {
            ScramblePolicy::Uniform => true,
            ScramblePolicy::AtLeastOneDisplaced => !needs_rescramble(grid),
        };
        if settled || attempts >= MAX_SCRAMBLE_ATTEMPTS {
            break;
        }
    }

    let mut rotated = false;
    if policy == ScramblePolicy::AtLeastOneDisplaced && needs_rescramble(grid) {
        // Rotating by one slot moves every cell, so every carried item is displaced.
        order.rotate_left(1);
        grid.arrange(&order);
        rotated = true;
    }

    let outcome = ShuffleOutcome {
        attempts,
        rotated,
        displaced: grid.displaced_item_count(),
    };
    log::debug!(
        "scrambled {}x{} grid: {} pass(es), rotated={}, {} item(s) displaced",
        grid.width(),
        grid.height(),
        outcome.attempts,
        outcome.rotated,
        outcome.displaced
    );
    outcome
}

/// Solved but could be displaced: more than one cell and at least one item.
fn needs_rescramble(grid: &GridState) -> bool {
    grid.len() > 1 && grid.item_count() > 0 && grid.displaced_item_count() == 0
}
