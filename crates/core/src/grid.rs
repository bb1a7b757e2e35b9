//! Grid module - dense cell layout and the placement mutator
//!
//! A `GridState` is a `width x height` grid where every slot is occupied by
//! exactly one [`Cell`]. Cells are stored by [`CellId`] (their canonical
//! row-major index) and a second table, `slots`, maps each current row-major
//! position back to the cell sitting there. Both tables are updated together,
//! so cell -> position and position -> cell lookups are O(1).
//!
//! Cells carry 0-2 co-located items. Mutations only ever move whole cells, so
//! an item is always next to its canonical cell-mates and checking the carrying
//! cell's position is enough to decide whether the item is placed correctly.

use arrayvec::ArrayVec;

use crate::catalog::Catalog;
use crate::types::{CellId, ItemId, Position, MAX_CELL_OCCUPANTS};

/// A grid slot holding 0-2 items that always move together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    canonical: Position,
    current: Position,
    occupants: ArrayVec<ItemId, MAX_CELL_OCCUPANTS>,
}

impl Cell {
    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn canonical(&self) -> Position {
        self.canonical
    }

    pub fn current(&self) -> Position {
        self.current
    }

    pub fn occupants(&self) -> &[ItemId] {
        &self.occupants
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Whether the cell currently sits on its canonical slot.
    pub fn is_in_place(&self) -> bool {
        self.current == self.canonical
    }

    /// In place and carrying at least one item (what the UI highlights as correct).
    pub fn is_correct(&self) -> bool {
        !self.is_empty() && self.is_in_place()
    }
}

/// Why a placement request was ignored.
///
/// Rejections are ordinary control flow (a drag released on itself, a stale
/// id from the UI); the grid is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejected {
    SameTarget,
    UnknownCell,
    UnknownItem,
    IndexOutOfRange,
    WrongMode,
    Locked,
    NotDragging,
    AlreadyDragging,
}

impl MoveRejected {
    pub fn code(self) -> &'static str {
        match self {
            MoveRejected::SameTarget => "same_target",
            MoveRejected::UnknownCell | MoveRejected::UnknownItem => "unknown_id",
            MoveRejected::IndexOutOfRange => "index_out_of_range",
            MoveRejected::WrongMode => "wrong_mode",
            MoveRejected::Locked => "locked",
            MoveRejected::NotDragging | MoveRejected::AlreadyDragging => "invalid_gesture",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MoveRejected::SameTarget => "source and target are the same",
            MoveRejected::UnknownCell => "no cell with that id",
            MoveRejected::UnknownItem => "no item with that id",
            MoveRejected::IndexOutOfRange => "target index is outside the list",
            MoveRejected::WrongMode => "interaction not available in this quiz mode",
            MoveRejected::Locked => "quiz is complete and edits are disabled",
            MoveRejected::NotDragging => "no drag in progress",
            MoveRejected::AlreadyDragging => "a drag is already in progress",
        }
    }

    /// Rejections caused by ids the engine has never handed out.
    pub fn is_unknown_id(self) -> bool {
        matches!(self, MoveRejected::UnknownCell | MoveRejected::UnknownItem)
    }
}

/// Dense grid of cells with current and canonical positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    width: u16,
    height: u16,
    /// Indexed by `CellId`.
    cells: Vec<Cell>,
    /// Row-major current position -> cell.
    slots: Vec<CellId>,
    /// Indexed by `ItemId` -> carrying cell.
    item_cells: Vec<CellId>,
}

impl GridState {
    /// Build the solved grid: every cell on its canonical slot.
    ///
    /// Vacant slots become empty cells so they remain valid swap targets.
    pub fn canonical(catalog: &Catalog) -> Self {
        let width = catalog.width();
        let mut cells = Vec::with_capacity(catalog.cell_count());
        let mut item_cells = vec![CellId(0); catalog.item_count()];

        for (index, occupants) in catalog.layout().iter().enumerate() {
            let id = CellId(index as u16);
            let canonical = Position::from_index(index, width);
            for item in occupants {
                item_cells[item.index()] = id;
            }
            cells.push(Cell {
                id,
                canonical,
                current: canonical,
                occupants: occupants.clone(),
            });
        }

        let slots = (0..cells.len()).map(|i| CellId(i as u16)).collect();
        Self {
            width,
            height: catalog.height(),
            cells,
            slots,
            item_cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in id (canonical) order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// Cell currently at the `index`-th row-major slot.
    pub fn cell_at_index(&self, index: usize) -> Option<&Cell> {
        self.slots.get(index).and_then(|id| self.cell(*id))
    }

    pub fn cell_at(&self, position: Position) -> Option<&Cell> {
        if position.row >= self.height || position.col >= self.width {
            return None;
        }
        self.cell_at_index(position.index(self.width))
    }

    /// Cell currently carrying `item`.
    pub fn cell_of_item(&self, item: ItemId) -> Option<&Cell> {
        self.item_cells.get(item.index()).and_then(|id| self.cell(*id))
    }

    /// Cell ids in current row-major order.
    pub fn order(&self) -> &[CellId] {
        &self.slots
    }

    /// Cells in current row-major (render) order.
    pub fn iter_row_major(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.slots.iter().map(move |id| &self.cells[id.index()])
    }

    pub fn item_count(&self) -> usize {
        self.item_cells.len()
    }

    /// Whether `item` sits on its canonical position. Unknown items are never correct.
    pub fn is_item_correct(&self, item: ItemId) -> bool {
        self.cell_of_item(item)
            .map(|cell| cell.is_in_place())
            .unwrap_or(false)
    }

    /// Number of items currently on their canonical positions.
    pub fn correct_item_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.is_in_place())
            .map(|c| c.occupants.len())
            .sum()
    }

    /// Number of items away from their canonical positions.
    pub fn displaced_item_count(&self) -> usize {
        self.item_count() - self.correct_item_count()
    }

    /// Place cells in the given row-major order.
    ///
    /// `order` must be a permutation of all cell ids; cell `order[i]` moves to
    /// slot `i`. Returns false (and changes nothing) otherwise.
    pub fn arrange(&mut self, order: &[CellId]) -> bool {
        if order.len() != self.cells.len() {
            return false;
        }
        let mut seen = vec![false; self.cells.len()];
        for id in order {
            match seen.get_mut(id.index()) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }

        self.slots.clear();
        self.slots.extend_from_slice(order);
        self.reassign(0..self.slots.len());
        true
    }

    /// Exchange the current positions of two cells. O(1).
    ///
    /// Applying the same swap twice restores the previous arrangement.
    pub fn swap_cells(&mut self, a: CellId, b: CellId) -> Result<(), MoveRejected> {
        if a.index() >= self.cells.len() || b.index() >= self.cells.len() {
            return Err(MoveRejected::UnknownCell);
        }
        if a == b {
            return Err(MoveRejected::SameTarget);
        }

        let pa = self.cells[a.index()].current;
        let pb = self.cells[b.index()].current;
        self.cells[a.index()].current = pb;
        self.cells[b.index()].current = pa;
        self.slots[pa.index(self.width)] = b;
        self.slots[pb.index(self.width)] = a;
        Ok(())
    }

    /// Cells whose position a reorder of `item` to `to` would change, in the
    /// order they currently appear.
    pub fn reorder_span(&self, item: ItemId, to: usize) -> Result<&[CellId], MoveRejected> {
        let from = self.item_index(item)?;
        if to >= self.slots.len() {
            return Err(MoveRejected::IndexOutOfRange);
        }
        if from == to {
            return Err(MoveRejected::SameTarget);
        }
        Ok(&self.slots[from.min(to)..=from.max(to)])
    }

    /// Move the cell carrying `item` to list index `to`, shifting every cell in
    /// between by one slot. O(n) in the distance moved.
    pub fn move_item(&mut self, item: ItemId, to: usize) -> Result<(), MoveRejected> {
        self.reorder_span(item, to)?;
        let from = self.item_index(item)?;

        if from < to {
            self.slots[from..=to].rotate_left(1);
            self.reassign(from..to + 1);
        } else {
            self.slots[to..=from].rotate_right(1);
            self.reassign(to..from + 1);
        }
        Ok(())
    }

    /// Current row-major index of the cell carrying `item`.
    pub fn item_index(&self, item: ItemId) -> Result<usize, MoveRejected> {
        self.cell_of_item(item)
            .map(|cell| cell.current.index(self.width))
            .ok_or(MoveRejected::UnknownItem)
    }

    fn reassign(&mut self, range: std::ops::Range<usize>) {
        for i in range {
            let id = self.slots[i];
            self.cells[id.index()].current = Position::from_index(i, self.width);
        }
    }

    /// Structural invariants: dense slot table consistent with cell positions,
    /// every item carried by exactly one cell.
    pub fn check_invariants(&self) -> bool {
        let n = (self.width as usize) * (self.height as usize);
        if self.cells.len() != n || self.slots.len() != n {
            return false;
        }

        for (index, id) in self.slots.iter().enumerate() {
            match self.cell(*id) {
                Some(cell) if cell.current.index(self.width) == index => {}
                _ => return false,
            }
        }

        let mut carried = vec![0u8; self.item_cells.len()];
        for cell in &self.cells {
            for item in &cell.occupants {
                match carried.get_mut(item.index()) {
                    Some(count) => *count += 1,
                    None => return false,
                }
                if self.item_cells[item.index()] != cell.id {
                    return false;
                }
            }
        }
        carried.iter().all(|c| *c == 1)
    }
}
