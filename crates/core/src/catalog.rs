//! Item arena for a session.
//!
//! Items are created once from source data and never mutated. Cells refer to
//! them by [`ItemId`], so there is exactly one copy of every item no matter how
//! many views (grid, drag overlay, audio cue) point at it.

use std::collections::HashMap;

use arrayvec::ArrayVec;

use crate::placeholder;
use crate::source::{DataError, SourceGrid};
use crate::types::{InteractionMode, ItemId, Position, MAX_CELL_OCCUPANTS};

/// A labeled phonetic item with its pedagogically correct slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    /// Id from the source dataset.
    pub key: String,
    /// IPA symbol shown to the learner.
    pub label: String,
    pub pronunciation: Option<String>,
    pub audio_urls: Vec<String>,
    pub canonical: Position,
}

/// Where a catalog's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Source,
    Placeholder,
}

/// Immutable set of items plus their canonical grid layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    width: u16,
    height: u16,
    items: Vec<Item>,
    /// Row-major canonical occupants of every cell.
    layout: Vec<ArrayVec<ItemId, MAX_CELL_OCCUPANTS>>,
    by_key: HashMap<String, ItemId>,
    origin: DataOrigin,
}

impl Catalog {
    pub(crate) fn from_parts(
        width: u16,
        height: u16,
        items: Vec<Item>,
        layout: Vec<ArrayVec<ItemId, MAX_CELL_OCCUPANTS>>,
        origin: DataOrigin,
    ) -> Self {
        debug_assert_eq!(layout.len(), (width as usize) * (height as usize));
        let by_key = items.iter().map(|it| (it.key.clone(), it.id)).collect();
        Self {
            width,
            height,
            items,
            layout,
            by_key,
            origin,
        }
    }

    /// Parse `source`; never fails.
    ///
    /// Malformed data is replaced by the built-in placeholder for `mode` so the
    /// session stays playable. The rejection is logged.
    pub fn from_source_or_placeholder(source: &SourceGrid, mode: InteractionMode) -> Self {
        match source.parse(mode) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::warn!("dataset rejected ({err}); using placeholder for {} mode", mode.as_str());
                Self::placeholder(mode)
            }
        }
    }

    /// Decode JSON text and parse it, falling back to the placeholder on any error.
    pub fn from_json_or_placeholder(text: &str, mode: InteractionMode) -> Self {
        match SourceGrid::from_json(text) {
            Ok(source) => Self::from_source_or_placeholder(&source, mode),
            Err(err) => {
                log::warn!("dataset rejected ({err}); using placeholder for {} mode", mode.as_str());
                Self::placeholder(mode)
            }
        }
    }

    /// Built-in dataset for `mode`.
    pub fn placeholder(mode: InteractionMode) -> Self {
        placeholder::catalog_for(mode)
    }

    pub fn parse(source: &SourceGrid, mode: InteractionMode) -> Result<Self, DataError> {
        source.parse(mode)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.layout.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    pub fn item_by_key(&self, key: &str) -> Option<&Item> {
        self.by_key.get(key).and_then(|id| self.item(*id))
    }

    pub fn layout(&self) -> &[ArrayVec<ItemId, MAX_CELL_OCCUPANTS>] {
        &self.layout
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    /// Labels of `ids`, joined with a space (`"i y"`), for compact displays.
    pub fn joined_labels(&self, ids: &[ItemId]) -> String {
        let mut out = String::new();
        for id in ids {
            if let Some(item) = self.item(*id) {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&item.label);
            }
        }
        out
    }
}
