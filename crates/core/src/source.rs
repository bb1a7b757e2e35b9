//! Source data parsing.
//!
//! Lesson content arrives already fetched, as one of two JSON-shaped layouts:
//!
//! - **Nested**: `rows[cols][items]`, where every leaf holds 0-2 item records.
//! - **Placed**: `{ "width", "height", "items": [{ "row", "col", ...item }] }`.
//!
//! Both normalize into a [`Catalog`](crate::catalog::Catalog). Anything
//! inconsistent is rejected as a whole; partial grids are never produced.

use std::collections::HashSet;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, DataOrigin, Item};
use crate::types::{InteractionMode, ItemId, Position, MAX_CELL_OCCUPANTS};

/// One phonetic item as delivered by the content collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceItem {
    pub id: String,
    pub ipa_symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub audio_urls: Vec<String>,
}

impl SourceItem {
    pub fn new(id: impl Into<String>, ipa_symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ipa_symbol: ipa_symbol.into(),
            pronunciation: None,
            audio_urls: Vec::new(),
        }
    }

    pub fn with_audio(mut self, url: impl Into<String>) -> Self {
        self.audio_urls.push(url.into());
        self
    }
}

/// An item with an explicit canonical slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub row: u16,
    pub col: u16,
    #[serde(flatten)]
    pub item: SourceItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedGrid {
    pub width: u16,
    pub height: u16,
    pub items: Vec<PlacedItem>,
}

/// Raw grid description, in either supported layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceGrid {
    Nested(Vec<Vec<Vec<SourceItem>>>),
    Placed(PlacedGrid),
}

/// Reasons a source grid is refused.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset could not be decoded: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset has no rows")]
    NoRows,
    #[error("dataset has no columns")]
    NoColumns,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
    #[error("cell {position} holds {found} items, at most {max} allowed")]
    Overfull {
        position: Position,
        found: usize,
        max: usize,
    },
    #[error("item {id:?} placed at {position} outside a {width}x{height} grid")]
    OutOfRange {
        id: String,
        position: Position,
        width: u16,
        height: u16,
    },
    #[error("item id {0:?} appears more than once")]
    DuplicateId(String),
    #[error("item at {0} has an empty id")]
    EmptyId(Position),
    #[error("dataset contains no items")]
    NoItems,
}

impl SourceGrid {
    /// Decode a dataset from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate and flatten into an item arena plus canonical layout.
    pub fn parse(&self, mode: InteractionMode) -> Result<Catalog, DataError> {
        let (width, height, slots) = match self {
            SourceGrid::Nested(rows) => nested_slots(rows)?,
            SourceGrid::Placed(grid) => placed_slots(grid)?,
        };
        build_catalog(width, height, slots, mode)
    }
}

type Slots<'a> = Vec<Vec<&'a SourceItem>>;

fn check_dimensions(width: usize, height: usize) -> Result<(u16, u16), DataError> {
    if height == 0 {
        return Err(DataError::NoRows);
    }
    if width == 0 {
        return Err(DataError::NoColumns);
    }
    // Ids are u16 and every cell may carry a full complement of items.
    let capacity = width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(MAX_CELL_OCCUPANTS));
    match capacity {
        Some(n) if n <= u16::MAX as usize => Ok((width as u16, height as u16)),
        _ => Err(DataError::TooLarge { width, height }),
    }
}

fn nested_slots(rows: &[Vec<Vec<SourceItem>>]) -> Result<(u16, u16, Slots<'_>), DataError> {
    let expected = rows.first().map(|r| r.len()).unwrap_or(0);
    let (width, height) = check_dimensions(expected, rows.len())?;

    let mut slots = Vec::with_capacity(expected * rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        if row.len() != expected {
            return Err(DataError::RaggedRow {
                row: row_idx,
                expected,
                found: row.len(),
            });
        }
        for leaf in row {
            slots.push(leaf.iter().collect());
        }
    }
    Ok((width, height, slots))
}

fn placed_slots(grid: &PlacedGrid) -> Result<(u16, u16, Slots<'_>), DataError> {
    let (width, height) = check_dimensions(grid.width as usize, grid.height as usize)?;

    let mut slots: Slots<'_> = vec![Vec::new(); (width as usize) * (height as usize)];
    for placed in &grid.items {
        let position = Position::new(placed.row, placed.col);
        if placed.row >= height || placed.col >= width {
            return Err(DataError::OutOfRange {
                id: placed.item.id.clone(),
                position,
                width,
                height,
            });
        }
        slots[position.index(width)].push(&placed.item);
    }
    Ok((width, height, slots))
}

fn build_catalog(
    width: u16,
    height: u16,
    slots: Slots<'_>,
    mode: InteractionMode,
) -> Result<Catalog, DataError> {
    let max = mode.max_occupants();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut items = Vec::new();
    let mut layout = Vec::with_capacity(slots.len());

    for (index, leaf) in slots.into_iter().enumerate() {
        let position = Position::from_index(index, width);
        if leaf.len() > max {
            return Err(DataError::Overfull {
                position,
                found: leaf.len(),
                max,
            });
        }

        let mut occupants: ArrayVec<ItemId, MAX_CELL_OCCUPANTS> = ArrayVec::new();
        for src in leaf {
            let key = src.id.trim();
            if key.is_empty() {
                return Err(DataError::EmptyId(position));
            }
            if !seen.insert(key) {
                return Err(DataError::DuplicateId(key.to_string()));
            }
            let id = ItemId(items.len() as u16);
            items.push(Item {
                id,
                key: key.to_string(),
                label: src.ipa_symbol.clone(),
                pronunciation: src.pronunciation.clone(),
                audio_urls: src.audio_urls.clone(),
                canonical: position,
            });
            occupants.push(id);
        }
        layout.push(occupants);
    }

    if items.is_empty() {
        return Err(DataError::NoItems);
    }

    Ok(Catalog::from_parts(
        width,
        height,
        items,
        layout,
        DataOrigin::Source,
    ))
}
