//! Built-in datasets used whenever lesson content is missing or malformed.

use arrayvec::ArrayVec;

use crate::catalog::{Catalog, DataOrigin, Item};
use crate::types::{InteractionMode, ItemId, Position, MAX_CELL_OCCUPANTS};

/// `(source id, IPA symbol)`
type Entry = (&'static str, &'static str);

/// Tongue-position chart: rows close -> open, columns front -> back.
/// Each slot pairs the unrounded vowel with its rounded counterpart.
const TONGUE_CHART: [[&[Entry]; 3]; 4] = [
    [
        &[("close-front-unrounded", "i"), ("close-front-rounded", "y")],
        &[("close-central-unrounded", "ɨ"), ("close-central-rounded", "ʉ")],
        &[("close-back-unrounded", "ɯ"), ("close-back-rounded", "u")],
    ],
    [
        &[("close-mid-front-unrounded", "e"), ("close-mid-front-rounded", "ø")],
        &[("close-mid-central-unrounded", "ɘ"), ("close-mid-central-rounded", "ɵ")],
        &[("close-mid-back-unrounded", "ɤ"), ("close-mid-back-rounded", "o")],
    ],
    [
        &[("open-mid-front-unrounded", "ɛ"), ("open-mid-front-rounded", "œ")],
        &[("open-mid-central-unrounded", "ɜ"), ("open-mid-central-rounded", "ɞ")],
        &[("open-mid-back-unrounded", "ʌ"), ("open-mid-back-rounded", "ɔ")],
    ],
    [
        &[("open-front-unrounded", "a"), ("open-front-rounded", "ɶ")],
        &[],
        &[("open-back-unrounded", "ɑ"), ("open-back-rounded", "ɒ")],
    ],
];

/// Short/long vowel pairs for the flat length-grouping list.
const LENGTH_LIST: [Entry; 8] = [
    ("short-i", "ɪ"),
    ("long-i", "iː"),
    ("short-u", "ʊ"),
    ("long-u", "uː"),
    ("schwa", "ə"),
    ("long-schwa", "ɜː"),
    ("short-o", "ɒ"),
    ("long-o", "ɔː"),
];

pub(crate) fn catalog_for(mode: InteractionMode) -> Catalog {
    match mode {
        InteractionMode::Swap { grouping_arity } => tongue_chart(grouping_arity.max_occupants()),
        InteractionMode::Reorder => length_list(),
    }
}

fn tongue_chart(per_cell: usize) -> Catalog {
    let width = TONGUE_CHART[0].len() as u16;
    let height = TONGUE_CHART.len() as u16;
    let mut builder = Builder::default();
    for row in TONGUE_CHART.iter() {
        for slot in row.iter() {
            builder.push_cell(&slot[..slot.len().min(per_cell)], width);
        }
    }
    builder.finish(width, height)
}

fn length_list() -> Catalog {
    let width = LENGTH_LIST.len() as u16;
    let mut builder = Builder::default();
    for entry in LENGTH_LIST.iter() {
        builder.push_cell(std::slice::from_ref(entry), width);
    }
    builder.finish(width, 1)
}

#[derive(Default)]
struct Builder {
    items: Vec<Item>,
    layout: Vec<ArrayVec<ItemId, MAX_CELL_OCCUPANTS>>,
}

impl Builder {
    fn push_cell(&mut self, entries: &[Entry], width: u16) {
        let canonical = Position::from_index(self.layout.len(), width);
        let mut occupants = ArrayVec::new();
        for (key, label) in entries.iter().take(MAX_CELL_OCCUPANTS) {
            let id = ItemId(self.items.len() as u16);
            self.items.push(Item {
                id,
                key: (*key).to_string(),
                label: (*label).to_string(),
                pronunciation: None,
                audio_urls: vec![
                    format!("audio/vowels/{key}.mp3"),
                    format!("audio/vowels/{key}.ogg"),
                ],
                canonical,
            });
            occupants.push(id);
        }
        self.layout.push(occupants);
    }

    fn finish(self, width: u16, height: u16) -> Catalog {
        Catalog::from_parts(width, height, self.items, self.layout, DataOrigin::Placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroupingArity;
    use std::collections::HashSet;

    #[test]
    fn tongue_chart_is_dense_with_one_vacancy() {
        let catalog = catalog_for(InteractionMode::Swap {
            grouping_arity: GroupingArity::Pair,
        });
        assert_eq!((catalog.width(), catalog.height()), (3, 4));
        assert_eq!(catalog.cell_count(), 12);
        assert_eq!(catalog.item_count(), 22);
        assert_eq!(catalog.layout().iter().filter(|c| c.is_empty()).count(), 1);
        assert_eq!(catalog.origin(), DataOrigin::Placeholder);
    }

    #[test]
    fn single_arity_chart_keeps_one_item_per_cell() {
        let catalog = catalog_for(InteractionMode::Swap {
            grouping_arity: GroupingArity::Single,
        });
        assert_eq!(catalog.item_count(), 11);
        assert!(catalog.layout().iter().all(|c| c.len() <= 1));
        assert_eq!(catalog.item_by_key("close-front-unrounded").unwrap().label, "i");
    }

    #[test]
    fn length_list_is_one_row() {
        let catalog = catalog_for(InteractionMode::Reorder);
        assert_eq!((catalog.width(), catalog.height()), (8, 1));
        assert_eq!(catalog.item_count(), 8);
        assert_eq!(catalog.item_by_key("long-o").unwrap().canonical, Position::new(0, 7));
    }

    #[test]
    fn placeholder_keys_are_unique_and_have_fallback_audio() {
        for mode in [InteractionMode::default(), InteractionMode::Reorder] {
            let catalog = catalog_for(mode);
            let keys: HashSet<&str> = catalog.items().iter().map(|i| i.key.as_str()).collect();
            assert_eq!(keys.len(), catalog.item_count());
            assert!(catalog.items().iter().all(|i| i.audio_urls.len() == 2));
        }
    }
}
