//! Dataset parsing and placeholder fallback.

use serde_json::json;

use vowel_grid::core::{Catalog, DataError, DataOrigin, QuizSession, SessionConfig, SourceGrid};
use vowel_grid::types::{GroupingArity, InteractionMode, Position};

fn parse(value: serde_json::Value, mode: InteractionMode) -> Result<Catalog, DataError> {
    SourceGrid::from_json(&value.to_string())?.parse(mode)
}

#[test]
fn placed_layout_matches_nested_layout() {
    let nested = json!([
        [[{ "id": "i", "ipaSymbol": "i", "audioUrls": ["i.mp3", "i.ogg"] }], [{ "id": "u", "ipaSymbol": "u" }]],
        [[{ "id": "a", "ipaSymbol": "a", "pronunciation": "father" }], []]
    ]);
    let placed = json!({
        "width": 2,
        "height": 2,
        "items": [
            { "row": 1, "col": 0, "id": "a", "ipaSymbol": "a", "pronunciation": "father" },
            { "row": 0, "col": 0, "id": "i", "ipaSymbol": "i", "audioUrls": ["i.mp3", "i.ogg"] },
            { "row": 0, "col": 1, "id": "u", "ipaSymbol": "u" }
        ]
    });

    let mode = InteractionMode::default();
    let a = parse(nested, mode).unwrap();
    let b = parse(placed, mode).unwrap();

    for catalog in [&a, &b] {
        assert_eq!((catalog.width(), catalog.height()), (2, 2));
        assert_eq!(catalog.item_count(), 3);
        assert_eq!(catalog.origin(), DataOrigin::Source);
        assert_eq!(catalog.item_by_key("a").unwrap().canonical, Position::new(1, 0));
        assert_eq!(catalog.item_by_key("a").unwrap().pronunciation.as_deref(), Some("father"));
        assert_eq!(catalog.item_by_key("i").unwrap().audio_urls.len(), 2);
    }
}

#[test]
fn malformed_datasets_are_rejected() {
    let mode = InteractionMode::default();
    let cases = [
        (json!([]), "no rows"),
        (json!([[]]), "no columns"),
        (json!([[[]], [[], []]]), "columns"),
        (
            json!([[[{ "id": "x", "ipaSymbol": "x" }], [{ "id": "x", "ipaSymbol": "y" }]]]),
            "more than once",
        ),
        (json!([[[{ "id": " ", "ipaSymbol": "x" }]]]), "empty id"),
        (json!([[[], []]]), "no items"),
        (
            json!({ "width": 1, "height": 1, "items": [{ "row": 0, "col": 3, "id": "x", "ipaSymbol": "x" }] }),
            "outside",
        ),
        (json!({ "rows": 3 }), "decoded"),
    ];
    for (value, needle) in cases {
        let err = parse(value.clone(), mode).unwrap_err();
        assert!(err.to_string().contains(needle), "{value}: {err}");
    }
}

#[test]
fn arity_limits_items_per_cell() {
    let pair = json!([[[
        { "id": "i", "ipaSymbol": "i" },
        { "id": "y", "ipaSymbol": "y" }
    ]]]);
    assert!(parse(pair.clone(), InteractionMode::default()).is_ok());

    let single = InteractionMode::Swap {
        grouping_arity: GroupingArity::Single,
    };
    for mode in [single, InteractionMode::Reorder] {
        match parse(pair.clone(), mode) {
            Err(DataError::Overfull { found: 2, max: 1, .. }) => {}
            other => panic!("expected overfull for {}, got {other:?}", mode.as_str()),
        }
    }
}

#[test]
fn session_from_bad_source_uses_placeholder() {
    let ragged: SourceGrid = serde_json::from_value(json!([[[]], [[], []]])).unwrap();
    let session = QuizSession::from_source(&ragged, SessionConfig::default());

    assert_eq!(session.catalog().origin(), DataOrigin::Placeholder);
    assert_eq!((session.catalog().width(), session.catalog().height()), (3, 4));
    assert!(!session.is_complete());
}

#[test]
fn json_fallback_keeps_mode_specific_placeholder() {
    let catalog = Catalog::from_json_or_placeholder("{ not json", InteractionMode::Reorder);
    assert_eq!(catalog.origin(), DataOrigin::Placeholder);
    assert_eq!(catalog.height(), 1);
    assert_eq!(catalog.item_count(), 8);
}
