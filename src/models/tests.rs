#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── Category registry ─────────────────────────────────────────

#[test]
fn test_registry_has_six_entries() {
    assert_eq!(Category::all().len(), 6);
}

#[test]
fn test_registry_order() {
    let ids: Vec<&str> = Category::all().iter().map(|c| c.id).collect();
    assert_eq!(
        ids,
        ["food", "transport", "entertainment", "shopping", "housing", "others"]
    );
}

#[test]
fn test_resolve_known_ids() {
    for cat in Category::all() {
        assert_eq!(Category::resolve(cat.id), cat);
    }
}

#[test]
fn test_resolve_unknown_id_falls_back() {
    assert_eq!(Category::resolve("dining-out").id, "others");
    assert_eq!(Category::resolve("dining-out"), Category::fallback());
}

#[test]
fn test_resolve_empty_id_falls_back() {
    assert_eq!(Category::resolve("").id, "others");
}

#[test]
fn test_resolve_is_case_sensitive() {
    // Ids are exact matches; "Food" is not a registered id
    assert_eq!(Category::resolve("Food").id, "others");
}

#[test]
fn test_fallback_is_last_entry() {
    assert_eq!(Category::fallback(), Category::all().last().unwrap());
}

#[test]
fn test_colors_are_hex_triplets() {
    for cat in Category::all() {
        assert!(cat.color.starts_with('#'), "{} color", cat.id);
        assert_eq!(cat.color.len(), 7, "{} color", cat.id);
    }
}

#[test]
fn test_category_display() {
    assert_eq!(format!("{}", Category::resolve("food")), "Food");
    assert_eq!(format!("{}", Category::fallback()), "Others");
}

// ── ExpenseRecord wire format ─────────────────────────────────

fn make_record() -> ExpenseRecord {
    ExpenseRecord {
        id: 1704067200000,
        amount: dec!(100.50),
        category: "food".into(),
        date: "2024-01-01".into(),
        note: "lunch".into(),
    }
}

#[test]
fn test_record_serializes_amount_as_number() {
    let json = serde_json::to_string(&make_record()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["id"], 1704067200000i64);
    assert_eq!(value["amount"], 100.5);
    assert_eq!(value["category"], "food");
    assert_eq!(value["date"], "2024-01-01");
    assert_eq!(value["note"], "lunch");
}

#[test]
fn test_record_deserializes_float_amount() {
    let raw = r#"{"id":1700000000000,"amount":42.5,"category":"transport","date":"2024-02-10","note":""}"#;
    let record: ExpenseRecord = serde_json::from_str(raw).unwrap();
    assert_eq!(record.amount, dec!(42.5));
    assert_eq!(record.category, "transport");
}

#[test]
fn test_record_deserializes_integer_amount() {
    let raw = r#"{"id":1,"amount":5,"category":"food","date":"2024-01-01","note":""}"#;
    let record: ExpenseRecord = serde_json::from_str(raw).unwrap();
    assert_eq!(record.amount, dec!(5));
}

#[test]
fn test_record_missing_note_defaults_empty() {
    let raw = r#"{"id":1,"amount":5,"category":"food","date":"2024-01-01"}"#;
    let record: ExpenseRecord = serde_json::from_str(raw).unwrap();
    assert!(record.note.is_empty());
}

#[test]
fn test_record_roundtrip() {
    let record = make_record();
    let json = serde_json::to_string(&record).unwrap();
    let back: ExpenseRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_record_resolves_stale_category() {
    let mut record = make_record();
    record.category = "subscriptions".into();
    assert_eq!(record.resolved_category().id, "others");

    record.category = "housing".into();
    assert_eq!(record.resolved_category().name, "Housing");
}
