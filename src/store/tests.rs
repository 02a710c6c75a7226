#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn empty_ledger() -> Ledger {
    Ledger::initialize(LocalStore::open_in_memory().unwrap()).unwrap()
}

// ── LocalStore ────────────────────────────────────────────────

#[test]
fn test_get_missing_key() {
    let store = LocalStore::open_in_memory().unwrap();
    assert_eq!(store.get("nope").unwrap(), None);
}

#[test]
fn test_set_then_get() {
    let store = LocalStore::open_in_memory().unwrap();
    store.set("greeting", "hello").unwrap();
    assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));
}

#[test]
fn test_set_overwrites() {
    let store = LocalStore::open_in_memory().unwrap();
    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn test_keys_are_independent() {
    let store = LocalStore::open_in_memory().unwrap();
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_open_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let store = LocalStore::open(&path).unwrap();
    store.set("k", "v").unwrap();
    assert!(path.exists());
}

#[test]
fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    {
        let store = LocalStore::open(&path).unwrap();
        store.set("k", "persisted").unwrap();
    }
    let store = LocalStore::open(&path).unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("persisted"));
}

// ── Hydration ─────────────────────────────────────────────────

#[test]
fn test_initialize_empty_store() {
    let ledger = empty_ledger();
    assert!(ledger.records().is_empty());
    assert_eq!(ledger.budget(), Decimal::ZERO);
}

#[test]
fn test_initialize_reads_persisted_state() {
    let store = LocalStore::open_in_memory().unwrap();
    store
        .set(
            EXPENSES_KEY,
            r#"[{"id":2,"amount":12.5,"category":"food","date":"2024-01-02","note":"lunch"},
                {"id":1,"amount":30,"category":"transport","date":"2024-01-01","note":""}]"#,
        )
        .unwrap();
    store.set(BUDGET_KEY, "250").unwrap();

    let ledger = Ledger::initialize(store).unwrap();
    assert_eq!(ledger.records().len(), 2);
    assert_eq!(ledger.records()[0].amount, dec!(12.5));
    assert_eq!(ledger.records()[0].note, "lunch");
    assert_eq!(ledger.budget(), dec!(250));
}

#[test]
fn test_initialize_malformed_expenses_falls_back_empty() {
    let store = LocalStore::open_in_memory().unwrap();
    store.set(EXPENSES_KEY, "{definitely not json").unwrap();
    store.set(BUDGET_KEY, "100").unwrap();

    let ledger = Ledger::initialize(store).unwrap();
    assert!(ledger.records().is_empty());
    // The other key is unaffected by the bad one
    assert_eq!(ledger.budget(), dec!(100));
}

#[test]
fn test_initialize_wrong_shape_falls_back_empty() {
    let store = LocalStore::open_in_memory().unwrap();
    // Valid JSON, wrong shape
    store.set(EXPENSES_KEY, r#"{"id":1}"#).unwrap();
    let ledger = Ledger::initialize(store).unwrap();
    assert!(ledger.records().is_empty());
}

#[test]
fn test_initialize_malformed_budget_falls_back_zero() {
    let store = LocalStore::open_in_memory().unwrap();
    store.set(BUDGET_KEY, "not-a-number").unwrap();
    let ledger = Ledger::initialize(store).unwrap();
    assert_eq!(ledger.budget(), Decimal::ZERO);
}

#[test]
fn test_initialize_decimal_budget_string() {
    let store = LocalStore::open_in_memory().unwrap();
    store.set(BUDGET_KEY, "1234.56").unwrap();
    let ledger = Ledger::initialize(store).unwrap();
    assert_eq!(ledger.budget(), dec!(1234.56));
}

#[test]
fn test_initialize_resorts_stale_order() {
    let store = LocalStore::open_in_memory().unwrap();
    store
        .set(
            EXPENSES_KEY,
            r#"[{"id":1,"amount":1,"category":"food","date":"2024-01-01","note":""},
                {"id":3,"amount":3,"category":"food","date":"2024-03-01","note":""},
                {"id":2,"amount":2,"category":"food","date":"2024-02-01","note":""}]"#,
        )
        .unwrap();

    let ledger = Ledger::initialize(store).unwrap();
    let dates: Vec<&str> = ledger.records().iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, ["2024-03-01", "2024-02-01", "2024-01-01"]);
}

// ── add_expense ───────────────────────────────────────────────

#[test]
fn test_add_expense_stores_fields() {
    let mut ledger = empty_ledger();
    let id = ledger
        .add_expense("12.50", "food", "2024-01-15", "lunch")
        .unwrap();

    assert_eq!(ledger.records().len(), 1);
    let record = &ledger.records()[0];
    assert_eq!(record.id, id);
    assert_eq!(record.amount, dec!(12.50));
    assert_eq!(record.category, "food");
    assert_eq!(record.date, "2024-01-15");
    assert_eq!(record.note, "lunch");
}

#[test]
fn test_add_expense_rejects_empty_amount() {
    let mut ledger = empty_ledger();
    let err = ledger.add_expense("", "food", "2024-01-01", "").unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::MissingAmount)
    );
    assert!(ledger.records().is_empty());
}

#[test]
fn test_add_expense_rejects_blank_amount() {
    let mut ledger = empty_ledger();
    let err = ledger
        .add_expense("   ", "food", "2024-01-01", "")
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::MissingAmount)
    );
}

#[test]
fn test_add_expense_rejects_non_numeric_amount() {
    let mut ledger = empty_ledger();
    let err = ledger
        .add_expense("abc", "food", "2024-01-01", "")
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::InvalidAmount("abc".into()))
    );
    assert!(ledger.records().is_empty());
}

#[test]
fn test_add_expense_rejects_negative_amount() {
    let mut ledger = empty_ledger();
    let err = ledger
        .add_expense("-5", "food", "2024-01-01", "")
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InvalidAmount(_))
    ));
    assert!(ledger.records().is_empty());
}

#[test]
fn test_add_expense_accepts_zero_amount() {
    let mut ledger = empty_ledger();
    ledger.add_expense("0", "food", "2024-01-01", "").unwrap();
    assert_eq!(ledger.records()[0].amount, Decimal::ZERO);
}

#[test]
fn test_add_expense_rejects_empty_date() {
    let mut ledger = empty_ledger();
    let err = ledger.add_expense("10", "food", "", "").unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::MissingDate)
    );
    assert!(ledger.records().is_empty());
}

#[test]
fn test_add_expense_rejection_does_not_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");

    let mut ledger = Ledger::initialize(LocalStore::open(&path).unwrap()).unwrap();
    ledger
        .add_expense("oops", "food", "2024-01-01", "")
        .unwrap_err();
    drop(ledger);

    let store = LocalStore::open(&path).unwrap();
    assert_eq!(store.get(EXPENSES_KEY).unwrap(), None);
}

#[test]
fn test_add_expense_accepts_unregistered_category() {
    // Category ids are not validated at write time
    let mut ledger = empty_ledger();
    ledger
        .add_expense("10", "subscriptions", "2024-01-01", "")
        .unwrap();
    assert_eq!(ledger.records()[0].category, "subscriptions");
}

#[test]
fn test_add_expense_newest_date_first() {
    let mut ledger = empty_ledger();
    ledger.add_expense("100", "food", "2024-01-01", "").unwrap();
    ledger
        .add_expense("50", "transport", "2024-01-02", "")
        .unwrap();
    ledger
        .add_expense("25", "shopping", "2023-12-15", "")
        .unwrap();

    let dates: Vec<&str> = ledger.records().iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, ["2024-01-02", "2024-01-01", "2023-12-15"]);
}

#[test]
fn test_add_expense_equal_dates_newest_added_first() {
    let mut ledger = empty_ledger();
    ledger.add_expense("1", "food", "2024-01-01", "a").unwrap();
    ledger.add_expense("2", "food", "2024-01-01", "b").unwrap();
    ledger.add_expense("3", "food", "2024-01-01", "c").unwrap();

    let notes: Vec<&str> = ledger.records().iter().map(|r| r.note.as_str()).collect();
    assert_eq!(notes, ["c", "b", "a"]);
}

#[test]
fn test_add_expense_ids_strictly_increase() {
    let mut ledger = empty_ledger();
    let a = ledger.add_expense("1", "food", "2024-01-01", "").unwrap();
    let b = ledger.add_expense("2", "food", "2024-01-01", "").unwrap();
    let c = ledger.add_expense("3", "food", "2024-01-01", "").unwrap();
    assert!(a < b);
    assert!(b < c);
}

#[test]
fn test_add_expense_trims_input() {
    let mut ledger = empty_ledger();
    ledger
        .add_expense(" 12.50 ", "food", " 2024-01-15 ", "  lunch  ")
        .unwrap();
    let record = &ledger.records()[0];
    assert_eq!(record.amount, dec!(12.50));
    assert_eq!(record.date, "2024-01-15");
    assert_eq!(record.note, "lunch");
}

// ── delete_expense ────────────────────────────────────────────

#[test]
fn test_delete_expense_removes_by_id() {
    let mut ledger = empty_ledger();
    let keep = ledger.add_expense("1", "food", "2024-01-01", "").unwrap();
    let gone = ledger.add_expense("2", "food", "2024-01-02", "").unwrap();

    assert!(ledger.delete_expense(gone).unwrap());
    assert_eq!(ledger.records().len(), 1);
    assert_eq!(ledger.records()[0].id, keep);
}

#[test]
fn test_delete_expense_absent_id_is_noop() {
    let mut ledger = empty_ledger();
    ledger.add_expense("1", "food", "2024-01-01", "").unwrap();

    assert!(!ledger.delete_expense(999).unwrap());
    assert_eq!(ledger.records().len(), 1);
}

#[test]
fn test_delete_expense_twice() {
    let mut ledger = empty_ledger();
    let id = ledger.add_expense("1", "food", "2024-01-01", "").unwrap();

    assert!(ledger.delete_expense(id).unwrap());
    assert!(!ledger.delete_expense(id).unwrap());
    assert!(ledger.records().is_empty());
}

// ── set_budget ────────────────────────────────────────────────

#[test]
fn test_set_budget_stores_value() {
    let mut ledger = empty_ledger();
    ledger.set_budget("200").unwrap();
    assert_eq!(ledger.budget(), dec!(200));
}

#[test]
fn test_set_budget_accepts_decimal() {
    let mut ledger = empty_ledger();
    ledger.set_budget("1500.75").unwrap();
    assert_eq!(ledger.budget(), dec!(1500.75));
}

#[test]
fn test_set_budget_rejects_non_numeric_keeps_previous() {
    let mut ledger = empty_ledger();
    ledger.set_budget("300").unwrap();

    let err = ledger.set_budget("lots").unwrap_err();
    assert_eq!(
        err.downcast_ref::<LedgerError>(),
        Some(&LedgerError::InvalidBudget("lots".into()))
    );
    assert_eq!(ledger.budget(), dec!(300));
}

#[test]
fn test_set_budget_rejects_negative() {
    let mut ledger = empty_ledger();
    let err = ledger.set_budget("-50").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InvalidBudget(_))
    ));
    assert_eq!(ledger.budget(), Decimal::ZERO);
}

#[test]
fn test_set_budget_rejects_empty() {
    let mut ledger = empty_ledger();
    assert!(ledger.set_budget("").is_err());
    assert!(ledger.set_budget("   ").is_err());
}

#[test]
fn test_set_budget_zero_allowed() {
    let mut ledger = empty_ledger();
    ledger.set_budget("100").unwrap();
    ledger.set_budget("0").unwrap();
    assert_eq!(ledger.budget(), Decimal::ZERO);
}

// ── Persistence across reopen ─────────────────────────────────

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");

    {
        let mut ledger = Ledger::initialize(LocalStore::open(&path).unwrap()).unwrap();
        ledger.set_budget("200").unwrap();
        ledger
            .add_expense("100", "food", "2024-01-01", "groceries")
            .unwrap();
        ledger
            .add_expense("50", "transport", "2024-01-02", "")
            .unwrap();
    }

    let ledger = Ledger::initialize(LocalStore::open(&path).unwrap()).unwrap();
    assert_eq!(ledger.budget(), dec!(200));
    assert_eq!(ledger.records().len(), 2);
    assert_eq!(ledger.records()[0].category, "transport");
    assert_eq!(ledger.records()[1].category, "food");
    assert_eq!(ledger.records()[1].note, "groceries");
}

#[test]
fn test_delete_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");

    let id = {
        let mut ledger = Ledger::initialize(LocalStore::open(&path).unwrap()).unwrap();
        let id = ledger.add_expense("10", "food", "2024-01-01", "").unwrap();
        ledger.add_expense("20", "food", "2024-01-02", "").unwrap();
        ledger.delete_expense(id).unwrap();
        id
    };

    let ledger = Ledger::initialize(LocalStore::open(&path).unwrap()).unwrap();
    assert_eq!(ledger.records().len(), 1);
    assert!(ledger.records().iter().all(|r| r.id != id));
}

#[test]
fn test_budget_persisted_as_plain_string() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");

    {
        let mut ledger = Ledger::initialize(LocalStore::open(&path).unwrap()).unwrap();
        ledger.set_budget("200").unwrap();
    }

    let store = LocalStore::open(&path).unwrap();
    assert_eq!(store.get(BUDGET_KEY).unwrap().as_deref(), Some("200"));
}

#[test]
fn test_records_persisted_as_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");

    {
        let mut ledger = Ledger::initialize(LocalStore::open(&path).unwrap()).unwrap();
        ledger
            .add_expense("12.5", "food", "2024-01-01", "lunch")
            .unwrap();
    }

    let store = LocalStore::open(&path).unwrap();
    let raw = store.get(EXPENSES_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["amount"], 12.5);
    assert_eq!(array[0]["category"], "food");
}

// ── End to end ────────────────────────────────────────────────

#[test]
fn test_budget_tracking_scenario() {
    let mut ledger = empty_ledger();
    ledger.set_budget("200").unwrap();
    ledger.add_expense("100", "food", "2024-01-01", "").unwrap();
    ledger
        .add_expense("50", "transport", "2024-01-02", "")
        .unwrap();

    let total = crate::summary::total_spend(ledger.records());
    assert_eq!(total, dec!(150));
    assert_eq!(
        crate::summary::remaining_budget(ledger.budget(), total),
        dec!(50)
    );

    let categories: Vec<&str> = ledger.records().iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, ["transport", "food"]);
}

#[test]
fn test_delete_restores_remaining_budget() {
    let mut ledger = empty_ledger();
    ledger.set_budget("200").unwrap();
    let id = ledger.add_expense("80", "food", "2024-01-01", "").unwrap();
    ledger
        .add_expense("40", "shopping", "2024-01-02", "")
        .unwrap();

    ledger.delete_expense(id).unwrap();

    let total = crate::summary::total_spend(ledger.records());
    assert_eq!(total, dec!(40));
    assert_eq!(
        crate::summary::remaining_budget(ledger.budget(), total),
        dec!(160)
    );
}

#[test]
fn test_delete_narrows_breakdown() {
    let mut ledger = empty_ledger();
    ledger.add_expense("100", "food", "2024-01-01", "").unwrap();
    let transport = ledger
        .add_expense("50", "transport", "2024-01-02", "")
        .unwrap();

    ledger.delete_expense(transport).unwrap();

    assert_eq!(ledger.records().len(), 1);
    assert_eq!(ledger.records()[0].category, "food");
    assert_eq!(crate::summary::total_spend(ledger.records()), dec!(100));

    let breakdown =
        crate::summary::category_breakdown(ledger.records(), crate::models::Category::all());
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].category.id, "food");
    assert_eq!(breakdown[0].total, dec!(100));
}
