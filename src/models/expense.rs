use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

/// A single logged expense. Records are never edited in place: the
/// ledger only adds new ones or deletes old ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Creation timestamp in milliseconds, doubling as the unique id.
    pub id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Category id. Stored as written and resolved leniently on display.
    pub category: String,
    /// Calendar date in `YYYY-MM-DD` form, no time component.
    pub date: String,
    #[serde(default)]
    pub note: String,
}

impl ExpenseRecord {
    pub fn resolved_category(&self) -> &'static Category {
        Category::resolve(&self.category)
    }
}
