use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{Category, ExpenseRecord};

/// One slice of the per-category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: &'static Category,
    pub(crate) total: Decimal,
}

/// Sum of all record amounts. Empty input sums to zero.
pub(crate) fn total_spend(records: &[ExpenseRecord]) -> Decimal {
    records.iter().map(|r| r.amount).sum()
}

/// Budget minus spend. Goes negative when over budget; no floor.
pub(crate) fn remaining_budget(budget: Decimal, total_spend: Decimal) -> Decimal {
    budget - total_spend
}

/// Per-category totals in registry order, categories with nothing
/// spent omitted. Records bucket through the lenient resolver, so an
/// id that no longer matches anything counts under the catch-all and
/// the slices always sum back to `total_spend`.
pub(crate) fn category_breakdown(
    records: &[ExpenseRecord],
    categories: &'static [Category],
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for record in records {
        let resolved = Category::resolve(&record.category);
        *totals.entry(resolved.id).or_insert(Decimal::ZERO) += record.amount;
    }

    categories
        .iter()
        .filter_map(|category| {
            let total = totals.get(category.id).copied().unwrap_or(Decimal::ZERO);
            if total.is_zero() {
                None
            } else {
                Some(CategoryTotal { category, total })
            }
        })
        .collect()
}
