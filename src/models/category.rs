/// A spending category. The set is fixed at compile time: six entries
/// in display order, with the last one doubling as the catch-all for
/// ids that no longer match anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// `#RRGGBB` hex, parsed by the UI for chart and legend colors.
    pub color: &'static str,
    pub icon: &'static str,
}

const REGISTRY: [Category; 6] = [
    Category {
        id: "food",
        name: "Food",
        color: "#0088FE",
        icon: "🍜",
    },
    Category {
        id: "transport",
        name: "Transport",
        color: "#00C49F",
        icon: "🚌",
    },
    Category {
        id: "entertainment",
        name: "Entertainment",
        color: "#FFBB28",
        icon: "🎮",
    },
    Category {
        id: "shopping",
        name: "Shopping",
        color: "#FF8042",
        icon: "🛒",
    },
    Category {
        id: "housing",
        name: "Housing",
        color: "#AF19FF",
        icon: "🏠",
    },
    Category {
        id: "others",
        name: "Others",
        color: "#8884d8",
        icon: "📦",
    },
];

impl Category {
    /// All categories, in display order.
    pub fn all() -> &'static [Category] {
        &REGISTRY
    }

    /// Look up a category by id. Unknown ids resolve to the catch-all
    /// entry instead of failing, so records written under an id that
    /// was later renamed still display somewhere sensible.
    pub fn resolve(id: &str) -> &'static Category {
        REGISTRY
            .iter()
            .find(|c| c.id == id)
            .unwrap_or(Self::fallback())
    }

    /// The catch-all entry (always last in the registry).
    pub fn fallback() -> &'static Category {
        &REGISTRY[REGISTRY.len() - 1]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
