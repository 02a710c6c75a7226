use chrono::Local;
use rust_decimal::Decimal;

use crate::models::{Category, ExpenseRecord};
use crate::store::Ledger;
use crate::summary::{self, CategoryTotal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Form,
    Budget,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Form => write!(f, "ENTRY"),
            Self::Budget => write!(f, "BUDGET"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Date,
    Category,
    Amount,
    Note,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Date, Self::Category, Self::Amount, Self::Note]
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::Date => Self::Category,
            Self::Category => Self::Amount,
            Self::Amount => Self::Note,
            Self::Note => Self::Date,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Date => Self::Note,
            Self::Category => Self::Date,
            Self::Amount => Self::Category,
            Self::Note => Self::Amount,
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "Date"),
            Self::Category => write!(f, "Category"),
            Self::Amount => write!(f, "Amount"),
            Self::Note => write!(f, "Note"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, label: String },
}

/// Draft state for the new-expense form. The category is picked by
/// cycling through the registry rather than typed.
#[derive(Debug, Clone)]
pub(crate) struct ExpenseForm {
    pub(crate) date: String,
    pub(crate) category_index: usize,
    pub(crate) amount: String,
    pub(crate) note: String,
    pub(crate) focus: FormField,
}

impl ExpenseForm {
    pub(crate) fn new() -> Self {
        Self {
            date: Local::now().format("%Y-%m-%d").to_string(),
            category_index: 0,
            amount: String::new(),
            note: String::new(),
            focus: FormField::Date,
        }
    }

    /// Back to defaults after a successful submit: today's date, first
    /// category, cleared amount and note. Focus stays where it was.
    pub(crate) fn reset(&mut self) {
        let focus = self.focus;
        *self = Self::new();
        self.focus = focus;
    }

    pub(crate) fn selected_category(&self) -> &'static Category {
        let all = Category::all();
        &all[self.category_index % all.len()]
    }

    pub(crate) fn cycle_category(&mut self, delta: i32) {
        let len = Category::all().len() as i32;
        let idx = self.category_index as i32 + delta;
        self.category_index = idx.rem_euclid(len) as usize;
    }

    /// Text buffer of the focused field, if it takes typed input.
    pub(crate) fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Date => Some(&mut self.date),
            FormField::Amount => Some(&mut self.amount),
            FormField::Note => Some(&mut self.note),
            FormField::Category => None,
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Ledger snapshot and derived aggregates, recomputed after every
    // mutation via refresh()
    pub(crate) records: Vec<ExpenseRecord>,
    pub(crate) budget: Decimal,
    pub(crate) total_spend: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) breakdown: Vec<CategoryTotal>,

    // Expense table
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // New-expense form
    pub(crate) form: ExpenseForm,

    // Budget editor (bottom-bar input)
    pub(crate) budget_input: String,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            status_message: String::new(),
            show_help: false,

            records: Vec::new(),
            budget: Decimal::ZERO,
            total_spend: Decimal::ZERO,
            remaining: Decimal::ZERO,
            breakdown: Vec::new(),

            expense_index: 0,
            expense_scroll: 0,

            form: ExpenseForm::new(),

            budget_input: String::new(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-snapshot the ledger and recompute the aggregates the screen
    /// is built from. Also clamps the table cursor after deletes.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) {
        self.records = ledger.records().to_vec();
        self.budget = ledger.budget();
        self.total_spend = summary::total_spend(&self.records);
        self.remaining = summary::remaining_budget(self.budget, self.total_spend);
        self.breakdown = summary::category_breakdown(&self.records, Category::all());

        if self.records.is_empty() {
            self.expense_index = 0;
            self.expense_scroll = 0;
        } else if self.expense_index >= self.records.len() {
            self.expense_index = self.records.len() - 1;
        }
    }

    pub(crate) fn selected_record(&self) -> Option<&ExpenseRecord> {
        self.records.get(self.expense_index)
    }

    pub(crate) fn cursor_down(&mut self) {
        if self.expense_index + 1 < self.records.len() {
            self.expense_index += 1;
            let page = self.visible_rows.max(1);
            if self.expense_index >= self.expense_scroll + page {
                self.expense_scroll = self.expense_index + 1 - page;
            }
        }
    }

    pub(crate) fn cursor_up(&mut self) {
        self.expense_index = self.expense_index.saturating_sub(1);
        if self.expense_index < self.expense_scroll {
            self.expense_scroll = self.expense_index;
        }
    }

    pub(crate) fn cursor_top(&mut self) {
        self.expense_index = 0;
        self.expense_scroll = 0;
    }

    pub(crate) fn cursor_bottom(&mut self) {
        if !self.records.is_empty() {
            self.expense_index = self.records.len() - 1;
            let page = self.visible_rows.max(1);
            self.expense_scroll = self.expense_index.saturating_sub(page - 1);
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
