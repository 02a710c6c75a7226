mod category;
mod expense;

pub use category::Category;
pub use expense::ExpenseRecord;

#[cfg(test)]
mod tests;
