//! Domain services.

mod categories;
mod expenses;

pub use categories::CategoryService;
pub use expenses::ExpenseService;
