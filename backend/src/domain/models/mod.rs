pub mod category;
pub mod expense;

pub use category::{Category, UnknownCategory};
pub use expense::Expense;
