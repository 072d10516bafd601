mod budget;
mod category;
mod expense;

pub use budget::Budget;
pub use category::Category;
pub use expense::{Expense, NewExpense};
