//! Service layer
//!
//! Business logic on top of the storage layer: input normalization, record
//! lookup and filtering.

pub mod expense;

pub use expense::{
    CreateExpenseInput, ExpenseFilter, ExpensePatch, ExpenseService, ExpenseTarget,
    IndexedExpense,
};
