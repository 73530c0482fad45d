//! Domain models shared by repositories and route handlers

pub mod city;
pub mod expense;
pub mod stay;
pub mod validation;

pub use city::{City, NewCity};
pub use expense::{Expense, ExpenseKind, NewExpense};
pub use stay::{NewStay, Stay, StayStatus};
pub use validation::ValidationError;
