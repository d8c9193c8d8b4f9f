//! Core business logic, independent of the HTTP surface.
//!
//! Every function here takes a `&DatabaseConnection` plus plain arguments
//! and returns [`crate::errors::Result`]; the `api` layer is a thin shell
//! over these.

/// Transaction category CRUD
pub mod category;
/// Dashboard aggregation over the six-month window
pub mod dashboard;
/// Debts and recorded payments
pub mod debt;
/// Savings goals and recorded progress
pub mod goal;
/// Grocery list, lookup tables, and the estimated total
pub mod grocery;
/// Profile reads and updates
pub mod profile;
/// Outbound WhatsApp messages
pub mod relay;
/// Signup, login, and session resolution
pub mod session;
/// The ledger itself
pub mod transaction;
