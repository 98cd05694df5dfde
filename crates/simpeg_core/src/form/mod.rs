//! Employee form state and validation.
//!
//! # Responsibility
//! - Hold raw form input as entered, before any parsing.
//! - Validate input into a store-ready [`crate::model::employee::NewEmployee`].
//! - Keep per-field error messages stable for the UI layer.
//!
//! # Invariants
//! - Validation never mutates the form; it either yields a full record or
//!   a non-empty error list.
//! - Each field reports at most one error, its first failing rule.
//! - The raw form shape doubles as the draft payload, so drafts restore
//!   exactly what was typed.

pub mod employee_form;
pub mod rules;

pub use employee_form::{EmployeeForm, FieldError, FormField};
