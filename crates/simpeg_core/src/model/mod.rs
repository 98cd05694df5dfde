//! Domain model for the employee registry.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one record shape shared by the store, the form, and exports.
//!
//! # Invariants
//! - Every employee is identified by a stable store-assigned `EmployeeId`.
//! - `nik` is unique across the registry.

pub mod employee;
