//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `NikTaken`) in
//!   addition to DB transport errors.
//! - Repositories refuse to operate on connections whose schema is not
//!   fully migrated.

pub mod employee_repo;
