//! Core domain logic for the simpeg employee registry.
//! This crate is the single source of truth for business invariants.

pub mod cache;
pub mod db;
pub mod draft;
pub mod export;
pub mod form;
pub mod geo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use cache::{AssetCache, AssetOrigin, DirOrigin, FetchOutcome, FetchSource, OriginError};
pub use draft::FileDraftStore;
pub use form::{EmployeeForm, FieldError, FormField};
pub use logging::{default_log_level, init_logging};
pub use model::employee::{
    Education, EducationLevel, Employee, EmployeeId, MaritalStatus, NewEmployee,
};
pub use repo::employee_repo::{
    EmployeeListQuery, EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use service::employee_service::{EmployeeService, EmployeeServiceError};
pub use service::stats_service::{compute_statistics, Statistics};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
