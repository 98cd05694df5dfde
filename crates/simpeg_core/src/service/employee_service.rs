//! Employee use-case service.
//!
//! # Responsibility
//! - Turn validated form submissions into store writes.
//! - Provide read/list/delete entry points for UI callers.
//! - Surface field errors and NIK conflicts as typed outcomes.
//!
//! # Invariants
//! - Nothing reaches the repository without passing form validation.
//! - Create and update read the record back so callers always see what
//!   was actually persisted.

use crate::form::{EmployeeForm, FieldError};
use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{
    EmployeeListQuery, EmployeeRepository, RepoError, RepoResult,
};
use crate::service::stats_service::{compute_statistics, Statistics};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for employee use-cases.
#[derive(Debug)]
pub enum EmployeeServiceError {
    /// Submission failed validation; one entry per failing field.
    Form(Vec<FieldError>),
    /// Target employee does not exist.
    EmployeeNotFound(EmployeeId),
    /// Another employee already holds the submitted NIK.
    NikTaken(String),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for EmployeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(errors) => {
                write!(f, "form validation failed:")?;
                for error in errors {
                    write!(f, " {}={}", error.field.label(), error.message)?;
                }
                Ok(())
            }
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::NikTaken(nik) => write!(f, "NIK sudah terdaftar: {nik}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent employee state: {details}")
            }
        }
    }
}

impl Error for EmployeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EmployeeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EmployeeNotFound(id),
            RepoError::NikTaken(nik) => Self::NikTaken(nik),
            other => Self::Repo(other),
        }
    }
}

/// Employee service facade over repository implementations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new employee from raw form input.
    pub fn submit(&self, form: &EmployeeForm) -> Result<Employee, EmployeeServiceError> {
        let employee = form.validate().map_err(EmployeeServiceError::Form)?;
        let id = self.repo.create_employee(&employee)?;
        self.repo
            .get_employee(id)?
            .ok_or(EmployeeServiceError::InconsistentState(
                "created employee not found in read-back",
            ))
    }

    /// Validates and persists an edit of an existing employee. The stored
    /// creation timestamp is kept; only form fields change.
    pub fn submit_update(
        &self,
        id: EmployeeId,
        form: &EmployeeForm,
    ) -> Result<Employee, EmployeeServiceError> {
        let employee = form.validate().map_err(EmployeeServiceError::Form)?;
        self.repo.update_employee(id, &employee)?;
        self.repo
            .get_employee(id)?
            .ok_or(EmployeeServiceError::InconsistentState(
                "updated employee not found in read-back",
            ))
    }

    /// Gets one employee by store id.
    pub fn get(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.repo.get_employee(id)
    }

    /// Gets one employee by NIK.
    pub fn get_by_nik(&self, nik: &str) -> RepoResult<Option<Employee>> {
        self.repo.get_employee_by_nik(nik)
    }

    /// Lists employees using search and pagination options.
    pub fn list(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>> {
        self.repo.list_employees(query)
    }

    /// Counts all employees.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count_employees()
    }

    /// Deletes one employee and returns the removed record.
    pub fn delete(&self, id: EmployeeId) -> Result<Employee, EmployeeServiceError> {
        let employee = self
            .repo
            .get_employee(id)?
            .ok_or(EmployeeServiceError::EmployeeNotFound(id))?;
        self.repo.delete_employee(id)?;
        Ok(employee)
    }

    /// Computes dashboard statistics over the whole registry.
    pub fn statistics(&self) -> RepoResult<Statistics> {
        let employees = self.repo.list_employees(&EmployeeListQuery::default())?;
        Ok(compute_statistics(&employees))
    }
}
