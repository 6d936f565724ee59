//! Driving port for employee mutations.
//!
//! Drafts arrive with field rules already applied; implementations enforce
//! the rules that need the store (identity, references, uniqueness).

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeDraft, EmployeeId, Error};

/// Request to replace an employee's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEmployeeRequest {
    /// Identity addressed by the request path.
    pub path_id: EmployeeId,
    /// Identity carried in the payload, if any.
    pub body_id: Option<EmployeeId>,
    /// Validated replacement fields.
    pub draft: EmployeeDraft,
}

/// Use-case port for creating, replacing, and removing employees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeesCommand: Send + Sync {
    /// Create an employee.
    ///
    /// # Errors
    ///
    /// - `reference_not_found` when the project does not exist.
    /// - `duplicate_key` when the code or email is already used.
    async fn create_employee(&self, draft: EmployeeDraft) -> Result<Employee, Error>;

    /// Replace an employee.
    ///
    /// # Errors
    ///
    /// - `bad_request` when path and body identities differ.
    /// - `not_found` when the employee does not exist.
    /// - the same reference and uniqueness failures as creation.
    async fn update_employee(&self, request: UpdateEmployeeRequest) -> Result<(), Error>;

    /// Delete an employee.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the employee does not exist.
    async fn delete_employee(&self, id: EmployeeId) -> Result<(), Error>;
}
