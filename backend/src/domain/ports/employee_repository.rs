//! Driven port for employee persistence.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeDraft, EmployeeId, EmployeeWithProject};

use super::{WriteOutcome, define_port_error};

define_port_error! {
    /// Errors raised by employee repository adapters.
    pub enum EmployeeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "employee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "employee repository query failed: {message}",
        /// A unique constraint rejected the write. `field` is the wire name.
        DuplicateKey { field: String } =>
            "employee {field} violates a unique constraint",
        /// The foreign key to projects rejected the write.
        MissingProject => "employee references a project that does not exist",
    }
}

/// Store access for employees.
///
/// Reads that serve responses return the employee joined with its project.
/// Uniqueness probes accept an identity to skip so updates do not collide
/// with the row being replaced.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees with their projects, ordered by identity.
    async fn list_with_projects(&self)
    -> Result<Vec<EmployeeWithProject>, EmployeeRepositoryError>;

    /// One employee with its project.
    async fn find_with_project(
        &self,
        id: EmployeeId,
    ) -> Result<Option<EmployeeWithProject>, EmployeeRepositoryError>;

    /// Whether an employee with `id` exists.
    async fn exists(&self, id: EmployeeId) -> Result<bool, EmployeeRepositoryError>;

    /// Whether another employee already uses `code`.
    async fn code_taken(
        &self,
        code: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, EmployeeRepositoryError>;

    /// Whether another employee already uses `email`.
    async fn email_taken(
        &self,
        email: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, EmployeeRepositoryError>;

    /// Insert a new employee; the store assigns the identity.
    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, EmployeeRepositoryError>;

    /// Replace every mutable field of employee `id`.
    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<WriteOutcome, EmployeeRepositoryError>;

    /// Remove employee `id`.
    async fn delete(&self, id: EmployeeId) -> Result<WriteOutcome, EmployeeRepositoryError>;
}
