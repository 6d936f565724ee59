//! Driving port for employee reads.
//!
//! HTTP handlers use this port to fetch employee projections without
//! importing persistence concerns.

use async_trait::async_trait;

use crate::domain::{EmployeeId, EmployeeWithProject, Error};

/// Use-case port for reading employees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeesQuery: Send + Sync {
    /// Every employee joined with its project.
    async fn list_employees(&self) -> Result<Vec<EmployeeWithProject>, Error>;

    /// One employee joined with its project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::NotFound`] when no employee has `id`.
    async fn get_employee(&self, id: EmployeeId) -> Result<EmployeeWithProject, Error>;
}
