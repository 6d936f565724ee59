//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod employee_repository;
mod employees_command;
mod employees_query;
mod project_repository;
mod projects_command;
mod projects_query;

#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{EmployeeRepository, EmployeeRepositoryError};
#[cfg(test)]
pub use employees_command::MockEmployeesCommand;
pub use employees_command::{EmployeesCommand, UpdateEmployeeRequest};
#[cfg(test)]
pub use employees_query::MockEmployeesQuery;
pub use employees_query::EmployeesQuery;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectRepositoryError};
#[cfg(test)]
pub use projects_command::MockProjectsCommand;
pub use projects_command::{ProjectsCommand, UpdateProjectRequest};
#[cfg(test)]
pub use projects_query::MockProjectsQuery;
pub use projects_query::ProjectsQuery;

/// Result of a keyed write against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The row existed and was written.
    Applied,
    /// No row matched the identity.
    Missing,
}

impl WriteOutcome {
    /// Build an outcome from an affected-row count.
    pub fn from_rows(rows: usize) -> Self {
        if rows == 0 { Self::Missing } else { Self::Applied }
    }
}
