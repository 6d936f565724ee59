//! Driving port for project reads.

use async_trait::async_trait;

use crate::domain::{Error, ProjectId, ProjectWithEmployees};

/// Use-case port for reading projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsQuery: Send + Sync {
    /// Every project with the employees assigned to it.
    async fn list_projects(&self) -> Result<Vec<ProjectWithEmployees>, Error>;

    /// One project with the employees assigned to it.
    async fn get_project(&self, id: ProjectId) -> Result<ProjectWithEmployees, Error>;
}
