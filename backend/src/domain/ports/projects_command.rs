//! Driving port for project mutations.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectDraft, ProjectId};

/// Request to replace a project's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    pub path_id: ProjectId,
    pub body_id: Option<ProjectId>,
    pub draft: ProjectDraft,
}

/// Use-case port for creating, replacing, and removing projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsCommand: Send + Sync {
    /// Create a project; fails with `duplicate_key` on a taken code.
    async fn create_project(&self, draft: ProjectDraft) -> Result<Project, Error>;

    /// Replace a project; identity and uniqueness rules match employees.
    async fn update_project(&self, request: UpdateProjectRequest) -> Result<(), Error>;

    /// Delete a project.
    ///
    /// # Errors
    ///
    /// - `not_found` when the project does not exist.
    /// - `conflict` while any employee is still assigned to it.
    async fn delete_project(&self, id: ProjectId) -> Result<(), Error>;
}
