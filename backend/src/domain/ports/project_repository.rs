//! Driven port for project persistence.

use async_trait::async_trait;

use crate::domain::{Project, ProjectDraft, ProjectId, ProjectWithEmployees};

use super::{WriteOutcome, define_port_error};

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "project repository query failed: {message}",
        /// A unique constraint rejected the write. `field` is the wire name.
        DuplicateKey { field: String } =>
            "project {field} violates a unique constraint",
        /// The delete was restricted by employees still referencing the row.
        HasEmployees => "project is still referenced by employees",
    }
}

/// Store access for projects.
///
/// The employee collection on read models is computed per call from the
/// employees table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All projects with their employees, ordered by identity.
    async fn list_with_employees(&self)
    -> Result<Vec<ProjectWithEmployees>, ProjectRepositoryError>;

    /// One project with its employees.
    async fn find_with_employees(
        &self,
        id: ProjectId,
    ) -> Result<Option<ProjectWithEmployees>, ProjectRepositoryError>;

    /// Whether a project with `id` exists.
    async fn exists(&self, id: ProjectId) -> Result<bool, ProjectRepositoryError>;

    /// Whether another project already uses `code`.
    async fn code_taken(
        &self,
        code: &str,
        excluding: Option<ProjectId>,
    ) -> Result<bool, ProjectRepositoryError>;

    /// Whether any employee references project `id`.
    async fn has_employees(&self, id: ProjectId) -> Result<bool, ProjectRepositoryError>;

    /// Insert a new project; the store assigns the identity.
    async fn create(&self, draft: &ProjectDraft) -> Result<Project, ProjectRepositoryError>;

    /// Replace every mutable field of project `id`.
    async fn update(
        &self,
        id: ProjectId,
        draft: &ProjectDraft,
    ) -> Result<WriteOutcome, ProjectRepositoryError>;

    /// Remove project `id`.
    async fn delete(&self, id: ProjectId) -> Result<WriteOutcome, ProjectRepositoryError>;
}
