//! Project use-case service.
//!
//! Implements the project driving ports on top of the project repository.
//! Deletion is guarded twice: an explicit dependency probe produces the
//! friendly conflict, and the restricting foreign key catches employees
//! assigned after the probe.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    ProjectRepository, ProjectRepositoryError, ProjectsCommand, ProjectsQuery,
    UpdateProjectRequest, WriteOutcome,
};
use crate::domain::validation::fields;
use crate::domain::{Error, Project, ProjectDraft, ProjectId, ProjectWithEmployees};

const ASSIGNED_EMPLOYEES: &str =
    "Cannot delete project with assigned employees. Please reassign or remove employees first.";

/// Project service implementing [`ProjectsQuery`] and [`ProjectsCommand`].
#[derive(Clone)]
pub struct ProjectService<P> {
    projects: Arc<P>,
}

impl<P> ProjectService<P> {
    /// Create a new service backed by `projects`.
    pub fn new(projects: Arc<P>) -> Self {
        Self { projects }
    }
}

fn project_not_found(id: ProjectId) -> Error {
    Error::not_found(format!("Project with ID {id} not found."))
}

fn duplicate_code(code: &str) -> Error {
    Error::duplicate_key(
        format!("Project with code '{code}' already exists."),
        fields::PROJECT_CODE,
        code,
    )
}

fn assigned_employees(id: ProjectId) -> Error {
    Error::conflict(ASSIGNED_EMPLOYEES).with_details(json!({ "projectId": id.get() }))
}

impl<P> ProjectService<P>
where
    P: ProjectRepository,
{
    fn map_error(error: ProjectRepositoryError) -> Error {
        match error {
            ProjectRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("project repository unavailable: {message}"))
            }
            ProjectRepositoryError::Query { message } => {
                Error::internal(format!("project repository error: {message}"))
            }
            other => Error::internal(format!("unexpected project repository error: {other}")),
        }
    }

    fn map_write_error(error: ProjectRepositoryError, draft: &ProjectDraft) -> Error {
        match error {
            ProjectRepositoryError::DuplicateKey { field } => {
                warn!(%field, "unique constraint rejected project write");
                duplicate_code(draft.code())
            }
            other => Self::map_error(other),
        }
    }

    async fn ensure_code_free(
        &self,
        draft: &ProjectDraft,
        excluding: Option<ProjectId>,
    ) -> Result<(), Error> {
        let taken = self
            .projects
            .code_taken(draft.code(), excluding)
            .await
            .map_err(Self::map_error)?;
        if taken {
            return Err(duplicate_code(draft.code()));
        }
        Ok(())
    }
}

#[async_trait]
impl<P> ProjectsQuery for ProjectService<P>
where
    P: ProjectRepository,
{
    async fn list_projects(&self) -> Result<Vec<ProjectWithEmployees>, Error> {
        self.projects
            .list_with_employees()
            .await
            .map_err(Self::map_error)
    }

    async fn get_project(&self, id: ProjectId) -> Result<ProjectWithEmployees, Error> {
        self.projects
            .find_with_employees(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| project_not_found(id))
    }
}

#[async_trait]
impl<P> ProjectsCommand for ProjectService<P>
where
    P: ProjectRepository,
{
    async fn create_project(&self, draft: ProjectDraft) -> Result<Project, Error> {
        self.ensure_code_free(&draft, None).await?;
        let project = self
            .projects
            .create(&draft)
            .await
            .map_err(|err| Self::map_write_error(err, &draft))?;
        info!(project_id = %project.id, code = %project.code, "project created");
        Ok(project)
    }

    async fn update_project(&self, request: UpdateProjectRequest) -> Result<(), Error> {
        let UpdateProjectRequest {
            path_id,
            body_id,
            draft,
        } = request;
        let body_id = body_id.unwrap_or(ProjectId::new(0));
        if body_id != path_id {
            return Err(Error::bad_request("Project ID mismatch.")
                .with_details(json!({ "pathId": path_id.get(), "bodyId": body_id.get() })));
        }

        let exists = self
            .projects
            .exists(path_id)
            .await
            .map_err(Self::map_error)?;
        if !exists {
            return Err(project_not_found(path_id));
        }

        self.ensure_code_free(&draft, Some(path_id)).await?;

        match self
            .projects
            .update(path_id, &draft)
            .await
            .map_err(|err| Self::map_write_error(err, &draft))?
        {
            WriteOutcome::Applied => {
                info!(project_id = %path_id, "project updated");
                Ok(())
            }
            WriteOutcome::Missing => {
                warn!(project_id = %path_id, "project vanished before update");
                Err(project_not_found(path_id))
            }
        }
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), Error> {
        let exists = self.projects.exists(id).await.map_err(Self::map_error)?;
        if !exists {
            return Err(project_not_found(id));
        }

        let has_employees = self
            .projects
            .has_employees(id)
            .await
            .map_err(Self::map_error)?;
        if has_employees {
            return Err(assigned_employees(id));
        }

        match self.projects.delete(id).await {
            Ok(WriteOutcome::Applied) => {
                info!(project_id = %id, "project deleted");
                Ok(())
            }
            Ok(WriteOutcome::Missing) => Err(project_not_found(id)),
            Err(ProjectRepositoryError::HasEmployees) => {
                warn!(project_id = %id, "foreign key restricted project delete");
                Err(assigned_employees(id))
            }
            Err(other) => Err(Self::map_error(other)),
        }
    }
}

#[cfg(test)]
#[path = "project_service_tests.rs"]
mod tests;
