//! Employee use-case service.
//!
//! Implements the employee driving ports on top of the employee and project
//! repositories. Store probes run in a fixed order: identity, project
//! reference, code, email. The store's own constraints remain the final
//! guard, so write failures are mapped back onto the same error taxonomy.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    EmployeeRepository, EmployeeRepositoryError, EmployeesCommand, EmployeesQuery,
    ProjectRepository, ProjectRepositoryError, UpdateEmployeeRequest, WriteOutcome,
};
use crate::domain::validation::fields;
use crate::domain::{
    Employee, EmployeeDraft, EmployeeId, EmployeeWithProject, Error, ProjectId,
};

/// Employee service implementing [`EmployeesQuery`] and [`EmployeesCommand`].
#[derive(Clone)]
pub struct EmployeeService<E, P> {
    employees: Arc<E>,
    projects: Arc<P>,
}

impl<E, P> EmployeeService<E, P> {
    /// Create a new service with the given repositories.
    pub fn new(employees: Arc<E>, projects: Arc<P>) -> Self {
        Self {
            employees,
            projects,
        }
    }
}

pub(crate) fn employee_not_found(id: EmployeeId) -> Error {
    Error::not_found(format!("Employee with ID {id} not found."))
}

pub(crate) fn project_missing(id: ProjectId) -> Error {
    Error::reference_not_found(format!("Project with ID {id} does not exist."))
}

fn duplicate_code(code: &str) -> Error {
    Error::duplicate_key(
        format!("Employee with code '{code}' already exists."),
        fields::EMPLOYEE_CODE,
        code,
    )
}

fn duplicate_email(email: &str) -> Error {
    Error::duplicate_key(
        format!("Employee with email '{email}' already exists."),
        fields::EMAIL,
        email,
    )
}

impl<E, P> EmployeeService<E, P>
where
    E: EmployeeRepository,
    P: ProjectRepository,
{
    fn map_employee_error(error: EmployeeRepositoryError, draft: Option<&EmployeeDraft>) -> Error {
        match (error, draft) {
            (EmployeeRepositoryError::Connection { message }, _) => {
                Error::service_unavailable(format!("employee repository unavailable: {message}"))
            }
            (EmployeeRepositoryError::Query { message }, _) => {
                Error::internal(format!("employee repository error: {message}"))
            }
            (EmployeeRepositoryError::DuplicateKey { field }, Some(draft)) => {
                warn!(%field, "unique constraint rejected employee write");
                if field == fields::EMAIL {
                    duplicate_email(draft.email())
                } else {
                    duplicate_code(draft.code())
                }
            }
            (EmployeeRepositoryError::MissingProject, Some(draft)) => {
                warn!(project_id = %draft.project_id(), "foreign key rejected employee write");
                project_missing(draft.project_id())
            }
            (error, None) => Error::internal(format!("unexpected employee repository error: {error}")),
        }
    }

    fn map_project_error(error: ProjectRepositoryError) -> Error {
        match error {
            ProjectRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("project repository unavailable: {message}"))
            }
            other => Error::internal(format!("project repository error: {other}")),
        }
    }

    /// Reference and uniqueness probes shared by create and update.
    async fn check_store_rules(
        &self,
        draft: &EmployeeDraft,
        excluding: Option<EmployeeId>,
    ) -> Result<(), Error> {
        let project_exists = self
            .projects
            .exists(draft.project_id())
            .await
            .map_err(Self::map_project_error)?;
        if !project_exists {
            return Err(project_missing(draft.project_id()));
        }

        let code_taken = self
            .employees
            .code_taken(draft.code(), excluding)
            .await
            .map_err(|err| Self::map_employee_error(err, None))?;
        if code_taken {
            return Err(duplicate_code(draft.code()));
        }

        let email_taken = self
            .employees
            .email_taken(draft.email(), excluding)
            .await
            .map_err(|err| Self::map_employee_error(err, None))?;
        if email_taken {
            return Err(duplicate_email(draft.email()));
        }
        Ok(())
    }
}

#[async_trait]
impl<E, P> EmployeesQuery for EmployeeService<E, P>
where
    E: EmployeeRepository,
    P: ProjectRepository,
{
    async fn list_employees(&self) -> Result<Vec<EmployeeWithProject>, Error> {
        self.employees
            .list_with_projects()
            .await
            .map_err(|err| Self::map_employee_error(err, None))
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<EmployeeWithProject, Error> {
        self.employees
            .find_with_project(id)
            .await
            .map_err(|err| Self::map_employee_error(err, None))?
            .ok_or_else(|| employee_not_found(id))
    }
}

#[async_trait]
impl<E, P> EmployeesCommand for EmployeeService<E, P>
where
    E: EmployeeRepository,
    P: ProjectRepository,
{
    async fn create_employee(&self, draft: EmployeeDraft) -> Result<Employee, Error> {
        self.check_store_rules(&draft, None).await?;
        let employee = self
            .employees
            .create(&draft)
            .await
            .map_err(|err| Self::map_employee_error(err, Some(&draft)))?;
        info!(employee_id = %employee.id, code = %employee.code, "employee created");
        Ok(employee)
    }

    async fn update_employee(&self, request: UpdateEmployeeRequest) -> Result<(), Error> {
        let UpdateEmployeeRequest {
            path_id,
            body_id,
            draft,
        } = request;
        let body_id = body_id.unwrap_or(EmployeeId::new(0));
        if body_id != path_id {
            return Err(Error::bad_request("Employee ID mismatch.")
                .with_details(json!({ "pathId": path_id.get(), "bodyId": body_id.get() })));
        }

        let exists = self
            .employees
            .exists(path_id)
            .await
            .map_err(|err| Self::map_employee_error(err, None))?;
        if !exists {
            return Err(employee_not_found(path_id));
        }

        self.check_store_rules(&draft, Some(path_id)).await?;

        match self
            .employees
            .update(path_id, &draft)
            .await
            .map_err(|err| Self::map_employee_error(err, Some(&draft)))?
        {
            WriteOutcome::Applied => {
                info!(employee_id = %path_id, "employee updated");
                Ok(())
            }
            WriteOutcome::Missing => {
                warn!(employee_id = %path_id, "employee vanished before update");
                Err(employee_not_found(path_id))
            }
        }
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<(), Error> {
        match self
            .employees
            .delete(id)
            .await
            .map_err(|err| Self::map_employee_error(err, None))?
        {
            WriteOutcome::Applied => {
                info!(employee_id = %id, "employee deleted");
                Ok(())
            }
            WriteOutcome::Missing => Err(employee_not_found(id)),
        }
    }
}

#[cfg(test)]
#[path = "employee_service_tests.rs"]
mod tests;
