//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.
//!
//! Employee collections are loaded with a second query grouped by project,
//! so a listing costs two round trips regardless of size.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError, WriteOutcome};
use crate::domain::{Project, ProjectDraft, ProjectId, ProjectWithEmployees};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error};
use super::models::{EmployeeRow, ProjectRow, ProjectWrite};
use super::pool::{DbPool, PoolError};
use super::schema::{employees, projects};

/// Diesel-backed implementation of the `ProjectRepository` port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    ProjectRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    match classify_diesel_error(error) {
        StoreFailure::Connection(message) => ProjectRepositoryError::connection(message),
        StoreFailure::Unique(Some(field)) => ProjectRepositoryError::duplicate_key(field),
        StoreFailure::Unique(None) => ProjectRepositoryError::query("unique constraint violated"),
        // Only `employees.project_id` references projects.
        StoreFailure::ForeignKey => ProjectRepositoryError::has_employees(),
        StoreFailure::Query(message) => ProjectRepositoryError::query(message),
    }
}

fn with_employees(project: ProjectRow, employees: Vec<EmployeeRow>) -> ProjectWithEmployees {
    ProjectWithEmployees {
        project: project.into(),
        employees: employees.into_iter().map(Into::into).collect(),
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn list_with_employees(
        &self,
    ) -> Result<Vec<ProjectWithEmployees>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let project_rows: Vec<ProjectRow> = projects::table
            .order(projects::project_id.asc())
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let employee_rows: Vec<EmployeeRow> = EmployeeRow::belonging_to(&project_rows)
            .order(employees::employee_id.asc())
            .select(EmployeeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let grouped = employee_rows.grouped_by(&project_rows);
        Ok(project_rows
            .into_iter()
            .zip(grouped)
            .map(|(project, employees)| with_employees(project, employees))
            .collect())
    }

    async fn find_with_employees(
        &self,
        id: ProjectId,
    ) -> Result<Option<ProjectWithEmployees>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let Some(project) = projects::table
            .find(id.get())
            .select(ProjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };

        let employee_rows: Vec<EmployeeRow> = EmployeeRow::belonging_to(&project)
            .order(employees::employee_id.asc())
            .select(EmployeeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Some(with_employees(project, employee_rows)))
    }

    async fn exists(&self, id: ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            projects::table.filter(projects::project_id.eq(id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn code_taken(
        &self,
        code: &str,
        excluding: Option<ProjectId>,
    ) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            projects::table
                .filter(projects::project_code.eq(code))
                .filter(projects::project_id.ne(excluding.map_or(0, ProjectId::get))),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn has_employees(&self, id: ProjectId) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            employees::table.filter(employees::project_id.eq(id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn create(&self, draft: &ProjectDraft) -> Result<Project, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(projects::table)
            .values(ProjectWrite::from(draft))
            .returning(ProjectRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: ProjectId,
        draft: &ProjectDraft,
    ) -> Result<WriteOutcome, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(projects::table.find(id.get()))
            .set(ProjectWrite::from(draft))
            .execute(&mut conn)
            .await
            .map(WriteOutcome::from_rows)
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: ProjectId) -> Result<WriteOutcome, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(projects::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(WriteOutcome::from_rows)
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let error = map_pool_error(PoolError::build("bad url"));
        assert_eq!(error, ProjectRepositoryError::connection("bad url"));
    }

    #[rstest]
    fn grouping_keeps_project_order() {
        let project = ProjectRow {
            project_id: 4,
            project_code: "P004".into(),
            project_name: "Data Lake".into(),
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).expect("date"),
            end_date: None,
            budget: rust_decimal::Decimal::new(1_000, 0),
        };
        let result = with_employees(project, Vec::new());
        assert_eq!(result.project.id, ProjectId::new(4));
        assert!(result.employees.is_empty());
    }
}
