//! PostgreSQL-backed `EmployeeRepository` implementation using Diesel ORM.
//!
//! Reads join each employee with its project in a single query. Constraint
//! violations raised on insert or update are reported through the port error
//! so the service can phrase them the same way as its own pre-checks.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError, WriteOutcome};
use crate::domain::{Employee, EmployeeDraft, EmployeeId, EmployeeWithProject};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error};
use super::models::{EmployeeRow, EmployeeWrite, ProjectRow};
use super::pool::{DbPool, PoolError};
use super::schema::{employees, projects};

/// Diesel-backed implementation of the `EmployeeRepository` port.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EmployeeRepositoryError {
    EmployeeRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> EmployeeRepositoryError {
    match classify_diesel_error(error) {
        StoreFailure::Connection(message) => EmployeeRepositoryError::connection(message),
        StoreFailure::Unique(Some(field)) => EmployeeRepositoryError::duplicate_key(field),
        StoreFailure::Unique(None) => EmployeeRepositoryError::query("unique constraint violated"),
        StoreFailure::ForeignKey => EmployeeRepositoryError::missing_project(),
        StoreFailure::Query(message) => EmployeeRepositoryError::query(message),
    }
}

fn joined((employee, project): (EmployeeRow, ProjectRow)) -> EmployeeWithProject {
    EmployeeWithProject {
        employee: employee.into(),
        project: project.into(),
    }
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn list_with_projects(
        &self,
    ) -> Result<Vec<EmployeeWithProject>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(EmployeeRow, ProjectRow)> = employees::table
            .inner_join(projects::table)
            .order(employees::employee_id.asc())
            .select((EmployeeRow::as_select(), ProjectRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(joined).collect())
    }

    async fn find_with_project(
        &self,
        id: EmployeeId,
    ) -> Result<Option<EmployeeWithProject>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(EmployeeRow, ProjectRow)> = employees::table
            .inner_join(projects::table)
            .filter(employees::employee_id.eq(id.get()))
            .select((EmployeeRow::as_select(), ProjectRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(joined))
    }

    async fn exists(&self, id: EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            employees::table.filter(employees::employee_id.eq(id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn code_taken(
        &self,
        code: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Identities start at 1, so 0 excludes nothing.
        diesel::select(diesel::dsl::exists(
            employees::table
                .filter(employees::employee_code.eq(code))
                .filter(employees::employee_id.ne(excluding.map_or(0, EmployeeId::get))),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn email_taken(
        &self,
        email: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            employees::table
                .filter(employees::email.eq(email))
                .filter(employees::employee_id.ne(excluding.map_or(0, EmployeeId::get))),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(employees::table)
            .values(EmployeeWrite::from(draft))
            .returning(EmployeeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<WriteOutcome, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(employees::table.find(id.get()))
            .set(EmployeeWrite::from(draft))
            .execute(&mut conn)
            .await
            .map(WriteOutcome::from_rows)
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: EmployeeId) -> Result<WriteOutcome, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(employees::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(WriteOutcome::from_rows)
            .map_err(map_diesel_error)
    }
}
