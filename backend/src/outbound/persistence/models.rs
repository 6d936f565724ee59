//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions to and from domain types live
//! here so the repositories stay thin.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::{
    Employee, EmployeeDraft, EmployeeId, Project, ProjectDraft, ProjectId,
};

use super::schema::{employees, projects};

/// Row struct for reading from the projects table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = projects)]
#[diesel(primary_key(project_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub project_id: i32,
    pub project_code: String,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Decimal,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: ProjectId::new(row.project_id),
            code: row.project_code,
            name: row.project_name,
            start_date: row.start_date,
            end_date: row.end_date,
            budget: row.budget,
        }
    }
}

/// Insert and full-replace changeset for projects.
///
/// `end_date` is written as NULL when absent so a replace can clear it.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProjectWrite<'a> {
    pub project_code: &'a str,
    pub project_name: &'a str,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Decimal,
}

impl<'a> From<&'a ProjectDraft> for ProjectWrite<'a> {
    fn from(draft: &'a ProjectDraft) -> Self {
        Self {
            project_code: draft.code(),
            project_name: draft.name(),
            start_date: draft.start_date(),
            end_date: draft.end_date(),
            budget: draft.budget(),
        }
    }
}

/// Row struct for reading from the employees table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = employees)]
#[diesel(primary_key(employee_id))]
#[diesel(belongs_to(ProjectRow, foreign_key = project_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub employee_id: i32,
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub designation: String,
    pub salary: Decimal,
    pub project_id: i32,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: EmployeeId::new(row.employee_id),
            code: row.employee_code,
            full_name: row.full_name,
            email: row.email,
            designation: row.designation,
            salary: row.salary,
            project_id: ProjectId::new(row.project_id),
        }
    }
}

/// Insert and full-replace changeset for employees.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = employees)]
pub(crate) struct EmployeeWrite<'a> {
    pub employee_code: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub designation: &'a str,
    pub salary: Decimal,
    pub project_id: i32,
}

impl<'a> From<&'a EmployeeDraft> for EmployeeWrite<'a> {
    fn from(draft: &'a EmployeeDraft) -> Self {
        Self {
            employee_code: draft.code(),
            full_name: draft.full_name(),
            email: draft.email(),
            designation: draft.designation(),
            salary: draft.salary(),
            project_id: draft.project_id().get(),
        }
    }
}
