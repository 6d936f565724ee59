//! Employee HTTP handlers.
//!
//! ```text
//! GET    /employees
//! GET    /employees/{id}
//! POST   /employees
//! PUT    /employees/{id}
//! DELETE /employees/{id}
//! ```

use actix_web::{HttpResponse, delete, get, http::header, post, put, web};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UpdateEmployeeRequest;
use crate::domain::{
    Employee, EmployeeDraft, EmployeeId, EmployeeInput, EmployeeWithProject, Error, Project,
    ProjectId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Employee fields accepted on create and update.
///
/// Every field is optional on the wire so that missing values surface as
/// per-field validation messages rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequestBody {
    /// Ignored on create; must equal the path id on update.
    pub employee_id: Option<i32>,
    #[schema(max_length = 8, example = "EMP003")]
    pub employee_code: Option<String>,
    #[schema(max_length = 150, example = "Asha Rao")]
    pub full_name: Option<String>,
    #[schema(format = "email", example = "asha@example.com")]
    pub email: Option<String>,
    #[schema(max_length = 50, example = "Analyst")]
    pub designation: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    #[schema(minimum = 0, example = 60000.0)]
    pub salary: Option<Decimal>,
    #[schema(example = 1)]
    pub project_id: Option<i32>,
}

impl EmployeeRequestBody {
    fn into_draft(self) -> Result<(Option<EmployeeId>, EmployeeDraft), Error> {
        let body_id = self.employee_id.map(EmployeeId::new);
        let draft = EmployeeInput {
            code: self.employee_code,
            full_name: self.full_name,
            email: self.email,
            designation: self.designation,
            salary: self.salary,
            project_id: self.project_id.map(ProjectId::new),
        }
        .validate()?;
        Ok((body_id, draft))
    }
}

/// Employee scalar fields.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecordBody {
    pub employee_id: i32,
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub designation: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64)]
    pub salary: Decimal,
    pub project_id: i32,
}

impl From<Employee> for EmployeeRecordBody {
    fn from(value: Employee) -> Self {
        Self {
            employee_id: value.id.get(),
            employee_code: value.code,
            full_name: value.full_name,
            email: value.email,
            designation: value.designation,
            salary: value.salary,
            project_id: value.project_id.get(),
        }
    }
}

/// Project summary nested inside an employee projection.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryBody {
    pub project_id: i32,
    pub project_code: String,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64)]
    pub budget: Decimal,
}

impl From<Project> for ProjectSummaryBody {
    fn from(value: Project) -> Self {
        Self {
            project_id: value.id.get(),
            project_code: value.code,
            project_name: value.name,
            start_date: value.start_date,
            end_date: value.end_date,
            budget: value.budget,
        }
    }
}

/// Employee projection: scalar fields plus the owning project.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBody {
    #[serde(flatten)]
    pub employee: EmployeeRecordBody,
    pub project: ProjectSummaryBody,
}

impl From<EmployeeWithProject> for EmployeeBody {
    fn from(value: EmployeeWithProject) -> Self {
        Self {
            employee: value.employee.into(),
            project: value.project.into(),
        }
    }
}

/// List every employee with its project.
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "Employees", body = [EmployeeBody]),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<EmployeeBody>>> {
    let employees = state.employees.list_employees().await?;
    Ok(web::Json(employees.into_iter().map(EmployeeBody::from).collect()))
}

/// Fetch one employee with its project.
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(("id" = i32, Path, description = "Employee identity")),
    responses(
        (status = 200, description = "Employee", body = EmployeeBody),
        (status = 404, description = "Employee not found", body = Error)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<EmployeeBody>> {
    let id = EmployeeId::new(path.into_inner());
    let employee = state.employees.get_employee(id).await?;
    Ok(web::Json(employee.into()))
}

/// Create an employee. Any identity in the body is ignored.
#[utoipa::path(
    post,
    path = "/employees",
    request_body = EmployeeRequestBody,
    responses(
        (status = 201, description = "Employee created", body = EmployeeRecordBody,
            headers(("Location" = String, description = "URI of the new employee"))),
        (status = 400, description = "Validation, reference, or uniqueness failure", body = Error)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<EmployeeRequestBody>,
) -> ApiResult<HttpResponse> {
    let (_, draft) = payload.into_inner().into_draft()?;
    let employee = state.employees_command.create_employee(draft).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/employees/{}", employee.id)))
        .json(EmployeeRecordBody::from(employee)))
}

/// Replace an employee's mutable fields.
#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(("id" = i32, Path, description = "Employee identity")),
    request_body = EmployeeRequestBody,
    responses(
        (status = 204, description = "Employee updated"),
        (status = 400, description = "Identity mismatch, validation, reference, or uniqueness failure", body = Error),
        (status = 404, description = "Employee not found", body = Error)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<EmployeeRequestBody>,
) -> ApiResult<HttpResponse> {
    let (body_id, draft) = payload.into_inner().into_draft()?;
    state
        .employees_command
        .update_employee(UpdateEmployeeRequest {
            path_id: EmployeeId::new(path.into_inner()),
            body_id,
            draft,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete an employee.
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(("id" = i32, Path, description = "Employee identity")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = Error)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .employees_command
        .delete_employee(EmployeeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
