//! Project HTTP handlers.
//!
//! ```text
//! GET    /projects
//! GET    /projects/{id}
//! POST   /projects
//! PUT    /projects/{id}
//! DELETE /projects/{id}
//! ```

use actix_web::{HttpResponse, delete, get, http::header, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UpdateProjectRequest;
use crate::domain::validation::fields;
use crate::domain::{
    Employee, Error, FieldErrors, ProjectDraft, ProjectId, ProjectInput, ProjectWithEmployees,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::employees::ProjectSummaryBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_date;

/// Project fields accepted on create and update.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequestBody {
    /// Ignored on create; must equal the path id on update.
    pub project_id: Option<i32>,
    #[schema(max_length = 10, example = "P003")]
    pub project_code: Option<String>,
    #[schema(max_length = 100, example = "Data Warehouse")]
    pub project_name: Option<String>,
    #[schema(format = "date", example = "2025-06-01")]
    pub start_date: Option<String>,
    #[schema(format = "date", example = "2025-12-31")]
    pub end_date: Option<String>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    #[schema(minimum = 0, example = 120000.0)]
    pub budget: Option<Decimal>,
}

impl ProjectRequestBody {
    fn into_draft(self) -> Result<(Option<ProjectId>, ProjectDraft), Error> {
        let mut errors = FieldErrors::default();
        let start_date = parse_date(
            &mut errors,
            fields::START_DATE,
            "Start Date",
            self.start_date.as_deref(),
        );
        let end_date = parse_date(
            &mut errors,
            fields::END_DATE,
            "End Date",
            self.end_date.as_deref(),
        );
        let draft = ProjectInput {
            code: self.project_code,
            name: self.project_name,
            start_date,
            end_date,
            budget: self.budget,
        }
        .validate_with(errors)?;
        Ok((self.project_id.map(ProjectId::new), draft))
    }
}

/// Employee summary nested inside a project projection.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummaryBody {
    pub employee_id: i32,
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub designation: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64)]
    pub salary: Decimal,
}

impl From<Employee> for EmployeeSummaryBody {
    fn from(value: Employee) -> Self {
        Self {
            employee_id: value.id.get(),
            employee_code: value.code,
            full_name: value.full_name,
            email: value.email,
            designation: value.designation,
            salary: value.salary,
        }
    }
}

/// Project projection: scalar fields plus the employees assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBody {
    #[serde(flatten)]
    pub project: ProjectSummaryBody,
    pub employees: Vec<EmployeeSummaryBody>,
}

impl From<ProjectWithEmployees> for ProjectBody {
    fn from(value: ProjectWithEmployees) -> Self {
        Self {
            project: value.project.into(),
            employees: value
                .employees
                .into_iter()
                .map(EmployeeSummaryBody::from)
                .collect(),
        }
    }
}

/// List every project with its employees.
#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "Projects", body = [ProjectBody]),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("/projects")]
pub async fn list_projects(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ProjectBody>>> {
    let projects = state.projects.list_projects().await?;
    Ok(web::Json(projects.into_iter().map(ProjectBody::from).collect()))
}

/// Fetch one project with its employees.
#[utoipa::path(
    get,
    path = "/projects/{id}",
    params(("id" = i32, Path, description = "Project identity")),
    responses(
        (status = 200, description = "Project", body = ProjectBody),
        (status = 404, description = "Project not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "getProject"
)]
#[get("/projects/{id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ProjectBody>> {
    let project = state
        .projects
        .get_project(ProjectId::new(path.into_inner()))
        .await?;
    Ok(web::Json(project.into()))
}

/// Create a project. Any identity in the body is ignored.
#[utoipa::path(
    post,
    path = "/projects",
    request_body = ProjectRequestBody,
    responses(
        (status = 201, description = "Project created", body = ProjectSummaryBody,
            headers(("Location" = String, description = "URI of the new project"))),
        (status = 400, description = "Validation or uniqueness failure", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    payload: web::Json<ProjectRequestBody>,
) -> ApiResult<HttpResponse> {
    let (_, draft) = payload.into_inner().into_draft()?;
    let project = state.projects_command.create_project(draft).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/projects/{}", project.id)))
        .json(ProjectSummaryBody::from(project)))
}

/// Replace a project's mutable fields.
#[utoipa::path(
    put,
    path = "/projects/{id}",
    params(("id" = i32, Path, description = "Project identity")),
    request_body = ProjectRequestBody,
    responses(
        (status = 204, description = "Project updated"),
        (status = 400, description = "Identity mismatch, validation, or uniqueness failure", body = Error),
        (status = 404, description = "Project not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[put("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<ProjectRequestBody>,
) -> ApiResult<HttpResponse> {
    let (body_id, draft) = payload.into_inner().into_draft()?;
    state
        .projects_command
        .update_project(UpdateProjectRequest {
            path_id: ProjectId::new(path.into_inner()),
            body_id,
            draft,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a project that no employee references.
#[utoipa::path(
    delete,
    path = "/projects/{id}",
    params(("id" = i32, Path, description = "Project identity")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 400, description = "Project still has assigned employees", body = Error),
        (status = 404, description = "Project not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .projects_command
        .delete_project(ProjectId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeId, ErrorCode, Project};
    use crate::inbound::http::test_utils::{MockPorts, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::NaiveDate;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn sample_project() -> ProjectWithEmployees {
        ProjectWithEmployees {
            project: Project {
                id: ProjectId::new(2),
                code: "P002".into(),
                name: "Mobile Banking App".into(),
                start_date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("date"),
                end_date: None,
                budget: Decimal::new(18_000_000, 2),
            },
            employees: vec![Employee {
                id: EmployeeId::new(4),
                code: "EMP004".into(),
                full_name: "Ravi".into(),
                email: "ravi@example.com".into(),
                designation: "Tester".into(),
                salary: Decimal::new(5_000_000, 2),
                project_id: ProjectId::new(2),
            }],
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn get_returns_projection_without_back_references() {
        let mut ports = MockPorts::default();
        ports
            .projects
            .expect_get_project()
            .withf(|id| *id == ProjectId::new(2))
            .times(1)
            .return_once(|_| Ok(sample_project()));

        let app = actix_test::init_service(test_app(ports)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/projects/2").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["projectCode"], "P002");
        assert_eq!(body["budget"], 180000.0);
        assert!(body["endDate"].is_null());
        assert_eq!(body["employees"][0]["employeeCode"], "EMP004");
        assert!(body["employees"][0].get("project").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn create_accepts_date_times_and_sets_location() {
        let mut ports = MockPorts::default();
        ports
            .projects_command
            .expect_create_project()
            .withf(|draft| draft.start_date() == NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"))
            .times(1)
            .returning(|draft| Ok(draft.into_project(ProjectId::new(3))));

        let app = actix_test::init_service(test_app(ports)).await;
        let req = actix_test::TestRequest::post()
            .uri("/projects")
            .set_json(json!({
                "projectCode": "P003",
                "projectName": "Data Warehouse",
                "startDate": "2025-06-01T00:00:00Z",
                "budget": "120000.00"
            }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/projects/3")
        );
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["startDate"], "2025-06-01");
        assert_eq!(body["budget"], 120000.0);
    }

    #[rstest]
    #[actix_web::test]
    async fn invalid_dates_are_reported_per_field() {
        let app = actix_test::init_service(test_app(MockPorts::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/projects")
            .set_json(json!({
                "projectCode": "P003",
                "projectName": "Data Warehouse",
                "startDate": "yesterday",
                "endDate": "2025-13-01",
                "budget": 1
            }))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::ValidationFailed);
        let errors = &body.details().expect("details")["errors"];
        assert_eq!(errors["startDate"][0], "Start Date must be a date (YYYY-MM-DD)");
        assert_eq!(errors["endDate"][0], "End Date must be a date (YYYY-MM-DD)");
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_conflict_is_a_bad_request() {
        let mut ports = MockPorts::default();
        ports
            .projects_command
            .expect_delete_project()
            .times(1)
            .return_once(|_| {
                Err(Error::conflict(
                    "Cannot delete project with assigned employees. Please reassign or remove employees first.",
                ))
            });

        let app = actix_test::init_service(test_app(ports)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri("/projects/1").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Error = actix_test::read_body_json(res).await;
        assert!(body.message().contains("assigned employees"));
    }
}
