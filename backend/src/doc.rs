//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every employee, project, and health endpoint together
//! with the request and response bodies they exchange. The document is served
//! by Swagger UI in debug builds and printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::employees::{
    EmployeeBody, EmployeeRecordBody, EmployeeRequestBody, ProjectSummaryBody,
};
use crate::inbound::http::projects::{EmployeeSummaryBody, ProjectBody, ProjectRequestBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tracker API",
        description = "Employees, the projects they are assigned to, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        EmployeeRequestBody,
        EmployeeRecordBody,
        EmployeeBody,
        ProjectSummaryBody,
        ProjectRequestBody,
        EmployeeSummaryBody,
        ProjectBody,
        Error,
        ErrorCode
    )),
    tags(
        (name = "employees", description = "Employee records and their project assignment"),
        (name = "projects", description = "Projects and the employees assigned to them"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    #[rstest]
    #[case("/employees")]
    #[case("/employees/{id}")]
    #[case("/projects")]
    #[case("/projects/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn error_schema_exposes_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get("Error").expect("Error schema") {
            RefOr::T(Schema::Object(obj)) => {
                assert!(obj.properties.contains_key("code"));
                assert!(obj.properties.contains_key("message"));
                assert!(obj.properties.contains_key("traceId"));
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn request_bodies_use_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get("EmployeeRequestBody").expect("request schema") {
            RefOr::T(Schema::Object(obj)) => {
                assert!(obj.properties.contains_key("employeeCode"));
                assert!(obj.properties.contains_key("projectId"));
            }
            _ => panic!("expected Object schema"),
        }
    }
}
