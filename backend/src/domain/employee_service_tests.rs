//! Tests for the employee service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockEmployeeRepository, MockProjectRepository};
use crate::domain::{EmployeeInput, ErrorCode};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;

type Service = EmployeeService<MockEmployeeRepository, MockProjectRepository>;

fn make_service(employees: MockEmployeeRepository, projects: MockProjectRepository) -> Service {
    EmployeeService::new(Arc::new(employees), Arc::new(projects))
}

fn draft_for(project_id: i32) -> EmployeeDraft {
    EmployeeInput {
        code: Some("EMP010".into()),
        full_name: Some("Meera Iyer".into()),
        email: Some("meera@example.com".into()),
        designation: Some("Developer".into()),
        salary: Some(Decimal::new(7_000_000, 2)),
        project_id: Some(ProjectId::new(project_id)),
    }
    .validate()
    .expect("valid draft")
}

#[fixture]
fn draft() -> EmployeeDraft {
    draft_for(1)
}

fn project_exists(projects: &mut MockProjectRepository, exists: bool) {
    projects
        .expect_exists()
        .times(1)
        .return_once(move |_| Ok(exists));
}

fn uniqueness(employees: &mut MockEmployeeRepository, code_taken: bool, email_taken: bool) {
    employees
        .expect_code_taken()
        .times(1)
        .return_once(move |_, _| Ok(code_taken));
    employees
        .expect_email_taken()
        .times(..=1)
        .return_once(move |_, _| Ok(email_taken));
}

#[rstest]
#[tokio::test]
async fn create_persists_after_all_checks_pass(draft: EmployeeDraft) {
    let mut employees = MockEmployeeRepository::new();
    let mut projects = MockProjectRepository::new();
    project_exists(&mut projects, true);
    uniqueness(&mut employees, false, false);
    employees
        .expect_create()
        .times(1)
        .returning(|draft| Ok(draft.clone().into_employee(EmployeeId::new(3))));

    let service = make_service(employees, projects);
    let created = service.create_employee(draft).await.expect("created");
    assert_eq!(created.id, EmployeeId::new(3));
    assert_eq!(created.code, "EMP010");
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_project_before_uniqueness() {
    let draft = draft_for(9999);
    let mut projects = MockProjectRepository::new();
    projects
        .expect_exists()
        .withf(|id| id.get() == 9999)
        .times(1)
        .return_once(|_| Ok(false));

    let service = make_service(MockEmployeeRepository::new(), projects);
    let err = service.create_employee(draft).await.expect_err("missing project");
    assert_eq!(err.code(), ErrorCode::ReferenceNotFound);
    assert_eq!(err.message(), "Project with ID 9999 does not exist.");
}

#[rstest]
#[case(true, false, "employeeCode", "EMP010")]
#[case(false, true, "email", "meera@example.com")]
#[tokio::test]
async fn create_rejects_taken_unique_fields(
    draft: EmployeeDraft,
    #[case] code_taken: bool,
    #[case] email_taken: bool,
    #[case] field: &str,
    #[case] value: &str,
) {
    let mut employees = MockEmployeeRepository::new();
    let mut projects = MockProjectRepository::new();
    project_exists(&mut projects, true);
    uniqueness(&mut employees, code_taken, email_taken);

    let service = make_service(employees, projects);
    let err = service.create_employee(draft).await.expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::DuplicateKey);
    assert!(err.message().contains(value));
    let details = err.details().expect("details");
    assert_eq!(details["field"], field);
    assert_eq!(details["value"], value);
}

#[rstest]
#[tokio::test]
async fn create_maps_unique_constraint_backstop(draft: EmployeeDraft) {
    let mut employees = MockEmployeeRepository::new();
    let mut projects = MockProjectRepository::new();
    project_exists(&mut projects, true);
    uniqueness(&mut employees, false, false);
    employees
        .expect_create()
        .times(1)
        .return_once(|_| Err(EmployeeRepositoryError::duplicate_key(fields::EMAIL)));

    let service = make_service(employees, projects);
    let err = service.create_employee(draft).await.expect_err("race lost");
    assert_eq!(err.code(), ErrorCode::DuplicateKey);
    assert_eq!(
        err.message(),
        "Employee with email 'meera@example.com' already exists."
    );
}

#[rstest]
#[tokio::test]
async fn create_maps_foreign_key_backstop(draft: EmployeeDraft) {
    let mut employees = MockEmployeeRepository::new();
    let mut projects = MockProjectRepository::new();
    project_exists(&mut projects, true);
    uniqueness(&mut employees, false, false);
    employees
        .expect_create()
        .times(1)
        .return_once(|_| Err(EmployeeRepositoryError::missing_project()));

    let service = make_service(employees, projects);
    let err = service.create_employee(draft).await.expect_err("project gone");
    assert_eq!(err.code(), ErrorCode::ReferenceNotFound);
}

#[rstest]
#[case(Some(EmployeeId::new(6)))]
#[case(None)]
#[tokio::test]
async fn update_rejects_identity_mismatch_without_touching_store(
    draft: EmployeeDraft,
    #[case] body_id: Option<EmployeeId>,
) {
    let service = make_service(MockEmployeeRepository::new(), MockProjectRepository::new());
    let err = service
        .update_employee(UpdateEmployeeRequest {
            path_id: EmployeeId::new(5),
            body_id,
            draft,
        })
        .await
        .expect_err("mismatch");
    assert_eq!(err.code(), ErrorCode::BadRequest);
    assert_eq!(err.message(), "Employee ID mismatch.");
}

#[rstest]
#[tokio::test]
async fn update_reports_missing_employee(draft: EmployeeDraft) {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_exists()
        .times(1)
        .return_once(|_| Ok(false));

    let service = make_service(employees, MockProjectRepository::new());
    let err = service
        .update_employee(UpdateEmployeeRequest {
            path_id: EmployeeId::new(42),
            body_id: Some(EmployeeId::new(42)),
            draft,
        })
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Employee with ID 42 not found.");
}

#[rstest]
#[tokio::test]
async fn update_excludes_self_from_uniqueness(draft: EmployeeDraft) {
    let id = EmployeeId::new(2);
    let mut employees = MockEmployeeRepository::new();
    let mut projects = MockProjectRepository::new();
    employees.expect_exists().times(1).return_once(|_| Ok(true));
    project_exists(&mut projects, true);
    employees
        .expect_code_taken()
        .withf(move |code, excluding| code == "EMP010" && *excluding == Some(id))
        .times(1)
        .return_once(|_, _| Ok(false));
    employees
        .expect_email_taken()
        .withf(move |_, excluding| *excluding == Some(id))
        .times(1)
        .return_once(|_, _| Ok(false));
    employees
        .expect_update()
        .withf(move |target, _| *target == id)
        .times(1)
        .return_once(|_, _| Ok(WriteOutcome::Applied));

    let service = make_service(employees, projects);
    service
        .update_employee(UpdateEmployeeRequest {
            path_id: id,
            body_id: Some(id),
            draft,
        })
        .await
        .expect("updated");
}

#[rstest]
#[tokio::test]
async fn update_reports_not_found_when_row_vanishes(draft: EmployeeDraft) {
    let mut employees = MockEmployeeRepository::new();
    let mut projects = MockProjectRepository::new();
    employees.expect_exists().times(1).return_once(|_| Ok(true));
    project_exists(&mut projects, true);
    uniqueness(&mut employees, false, false);
    employees
        .expect_update()
        .times(1)
        .return_once(|_, _| Ok(WriteOutcome::Missing));

    let service = make_service(employees, projects);
    let err = service
        .update_employee(UpdateEmployeeRequest {
            path_id: EmployeeId::new(2),
            body_id: Some(EmployeeId::new(2)),
            draft,
        })
        .await
        .expect_err("vanished");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(WriteOutcome::Applied, None)]
#[case(WriteOutcome::Missing, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_maps_outcome(#[case] outcome: WriteOutcome, #[case] expected: Option<ErrorCode>) {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_delete()
        .times(1)
        .return_once(move |_| Ok(outcome));

    let service = make_service(employees, MockProjectRepository::new());
    let result = service.delete_employee(EmployeeId::new(1)).await;
    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[tokio::test]
async fn get_reports_missing_employee_by_id() {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_with_project()
        .times(1)
        .return_once(|_| Ok(None));

    let service = make_service(employees, MockProjectRepository::new());
    let err = service
        .get_employee(EmployeeId::new(9999))
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(err.message().contains("9999"));
}

#[rstest]
#[tokio::test]
async fn connection_failures_map_to_service_unavailable() {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_list_with_projects()
        .times(1)
        .return_once(|| Err(EmployeeRepositoryError::connection("pool timed out")));

    let service = make_service(employees, MockProjectRepository::new());
    let err = service.list_employees().await.expect_err("unavailable");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
