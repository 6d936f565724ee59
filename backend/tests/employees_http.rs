//! End-to-end employee scenarios through the HTTP adapter.

#[path = "support/tracker_app.rs"]
mod tracker_app;

use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tracker_app::Tracker;

#[fixture]
fn app() -> Tracker {
    Tracker::seeded()
}

fn new_employee(code: &str, email: &str, project_id: i32) -> Value {
    json!({
        "employeeCode": code,
        "fullName": "Asha Rao",
        "email": email,
        "designation": "Analyst",
        "salary": 60000.5,
        "projectId": project_id
    })
}

#[rstest]
#[actix_web::test]
async fn list_returns_seeded_employees_with_their_project(app: Tracker) {
    let reply = app.get("/employees").await;

    assert_eq!(reply.status, StatusCode::OK);
    let employees = reply.body.as_array().expect("array");
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0]["employeeCode"], "EMP001");
    assert_eq!(employees[0]["project"]["projectCode"], "P001");
    assert_eq!(employees[1]["fullName"], "Kumar");
    assert!(employees[0]["project"].get("employees").is_none());
}

#[rstest]
#[actix_web::test]
async fn created_employee_reads_back_identically(app: Tracker) {
    let created = app
        .post("/employees", new_employee("EMP003", "asha@example.com", 2))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["employeeId"].as_i64().expect("id");
    assert_eq!(created.location.as_deref(), Some(format!("/employees/{id}").as_str()));

    let fetched = app.get(&format!("/employees/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let body = &fetched.body;
    assert_eq!(body["employeeCode"], "EMP003");
    assert_eq!(body["fullName"], "Asha Rao");
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["designation"], "Analyst");
    assert_eq!(body["salary"].as_f64(), Some(60000.5));
    assert_eq!(body["projectId"], 2);
    assert_eq!(body["project"]["projectId"], 2);
    assert_eq!(body["project"]["projectName"], "Mobile Banking App");
    assert_eq!(body["project"]["startDate"], "2025-03-01");
    assert!(body["project"]["endDate"].is_null());
}

#[rstest]
#[actix_web::test]
async fn largest_salary_reads_back_exactly(app: Tracker) {
    let mut body = new_employee("EMP003", "asha@example.com", 1);
    body["salary"] = serde_json::from_str("9999999999999999.99").expect("number");

    let created = app.post("/employees", body).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["salary"].to_string(), "9999999999999999.99");

    let id = created.body["employeeId"].as_i64().expect("id");
    let fetched = app.get(&format!("/employees/{id}")).await;
    assert_eq!(fetched.body["salary"].to_string(), "9999999999999999.99");
}

#[rstest]
#[actix_web::test]
async fn salary_with_fractional_cents_is_rejected(app: Tracker) {
    let mut body = new_employee("EMP003", "asha@example.com", 1);
    body["salary"] = serde_json::from_str("60000.555").expect("number");

    let reply = app.post("/employees", body).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.body["details"]["errors"]["salary"][0],
        "Salary cannot have more than 2 decimal places"
    );
    assert_eq!(app.store().employee_count(), 2);
}

#[rstest]
#[actix_web::test]
async fn body_identity_is_ignored_on_create(app: Tracker) {
    let mut body = new_employee("EMP003", "asha@example.com", 1);
    body["employeeId"] = json!(1);

    let created = app.post("/employees", body).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["employeeId"], 3);
}

#[rstest]
#[case("EMP001", "fresh@example.com", "employeeCode", "EMP001")]
#[case("EMP009", "harish@kanini.com", "email", "harish@kanini.com")]
#[actix_web::test]
async fn duplicate_unique_fields_are_rejected(
    app: Tracker,
    #[case] code: &str,
    #[case] email: &str,
    #[case] field: &str,
    #[case] value: &str,
) {
    let reply = app.post("/employees", new_employee(code, email, 1)).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.code(), "duplicate_key");
    assert!(reply.message().contains(value));
    assert_eq!(reply.body["details"]["field"], field);
    assert_eq!(app.store().employee_count(), 2);
}

#[rstest]
#[actix_web::test]
async fn second_identical_create_fails(app: Tracker) {
    let body = new_employee("EMP003", "asha@example.com", 1);
    assert_eq!(app.post("/employees", body.clone()).await.status, StatusCode::CREATED);

    let second = app.post("/employees", body).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.code(), "duplicate_key");
    assert_eq!(
        second.message(),
        "Employee with code 'EMP003' already exists."
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_project_is_rejected(app: Tracker) {
    let reply = app
        .post("/employees", new_employee("EMP003", "asha@example.com", 9999))
        .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.code(), "reference_not_found");
    assert!(reply.message().contains("9999"));
    assert!(reply.message().contains("does not exist"));
    assert_eq!(app.store().employee_count(), 2);
}

#[rstest]
#[actix_web::test]
async fn identity_mismatch_leaves_store_unchanged(app: Tracker) {
    let before = app.get("/employees").await.body;
    let mut body = new_employee("EMP005", "five@example.com", 1);
    body["employeeId"] = json!(6);

    let reply = app.put("/employees/5", body).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.message(), "Employee ID mismatch.");
    assert_eq!(app.get("/employees").await.body, before);
}

#[rstest]
#[actix_web::test]
async fn update_may_keep_its_own_unique_values(app: Tracker) {
    let body = json!({
        "employeeId": 1,
        "employeeCode": "EMP001",
        "fullName": "Harish Kumar",
        "email": "harish@kanini.com",
        "designation": "Lead Developer",
        "salary": 90000,
        "projectId": 2
    });

    let reply = app.put("/employees/1", body).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let fetched = app.get("/employees/1").await.body;
    assert_eq!(fetched["fullName"], "Harish Kumar");
    assert_eq!(fetched["project"]["projectCode"], "P002");
}

#[rstest]
#[actix_web::test]
async fn update_cannot_take_another_employees_email(app: Tracker) {
    let body = json!({
        "employeeId": 1,
        "employeeCode": "EMP001",
        "fullName": "Harish k",
        "email": "kumar@kanini.com",
        "designation": "Developer",
        "salary": 75000,
        "projectId": 1
    });

    let reply = app.put("/employees/1", body).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["details"]["field"], "email");
}

#[rstest]
#[actix_web::test]
async fn missing_employee_is_not_found(app: Tracker) {
    let reply = app.get("/employees/9999").await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.message().contains("9999"));
    assert_eq!(reply.body["traceId"].as_str(), reply.trace_id.as_deref());
}

#[rstest]
#[actix_web::test]
async fn delete_removes_the_employee(app: Tracker) {
    assert_eq!(app.delete("/employees/2").await.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/employees/2").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete("/employees/2").await.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn every_field_error_is_reported_at_once(app: Tracker) {
    let reply = app
        .post(
            "/employees",
            json!({ "employeeCode": "TOOLONGCODE", "email": "not-an-email", "salary": -1 }),
        )
        .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.code(), "validation_failed");
    let errors = &reply.body["details"]["errors"];
    for field in ["employeeCode", "fullName", "email", "designation", "salary", "projectId"] {
        assert!(errors[field].is_array(), "expected an error for {field}");
    }
}

#[rstest]
#[actix_web::test]
async fn references_resolve_after_a_write_sequence(app: Tracker) {
    app.post("/employees", new_employee("EMP003", "a@example.com", 2))
        .await;
    app.post("/employees", new_employee("EMP004", "b@example.com", 9999))
        .await;
    app.delete("/projects/2").await;
    app.delete("/employees/1").await;

    let projects = app.get("/projects").await.body;
    let known: Vec<&Value> = projects
        .as_array()
        .expect("array")
        .iter()
        .map(|project| &project["projectId"])
        .collect();
    for employee in app.get("/employees").await.body.as_array().expect("array") {
        assert!(known.contains(&&employee["projectId"]));
        assert_eq!(employee["project"]["projectId"], employee["projectId"]);
    }
}

#[rstest]
#[actix_web::test]
async fn unreachable_store_is_service_unavailable(app: Tracker) {
    app.store().set_unavailable(true);

    let reply = app.get("/employees").await;
    assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(reply.code(), "service_unavailable");
}
