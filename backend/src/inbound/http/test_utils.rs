//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{
    MockEmployeesCommand, MockEmployeesQuery, MockProjectsCommand, MockProjectsQuery,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Mocked driving ports; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub employees: MockEmployeesQuery,
    pub employees_command: MockEmployeesCommand,
    pub projects: MockProjectsQuery,
    pub projects_command: MockProjectsCommand,
}

impl From<MockPorts> for HttpState {
    fn from(ports: MockPorts) -> Self {
        Self {
            employees: Arc::new(ports.employees),
            employees_command: Arc::new(ports.employees_command),
            projects: Arc::new(ports.projects),
            projects_command: Arc::new(ports.projects_command),
        }
    }
}

/// Build an app serving every resource over `ports`.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .app_data(web::Data::new(HttpState::from(ports)))
        .configure(configure)
}
