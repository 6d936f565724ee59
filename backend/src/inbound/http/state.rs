//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EmployeesCommand, EmployeesQuery, ProjectsCommand, ProjectsQuery};
use crate::domain::ports::{EmployeeRepository, ProjectRepository};
use crate::domain::{EmployeeService, ProjectService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub employees: Arc<dyn EmployeesQuery>,
    pub employees_command: Arc<dyn EmployeesCommand>,
    pub projects: Arc<dyn ProjectsQuery>,
    pub projects_command: Arc<dyn ProjectsCommand>,
}

impl HttpState {
    /// Wire the domain services over a pair of repositories.
    pub fn from_repositories<E, P>(employees: Arc<E>, projects: Arc<P>) -> Self
    where
        E: EmployeeRepository + 'static,
        P: ProjectRepository + 'static,
    {
        let employee_service = Arc::new(EmployeeService::new(employees, projects.clone()));
        let project_service = Arc::new(ProjectService::new(projects));
        Self {
            employees: employee_service.clone(),
            employees_command: employee_service,
            projects: project_service.clone(),
            projects_command: project_service,
        }
    }
}
