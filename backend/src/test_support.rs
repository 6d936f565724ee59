//! In-memory repositories for exercising the full HTTP stack without
//! PostgreSQL.
//!
//! [`InMemoryStore`] implements both driven ports over one shared table set
//! and enforces the same constraints as the SQL schema: unique codes and
//! emails, the employee to project reference, and restricted project
//! deletion. Identities come from per-table counters and are never reused.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::ports::{
    EmployeeRepository, EmployeeRepositoryError, ProjectRepository, ProjectRepositoryError,
    WriteOutcome,
};
use crate::domain::validation::fields;
use crate::domain::{
    Employee, EmployeeDraft, EmployeeId, EmployeeWithProject, Project, ProjectDraft, ProjectId,
    ProjectWithEmployees,
};

#[derive(Debug, Default)]
struct Tables {
    projects: BTreeMap<ProjectId, Project>,
    employees: BTreeMap<EmployeeId, Employee>,
    last_project_id: i32,
    last_employee_id: i32,
}

impl Tables {
    fn employee_conflict(
        &self,
        draft: &EmployeeDraft,
        excluding: Option<EmployeeId>,
    ) -> Option<EmployeeRepositoryError> {
        if !self.projects.contains_key(&draft.project_id()) {
            return Some(EmployeeRepositoryError::missing_project());
        }
        let others = || {
            self.employees
                .values()
                .filter(move |employee| Some(employee.id) != excluding)
        };
        if others().any(|employee| employee.code == draft.code()) {
            return Some(EmployeeRepositoryError::duplicate_key(fields::EMPLOYEE_CODE));
        }
        if others().any(|employee| employee.email == draft.email()) {
            return Some(EmployeeRepositoryError::duplicate_key(fields::EMAIL));
        }
        None
    }

    fn project_code_taken(&self, code: &str, excluding: Option<ProjectId>) -> bool {
        self.projects
            .values()
            .any(|project| project.code == code && Some(project.id) != excluding)
    }

    fn employees_of(&self, id: ProjectId) -> Vec<Employee> {
        self.employees
            .values()
            .filter(|employee| employee.project_id == id)
            .cloned()
            .collect()
    }

    fn joined(&self, employee: &Employee) -> Option<EmployeeWithProject> {
        self.projects
            .get(&employee.project_id)
            .map(|project| EmployeeWithProject {
                employee: employee.clone(),
                project: project.clone(),
            })
    }
}

/// Shared in-memory employee and project tables.
///
/// Share one `Arc<InMemoryStore>` between both repository slots of
/// [`HttpState::from_repositories`](crate::inbound::http::state::HttpState::from_repositories).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the rows the initial migration seeds.
    pub fn seeded() -> Self {
        let store = Self::default();
        if let Ok(mut tables) = store.tables.lock() {
            for project in seed_projects() {
                tables.last_project_id = tables.last_project_id.max(project.id.get());
                tables.projects.insert(project.id, project);
            }
            for employee in seed_employees() {
                tables.last_employee_id = tables.last_employee_id.max(employee.id.get());
                tables.employees.insert(employee.id, employee);
            }
        }
        store
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of employees currently stored.
    pub fn employee_count(&self) -> usize {
        self.tables.lock().map_or(0, |tables| tables.employees.len())
    }

    /// Number of projects currently stored.
    pub fn project_count(&self) -> usize {
        self.tables.lock().map_or(0, |tables| tables.projects.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreFault> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreFault::Unavailable);
        }
        self.tables.lock().map_err(|_| StoreFault::Poisoned)
    }
}

enum StoreFault {
    Unavailable,
    Poisoned,
}

impl From<StoreFault> for EmployeeRepositoryError {
    fn from(fault: StoreFault) -> Self {
        match fault {
            StoreFault::Unavailable => Self::connection("in-memory store unavailable"),
            StoreFault::Poisoned => Self::query("in-memory store lock poisoned"),
        }
    }
}

impl From<StoreFault> for ProjectRepositoryError {
    fn from(fault: StoreFault) -> Self {
        match fault {
            StoreFault::Unavailable => Self::connection("in-memory store unavailable"),
            StoreFault::Poisoned => Self::query("in-memory store lock poisoned"),
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn seed_projects() -> [Project; 2] {
    [
        Project {
            id: ProjectId::new(1),
            code: "P001".to_owned(),
            name: "E-Commerce Platform".to_owned(),
            start_date: date(2024, 1, 15),
            end_date: Some(date(2024, 12, 31)),
            budget: Decimal::new(25_000_000, 2),
        },
        Project {
            id: ProjectId::new(2),
            code: "P002".to_owned(),
            name: "Mobile Banking App".to_owned(),
            start_date: date(2025, 3, 1),
            end_date: None,
            budget: Decimal::new(18_000_000, 2),
        },
    ]
}

fn seed_employees() -> [Employee; 2] {
    [
        Employee {
            id: EmployeeId::new(1),
            code: "EMP001".to_owned(),
            full_name: "Harish k".to_owned(),
            email: "harish@kanini.com".to_owned(),
            designation: "Developer".to_owned(),
            salary: Decimal::new(7_500_000, 2),
            project_id: ProjectId::new(1),
        },
        Employee {
            id: EmployeeId::new(2),
            code: "EMP002".to_owned(),
            full_name: "Kumar".to_owned(),
            email: "kumar@kanini.com".to_owned(),
            designation: "Manager".to_owned(),
            salary: Decimal::new(8_500_000, 2),
            project_id: ProjectId::new(1),
        },
    ]
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn list_with_projects(
        &self,
    ) -> Result<Vec<EmployeeWithProject>, EmployeeRepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .employees
            .values()
            .filter_map(|employee| tables.joined(employee))
            .collect())
    }

    async fn find_with_project(
        &self,
        id: EmployeeId,
    ) -> Result<Option<EmployeeWithProject>, EmployeeRepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .employees
            .get(&id)
            .and_then(|employee| tables.joined(employee)))
    }

    async fn exists(&self, id: EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        Ok(self.lock()?.employees.contains_key(&id))
    }

    async fn code_taken(
        &self,
        code: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, EmployeeRepositoryError> {
        Ok(self
            .lock()?
            .employees
            .values()
            .any(|employee| employee.code == code && Some(employee.id) != excluding))
    }

    async fn email_taken(
        &self,
        email: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, EmployeeRepositoryError> {
        Ok(self
            .lock()?
            .employees
            .values()
            .any(|employee| employee.email == email && Some(employee.id) != excluding))
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, EmployeeRepositoryError> {
        let mut tables = self.lock()?;
        if let Some(conflict) = tables.employee_conflict(draft, None) {
            return Err(conflict);
        }
        tables.last_employee_id += 1;
        let employee = draft
            .clone()
            .into_employee(EmployeeId::new(tables.last_employee_id));
        tables.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<WriteOutcome, EmployeeRepositoryError> {
        let mut tables = self.lock()?;
        if !tables.employees.contains_key(&id) {
            return Ok(WriteOutcome::Missing);
        }
        if let Some(conflict) = tables.employee_conflict(draft, Some(id)) {
            return Err(conflict);
        }
        tables
            .employees
            .insert(id, draft.clone().into_employee(id));
        Ok(WriteOutcome::Applied)
    }

    async fn delete(&self, id: EmployeeId) -> Result<WriteOutcome, EmployeeRepositoryError> {
        let removed = self.lock()?.employees.remove(&id);
        Ok(WriteOutcome::from_rows(usize::from(removed.is_some())))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn list_with_employees(
        &self,
    ) -> Result<Vec<ProjectWithEmployees>, ProjectRepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .projects
            .values()
            .map(|project| ProjectWithEmployees {
                project: project.clone(),
                employees: tables.employees_of(project.id),
            })
            .collect())
    }

    async fn find_with_employees(
        &self,
        id: ProjectId,
    ) -> Result<Option<ProjectWithEmployees>, ProjectRepositoryError> {
        let tables = self.lock()?;
        Ok(tables.projects.get(&id).map(|project| ProjectWithEmployees {
            project: project.clone(),
            employees: tables.employees_of(id),
        }))
    }

    async fn exists(&self, id: ProjectId) -> Result<bool, ProjectRepositoryError> {
        Ok(self.lock()?.projects.contains_key(&id))
    }

    async fn code_taken(
        &self,
        code: &str,
        excluding: Option<ProjectId>,
    ) -> Result<bool, ProjectRepositoryError> {
        Ok(self.lock()?.project_code_taken(code, excluding))
    }

    async fn has_employees(&self, id: ProjectId) -> Result<bool, ProjectRepositoryError> {
        Ok(self
            .lock()?
            .employees
            .values()
            .any(|employee| employee.project_id == id))
    }

    async fn create(&self, draft: &ProjectDraft) -> Result<Project, ProjectRepositoryError> {
        let mut tables = self.lock()?;
        if tables.project_code_taken(draft.code(), None) {
            return Err(ProjectRepositoryError::duplicate_key(fields::PROJECT_CODE));
        }
        tables.last_project_id += 1;
        let project = draft
            .clone()
            .into_project(ProjectId::new(tables.last_project_id));
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update(
        &self,
        id: ProjectId,
        draft: &ProjectDraft,
    ) -> Result<WriteOutcome, ProjectRepositoryError> {
        let mut tables = self.lock()?;
        if !tables.projects.contains_key(&id) {
            return Ok(WriteOutcome::Missing);
        }
        if tables.project_code_taken(draft.code(), Some(id)) {
            return Err(ProjectRepositoryError::duplicate_key(fields::PROJECT_CODE));
        }
        tables.projects.insert(id, draft.clone().into_project(id));
        Ok(WriteOutcome::Applied)
    }

    async fn delete(&self, id: ProjectId) -> Result<WriteOutcome, ProjectRepositoryError> {
        let mut tables = self.lock()?;
        if tables.employees.values().any(|employee| employee.project_id == id) {
            return Err(ProjectRepositoryError::has_employees());
        }
        let removed = tables.projects.remove(&id);
        Ok(WriteOutcome::from_rows(usize::from(removed.is_some())))
    }
}
