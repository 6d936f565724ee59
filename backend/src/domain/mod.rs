//! Domain primitives, ports, and services.
//!
//! Purpose: Define the employee and project entities, the rules every write
//! must satisfy, and the use-case services that enforce them. Nothing here
//! depends on HTTP or Diesel; adapters reach the domain through `ports`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure taxonomy.
//! - Employee / Project: persisted entities plus their validated drafts.
//! - EmployeeService / ProjectService: implementations of the driving ports.

pub mod employee;
mod employee_service;
pub mod error;
pub mod ports;
pub mod project;
mod project_service;
pub mod validation;

pub use self::employee::{
    Employee, EmployeeDraft, EmployeeId, EmployeeInput, EmployeeWithProject,
};
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::project::{Project, ProjectDraft, ProjectId, ProjectInput, ProjectWithEmployees};
pub use self::project_service::ProjectService;
pub use self::validation::{FieldErrors, is_valid_email};
