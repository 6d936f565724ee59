//! Employee entity and its validated draft.

use std::fmt;

use rust_decimal::Decimal;

use super::validation::{FieldErrors, fields, is_valid_email, required_money, required_text};
use super::{Project, ProjectId};

/// Maximum length of an employee code.
pub const EMPLOYEE_CODE_MAX: usize = 8;
/// Maximum length of an employee's full name.
pub const FULL_NAME_MAX: usize = 150;
/// Maximum length of a designation.
pub const DESIGNATION_MAX: usize = 50;

/// Store-assigned employee identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmployeeId(i32);

impl EmployeeId {
    /// Wrap a raw identity.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identity value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted employee.
///
/// ## Invariants
/// - `project_id` resolves to a live project; the store enforces this with a
///   restricting foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub designation: String,
    pub salary: Decimal,
    pub project_id: ProjectId,
}

/// Employee joined with the project it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeWithProject {
    pub employee: Employee,
    pub project: Project,
}

/// Unvalidated employee fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeInput {
    pub code: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<Decimal>,
    pub project_id: Option<ProjectId>,
}

impl EmployeeInput {
    /// Apply the field rules, producing a draft ready for the store.
    ///
    /// # Examples
    /// ```
    /// use rust_decimal::Decimal;
    /// use tracker::domain::{EmployeeInput, ProjectId};
    ///
    /// let draft = EmployeeInput {
    ///     code: Some("EMP003".into()),
    ///     full_name: Some("Asha Rao".into()),
    ///     email: Some("asha@example.com".into()),
    ///     designation: Some("Analyst".into()),
    ///     salary: Some(Decimal::new(6_000_000, 2)),
    ///     project_id: Some(ProjectId::new(2)),
    /// }
    /// .validate()
    /// .expect("valid employee");
    /// assert_eq!(draft.code(), "EMP003");
    /// ```
    pub fn validate(self) -> Result<EmployeeDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        let code = required_text(
            &mut errors,
            fields::EMPLOYEE_CODE,
            "Employee Code",
            self.code,
            EMPLOYEE_CODE_MAX,
        );
        let full_name = required_text(
            &mut errors,
            fields::FULL_NAME,
            "Full Name",
            self.full_name,
            FULL_NAME_MAX,
        );
        let email = required_text(&mut errors, fields::EMAIL, "Email", self.email, usize::MAX)
            .and_then(|email| {
                if is_valid_email(&email) {
                    Some(email)
                } else {
                    errors.push(fields::EMAIL, "Please enter a valid email address");
                    None
                }
            });
        let designation = required_text(
            &mut errors,
            fields::DESIGNATION,
            "Designation",
            self.designation,
            DESIGNATION_MAX,
        );
        let salary = required_money(&mut errors, fields::SALARY, "Salary", self.salary);
        if self.project_id.is_none() {
            errors.push(fields::PROJECT_ID, "Project assignment is required");
        }

        match (code, full_name, email, designation, salary, self.project_id) {
            (
                Some(code),
                Some(full_name),
                Some(email),
                Some(designation),
                Some(salary),
                Some(project_id),
            ) => errors.finish(|| EmployeeDraft {
                code,
                full_name,
                email,
                designation,
                salary,
                project_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Mutable employee fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    code: String,
    full_name: String,
    email: String,
    designation: String,
    salary: Decimal,
    project_id: ProjectId,
}

impl EmployeeDraft {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn salary(&self) -> Decimal {
        self.salary
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Materialise the draft as a persisted employee with `id`.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            code: self.code,
            full_name: self.full_name,
            email: self.email,
            designation: self.designation,
            salary: self.salary,
            project_id: self.project_id,
        }
    }
}
