//! Project entity and its validated draft.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Employee;
use super::validation::{FieldErrors, fields, required_money, required_text};

/// Maximum length of a project code.
pub const PROJECT_CODE_MAX: usize = 10;
/// Maximum length of a project name.
pub const PROJECT_NAME_MAX: usize = 100;

/// Store-assigned project identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(i32);

impl ProjectId {
    /// Wrap a raw identity.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identity value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub code: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Decimal,
}

/// Project together with the employees currently assigned to it.
///
/// The employee list is derived by querying employees, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectWithEmployees {
    pub project: Project,
    pub employees: Vec<Employee>,
}

/// Unvalidated project fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInput {
    pub code: Option<String>,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<Decimal>,
}

impl ProjectInput {
    /// Apply the field rules, producing a draft ready for the store.
    pub fn validate(self) -> Result<ProjectDraft, FieldErrors> {
        self.validate_with(FieldErrors::default())
    }

    /// Apply the field rules on top of errors already found by the caller
    /// (for example, unparseable dates).
    pub fn validate_with(self, mut errors: FieldErrors) -> Result<ProjectDraft, FieldErrors> {
        let code = required_text(
            &mut errors,
            fields::PROJECT_CODE,
            "Project Code",
            self.code,
            PROJECT_CODE_MAX,
        );
        let name = required_text(
            &mut errors,
            fields::PROJECT_NAME,
            "Project Name",
            self.name,
            PROJECT_NAME_MAX,
        );
        if self.start_date.is_none() && errors.messages(fields::START_DATE).is_empty() {
            errors.push(fields::START_DATE, "Start Date is required");
        }
        let budget = required_money(&mut errors, fields::BUDGET, "Budget", self.budget);

        match (code, name, self.start_date, budget) {
            (Some(code), Some(name), Some(start_date), Some(budget)) => {
                errors.finish(|| ProjectDraft {
                    code,
                    name,
                    start_date,
                    end_date: self.end_date,
                    budget,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Mutable project fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    code: String,
    name: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    budget: Decimal,
}

impl ProjectDraft {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn budget(&self) -> Decimal {
        self.budget
    }

    /// Materialise the draft as a persisted project with `id`.
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            code: self.code,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            budget: self.budget,
        }
    }
}
