//! Field-level validation shared by the entity drafts.
//!
//! Rules run before any store access and accumulate every failure so clients
//! see all problems with a payload at once.

use std::collections::BTreeMap;

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use super::Error;

/// Decimal places a `NUMERIC(18,2)` column keeps.
pub const MONEY_SCALE: u32 = 2;

/// Largest value a `NUMERIC(18,2)` column can hold.
pub const MAX_MONEY: Decimal = Decimal::from_parts(2_808_348_671, 232_830_643, 0, false, 2);

/// Wire names of validated fields.
pub mod fields {
    pub const EMPLOYEE_CODE: &str = "employeeCode";
    pub const FULL_NAME: &str = "fullName";
    pub const EMAIL: &str = "email";
    pub const DESIGNATION: &str = "designation";
    pub const SALARY: &str = "salary";
    pub const PROJECT_ID: &str = "projectId";
    pub const PROJECT_CODE: &str = "projectCode";
    pub const PROJECT_NAME: &str = "projectName";
    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const BUDGET: &str = "budget";
}

/// Accumulated per-field validation messages.
///
/// # Examples
/// ```
/// use tracker::domain::FieldErrors;
///
/// let mut errors = FieldErrors::default();
/// errors.push("email", "Email is required");
/// assert!(!errors.is_empty());
/// assert_eq!(errors.messages("email"), ["Email is required"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    /// Record a message against `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// True when no field has failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Return `value` when no errors were recorded, otherwise `self`.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl From<FieldErrors> for Error {
    fn from(value: FieldErrors) -> Self {
        let errors: serde_json::Map<String, serde_json::Value> = value
            .0
            .into_iter()
            .map(|(field, messages)| (field.to_owned(), serde_json::json!(messages)))
            .collect();
        Error::validation(serde_json::Value::Object(errors))
    }
}

/// Validate a required, length-limited text field.
///
/// Blank strings count as missing. Length is measured in characters.
pub(crate) fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: Option<String>,
    max_chars: usize,
) -> Option<String> {
    let Some(value) = value.filter(|raw| !raw.trim().is_empty()) else {
        errors.push(field, format!("{label} is required"));
        return None;
    };
    if value.chars().count() > max_chars {
        errors.push(
            field,
            format!("{label} cannot exceed {max_chars} characters"),
        );
        return None;
    }
    Some(value)
}

/// Validate a required, non-negative money amount.
///
/// Trailing zeros are ignored when counting decimal places, so `1.500` is
/// accepted while `1.505` is not.
pub(crate) fn required_money(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: Option<Decimal>,
) -> Option<Decimal> {
    let Some(value) = value else {
        errors.push(field, format!("{label} is required"));
        return None;
    };
    if value < Decimal::ZERO {
        errors.push(field, format!("{label} must be a positive value"));
        return None;
    }
    if value > MAX_MONEY {
        errors.push(field, format!("{label} exceeds the supported range"));
        return None;
    }
    if value.normalize().scale() > MONEY_SCALE {
        errors.push(
            field,
            format!("{label} cannot have more than {MONEY_SCALE} decimal places"),
        );
        return None;
    }
    Some(value)
}

// Exactly one '@' with non-empty local and domain parts.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Return true when `value` has the shape of an email address.
///
/// ```
/// assert!(tracker::domain::is_valid_email("harish@kanini.com"));
/// assert!(!tracker::domain::is_valid_email("harish.kanini.com"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[rstest]
    fn max_money_matches_column_precision() {
        let expected = Decimal::from_str("9999999999999999.99").expect("decimal literal");
        assert_eq!(MAX_MONEY, expected);
    }

    #[rstest]
    #[case(None, "Code is required")]
    #[case(Some("   "), "Code is required")]
    #[case(Some("ABCDEFGHI"), "Code cannot exceed 8 characters")]
    fn required_text_rejects(#[case] value: Option<&str>, #[case] message: &str) {
        let mut errors = FieldErrors::default();
        let out = required_text(&mut errors, "code", "Code", value.map(str::to_owned), 8);
        assert!(out.is_none());
        assert_eq!(errors.messages("code"), [message]);
    }

    #[rstest]
    fn required_text_counts_characters_not_bytes() {
        let mut errors = FieldErrors::default();
        let out = required_text(&mut errors, "code", "Code", Some("ÉÉÉÉÉÉÉÉ".to_owned()), 8);
        assert_eq!(out.as_deref(), Some("ÉÉÉÉÉÉÉÉ"));
        assert!(errors.is_empty());
    }

    #[rstest]
    #[case("-0.01", "Salary must be a positive value")]
    #[case("10000000000000000", "Salary exceeds the supported range")]
    #[case("60000.555", "Salary cannot have more than 2 decimal places")]
    fn required_money_rejects(#[case] raw: &str, #[case] message: &str) {
        let mut errors = FieldErrors::default();
        let value = Decimal::from_str(raw).expect("decimal literal");
        assert!(required_money(&mut errors, "salary", "Salary", Some(value)).is_none());
        assert_eq!(errors.messages("salary"), [message]);
    }

    #[rstest]
    #[case("0")]
    #[case("60000.5")]
    #[case("60000.500")]
    #[case("9999999999999999.99")]
    fn required_money_accepts(#[case] raw: &str) {
        let mut errors = FieldErrors::default();
        let value = Decimal::from_str(raw).expect("decimal literal");
        let out = required_money(&mut errors, "salary", "Salary", Some(value));
        assert_eq!(out, Some(value));
        assert!(errors.is_empty());
    }

    #[rstest]
    #[case("a@b", true)]
    #[case("first.last@example.org", true)]
    #[case("@example.org", false)]
    #[case("user@", false)]
    #[case("two@@example.org", false)]
    #[case("with space@example.org", false)]
    fn email_shape(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(is_valid_email(value), valid);
    }

    #[rstest]
    fn email_pattern_compiles() {
        assert_eq!(LazyLock::force(&EMAIL_RE).as_str(), r"^[^@\s]+@[^@\s]+$");
    }

    #[rstest]
    fn field_errors_convert_to_validation_error() {
        let mut errors = FieldErrors::default();
        errors.push("email", "Email is required");
        errors.push("salary", "Salary is required");
        let err = Error::from(errors);
        let details = err.details().expect("details present");
        assert_eq!(details["errors"]["email"][0], "Email is required");
        assert_eq!(details["errors"]["salary"][0], "Salary is required");
    }
}
