//! Request-shape validation shared by the HTTP handlers.
//!
//! Field rules live in the domain; this module covers what only the adapter
//! can see: date strings, malformed JSON, and unparseable path ids.

use actix_web::{HttpRequest, error::JsonPayloadError, error::PathError, web};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, FieldErrors};

/// Field key used when the body as a whole cannot be decoded.
pub(crate) const BODY_FIELD: &str = "body";

/// Parse an optional wire date into `errors`.
///
/// Accepts `YYYY-MM-DD` or a date-time (RFC 3339, or without offset) and
/// keeps the calendar date. A missing value yields `None` without an error so
/// the domain decides whether the field is required.
pub(crate) fn parse_date(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: Option<&str>,
) -> Option<NaiveDate> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|ts| ts.date())
        });
    if parsed.is_none() {
        errors.push(field, format!("{label} must be a date (YYYY-MM-DD)"));
    }
    parsed
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::validation(json!({ BODY_FIELD: [err.to_string()] })).into()
}

fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected path parameter");
    Error::not_found(format!("No resource matches '{}'.", req.path())).into()
}

/// JSON extractor configuration turning decode failures into validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Path extractor configuration turning non-numeric ids into not-found errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
