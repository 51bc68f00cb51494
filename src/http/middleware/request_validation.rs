//! Required-field check for JSON request bodies.

use std::num::FpCategory;

use serde_json::Value;

use crate::error::AppError;

/// Checks that every field in `required_fields` is present and truthy.
///
/// A field counts as missing when it is absent or holds `null`, `false`,
/// zero or an empty string. Arrays and objects are always present, even when
/// empty. A body that is not a JSON object is missing every field.
///
/// # Errors
///
/// Returns [`AppError::Validation`] listing the missing fields in declaration
/// order, e.g. `Missing required fields: title, description`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tasktrack::http::middleware::validate_request_body;
///
/// assert!(validate_request_body(&["title"], &json!({ "title": "Buy milk" })).is_ok());
/// assert!(validate_request_body(&["title"], &json!({ "title": 0 })).is_err());
/// ```
pub fn validate_request_body(required_fields: &[&str], body: &Value) -> Result<(), AppError> {
    let missing: Vec<&str> = required_fields
        .iter()
        .copied()
        .filter(|field| body.get(*field).is_none_or(is_falsy))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number
            .as_f64()
            .is_none_or(|float| matches!(float.classify(), FpCategory::Zero | FpCategory::Nan)),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
