//! Model response parser
//!
//! Extracts the JSON object from the model text, checks every categorical
//! field against its enumeration and only then builds the typed
//! [`AnalysisResult`].

use crate::error::{Error, Result};
use crate::schema::CATEGORICAL_FIELDS;
use crate::types::AnalysisResult;
use serde_json::Value;

/// Extract the JSON part of a model response
///
/// Extraction order:
/// 1. ```json ... ``` block
/// 2. raw `{...}` object
/// 3. error
///
/// # Examples
/// ```
/// use rock_ai_common::extract_json;
///
/// let response = "Result: {\"rocks\": []}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"rocks\": []}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7;
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("no JSON object found in response".into()))
}

/// Check every categorical field in `value` against its enumeration
///
/// The top level must carry a `summary` object and a `rocks` array (possibly
/// empty). A missing or non-string categorical field is a violation, as is
/// any value outside the declared list.
pub fn validate_categorical_fields(value: &Value) -> Result<()> {
    let root = value
        .as_object()
        .ok_or_else(|| Error::schema("$", "top level is not a JSON object"))?;

    match root.get("summary") {
        Some(Value::Object(_)) => {}
        Some(_) => return Err(Error::schema("summary", "expected an object")),
        None => return Err(Error::schema("summary", "missing")),
    }

    let rocks = match root.get("rocks") {
        Some(Value::Array(rocks)) => rocks,
        Some(_) => return Err(Error::schema("rocks", "expected an array")),
        None => return Err(Error::schema("rocks", "missing")),
    };

    for (index, rock) in rocks.iter().enumerate() {
        let rock = rock
            .as_object()
            .ok_or_else(|| Error::schema(format!("rocks[{}]", index), "expected an object"))?;

        for (field, allowed) in CATEGORICAL_FIELDS {
            let path = format!("rocks[{}].{}", index, field);
            match rock.get(*field) {
                Some(Value::String(s)) if allowed.contains(&s.as_str()) => {}
                Some(Value::String(s)) => {
                    return Err(Error::schema(
                        path,
                        format!("'{}' is not one of: {}", s, allowed.join(", ")),
                    ));
                }
                Some(other) => {
                    return Err(Error::schema(path, format!("expected a string, got {}", other)));
                }
                None => return Err(Error::schema(path, "missing")),
            }
        }
    }

    Ok(())
}

/// Parse and validate a model response into an [`AnalysisResult`]
///
/// # Arguments
/// * `response` - raw text returned by the model
///
/// # Returns
/// * `Ok(AnalysisResult)` - every categorical value is inside its enumeration
/// * `Err(Error::Parse)` - no JSON in the text
/// * `Err(Error::SchemaViolation)` - enumeration or structure mismatch
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult> {
    let json_str = extract_json(response)?;
    let value: Value = serde_json::from_str(json_str.trim())?;

    validate_categorical_fields(&value)?;

    serde_json::from_value(value).map_err(|e| Error::schema("$", e.to_string()))
}
