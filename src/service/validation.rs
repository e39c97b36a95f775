//! Request validation: JSON bodies and query strings into typed classroom inputs.

use crate::error::{AppError, ValidationErrors};
use crate::models::{ClassroomPatch, NewClassroom};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 100;

/// Pagination window for list. Both values are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    /// Negative inputs clamp to 0.
    pub fn new(skip: i64, limit: i64) -> Self {
        Page {
            skip: skip.max(0),
            limit: limit.max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(DEFAULT_SKIP, DEFAULT_LIMIT)
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Both fields required, strings, non-empty. Unknown keys are ignored.
    pub fn create(body: &Map<String, Value>) -> Result<NewClassroom, AppError> {
        let mut errors = ValidationErrors::default();
        let class_name = required_text(body, "class_name", &mut errors);
        let class_teacher = required_text(body, "class_teacher", &mut errors);
        match (class_name, class_teacher) {
            (Some(class_name), Some(class_teacher)) if errors.is_empty() => Ok(NewClassroom {
                class_name,
                class_teacher,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }

    /// Only keys present in the body end up in the patch. Present values must be strings.
    pub fn update(body: &Map<String, Value>) -> Result<ClassroomPatch, AppError> {
        let mut errors = ValidationErrors::default();
        let patch = ClassroomPatch {
            class_name: optional_text(body, "class_name", &mut errors),
            class_teacher: optional_text(body, "class_teacher", &mut errors),
        };
        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(AppError::Validation(errors))
        }
    }

    /// `skip` and `limit` from the query string; anything that is not an integer is rejected.
    pub fn page(params: &HashMap<String, String>) -> Result<Page, AppError> {
        let mut errors = ValidationErrors::default();
        let skip = query_int(params, "skip", DEFAULT_SKIP, &mut errors);
        let limit = query_int(params, "limit", DEFAULT_LIMIT, &mut errors);
        if errors.is_empty() {
            Ok(Page::new(skip, limit))
        } else {
            Err(AppError::Validation(errors))
        }
    }

    /// Path ids must be integers that fit the `id` column.
    pub fn id(raw: &str) -> Result<i32, AppError> {
        raw.trim().parse().map_err(|_| {
            AppError::Validation(ValidationErrors::single("id", "value is not a valid integer"))
        })
    }
}

fn required_text(body: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, "field required");
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(field, "must not be empty");
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(field, "must be a string");
            None
        }
    }
}

fn optional_text(body: &Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<String> {
    match body.get(field) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        // Both columns are NOT NULL.
        Some(Value::Null) => {
            errors.push(field, "must not be null");
            None
        }
        Some(_) => {
            errors.push(field, "must be a string");
            None
        }
    }
}

fn query_int(
    params: &HashMap<String, String>,
    field: &str,
    default: i64,
    errors: &mut ValidationErrors,
) -> i64 {
    match params.get(field) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            errors.push(field, "value is not a valid integer");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    fn fields(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation(e) => e.fields().into_iter().map(String::from).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_accepts_complete_body() {
        let input = RequestValidator::create(&obj(json!({
            "class_name": "Room A",
            "class_teacher": "Ms. Lee",
            "extra": 1
        })))
        .unwrap();
        assert_eq!(input.class_name, "Room A");
        assert_eq!(input.class_teacher, "Ms. Lee");
    }

    #[test]
    fn create_reports_every_bad_field() {
        let err = RequestValidator::create(&obj(json!({"class_teacher": 5}))).unwrap_err();
        assert_eq!(fields(err), vec!["class_name", "class_teacher"]);

        let err = RequestValidator::create(&obj(json!({"class_name": "", "class_teacher": "x"}))).unwrap_err();
        assert_eq!(fields(err), vec!["class_name"]);

        let err = RequestValidator::create(&obj(json!({"class_name": null, "class_teacher": "x"}))).unwrap_err();
        assert_eq!(fields(err), vec!["class_name"]);
    }

    #[test]
    fn update_distinguishes_absent_from_empty() {
        let patch = RequestValidator::update(&obj(json!({"class_teacher": ""}))).unwrap();
        assert_eq!(patch.class_name, None);
        assert_eq!(patch.class_teacher, Some(String::new()));

        let patch = RequestValidator::update(&obj(json!({}))).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn update_rejects_null_and_non_strings() {
        let err = RequestValidator::update(&obj(json!({"class_name": null}))).unwrap_err();
        assert_eq!(fields(err), vec!["class_name"]);
        let err = RequestValidator::update(&obj(json!({"class_teacher": ["a"]}))).unwrap_err();
        assert_eq!(fields(err), vec!["class_teacher"]);
    }

    #[test]
    fn page_defaults_and_clamping() {
        assert_eq!(RequestValidator::page(&HashMap::new()).unwrap(), Page { skip: 0, limit: 100 });

        let params: HashMap<String, String> = [("skip", "-3"), ("limit", "-1")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(RequestValidator::page(&params).unwrap(), Page { skip: 0, limit: 0 });
    }

    #[test]
    fn page_rejects_non_integers() {
        let params: HashMap<String, String> = [("skip", "two"), ("limit", "5")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(fields(RequestValidator::page(&params).unwrap_err()), vec!["skip"]);
    }

    #[test]
    fn id_must_be_integer() {
        assert_eq!(RequestValidator::id("42").unwrap(), 42);
        assert_eq!(fields(RequestValidator::id("abc").unwrap_err()), vec!["id"]);
        assert_eq!(fields(RequestValidator::id("99999999999").unwrap_err()), vec!["id"]);
    }
}
