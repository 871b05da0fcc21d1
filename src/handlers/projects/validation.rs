//! Field-level validation for project create and update bodies.
//!
//! Bodies arrive as raw JSON objects so that update can distinguish an
//! absent field from an explicit `null`, and so that failures come back as a
//! per-field error list instead of a deserializer message.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::database::models::project::{ProjectPriority, ProjectStatus};
use crate::error::FieldError;

/// Fully validated create payload with defaults applied.
#[derive(Debug)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Sparse change set for update. Outer `Option` marks a field as present in
/// the body; the inner `Option` is an explicit `null` clearing a nullable
/// column.
#[derive(Debug, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<ProjectPriority>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

pub fn validate_create(body: &Map<String, Value>) -> Result<NewProject, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = match body.get("title") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => {
            errors.push(FieldError::new("title", "Title is required"));
            String::new()
        }
    };

    let description = match body.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new("description", "Invalid description"));
            None
        }
    };

    let status = match body.get("status") {
        None => ProjectStatus::Active,
        Some(v) => match v.as_str().and_then(|s| s.parse().ok()) {
            Some(status) => status,
            None => {
                errors.push(FieldError::new("status", "Invalid status"));
                ProjectStatus::Active
            }
        },
    };

    let priority = match body.get("priority") {
        None => ProjectPriority::Medium,
        Some(v) => match v.as_str().and_then(|s| s.parse().ok()) {
            Some(priority) => priority,
            None => {
                errors.push(FieldError::new("priority", "Invalid priority"));
                ProjectPriority::Medium
            }
        },
    };

    let start_date = match body.get("start_date") {
        None | Some(Value::Null) => None,
        Some(v) => match parse_date(v) {
            Some(d) => Some(d),
            None => {
                errors.push(FieldError::new("start_date", "Invalid start date"));
                None
            }
        },
    };

    let end_date = match body.get("end_date") {
        None | Some(Value::Null) => None,
        Some(v) => match parse_date(v) {
            Some(d) => Some(d),
            None => {
                errors.push(FieldError::new("end_date", "Invalid end date"));
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewProject {
        title,
        description,
        status,
        priority,
        start_date,
        end_date,
    })
}

/// Same rules as create, but every field is optional and only fields present
/// in the body enter the change set. `null` clears nullable columns and is
/// rejected on required ones. Unrecognized fields are ignored.
pub fn validate_update(body: &Map<String, Value>) -> Result<ProjectChanges, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut changes = ProjectChanges::default();

    if let Some(v) = body.get("title") {
        match v {
            Value::String(s) if !s.trim().is_empty() => changes.title = Some(s.clone()),
            _ => errors.push(FieldError::new("title", "Title cannot be empty")),
        }
    }

    if let Some(v) = body.get("description") {
        match v {
            Value::Null => changes.description = Some(None),
            Value::String(s) => changes.description = Some(Some(s.clone())),
            _ => errors.push(FieldError::new("description", "Invalid description")),
        }
    }

    if let Some(v) = body.get("status") {
        match v.as_str().and_then(|s| s.parse::<ProjectStatus>().ok()) {
            Some(status) => changes.status = Some(status),
            None => errors.push(FieldError::new("status", "Invalid status")),
        }
    }

    if let Some(v) = body.get("priority") {
        match v.as_str().and_then(|s| s.parse::<ProjectPriority>().ok()) {
            Some(priority) => changes.priority = Some(priority),
            None => errors.push(FieldError::new("priority", "Invalid priority")),
        }
    }

    if let Some(v) = body.get("start_date") {
        match v {
            Value::Null => changes.start_date = Some(None),
            _ => match parse_date(v) {
                Some(d) => changes.start_date = Some(Some(d)),
                None => errors.push(FieldError::new("start_date", "Invalid start date")),
            },
        }
    }

    if let Some(v) = body.get("end_date") {
        match v {
            Value::Null => changes.end_date = Some(None),
            _ => match parse_date(v) {
                Some(d) => changes.end_date = Some(Some(d)),
                None => errors.push(FieldError::new("end_date", "Invalid end date")),
            },
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(changes)
}

fn parse_date(v: &Value) -> Option<NaiveDate> {
    let s = v.as_str()?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn create_requires_title() {
        let errors = validate_create(&obj(json!({}))).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");

        let errors = validate_create(&obj(json!({ "title": "   " }))).unwrap_err();
        assert_eq!(errors[0].message, "Title is required");
    }

    #[test]
    fn create_applies_defaults() {
        let new = validate_create(&obj(json!({ "title": "Migrate DB", "priority": "high" }))).unwrap();
        assert_eq!(new.status, ProjectStatus::Active);
        assert_eq!(new.priority, ProjectPriority::High);
        assert!(new.description.is_none());
        assert!(new.start_date.is_none());
    }

    #[test]
    fn create_rejects_unknown_status() {
        let errors = validate_create(&obj(json!({ "title": "x", "status": "archived" }))).unwrap_err();
        assert_eq!(errors[0].field, "status");
        assert_eq!(errors[0].message, "Invalid status");
    }

    #[test]
    fn create_collects_multiple_errors() {
        let errors = validate_create(&obj(json!({
            "status": "nope",
            "priority": "asap",
            "start_date": "01/02/2024"
        })))
        .unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "status", "priority", "start_date"]);
    }

    #[test]
    fn create_parses_calendar_dates() {
        let new = validate_create(&obj(json!({
            "title": "x",
            "start_date": "2024-02-29",
            "end_date": "2024-12-31"
        })))
        .unwrap();
        assert_eq!(new.start_date.unwrap().to_string(), "2024-02-29");

        let errors = validate_create(&obj(json!({ "title": "x", "end_date": "2023-02-29" }))).unwrap_err();
        assert_eq!(errors[0].field, "end_date");
    }

    #[test]
    fn update_empty_body_has_no_changes() {
        let changes = validate_update(&obj(json!({}))).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn update_ignores_unrecognized_fields() {
        let changes = validate_update(&obj(json!({ "owner": 2, "id": 99 }))).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn update_takes_only_present_fields() {
        let changes = validate_update(&obj(json!({ "status": "completed" }))).unwrap();
        assert_eq!(changes.status, Some(ProjectStatus::Completed));
        assert!(changes.title.is_none());
        assert!(changes.priority.is_none());
        assert!(!changes.is_empty());
    }

    #[test]
    fn update_null_clears_nullable_fields_only() {
        let changes = validate_update(&obj(json!({ "description": null, "end_date": null }))).unwrap();
        assert_eq!(changes.description, Some(None));
        assert_eq!(changes.end_date, Some(None));

        let errors = validate_update(&obj(json!({ "title": null }))).unwrap_err();
        assert_eq!(errors[0].message, "Title cannot be empty");

        let errors = validate_update(&obj(json!({ "status": null }))).unwrap_err();
        assert_eq!(errors[0].message, "Invalid status");
    }

    #[test]
    fn update_rejects_empty_title() {
        let errors = validate_update(&obj(json!({ "title": "" }))).unwrap_err();
        assert_eq!(errors[0].field, "title");
    }
}
