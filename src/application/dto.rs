use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::todo::{NewTodo, Todo, TodoChanges, TodoId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "due_date_format")]
    #[schema(value_type = String, format = DateTime, example = "2026-10-20T09:30:00")]
    pub due_date: NaiveDateTime,
    pub percent_complete: i32,
    pub is_done: bool,
}

impl From<Todo> for TodoResponse {
    fn from(value: Todo) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            due_date: value.due_date,
            percent_complete: value.percent_complete,
            is_done: value.is_done,
        }
    }
}

/// Create payload. Percent and done state are not accepted here; the store
/// always starts a todo at 0% and not done.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "due_date_format")]
    #[schema(value_type = String, format = DateTime, example = "2026-10-20T09:30:00")]
    pub due_date: NaiveDateTime,
}

impl CreateTodoRequest {
    pub fn into_new_todo(self) -> NewTodo {
        NewTodo {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "due_date_format")]
    #[schema(value_type = String, format = DateTime, example = "2026-10-20T09:30:00")]
    pub due_date: NaiveDateTime,
    #[serde(default)]
    pub percent_complete: i32,
    #[serde(default)]
    pub is_done: bool,
}

impl UpdateTodoRequest {
    pub fn into_changes(self) -> TodoChanges {
        TodoChanges {
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            percent_complete: self.percent_complete,
            is_done: self.is_done,
        }
    }
}

/// Update body paired with the id taken from the route.
#[derive(Debug, Clone)]
pub struct UpdateTodoWithIdRequest {
    pub id: TodoId,
    pub todo: UpdateTodoRequest,
}

#[derive(Debug, Clone, Copy)]
pub struct UpdatePercentRequest {
    pub id: TodoId,
    pub percent_complete: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct IdRequest {
    pub id: TodoId,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(value_type = String, example = "ok")]
    pub status: &'static str,
}

/// `dueDate` travels as a local date-time without offset. Offset-carrying
/// RFC 3339 values are converted to host-local time and date-only values
/// mean midnight.
pub mod due_date_format {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::application::clock::start_of_day;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format("%Y-%m-%dT%H:%M:%S%.f"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            D::Error::custom(format!(
                "dueDate must be an ISO-8601 date or date-time, got `{raw}`"
            ))
        })
    }

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if let Ok(value) = raw.parse::<NaiveDateTime>() {
            return Some(value);
        }
        if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
            return Some(value.with_timezone(&Local).naive_local());
        }
        raw.parse::<NaiveDate>().ok().map(start_of_day)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn response_uses_camel_case_field_names() {
        let response = TodoResponse {
            id: 7,
            title: "Ship".to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2030, 5, 1)
                .and_then(|date| date.and_hms_opt(8, 30, 0))
                .expect("valid timestamp"),
            percent_complete: 25,
            is_done: false,
        };

        let value = serde_json::to_value(&response).expect("serializes");
        assert_eq!(
            value,
            json!({
                "id": 7,
                "title": "Ship",
                "description": null,
                "dueDate": "2030-05-01T08:30:00",
                "percentComplete": 25,
                "isDone": false
            })
        );
    }

    #[test]
    fn response_due_date_uses_the_request_format() {
        let due_date = NaiveDate::from_ymd_opt(2030, 5, 1)
            .and_then(|date| date.and_hms_milli_opt(8, 30, 0, 250))
            .expect("valid timestamp");
        let response = TodoResponse {
            id: 1,
            title: "Precise".to_string(),
            description: None,
            due_date,
            percent_complete: 0,
            is_done: false,
        };

        let value = serde_json::to_value(&response).expect("serializes");
        assert_eq!(value["dueDate"], json!("2030-05-01T08:30:00.250"));

        let back: TodoResponse = serde_json::from_value(value).expect("deserializes");
        assert_eq!(back.due_date, due_date);
    }

    #[test]
    fn update_request_defaults_missing_progress_fields() {
        let request: UpdateTodoRequest = serde_json::from_value(json!({
            "title": "Only title",
            "dueDate": "2030-05-01T00:00:00"
        }))
        .expect("deserializes");

        assert_eq!(request.percent_complete, 0);
        assert!(!request.is_done);
        assert!(request.description.is_none());
    }

    #[test]
    fn create_request_keeps_empty_description_distinct_from_absent() {
        let request: CreateTodoRequest = serde_json::from_value(json!({
            "title": "t",
            "description": "",
            "dueDate": "2030-05-01"
        }))
        .expect("deserializes");

        assert_eq!(request.description.as_deref(), Some(""));
        assert_eq!(
            request.due_date,
            NaiveDate::from_ymd_opt(2030, 5, 1)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .expect("valid timestamp")
        );
    }

    #[test]
    fn due_date_rejects_garbage() {
        assert!(due_date_format::parse("next tuesday").is_none());
        assert!(due_date_format::parse("2030-05-01T10:15:00").is_some());
        assert!(due_date_format::parse("2030-05-01T10:15:00+02:00").is_some());
    }
}
