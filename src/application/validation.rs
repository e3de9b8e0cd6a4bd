//! Field-level preconditions checked before any service call.
//!
//! Each request shape has its own [`Validate`] impl. Every rule runs, so a
//! request with several bad fields reports all of them at once.

use std::{collections::BTreeMap, fmt};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::{
    application::{
        clock::start_of_day,
        dto::{CreateTodoRequest, IdRequest, UpdatePercentRequest, UpdateTodoWithIdRequest},
    },
    domain::todo::{MAX_PERCENT_COMPLETE, MIN_PERCENT_COMPLETE, TodoId},
};

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

pub const FIELD_ID: &str = "id";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_DUE_DATE: &str = "dueDate";
pub const FIELD_PERCENT_COMPLETE: &str = "percentComplete";
pub const FIELD_BODY: &str = "body";

pub const TITLE_REQUIRED_MESSAGE: &str = "Title is required";
pub const TITLE_TOO_LONG_MESSAGE: &str = "Title cannot exceed 200 characters";
pub const DESCRIPTION_TOO_LONG_MESSAGE: &str = "Description cannot exceed 1000 characters";
pub const DUE_DATE_IN_PAST_MESSAGE: &str = "Expiry date cannot be in the past";
pub const PERCENT_OUT_OF_RANGE_MESSAGE: &str = "Percent complete must be between 0 and 100";
pub const PERCENT_REQUIRED_MESSAGE: &str = "Percent complete is required";
pub const PERCENT_NOT_INTEGER_MESSAGE: &str = "Percent complete must be an integer";
pub const ID_NOT_POSITIVE_MESSAGE: &str = "ID must be greater than 0";
pub const ID_NOT_INTEGER_MESSAGE: &str = "ID must be an integer";

/// Field name to messages, serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub trait Validate {
    fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors>;
}

impl Validate for CreateTodoRequest {
    fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_title(&mut errors, &self.title);
        check_description(&mut errors, self.description.as_deref());
        check_due_date(&mut errors, self.due_date, today);
        errors.into_result()
    }
}

impl Validate for UpdateTodoWithIdRequest {
    fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_id(&mut errors, self.id);
        check_title(&mut errors, &self.todo.title);
        check_description(&mut errors, self.todo.description.as_deref());
        check_due_date(&mut errors, self.todo.due_date, today);
        check_percent(&mut errors, self.todo.percent_complete);
        errors.into_result()
    }
}

impl Validate for UpdatePercentRequest {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_id(&mut errors, self.id);
        check_percent(&mut errors, self.percent_complete);
        errors.into_result()
    }
}

impl Validate for IdRequest {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_id(&mut errors, self.id);
        errors.into_result()
    }
}

fn check_title(errors: &mut ValidationErrors, title: &str) {
    if title.trim().is_empty() {
        errors.add(FIELD_TITLE, TITLE_REQUIRED_MESSAGE);
    }
    if title.chars().count() > TITLE_MAX_LEN {
        errors.add(FIELD_TITLE, TITLE_TOO_LONG_MESSAGE);
    }
}

fn check_description(errors: &mut ValidationErrors, description: Option<&str>) {
    let Some(description) = description else {
        return;
    };
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        errors.add(FIELD_DESCRIPTION, DESCRIPTION_TOO_LONG_MESSAGE);
    }
}

fn check_due_date(errors: &mut ValidationErrors, due_date: NaiveDateTime, today: NaiveDate) {
    if due_date < start_of_day(today) {
        errors.add(FIELD_DUE_DATE, DUE_DATE_IN_PAST_MESSAGE);
    }
}

fn check_percent(errors: &mut ValidationErrors, percent_complete: i32) {
    if !(MIN_PERCENT_COMPLETE..=MAX_PERCENT_COMPLETE).contains(&percent_complete) {
        errors.add(FIELD_PERCENT_COMPLETE, PERCENT_OUT_OF_RANGE_MESSAGE);
    }
}

fn check_id(errors: &mut ValidationErrors, id: TodoId) {
    if id <= 0 {
        errors.add(FIELD_ID, ID_NOT_POSITIVE_MESSAGE);
    }
}
