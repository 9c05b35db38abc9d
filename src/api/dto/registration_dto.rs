//! Registration DTOs and presence validation.
//!
//! Fields of [`RegistrationRequest`] are kept as raw JSON values so that
//! an absent field, an explicit `null` and an empty string are all reported
//! the same way, and so that `grade` can arrive either as a number or as the
//! string an HTML `<select>` submits.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{NewStudent, Student};
use crate::error::RegistryError;

/// Message returned alongside a freshly registered student.
pub const REGISTERED_MESSAGE: &str = "Student registered successfully!";

/// Request body for `POST /api/register`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegistrationRequest {
    /// Full name of the student.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Ada Lovelace")]
    pub name: Option<Value>,
    /// Email address; must not already be registered.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "ada@example.com")]
    pub email: Option<Value>,
    /// Grade level as an integer, a whole float or an integer string
    /// (`9`, `9.0` or `"9"`).
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 9)]
    pub grade: Option<Value>,
}

impl RegistrationRequest {
    /// Checks that every required field is present and usable.
    ///
    /// Fields are checked in the order `name`, `email`, `grade`; the first
    /// missing one is reported. A field is missing when it is absent,
    /// `null`, `false`, `""`, `[]`, `{}` or numerically zero.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingField`] for the first absent field,
    /// or [`RegistryError::InvalidField`] when a present field has the wrong
    /// type or `grade` is not an integer.
    pub fn validate(self) -> Result<NewStudent, RegistryError> {
        let name = self.name.filter(is_present);
        let email = self.email.filter(is_present);
        let grade = self.grade.filter(is_present);

        let name = name.ok_or(RegistryError::MissingField("name"))?;
        let email = email.ok_or(RegistryError::MissingField("email"))?;
        let grade = grade.ok_or(RegistryError::MissingField("grade"))?;

        Ok(NewStudent {
            name: into_text("name", name)?,
            email: into_text("email", email)?,
            grade: parse_grade(&grade)?,
        })
    }
}

/// Response body for `POST /api/register` (201 Created).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    /// Confirmation message.
    #[schema(example = "Student registered successfully!")]
    pub message: String,
    /// The stored record with its assigned id.
    pub student: Student,
}

impl From<Student> for RegistrationResponse {
    fn from(student: Student) -> Self {
        Self {
            message: REGISTERED_MESSAGE.to_string(),
            student,
        }
    }
}

/// Presence test mirroring how a form submission reads as "filled in".
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::Bool(b) => *b,
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn into_text(field: &'static str, value: Value) -> Result<String, RegistryError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(RegistryError::InvalidField {
            field,
            reason: format!("expected a string, got {other}"),
        }),
    }
}

fn parse_grade(value: &Value) -> Result<i64, RegistryError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(0) => Err(RegistryError::MissingField("grade")),
        Some(grade) => Ok(grade),
        None => Err(RegistryError::InvalidField {
            field: "grade",
            reason: format!("expected an integer, got {value}"),
        }),
    }
}

/// Converts a float with no fractional part to an integer, as long as it
/// fits in `i64`.
#[allow(clippy::cast_possible_truncation)]
fn whole_number(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (value.fract() == 0.0 && (-LIMIT..LIMIT).contains(&value)).then_some(value as i64)
}
