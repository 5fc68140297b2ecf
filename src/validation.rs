//! Schema validation for registration payloads.
//!
//! The registration schema is a static table of [`FieldRule`]s. Payloads are
//! checked against every rule and every violation is collected; nothing is
//! fail-fast. A payload that passes is converted into a typed
//! [`RegistrationPayload`] with normalized values (dates reduced to
//! `YYYY-MM-DD`, legacy field names mapped to their canonical name).
//!
//! # Example
//!
//! ```rust
//! use registration_service::validation::{validate_payload, ValidationMode};
//! use serde_json::json;
//!
//! let errors = validate_payload(&json!({"name": "Alice"}), ValidationMode::Create).unwrap_err();
//! assert_eq!(errors.fields(), vec!["studentId", "orgEmail"]);
//!
//! let patch = validate_payload(&json!({"semester": "5"}), ValidationMode::Update).unwrap();
//! assert_eq!(patch.semester.as_deref(), Some("5"));
//! ```

use crate::error::{ValidationErrors, ValidationResult};
use crate::model::{Gender, NewRegistration, Program, RegistrationPayload};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// Whether required fields must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Full record: `studentId`, `name` and `orgEmail` are required.
    Create,
    /// Partial update: every field is optional.
    Update,
}

/// Value constraint attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Program,
    Gender,
    Date,
    Uri,
    TextList,
}

/// One attribute of the registration schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn rule(name: &'static str, kind: FieldKind, required: bool) -> FieldRule {
    FieldRule {
        name,
        kind,
        required,
    }
}

/// The registration schema, in documentation order.
pub const REGISTRATION_FIELDS: &[FieldRule] = &[
    rule("studentId", FieldKind::Text, true),
    rule("name", FieldKind::Text, true),
    rule("semester", FieldKind::Text, false),
    rule("program", FieldKind::Program, false),
    rule("personalEmail", FieldKind::Email, false),
    rule("orgEmail", FieldKind::Email, true),
    rule("mobile", FieldKind::Text, false),
    rule("address", FieldKind::Text, false),
    rule("bio", FieldKind::Text, false),
    rule("dateOfBirth", FieldKind::Date, false),
    rule("gender", FieldKind::Gender, false),
    rule("residentialSemester", FieldKind::Text, false),
    rule("preferredDepartments", FieldKind::TextList, false),
    rule("githubProfileLink", FieldKind::Uri, false),
    rule("facebookProfileLink", FieldKind::Uri, false),
    rule("linkedInProfileLink", FieldKind::Uri, false),
    rule("instagramProfileLink", FieldKind::Uri, false),
    rule("picture", FieldKind::Text, false),
];

/// Legacy spellings accepted on input: (legacy, canonical).
pub const FIELD_ALIASES: &[(&str, &str)] = &[("instragramProfileLink", "instagramProfileLink")];

/// Fields the store owns. Clients may never write them.
pub const STORE_MANAGED_FIELDS: &[&str] = &["id", "createdAt", "updatedAt"];

/// Naive date-time layouts accepted alongside RFC 3339. Read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Validate `payload` and convert it into a typed payload.
pub fn validate_payload(
    payload: &Value,
    mode: ValidationMode,
) -> ValidationResult<RegistrationPayload> {
    let object = payload
        .as_object()
        .ok_or_else(|| ValidationErrors::single("body", "\"value\" must be of type object"))?;

    let mut errors = ValidationErrors::new();
    let mut normalized = Map::new();

    for field in REGISTRATION_FIELDS {
        let supplied = spellings(object, field.name);
        let Some(&(key, value)) = supplied.first() else {
            if field.required && mode == ValidationMode::Create {
                errors.push(field.name, format!("\"{}\" is required", field.name));
            }
            continue;
        };

        match check_value(field.kind, key, value) {
            Ok(value) => {
                normalized.insert(field.name.to_string(), value);
            }
            Err(messages) => {
                for message in messages {
                    errors.push(key, message);
                }
            }
        }

        for &(extra, _) in &supplied[1..] {
            errors.push(extra, format!("\"{}\" conflicts with \"{}\"", extra, key));
        }
    }

    for key in object.keys() {
        if !is_known_field(key) {
            errors.push(key.as_str(), format!("\"{}\" is not allowed", key));
        }
    }

    errors.into_result()?;

    serde_json::from_value(Value::Object(normalized))
        .map_err(|e| ValidationErrors::single("body", e.to_string()))
}

/// Validate a create payload and split out its required fields.
pub fn validate_create(payload: &Value) -> ValidationResult<NewRegistration> {
    let validated = validate_payload(payload, ValidationMode::Create)?;
    NewRegistration::from_payload(validated).map_err(|incomplete| {
        let mut errors = ValidationErrors::new();
        for (name, present) in [
            ("studentId", incomplete.student_id.is_some()),
            ("name", incomplete.name.is_some()),
            ("orgEmail", incomplete.org_email.is_some()),
        ] {
            if !present {
                errors.push(name, format!("\"{}\" is required", name));
            }
        }
        errors
    })
}

/// Validate an update payload. Every field is optional.
pub fn validate_update(payload: &Value) -> ValidationResult<RegistrationPayload> {
    validate_payload(payload, ValidationMode::Update)
}

/// Every non-null spelling of a field present in `object`, canonical name
/// first, then legacy spellings.
fn spellings<'a>(object: &'a Map<String, Value>, name: &str) -> Vec<(&'a str, &'a Value)> {
    let legacy = FIELD_ALIASES
        .iter()
        .filter(|(_, canonical)| *canonical == name)
        .map(|(legacy, _)| *legacy);

    std::iter::once(name)
        .chain(legacy)
        .filter_map(|key| object.get_key_value(key))
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.as_str(), value))
        .collect()
}

fn is_known_field(key: &str) -> bool {
    REGISTRATION_FIELDS.iter().any(|field| field.name == key)
        || FIELD_ALIASES.iter().any(|(legacy, _)| *legacy == key)
}

/// Check one supplied value. Returns the normalized value or every message.
fn check_value(kind: FieldKind, key: &str, value: &Value) -> Result<Value, Vec<String>> {
    let checked = match kind {
        FieldKind::TextList => return check_text_list(key, value),
        FieldKind::Text => check_text(key, value),
        FieldKind::Email => check_email(key, value),
        FieldKind::Program => non_empty_string(key, value).and_then(|text| {
            text.parse::<Program>()
                .map(|program| Value::String(program.as_str().to_string()))
                .map_err(|_| one_of(key, &Program::names()))
        }),
        FieldKind::Gender => non_empty_string(key, value).and_then(|text| {
            text.parse::<Gender>()
                .map(|gender| Value::String(gender.as_str().to_string()))
                .map_err(|_| one_of(key, &Gender::names()))
        }),
        FieldKind::Date => check_date(key, value),
        FieldKind::Uri => check_uri(key, value),
    };
    checked.map_err(|message| vec![message])
}

fn non_empty_string<'a>(key: &str, value: &'a Value) -> Result<&'a str, String> {
    match value.as_str() {
        Some("") => Err(format!("\"{}\" is not allowed to be empty", key)),
        Some(text) => Ok(text),
        None => Err(format!("\"{}\" must be a string", key)),
    }
}

fn check_text(key: &str, value: &Value) -> Result<Value, String> {
    non_empty_string(key, value).map(|text| Value::String(text.to_string()))
}

fn check_email(key: &str, value: &Value) -> Result<Value, String> {
    let text = non_empty_string(key, value)?;
    if is_email(text) {
        Ok(Value::String(text.to_string()))
    } else {
        Err(format!("\"{}\" must be a valid email", key))
    }
}

fn check_date(key: &str, value: &Value) -> Result<Value, String> {
    parse_date(non_empty_string(key, value)?)
        .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
        .ok_or_else(|| format!("\"{}\" must be in ISO 8601 date format", key))
}

fn check_uri(key: &str, value: &Value) -> Result<Value, String> {
    let text = non_empty_string(key, value)?;
    if is_uri(text) {
        Ok(Value::String(text.to_string()))
    } else {
        Err(format!("\"{}\" must be a valid uri", key))
    }
}

/// Every item is checked; one message per bad item.
fn check_text_list(key: &str, value: &Value) -> Result<Value, Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| vec![format!("\"{}\" must be an array", key)])?;

    let mut normalized = Vec::with_capacity(items.len());
    let mut messages = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match non_empty_string(&format!("{}[{}]", key, index), item) {
            Ok(text) => normalized.push(Value::String(text.to_string())),
            Err(message) => messages.push(message),
        }
    }

    if messages.is_empty() {
        Ok(Value::Array(normalized))
    } else {
        Err(messages)
    }
}

fn one_of(key: &str, allowed: &[&str]) -> String {
    format!("\"{}\" must be one of [{}]", key, allowed.join(", "))
}

/// Loose `local@domain.tld` check.
///
/// Email format is advisory: this rejects obvious garbage without trying to
/// implement RFC 5322.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Absolute URI check.
pub fn is_uri(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// Parse an ISO-8601 date, or a date-time reduced to its date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    parse_naive_datetime(value).map(|datetime| datetime.date())
}

/// Parse a date-time without an offset, with or without seconds.
pub fn parse_naive_datetime(value: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
