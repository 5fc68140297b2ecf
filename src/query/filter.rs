//! Translation of list parameters into a store query.
//!
//! A list request carries a flat set of optional parameters. [`translate`]
//! turns the recognized, non-empty ones into ANDed [`Condition`]s and records
//! each one it used in [`AppliedFilters`] so the response can echo them.
//!
//! Precedence (also the echo order):
//!
//! 1. exact match on `studentId`, `semester`, `mobile`, `program`,
//!    `personalEmail`, `orgEmail`, `gender`
//! 2. case-insensitive substring on `name`
//! 3. set membership on `preferredDepartment` (comma-separated or repeated)
//! 4. inclusive `createdAt` range from `startDate` / `endDate`

use crate::error::{RegistrationError, RegistrationResult};
use crate::model::Registration;
use crate::validation::parse_naive_datetime;
use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Parameters matched by exact equality, in precedence order.
pub const EXACT_MATCH_PARAMS: [FilterField; 7] = [
    FilterField::StudentId,
    FilterField::Semester,
    FilterField::Mobile,
    FilterField::Program,
    FilterField::PersonalEmail,
    FilterField::OrgEmail,
    FilterField::Gender,
];

pub const NAME_PARAM: &str = "name";
pub const DEPARTMENT_PARAM: &str = "preferredDepartment";
pub const START_DATE_PARAM: &str = "startDate";
pub const END_DATE_PARAM: &str = "endDate";
pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";

/// Raw list parameters as received, e.g. from a query string.
///
/// A parameter may appear more than once; lookups of single-valued
/// parameters use the first non-empty occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pairs: Vec<(String, String)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a raw `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()).into_owned())
    }

    /// Append a parameter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// First non-empty value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).into_iter().next()
    }

    /// Every non-empty value of `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Record attributes a condition can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    StudentId,
    Name,
    Semester,
    Mobile,
    Program,
    PersonalEmail,
    OrgEmail,
    Gender,
    PreferredDepartments,
}

impl FilterField {
    /// Field name on the wire and in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::StudentId => "studentId",
            FilterField::Name => "name",
            FilterField::Semester => "semester",
            FilterField::Mobile => "mobile",
            FilterField::Program => "program",
            FilterField::PersonalEmail => "personalEmail",
            FilterField::OrgEmail => "orgEmail",
            FilterField::Gender => "gender",
            FilterField::PreferredDepartments => "preferredDepartments",
        }
    }

    /// Scalar value of this field on `record`.
    fn scalar<'a>(&self, record: &'a Registration) -> Option<&'a str> {
        match self {
            FilterField::StudentId => Some(&record.student_id),
            FilterField::Name => Some(&record.name),
            FilterField::Semester => record.semester.as_deref(),
            FilterField::Mobile => record.mobile.as_deref(),
            FilterField::Program => record.program.as_ref().map(|p| p.as_str()),
            FilterField::PersonalEmail => record.personal_email.as_deref(),
            FilterField::OrgEmail => Some(&record.org_email),
            FilterField::Gender => record.gender.as_ref().map(|g| g.as_str()),
            FilterField::PreferredDepartments => None,
        }
    }

    /// Collection value of this field on `record`.
    fn collection<'a>(&self, record: &'a Registration) -> &'a [String] {
        match self {
            FilterField::PreferredDepartments => {
                record.preferred_departments.as_deref().unwrap_or(&[])
            }
            _ => &[],
        }
    }
}

/// One constraint of a store query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Field equals the value exactly.
    Equals { field: FilterField, value: String },
    /// Field contains `needle`, ignoring case. `needle` is stored lower-cased.
    ContainsIgnoreCase { field: FilterField, needle: String },
    /// Collection field shares at least one element with `values`.
    AnyOf {
        field: FilterField,
        values: Vec<String>,
    },
    /// `createdAt >= bound`
    CreatedFrom(DateTime<Utc>),
    /// `createdAt <= bound`
    CreatedUntil(DateTime<Utc>),
}

impl Condition {
    pub fn matches(&self, record: &Registration) -> bool {
        match self {
            Condition::Equals { field, value } => field.scalar(record) == Some(value.as_str()),
            Condition::ContainsIgnoreCase { field, needle } => field
                .scalar(record)
                .is_some_and(|haystack| haystack.to_lowercase().contains(needle.as_str())),
            Condition::AnyOf { field, values } => field
                .collection(record)
                .iter()
                .any(|item| values.contains(item)),
            Condition::CreatedFrom(bound) => record.created_at >= *bound,
            Condition::CreatedUntil(bound) => record.created_at <= *bound,
        }
    }
}

/// A conjunction of conditions. The empty query matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationQuery {
    conditions: Vec<Condition>,
}

impl RegistrationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, record: &Registration) -> bool {
        self.conditions.iter().all(|condition| condition.matches(record))
    }
}

/// The filters a list request actually used, echoed back to the client.
///
/// Serializes as a JSON object in insertion order. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct AppliedFilters {
    entries: Vec<(String, String)>,
}

impl AppliedFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PartialEq for AppliedFilters {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.entries.clone();
        let mut right = other.entries.clone();
        left.sort();
        right.sort();
        left == right
    }
}

impl Eq for AppliedFilters {}

impl Serialize for AppliedFilters {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Output of [`translate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatedQuery {
    pub query: RegistrationQuery,
    pub filters: AppliedFilters,
}

/// Turn list parameters into a store query plus the echo of applied filters.
///
/// Fails only when `startDate` or `endDate` is not a valid date.
pub fn translate(params: &ListParams) -> RegistrationResult<TranslatedQuery> {
    let mut query = RegistrationQuery::new();
    let mut filters = AppliedFilters::new();

    for field in EXACT_MATCH_PARAMS {
        if let Some(value) = params.get(field.as_str()) {
            query.push(Condition::Equals {
                field,
                value: value.to_string(),
            });
            filters.insert(field.as_str(), value);
        }
    }

    if let Some(name) = params.get(NAME_PARAM) {
        query.push(Condition::ContainsIgnoreCase {
            field: FilterField::Name,
            needle: name.to_lowercase(),
        });
        filters.insert(NAME_PARAM, name);
    }

    let raw_departments = params.get_all(DEPARTMENT_PARAM);
    if !raw_departments.is_empty() {
        let departments = split_departments(&raw_departments);
        if !departments.is_empty() {
            query.push(Condition::AnyOf {
                field: FilterField::PreferredDepartments,
                values: departments,
            });
            filters.insert(DEPARTMENT_PARAM, raw_departments.join(","));
        }
    }

    if let Some(start) = params.get(START_DATE_PARAM) {
        let bound = parse_timestamp(start).ok_or_else(|| invalid_date(START_DATE_PARAM, start))?;
        query.push(Condition::CreatedFrom(bound));
        filters.insert(START_DATE_PARAM, start);
    }
    if let Some(end) = params.get(END_DATE_PARAM) {
        let bound = parse_timestamp(end).ok_or_else(|| invalid_date(END_DATE_PARAM, end))?;
        query.push(Condition::CreatedUntil(bound));
        filters.insert(END_DATE_PARAM, end);
    }

    Ok(TranslatedQuery { query, filters })
}

/// Normalize comma-separated department lists into trimmed names.
pub fn split_departments(raw: &[&str]) -> Vec<String> {
    raw.iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an ISO-8601 timestamp bound.
///
/// Accepts RFC 3339, a naive date-time with or without seconds (read as
/// UTC) or a bare date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc));
    }
    if let Some(datetime) = parse_naive_datetime(value) {
        return Some(datetime.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

fn invalid_date(parameter: &str, value: &str) -> RegistrationError {
    RegistrationError::invalid_query(
        parameter,
        format!("'{}' is not a valid ISO 8601 date", value),
    )
}
