//! RegistrationId value object.
//!
//! Identifiers are assigned by the store when a record is created and never
//! change afterwards. They follow the reference document store's shape: 24
//! lowercase hexadecimal characters, the first 8 of which encode the creation
//! time in seconds since the Unix epoch.

use crate::error::{RegistrationError, RegistrationResult};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of hex characters in a well-formed identifier.
pub const REGISTRATION_ID_LEN: usize = 24;

/// A validated registration identifier.
///
/// ## Validation Rules
///
/// - Exactly 24 characters
/// - Only ASCII hex digits (upper case input is normalized to lower case)
///
/// ## Examples
///
/// ```rust
/// use registration_service::model::RegistrationId;
///
/// let id = RegistrationId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
/// assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
///
/// assert!(RegistrationId::parse("xyz").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(String);

impl RegistrationId {
    /// Parse an identifier received from a client.
    ///
    /// Anything that is not 24 hex characters is a
    /// [`RegistrationError::MalformedIdentifier`], never a not-found.
    pub fn parse(value: &str) -> RegistrationResult<Self> {
        if Self::is_valid(value) {
            Ok(Self(value.to_ascii_lowercase()))
        } else {
            Err(RegistrationError::malformed_identifier(value))
        }
    }

    /// Check whether `value` has the identifier shape.
    pub fn is_valid(value: &str) -> bool {
        value.len() == REGISTRATION_ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Generate a fresh identifier for a record created at `created_at`.
    pub fn generate(created_at: DateTime<Utc>) -> Self {
        let seconds = created_at.timestamp().clamp(0, u32::MAX as i64) as u32;
        let random = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{:08x}{}", seconds, &random[..16]))
    }

    /// The creation second embedded in the identifier.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let seconds = u32::from_str_radix(&self.0[..8], 16).ok()?;
        Utc.timestamp_opt(seconds as i64, 0).single()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RegistrationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RegistrationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
