//! The Registration record and its write-side shapes.
//!
//! - [`Registration`] is a stored record, as returned by every operation.
//! - [`RegistrationPayload`] is a validated, typed body where every field is
//!   optional. Updates merge it into an existing record.
//! - [`NewRegistration`] is a payload that is known to carry the fields a
//!   record cannot exist without.

use super::{Gender, Program, RegistrationId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A stored student registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: RegistrationId,

    // Essentials
    pub student_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Program>,

    // Contact info
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_email: Option<String>,
    pub org_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    // Personal details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    // Academic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residential_semester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_departments: Option<Vec<String>>,

    // Social profiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_profile_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_profile_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in_profile_link: Option<String>,
    #[serde(
        default,
        alias = "instragramProfileLink",
        skip_serializing_if = "Option::is_none"
    )]
    pub instagram_profile_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registration {
    /// Build a freshly stored record. Only stores call this.
    pub fn from_new(id: RegistrationId, new: NewRegistration, now: DateTime<Utc>) -> Self {
        let NewRegistration {
            student_id,
            name,
            org_email,
            details,
        } = new;

        let mut registration = Self {
            id,
            student_id,
            name,
            semester: None,
            program: None,
            personal_email: None,
            org_email,
            mobile: None,
            address: None,
            bio: None,
            date_of_birth: None,
            gender: None,
            residential_semester: None,
            preferred_departments: None,
            github_profile_link: None,
            facebook_profile_link: None,
            linked_in_profile_link: None,
            instagram_profile_link: None,
            picture: None,
            created_at: now,
            updated_at: now,
        };
        registration.merge(details);
        registration
    }

    /// Overwrite the fields `changes` supplies; leave every other field as is.
    ///
    /// `id` and `createdAt` are never touched. Callers refresh `updatedAt`.
    pub fn merge(&mut self, changes: RegistrationPayload) {
        let RegistrationPayload {
            student_id,
            name,
            semester,
            program,
            personal_email,
            org_email,
            mobile,
            address,
            bio,
            date_of_birth,
            gender,
            residential_semester,
            preferred_departments,
            github_profile_link,
            facebook_profile_link,
            linked_in_profile_link,
            instagram_profile_link,
            picture,
        } = changes;

        if let Some(value) = student_id {
            self.student_id = value;
        }
        if let Some(value) = name {
            self.name = value;
        }
        if let Some(value) = org_email {
            self.org_email = value;
        }
        merge_option(&mut self.semester, semester);
        merge_option(&mut self.program, program);
        merge_option(&mut self.personal_email, personal_email);
        merge_option(&mut self.mobile, mobile);
        merge_option(&mut self.address, address);
        merge_option(&mut self.bio, bio);
        merge_option(&mut self.date_of_birth, date_of_birth);
        merge_option(&mut self.gender, gender);
        merge_option(&mut self.residential_semester, residential_semester);
        merge_option(&mut self.preferred_departments, preferred_departments);
        merge_option(&mut self.github_profile_link, github_profile_link);
        merge_option(&mut self.facebook_profile_link, facebook_profile_link);
        merge_option(&mut self.linked_in_profile_link, linked_in_profile_link);
        merge_option(&mut self.instagram_profile_link, instagram_profile_link);
        merge_option(&mut self.picture, picture);
    }

    /// JSON representation sent to clients.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

fn merge_option<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

/// A validated request body. Absent fields are `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Program>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residential_semester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_departments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_profile_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_profile_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in_profile_link: Option<String>,
    #[serde(
        default,
        alias = "instragramProfileLink",
        skip_serializing_if = "Option::is_none"
    )]
    pub instagram_profile_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl RegistrationPayload {
    /// Whether the payload supplies no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A payload carrying every field a new record requires.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
    pub student_id: String,
    pub name: String,
    pub org_email: String,
    /// The optional fields; its required slots are always `None`.
    pub details: RegistrationPayload,
}

impl NewRegistration {
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        org_email: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            org_email: org_email.into(),
            details: RegistrationPayload::default(),
        }
    }

    /// Attach optional fields. Required slots in `details` are overridden by
    /// the values already held.
    pub fn with_details(mut self, mut details: RegistrationPayload) -> Self {
        details.student_id = None;
        details.name = None;
        details.org_email = None;
        self.details = details;
        self
    }

    /// Split a payload into its required and optional parts.
    ///
    /// Returns the payload unchanged when a required field is missing.
    pub fn from_payload(mut payload: RegistrationPayload) -> Result<Self, RegistrationPayload> {
        match (
            payload.student_id.take(),
            payload.name.take(),
            payload.org_email.take(),
        ) {
            (Some(student_id), Some(name), Some(org_email)) => Ok(Self {
                student_id,
                name,
                org_email,
                details: payload,
            }),
            (student_id, name, org_email) => {
                payload.student_id = student_id;
                payload.name = name;
                payload.org_email = org_email;
                Err(payload)
            }
        }
    }
}
