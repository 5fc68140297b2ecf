//! Registration data model.
//!
//! # Key Types
//!
//! - [`Registration`] - A stored record
//! - [`RegistrationPayload`] - Validated, partially populated request body
//! - [`NewRegistration`] - Payload carrying all required fields
//! - [`RegistrationId`] - Store-assigned identifier
//! - [`Program`], [`Gender`] - Closed value sets

mod enums;
mod registration;
mod registration_id;

pub use enums::{Gender, Program, UnknownVariant};
pub use registration::{NewRegistration, Registration, RegistrationPayload};
pub use registration_id::{REGISTRATION_ID_LEN, RegistrationId};
