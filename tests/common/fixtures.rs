//! Sample payloads and identifiers.

use serde_json::{Value, json};

/// Well-formed id that no store will ever hand out in these tests.
pub const UNKNOWN_ID: &str = "65a1b2c3d4e5f60718293a4b";

/// Ids that are not 24 hex characters.
pub const MALFORMED_IDS: &[&str] = &[
    "xyz",
    "65a1b2c3d4e5f60718293a4",
    "65a1b2c3d4e5f60718293a4g",
    "",
];

/// A registration with every optional field filled in.
pub fn full_registration() -> Value {
    json!({
        "studentId": "2021-1-60-042",
        "name": "Karim Rahman",
        "semester": "7",
        "program": "Computer Science & Engineering",
        "personalEmail": "karim@gmail.com",
        "orgEmail": "2021-1-60-042@std.ewu.edu",
        "mobile": "+8801700000000",
        "address": "Aftabnagar, Dhaka",
        "bio": "Backend enthusiast",
        "dateOfBirth": "2002-05-17",
        "gender": "male",
        "residentialSemester": "4",
        "preferredDepartments": ["Development", "Research"],
        "githubProfileLink": "https://github.com/karim",
        "facebookProfileLink": "https://facebook.com/karim",
        "linkedInProfileLink": "https://linkedin.com/in/karim",
        "instagramProfileLink": "https://instagram.com/karim",
        "picture": "https://cdn.example.com/karim.png"
    })
}
