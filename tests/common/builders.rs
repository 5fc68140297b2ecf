//! Fluent builders for registration payloads.

use serde_json::{Map, Value, json};

/// Builds JSON request bodies for create and update.
#[derive(Debug, Clone)]
pub struct RegistrationBuilder {
    data: Map<String, Value>,
}

impl RegistrationBuilder {
    /// A payload with the three required fields.
    pub fn new() -> Self {
        Self::empty()
            .with_student_id("2021-1-60-001")
            .with_name("Alice Smith")
            .with_org_email("alice@ewu.edu")
    }

    /// A payload with no fields at all.
    pub fn empty() -> Self {
        Self { data: Map::new() }
    }

    pub fn with_student_id(self, student_id: &str) -> Self {
        self.with("studentId", json!(student_id))
    }

    pub fn with_name(self, name: &str) -> Self {
        self.with("name", json!(name))
    }

    pub fn with_org_email(self, email: &str) -> Self {
        self.with("orgEmail", json!(email))
    }

    pub fn with_semester(self, semester: &str) -> Self {
        self.with("semester", json!(semester))
    }

    pub fn with_program(self, program: &str) -> Self {
        self.with("program", json!(program))
    }

    pub fn with_gender(self, gender: &str) -> Self {
        self.with("gender", json!(gender))
    }

    pub fn with_departments(self, departments: &[&str]) -> Self {
        self.with("preferredDepartments", json!(departments))
    }

    pub fn with(mut self, field: &str, value: Value) -> Self {
        self.data.insert(field.to_string(), value);
        self
    }

    pub fn without(mut self, field: &str) -> Self {
        self.data.remove(field);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.data)
    }
}

impl Default for RegistrationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A distinct valid payload for the `n`th student.
pub fn student(n: usize) -> RegistrationBuilder {
    RegistrationBuilder::new()
        .with_student_id(&format!("2021-1-60-{:03}", n))
        .with_name(&format!("Student {}", n))
        .with_org_email(&format!("student{}@ewu.edu", n))
}
