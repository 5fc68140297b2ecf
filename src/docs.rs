//! OpenAPI description of the registration API.
//!
//! The document is generated from the same field table the validator uses,
//! so the published schema cannot drift from what is enforced.

use crate::config::ServiceConfig;
use crate::model::{Gender, Program};
use crate::query::filter::{
    DEPARTMENT_PARAM, END_DATE_PARAM, EXACT_MATCH_PARAMS, FilterField, LIMIT_PARAM, NAME_PARAM,
    PAGE_PARAM, START_DATE_PARAM,
};
use crate::validation::{FieldKind, REGISTRATION_FIELDS};
use serde_json::{Map, Value, json};

pub const API_TITLE: &str = "Registration API";
pub const API_VERSION: &str = "2.0.0";
pub const OPENAPI_VERSION: &str = "3.1.0";

const SCHEMA_REF: &str = "#/components/schemas/Registration";

/// Build the OpenAPI document for `config`.
pub fn openapi_document(config: &ServiceConfig) -> Value {
    let collection = collection_path(config);
    let item = format!("{}/{{id}}", collection);

    let mut paths = Map::new();
    paths.insert(
        collection,
        json!({
            "post": create_operation(),
            "get": list_operation(config),
        }),
    );
    paths.insert(
        item,
        json!({
            "get": get_operation(),
            "patch": update_operation(),
            "delete": delete_operation(),
        }),
    );

    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": API_TITLE,
            "version": API_VERSION,
            "description": "API for managing student registrations",
        },
        "servers": [{"url": config.server_url()}],
        "tags": [{"name": "Registration"}],
        "paths": paths,
        "components": {
            "schemas": {
                "Registration": registration_schema(),
                "ValidationError": {
                    "type": "object",
                    "properties": {
                        "field": {"type": "string"},
                        "message": {"type": "string"},
                    },
                },
            },
        },
    })
}

/// Path of the collection relative to the documented server URL.
fn collection_path(config: &ServiceConfig) -> String {
    match config.mount_path.rsplit_once('/') {
        Some((_, last)) => format!("/{}", last),
        None => config.mount_path.clone(),
    }
}

/// Component schema of a stored registration.
pub fn registration_schema() -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    properties.insert(
        "id".to_string(),
        json!({"type": "string", "readOnly": true, "pattern": "^[0-9a-f]{24}$"}),
    );
    for field in REGISTRATION_FIELDS {
        properties.insert(field.name.to_string(), field_schema(field.kind));
        if field.required {
            required.push(field.name);
        }
    }
    for stamp in ["createdAt", "updatedAt"] {
        properties.insert(
            stamp.to_string(),
            json!({"type": "string", "format": "date-time", "readOnly": true}),
        );
    }

    json!({
        "type": "object",
        "required": required,
        "properties": properties,
    })
}

fn field_schema(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Text => json!({"type": "string"}),
        FieldKind::Email => json!({"type": "string", "format": "email"}),
        FieldKind::Program => json!({"type": "string", "enum": Program::names()}),
        FieldKind::Gender => json!({"type": "string", "enum": Gender::names()}),
        FieldKind::Date => json!({"type": "string", "format": "date"}),
        FieldKind::Uri => json!({"type": "string", "format": "uri"}),
        FieldKind::TextList => json!({"type": "array", "items": {"type": "string"}}),
    }
}

fn id_parameter() -> Value {
    json!({
        "in": "path",
        "name": "id",
        "required": true,
        "schema": {"type": "string"},
        "description": "Registration ID (24 hexadecimal characters)",
    })
}

fn query_parameter(name: &str, schema: Value, description: &str) -> Value {
    json!({
        "in": "query",
        "name": name,
        "schema": schema,
        "description": description,
    })
}

fn record_response(description: &str, message: Option<&str>) -> Value {
    let mut properties = Map::new();
    properties.insert("success".to_string(), json!({"type": "boolean", "example": true}));
    if let Some(message) = message {
        properties.insert(
            "message".to_string(),
            json!({"type": "string", "example": message}),
        );
    }
    properties.insert("data".to_string(), json!({"$ref": SCHEMA_REF}));

    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {"type": "object", "properties": properties},
            },
        },
    })
}

fn message_response(description: &str, example: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "success": {"type": "boolean", "example": false},
                        "message": {"type": "string", "example": example},
                    },
                },
            },
        },
    })
}

fn validation_response() -> Value {
    json!({
        "description": "Validation failed or bad request",
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "success": {"type": "boolean", "example": false},
                        "message": {"type": "string", "example": "Validation failed"},
                        "errors": {
                            "type": "array",
                            "items": {"$ref": "#/components/schemas/ValidationError"},
                        },
                    },
                },
            },
        },
    })
}

fn server_error() -> Value {
    json!({"description": "Server error"})
}

fn request_body(description: &str) -> Value {
    json!({
        "description": description,
        "required": true,
        "content": {"application/json": {"schema": {"$ref": SCHEMA_REF}}},
    })
}

fn create_operation() -> Value {
    json!({
        "summary": "Create a new registration",
        "tags": ["Registration"],
        "requestBody": request_body("Registration to create"),
        "responses": {
            "201": record_response("Registration created successfully", None),
            "400": validation_response(),
            "500": server_error(),
        },
    })
}

fn list_operation(config: &ServiceConfig) -> Value {
    let mut parameters = vec![
        query_parameter(
            PAGE_PARAM,
            json!({"type": "integer", "minimum": 1, "default": 1}),
            "Page number for pagination",
        ),
        query_parameter(
            LIMIT_PARAM,
            json!({
                "type": "integer",
                "minimum": 1,
                "maximum": config.max_limit,
                "default": config.default_limit,
            }),
            "Number of registrations per page",
        ),
    ];

    for field in EXACT_MATCH_PARAMS {
        let schema = match field {
            FilterField::Program => field_schema(FieldKind::Program),
            FilterField::Gender => field_schema(FieldKind::Gender),
            FilterField::PersonalEmail | FilterField::OrgEmail => field_schema(FieldKind::Email),
            _ => field_schema(FieldKind::Text),
        };
        parameters.push(query_parameter(
            field.as_str(),
            schema,
            &format!("Filter by {} (exact match)", field.as_str()),
        ));
    }
    parameters.push(query_parameter(
        NAME_PARAM,
        json!({"type": "string"}),
        "Filter by name (partial, case-insensitive)",
    ));
    parameters.push(query_parameter(
        DEPARTMENT_PARAM,
        json!({"type": "string"}),
        "Comma-separated preferred departments to filter (matches any)",
    ));
    parameters.push(query_parameter(
        START_DATE_PARAM,
        json!({"type": "string", "format": "date-time"}),
        "Filter registrations created on or after this date/time",
    ));
    parameters.push(query_parameter(
        END_DATE_PARAM,
        json!({"type": "string", "format": "date-time"}),
        "Filter registrations created on or before this date/time",
    ));

    json!({
        "summary": "Get all registrations with filters and pagination",
        "tags": ["Registration"],
        "parameters": parameters,
        "responses": {
            "200": {
                "description": "List of registrations matching filters with pagination metadata",
                "content": {
                    "application/json": {
                        "schema": {
                            "type": "object",
                            "properties": {
                                "success": {"type": "boolean", "example": true},
                                "data": {"type": "array", "items": {"$ref": SCHEMA_REF}},
                                "filters": {
                                    "type": "object",
                                    "description": "The filters applied in this query",
                                },
                                "pagination": {
                                    "type": "object",
                                    "properties": {
                                        "total": {"type": "integer", "example": 42},
                                        "limit": {"type": "integer", "example": 10},
                                        "page": {"type": "integer", "example": 1},
                                        "totalPages": {"type": "integer", "example": 5},
                                        "hasNextPage": {"type": "boolean", "example": true},
                                        "hasPrevPage": {"type": "boolean", "example": false},
                                    },
                                },
                            },
                        },
                    },
                },
            },
            "400": message_response("Invalid query parameter", "Invalid query parameter"),
            "500": server_error(),
        },
    })
}

fn get_operation() -> Value {
    json!({
        "summary": "Get a registration by ID",
        "tags": ["Registration"],
        "parameters": [id_parameter()],
        "responses": {
            "200": record_response("Registration found", None),
            "400": message_response("Invalid ID format", "Invalid ID format"),
            "404": message_response("Registration not found", "Registration not found"),
            "500": server_error(),
        },
    })
}

fn update_operation() -> Value {
    json!({
        "summary": "Partially update a registration by ID",
        "tags": ["Registration"],
        "parameters": [id_parameter()],
        "requestBody": request_body("Fields to update (any subset of Registration fields)"),
        "responses": {
            "200": record_response(
                "Registration updated successfully",
                Some("Registration updated successfully"),
            ),
            "400": validation_response(),
            "404": message_response("Registration not found", "Registration not found"),
            "500": server_error(),
        },
    })
}

fn delete_operation() -> Value {
    json!({
        "summary": "Delete a registration by ID",
        "tags": ["Registration"],
        "parameters": [id_parameter()],
        "responses": {
            "200": record_response(
                "Registration deleted successfully",
                Some("Registration deleted successfully"),
            ),
            "400": message_response("Invalid ID format", "Invalid ID format"),
            "404": message_response("Registration not found", "Registration not found"),
            "500": server_error(),
        },
    })
}
