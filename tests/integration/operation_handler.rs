//! Status codes and envelopes through the operation handler.

use crate::common::builders::{RegistrationBuilder, student};
use crate::common::create_test_handler;
use crate::common::fixtures::UNKNOWN_ID;
use registration_service::{
    ListParams, OperationType, RegistrationOperationRequest,
};
use serde_json::{Value, json};

const MOUNT: &str = "/api/registrations";

fn item_path(id: &str) -> String {
    format!("{}/{}", MOUNT, id)
}

fn created_id(body: &Value) -> String {
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_envelope() {
    let handler = create_test_handler();
    let response = handler
        .handle_operation(RegistrationOperationRequest::create(
            RegistrationBuilder::new().build(),
        ))
        .await;

    assert_eq!(response.status, 201);
    assert!(response.is_success());
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["studentId"], "2021-1-60-001");
    assert!(response.body["data"]["createdAt"].is_string());
    assert!(response.error_code.is_none());
}

#[tokio::test]
async fn test_request_id_is_kept_or_generated() {
    let handler = create_test_handler();
    let response = handler
        .handle_operation(RegistrationOperationRequest::get(UNKNOWN_ID).with_request_id("req-42"))
        .await;
    assert_eq!(response.request_id, "req-42");

    let response = handler
        .handle_operation(RegistrationOperationRequest::get(UNKNOWN_ID))
        .await;
    assert_eq!(response.request_id.len(), 36);
}

#[tokio::test]
async fn test_validation_envelope() {
    let handler = create_test_handler();
    let response = handler
        .handle_operation(RegistrationOperationRequest::create(json!({"name": "Alice"})))
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["message"], "Validation failed");
    let fields: Vec<&str> = response.body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["studentId", "orgEmail"]);
    assert_eq!(response.error_code.as_deref(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_duplicate_envelope() {
    let handler = create_test_handler();
    let body = student(1).build();
    handler
        .handle_operation(RegistrationOperationRequest::create(body.clone()))
        .await;
    let response = handler
        .handle_operation(RegistrationOperationRequest::create(body))
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(response.body["success"], false);
    assert!(response.body["error"].as_str().unwrap().contains("studentId"));
    assert_eq!(response.error_code.as_deref(), Some("DUPLICATE_KEY"));
}

#[tokio::test]
async fn test_get_envelopes() {
    let handler = create_test_handler();
    let created = handler
        .handle_operation(RegistrationOperationRequest::create(student(1).build()))
        .await;
    let id = created_id(&created.body);

    let found = handler
        .handle_operation(RegistrationOperationRequest::get(id.as_str()))
        .await;
    assert_eq!(found.status, 200);
    assert_eq!(found.body, json!({"success": true, "data": created.body["data"]}));

    let malformed = handler
        .handle_operation(RegistrationOperationRequest::get("xyz"))
        .await;
    assert_eq!(malformed.status, 400);
    assert_eq!(
        malformed.body,
        json!({"success": false, "message": "Invalid ID format"})
    );

    let missing = handler
        .handle_operation(RegistrationOperationRequest::get(UNKNOWN_ID))
        .await;
    assert_eq!(missing.status, 404);
    assert_eq!(
        missing.body,
        json!({"success": false, "message": "Registration not found"})
    );
}

#[tokio::test]
async fn test_update_and_delete_envelopes() {
    let handler = create_test_handler();
    let created = handler
        .handle_operation(RegistrationOperationRequest::create(student(1).build()))
        .await;
    let id = created_id(&created.body);

    let updated = handler
        .handle_operation(RegistrationOperationRequest::update(
            id.as_str(),
            json!({"semester": "5"}),
        ))
        .await;
    assert_eq!(updated.status, 200);
    assert_eq!(updated.body["message"], "Registration updated successfully");
    assert_eq!(updated.body["data"]["semester"], "5");

    let deleted = handler
        .handle_operation(RegistrationOperationRequest::delete(id.as_str()))
        .await;
    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.body["message"], "Registration deleted successfully");
    assert_eq!(deleted.body["data"]["id"], id.as_str());

    let again = handler
        .handle_operation(RegistrationOperationRequest::delete(id.as_str()))
        .await;
    assert_eq!(again.status, 404);
}

#[tokio::test]
async fn test_list_envelope() {
    let handler = create_test_handler();
    for n in 1..=3 {
        handler
            .handle_operation(RegistrationOperationRequest::create(
                student(n).with_gender("female").build(),
            ))
            .await;
    }

    let response = handler
        .handle_operation(RegistrationOperationRequest::list(
            ListParams::new().with("gender", "female").with("limit", "2"),
        ))
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"].as_array().unwrap().len(), 2);
    assert_eq!(response.body["filters"], json!({"gender": "female"}));
    assert_eq!(
        response.body["pagination"],
        json!({
            "total": 3,
            "limit": 2,
            "page": 1,
            "totalPages": 2,
            "hasNextPage": true,
            "hasPrevPage": false
        })
    );
}

#[tokio::test]
async fn test_invalid_query_envelope() {
    let handler = create_test_handler();
    let response = handler
        .handle_operation(RegistrationOperationRequest::list(
            ListParams::new().with("endDate", "someday"),
        ))
        .await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.error_code.as_deref(), Some("INVALID_QUERY"));
}

#[tokio::test]
async fn test_routes_end_to_end() {
    let handler = create_test_handler();

    let created = handler
        .handle_route("POST", MOUNT, ListParams::new(), Some(student(1).build()))
        .await;
    assert_eq!(created.status, 201);
    let id = created_id(&created.body);

    let listed = handler
        .handle_route(
            "GET",
            MOUNT,
            ListParams::from_query_string("name=student&page=1"),
            None,
        )
        .await;
    assert_eq!(listed.status, 200);
    assert_eq!(listed.body["pagination"]["total"], 1);

    let patched = handler
        .handle_route("PATCH", &item_path(&id), ListParams::new(), Some(json!({"bio": "hi"})))
        .await;
    assert_eq!(patched.status, 200);
    assert_eq!(patched.body["data"]["bio"], "hi");

    let fetched = handler
        .handle_route("GET", &item_path(&id), ListParams::new(), None)
        .await;
    assert_eq!(fetched.body["data"]["bio"], "hi");

    let deleted = handler
        .handle_route("DELETE", &item_path(&id), ListParams::new(), None)
        .await;
    assert_eq!(deleted.status, 200);
}

#[tokio::test]
async fn test_route_errors() {
    let handler = create_test_handler();

    let missing = handler
        .handle_route("GET", "/api/students", ListParams::new(), None)
        .await;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body["success"], false);

    let not_allowed = handler
        .handle_route("PUT", &item_path(UNKNOWN_ID), ListParams::new(), None)
        .await;
    assert_eq!(not_allowed.status, 405);

    let bad_id = handler
        .handle_route("GET", &item_path("xyz"), ListParams::new(), None)
        .await;
    assert_eq!(bad_id.status, 400);
    assert_eq!(bad_id.body["message"], "Invalid ID format");
}

#[tokio::test]
async fn test_non_object_body_is_validation_error() {
    let handler = create_test_handler();
    let response = handler
        .handle_route("POST", MOUNT, ListParams::new(), None)
        .await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body["message"], "Validation failed");

    let request = RegistrationOperationRequest::create(json!([1, 2, 3]));
    assert_eq!(request.operation, OperationType::Create);
    let response = handler.handle_operation(request).await;
    assert_eq!(response.status, 400);
}
