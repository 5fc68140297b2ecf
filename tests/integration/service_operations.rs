//! Create, get, update and delete through the service.

use crate::common::builders::{RegistrationBuilder, student};
use crate::common::fixtures::{MALFORMED_IDS, UNKNOWN_ID, full_registration};
use crate::common::{create_service_with_clock, create_test_service, stepping_clock};
use crate::{assert_error_message_contains, assert_validation_error};
use registration_service::{Gender, Program, RegistrationError, RegistrationStore};
use serde_json::json;

#[tokio::test]
async fn test_create_then_get_returns_same_record() {
    let service = create_test_service();
    let created = service.create(&full_registration()).await.unwrap();

    let fetched = service.get(created.id.as_str()).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched, created);
    assert_eq!(fetched.program, Some(Program::ComputerScienceAndEngineering));
    assert_eq!(fetched.gender, Some(Gender::Male));
    assert_eq!(
        fetched.preferred_departments,
        Some(vec!["Development".to_string(), "Research".to_string()])
    );
}

#[tokio::test]
async fn test_create_assigns_id_and_timestamps() {
    let clock = stepping_clock();
    let start = clock.peek();
    let service = create_service_with_clock(clock);

    let created = service.create(&RegistrationBuilder::new().build()).await.unwrap();
    assert_eq!(created.id.as_str().len(), 24);
    assert_eq!(created.created_at, start);
    assert_eq!(created.updated_at, start);
}

#[tokio::test]
async fn test_missing_required_fields_are_named() {
    let service = create_test_service();

    let result = service
        .create(&RegistrationBuilder::new().without("name").build())
        .await;
    assert_validation_error!(result, ["name"]);

    let result = service
        .create(
            &RegistrationBuilder::empty()
                .with_semester("3")
                .build(),
        )
        .await;
    assert_validation_error!(result, ["studentId", "name", "orgEmail"]);
}

#[tokio::test]
async fn test_all_violations_reported_together() {
    let service = create_test_service();
    let payload = RegistrationBuilder::new()
        .with_org_email("not-an-email")
        .with_gender("unknown")
        .with("dateOfBirth", json!("17/05/2002"))
        .with("githubProfileLink", json!("github dot com"))
        .build();

    let result = service.create(&payload).await;
    assert_validation_error!(
        result,
        ["orgEmail", "gender", "dateOfBirth", "githubProfileLink"]
    );
}

#[tokio::test]
async fn test_store_managed_fields_rejected() {
    let service = create_test_service();
    let payload = RegistrationBuilder::new()
        .with("createdAt", json!("2020-01-01T00:00:00Z"))
        .build();

    let result = service.create(&payload).await;
    assert_validation_error!(result, ["createdAt"]);
}

#[tokio::test]
async fn test_legacy_instagram_spelling_is_accepted() {
    let service = create_test_service();
    let payload = RegistrationBuilder::new()
        .with("instragramProfileLink", json!("https://instagram.com/alice"))
        .build();

    let created = service.create(&payload).await.unwrap();
    assert_eq!(
        created.instagram_profile_link.as_deref(),
        Some("https://instagram.com/alice")
    );
    let json = created.to_json().unwrap();
    assert_eq!(json["instagramProfileLink"], "https://instagram.com/alice");
    assert!(json.get("instragramProfileLink").is_none());
}

#[tokio::test]
async fn test_duplicate_student_id_is_rejected() {
    let service = create_test_service();
    service.create(&student(1).build()).await.unwrap();

    let duplicate = student(2).with_student_id("2021-1-60-001").build();
    let result = service.create(&duplicate).await;
    assert!(matches!(
        result,
        Err(RegistrationError::DuplicateKey { ref field, .. }) if field == "studentId"
    ));
    assert_error_message_contains!(result, "2021-1-60-001");
}

#[tokio::test]
async fn test_get_malformed_id_is_client_error() {
    let service = create_test_service();
    for id in MALFORMED_IDS {
        let err = service.get(id).await.unwrap_err();
        assert!(
            matches!(err, RegistrationError::MalformedIdentifier { .. }),
            "id {:?} gave {:?}",
            id,
            err
        );
        assert_eq!(err.status_code(), 400);
    }
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let service = create_test_service();
    let err = service.get(UNKNOWN_ID).await.unwrap_err();
    assert!(matches!(err, RegistrationError::NotFound { .. }));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_get_accepts_uppercase_hex() {
    let service = create_test_service();
    let created = service.create(&student(1).build()).await.unwrap();
    let upper = created.id.as_str().to_uppercase();
    assert_eq!(service.get(&upper).await.unwrap().id, created.id);
}

#[tokio::test]
async fn test_partial_update_changes_only_supplied_fields() {
    let service = create_service_with_clock(stepping_clock());
    let created = service.create(&full_registration()).await.unwrap();

    let updated = service
        .update(created.id.as_str(), &json!({"semester": "5"}))
        .await
        .unwrap();

    assert_eq!(updated.semester.as_deref(), Some("5"));
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let mut expected = created.clone();
    expected.semester = Some("5".to_string());
    expected.updated_at = updated.updated_at;
    assert_eq!(updated, expected);

    assert_eq!(service.get(created.id.as_str()).await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_validates_supplied_fields() {
    let service = create_test_service();
    let created = service.create(&student(1).build()).await.unwrap();

    let result = service
        .update(created.id.as_str(), &json!({"program": "Alchemy", "name": ""}))
        .await;
    assert_validation_error!(result, ["program", "name"]);

    // Nothing was written.
    assert_eq!(service.get(created.id.as_str()).await.unwrap(), created);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let service = create_test_service();
    let err = service
        .update(UNKNOWN_ID, &json!({"semester": "5"}))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_to_taken_student_id_is_duplicate() {
    let service = create_test_service();
    service.create(&student(1).build()).await.unwrap();
    let second = service.create(&student(2).build()).await.unwrap();

    let err = service
        .update(second.id.as_str(), &json!({"studentId": "2021-1-60-001"}))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::DuplicateKey { .. }));
}

#[tokio::test]
async fn test_delete_returns_record_then_not_found() {
    let service = create_test_service();
    let created = service.create(&student(1).build()).await.unwrap();

    let deleted = service.delete(created.id.as_str()).await.unwrap();
    assert_eq!(deleted, created);

    let err = service.delete(created.id.as_str()).await.unwrap_err();
    assert!(matches!(err, RegistrationError::NotFound { .. }));

    let err = service.get(created.id.as_str()).await.unwrap_err();
    assert!(matches!(err, RegistrationError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_malformed_id_is_client_error() {
    let service = create_test_service();
    let err = service.delete("xyz").await.unwrap_err();
    assert!(matches!(err, RegistrationError::MalformedIdentifier { .. }));
}

#[tokio::test]
async fn test_shutdown_and_restart() {
    let service = create_test_service();
    service.start().await.unwrap();
    let created = service.create(&student(1).build()).await.unwrap();

    service.shutdown().await.unwrap();
    let err = service.get(created.id.as_str()).await.unwrap_err();
    assert!(matches!(err, RegistrationError::Persistence(_)));

    service.store().init().await.unwrap();
    assert_eq!(service.get(created.id.as_str()).await.unwrap(), created);
}
