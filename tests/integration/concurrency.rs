//! Concurrent writers against a shared store.

use crate::common::builders::student;
use crate::common::create_test_service;
use registration_service::{ListParams, RegistrationError};
use std::sync::Arc;

#[tokio::test]
async fn test_concurrent_duplicate_creates_admit_one() {
    let service = Arc::new(create_test_service());
    let payload = student(1).build();

    let futures: Vec<_> = (0..16)
        .map(|_| {
            let service = Arc::clone(&service);
            let payload = payload.clone();
            async move { service.create(&payload).await }
        })
        .collect();

    let results = futures::future::join_all(futures).await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(RegistrationError::DuplicateKey { .. })))
        .count();
    assert_eq!(created, 1);
    assert_eq!(duplicates, 15);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creates_of_distinct_students() {
    let service = Arc::new(create_test_service());

    let handles: Vec<_> = (1..=40)
        .map(|n| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.create(&student(n).build()).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let page = service
        .list(&ListParams::new().with("limit", "100"))
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 40);

    let mut ids: Vec<&str> = page.data.iter().map(|r| r.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 40);
}

#[tokio::test]
async fn test_concurrent_updates_all_land() {
    let service = Arc::new(create_test_service());
    let created = service.create(&student(1).build()).await.unwrap();
    let id = created.id.as_str().to_string();

    let fields = ["semester", "mobile", "address", "bio", "residentialSemester"];
    let futures: Vec<_> = fields
        .iter()
        .map(|field| {
            let service = Arc::clone(&service);
            let id = id.clone();
            let mut body = serde_json::Map::new();
            body.insert(field.to_string(), serde_json::json!("updated"));
            let body = serde_json::Value::Object(body);
            async move { service.update(&id, &body).await }
        })
        .collect();

    for result in futures::future::join_all(futures).await {
        result.unwrap();
    }

    let record = service.get(&id).await.unwrap();
    assert_eq!(record.semester.as_deref(), Some("updated"));
    assert_eq!(record.mobile.as_deref(), Some("updated"));
    assert_eq!(record.address.as_deref(), Some("updated"));
    assert_eq!(record.bio.as_deref(), Some("updated"));
    assert_eq!(record.residential_semester.as_deref(), Some("updated"));
}
