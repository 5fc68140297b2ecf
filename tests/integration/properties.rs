//! Property-based tests for pagination and filtering.
//!
//! Uses proptest for generated inputs; async service calls run on
//! `tokio_test::block_on`.

use crate::common::builders::student;
use crate::common::{create_service_with_clock, stepping_clock};
use proptest::prelude::*;
use registration_service::query::{ListParams, PageRequest, Pagination, translate};
use registration_service::ServiceConfig;

proptest! {
    #[test]
    fn test_pagination_metadata_invariants(
        total in 0usize..10_000,
        page in 1usize..500,
        limit in 1usize..=100,
    ) {
        let pagination = Pagination::new(total, page, limit);

        prop_assert_eq!(pagination.total_pages, total.div_ceil(limit));
        prop_assert_eq!(pagination.has_next_page, page < pagination.total_pages);
        prop_assert_eq!(pagination.has_prev_page, page > 1);
        prop_assert_eq!(pagination.limit, limit);
        prop_assert!(pagination.total_pages * limit >= total);
    }

    #[test]
    fn test_page_request_accepts_every_valid_pair(
        page in 1usize..10_000,
        limit in 1usize..=100,
    ) {
        let request = PageRequest::parse(
            Some(&page.to_string()),
            Some(&limit.to_string()),
            &ServiceConfig::default(),
        ).unwrap();

        prop_assert_eq!(request.page, page);
        prop_assert_eq!(request.limit, limit);
        prop_assert_eq!(request.offset(), (page - 1) * limit);
    }

    #[test]
    fn test_page_request_rejects_non_numeric(raw in "[a-zA-Z][a-zA-Z0-9]{0,8}") {
        prop_assert!(PageRequest::parse(Some(&raw), None, &ServiceConfig::default()).is_err());
        prop_assert!(PageRequest::parse(None, Some(&raw), &ServiceConfig::default()).is_err());
    }

    #[test]
    fn test_unrecognized_params_never_filter(
        name in "[a-z]{3,12}",
        value in "[a-zA-Z0-9]{1,12}",
    ) {
        prop_assume!(![
            "gender", "name", "studentId", "semester", "mobile", "program",
            "preferredDepartment", "personalEmail", "orgEmail", "startDate", "endDate",
            "page", "limit",
        ].contains(&name.as_str()));

        let translated = translate(&ListParams::new().with(name, value)).unwrap();
        prop_assert!(translated.query.is_empty());
        prop_assert!(translated.filters.is_empty());
    }

    #[test]
    fn test_department_splitting_trims_and_drops_empty(
        departments in prop::collection::vec("[A-Z]{2,5}", 1..6),
    ) {
        let raw = departments
            .iter()
            .map(|d| format!("  {} ", d))
            .collect::<Vec<_>>()
            .join(",,");
        let params = ListParams::new().with("preferredDepartment", raw.as_str());
        let translated = translate(&params).unwrap();

        prop_assert_eq!(translated.filters.get("preferredDepartment"), Some(raw.as_str()));
        prop_assert_eq!(translated.query.conditions().len(), 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_pages_partition_the_result_set(count in 0usize..25, limit in 1usize..8) {
        tokio_test::block_on(async {
            let service = create_service_with_clock(stepping_clock());
            for n in 1..=count {
                service.create(&student(n).build()).await.unwrap();
            }

            let mut seen = Vec::new();
            let mut page_number = 1;
            loop {
                let params = ListParams::new()
                    .with("page", page_number.to_string())
                    .with("limit", limit.to_string());
                let page = service.list(&params).await.unwrap();

                assert_eq!(page.pagination.total, count);
                assert!(page.data.len() <= limit);
                seen.extend(page.data.iter().map(|r| r.id.clone()));

                if !page.pagination.has_next_page {
                    break;
                }
                page_number += 1;
            }

            assert_eq!(seen.len(), count);
            let mut sorted = seen.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), count);
        });
    }
}
