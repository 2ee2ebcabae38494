//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses carry the documented body shape
//! - Validation failures keep every violation in report order

use axum::http::StatusCode;
use axum::response::IntoResponse;
use fieldguard::prelude::*;
use serde_json::{Value, json};

async fn response_body(err: GuardError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn two_violations() -> ValidationErrors {
    ValidationErrors::new(vec![
        FieldViolation::new(
            FieldPath::root("path").child("item_id"),
            Violation::Le { limit: 1000.0 },
        ),
        FieldViolation::new(
            FieldPath::root("query").child("q"),
            Violation::MinLength { min: 3 },
        ),
    ])
}

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_validation_returns_422() {
        let err = GuardError::Validation(two_violations());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_returns_404() {
        let err = GuardError::Entity(EntityError::NotFound {
            entity_type: "user".to_string(),
            id: "3".to_string(),
            detail: "User not found in memory".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_request_error_returns_400() {
        let err = GuardError::Request(RequestError::InvalidPath {
            path: "/items/x".to_string(),
            message: "bad segment".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_and_config_return_500() {
        let storage = GuardError::Storage(StorageError::failed("append", "lock poisoned"));
        let config = GuardError::Config(ConfigError::InvalidValue {
            field: "upload_secret".to_string(),
            message: "empty".to_string(),
        });
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Response Body Tests
// =============================================================================

mod into_response_tests {
    use super::*;

    #[tokio::test]
    async fn test_validation_body_lists_every_field() {
        let (status, body) = response_body(two_violations().into()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert_eq!(body["message"], "2 field(s) failed validation");
        assert_eq!(body["details"]["fields"][0]["loc"], json!(["path", "item_id"]));
        assert_eq!(body["details"]["fields"][0]["rule"], "le");
        assert_eq!(body["details"]["fields"][1]["loc"], json!(["query", "q"]));
        assert_eq!(body["details"]["fields"][1]["rule"], "min_length");
    }

    #[tokio::test]
    async fn test_not_found_body_uses_detail_as_message() {
        let err: GuardError = EntityError::NotFound {
            entity_type: "user".to_string(),
            id: "7".to_string(),
            detail: "User not found in memory".to_string(),
        }
        .into();

        let (status, body) = response_body(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ENTITY_NOT_FOUND");
        assert_eq!(body["message"], "User not found in memory");
        assert_eq!(body["details"], json!({"entity_type": "user", "id": "7"}));
    }

    #[tokio::test]
    async fn test_internal_error_has_no_details() {
        let (status, body) = response_body(GuardError::Internal("boom".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(body.get("details").is_none());
    }
}

// =============================================================================
// Error Matching Tests
// =============================================================================

mod error_matching_tests {
    use super::*;

    #[test]
    fn test_client_can_find_violation_by_location() {
        let errors = two_violations();

        assert!(errors.has_violation_at("query.q"));
        assert!(!errors.has_violation_at("body"));
    }

    #[test]
    fn test_into_result_keeps_violations() {
        let outcome = ValidationOutcome::Invalid(two_violations().violations().to_vec());

        match outcome.into_result() {
            Err(errors) => assert_eq!(errors.len(), 2),
            Ok(value) => panic!("expected failure, got {}", value),
        }
    }
}
