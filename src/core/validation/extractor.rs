//! Axum extractor for validated route inputs
//!
//! This module provides the `Guarded<T>` extractor that gathers path, query
//! and body inputs, runs them through the route's schema and only then hands
//! the handler a typed value.

use super::outcome::{FieldPath, FieldViolation, ValidationErrors, Violation};
use super::schema::{RawBody, RawRequest, RouteSchema};
use super::spec::FieldSource;
use crate::core::error::{GuardError, RequestError};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Handler input types that declare their own route schema
///
/// The validated values are keyed by field name and deserialized into `Self`,
/// so field names in the schema must match the struct's serde names.
pub trait GuardedInput: DeserializeOwned {
    fn schema() -> &'static RouteSchema;
}

/// Axum extractor that validates every declared input before the handler runs
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn read_item(Guarded(input): Guarded<ItemLookup>) -> Json<Value> {
///     // input.item_id is already within 1..=1000
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Guarded<T>(pub T);

impl<T> Guarded<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Guarded<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Guarded<T>
where
    S: Send + Sync,
    T: GuardedInput + Send,
{
    type Rejection = GuardError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let schema = T::schema();
        let (mut parts, body) = req.into_parts();

        let path = if schema.has_source(FieldSource::Path) {
            let Path(params) = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
                .await
                .map_err(|e| RequestError::InvalidPath {
                    path: parts.uri.path().to_string(),
                    message: e.body_text(),
                })?;
            params
        } else {
            HashMap::new()
        };

        let query = match parts.uri.query() {
            Some(_) => Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
                .map(|Query(pairs)| pairs)
                .map_err(|_| {
                    ValidationErrors::new(vec![FieldViolation::new(
                        FieldPath::root(FieldSource::Query.as_str()),
                        Violation::Type {
                            expected: "query string",
                        },
                    )])
                })?,
            None => Vec::new(),
        };

        let body = if schema.has_source(FieldSource::Body) {
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(|e| {
                    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                        RequestError::PayloadTooLarge {
                            message: e.body_text(),
                        }
                    } else {
                        RequestError::InvalidBody {
                            message: e.body_text(),
                        }
                    }
                })?;
            RawBody::from_bytes(&bytes)
        } else {
            RawBody::Empty
        };

        let raw = RawRequest { path, query, body };
        let values = schema.validate(&raw).map_err(|errors| {
            if let Some(first) = errors.violations().first() {
                tracing::debug!(
                    violations = errors.len(),
                    first = %first,
                    "request rejected by field validation"
                );
            }
            errors
        })?;

        serde_json::from_value(Value::Object(values))
            .map(Guarded)
            .map_err(|e| GuardError::Internal(format!("validated input does not fit handler type: {}", e)))
    }
}
