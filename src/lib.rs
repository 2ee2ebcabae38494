//! # fieldguard
//!
//! Declarative request validation for axum services, and a small tutorial API
//! built on it.
//!
//! ## Features
//!
//! - **Explicit constraint data**: each route input is a [`FieldSpec`](core::validation::FieldSpec)
//!   naming its source, type and constraints
//! - **Aggregate rejection**: every broken field is reported in one 422 response
//! - **Typed handlers**: the `Guarded<T>` extractor deserializes only validated values
//! - **Distinct error channels**: constraint rejection (422), explicit not-found (404)
//! - **Mock stores**: append-only user list and keyed upload map behind async traits
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldguard::prelude::*;
//!
//! #[derive(Deserialize)]
//! struct Lookup {
//!     item_id: i64,
//! }
//!
//! impl GuardedInput for Lookup {
//!     fn schema() -> &'static RouteSchema {
//!         static SCHEMA: OnceLock<RouteSchema> = OnceLock::new();
//!         SCHEMA.get_or_init(|| {
//!             RouteSchema::new(vec![
//!                 FieldSpec::path("item_id", FieldKind::Integer).ge(1.0).le(1000.0),
//!             ])
//!         })
//!     }
//! }
//!
//! async fn lookup(Guarded(input): Guarded<Lookup>) -> String {
//!     format!("item {}", input.item_id)
//! }
//! ```

pub mod config;
pub mod core;
pub mod routes;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Validation ===
    pub use crate::core::validation::{
        Constraint, FieldKind, FieldPath, FieldSource, FieldSpec, FieldViolation, Guarded,
        GuardedInput, ObjectSchema, Pattern, RawBody, RawRequest, RawValue, RouteSchema,
        ValidationErrors, ValidationOutcome, Violation, validate, validate_object,
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, EntityError, ErrorResponse, GuardError, GuardResult, RequestError,
        StorageError,
    };

    // === Models and stores ===
    pub use crate::core::model::{FileUpload, Team, UploadRecord, UserProfile};
    pub use crate::core::store::{UploadStore, UserStore};
    pub use crate::storage::{InMemoryUploadStore, InMemoryUserStore};

    // === Config ===
    pub use crate::config::{DEFAULT_UPLOAD_SECRET, ServerConfig};

    // === Server ===
    pub use crate::routes::{AppState, tutorial_routes};
    pub use crate::server::{ServerBuilder, build_router};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::OnceLock;

    // === Axum ===
    pub use axum::{
        Json, Router,
        extract::State,
        routing::{get, post, put},
    };
}
