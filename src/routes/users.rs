//! Append-only user list backed by the mock store

use super::AppState;
use crate::core::error::{EntityError, GuardResult, StorageError};
use crate::core::model::UserProfile;
use crate::core::validation::{FieldKind, FieldSpec, Guarded, GuardedInput, RouteSchema};
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Body of `POST /users/`
#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub user: UserProfile,
}

impl GuardedInput for NewUser {
    fn schema() -> &'static RouteSchema {
        static SCHEMA: OnceLock<RouteSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| RouteSchema::new(vec![FieldSpec::body("user", UserProfile::kind())]))
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub id: usize,
    pub user: UserProfile,
}

/// Append a user; its id is the list length before the append
pub async fn create_user(
    State(state): State<AppState>,
    Guarded(body): Guarded<NewUser>,
) -> GuardResult<(StatusCode, Json<CreatedUser>)> {
    let id = state
        .users
        .append(body.user.clone())
        .await
        .map_err(|e| StorageError::failed("append", e))?;

    Ok((StatusCode::CREATED, Json(CreatedUser { id, user: body.user })))
}

/// Path of `GET /users/{user_id}`
#[derive(Debug, Deserialize)]
pub struct UserIndex {
    pub user_id: usize,
}

impl GuardedInput for UserIndex {
    fn schema() -> &'static RouteSchema {
        static SCHEMA: OnceLock<RouteSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            RouteSchema::new(vec![FieldSpec::path("user_id", FieldKind::Integer).ge(0.0)])
        })
    }
}

pub async fn get_user(
    State(state): State<AppState>,
    Guarded(path): Guarded<UserIndex>,
) -> GuardResult<Json<UserProfile>> {
    let user = state
        .users
        .get(path.user_id)
        .await
        .map_err(|e| StorageError::failed("get", e))?;

    user.map(Json).ok_or_else(|| {
        EntityError::NotFound {
            entity_type: "user".to_string(),
            id: path.user_id.to_string(),
            detail: "User not found in memory".to_string(),
        }
        .into()
    })
}
