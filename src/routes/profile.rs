//! Path, embedded body and query inputs merged into one packet

use crate::core::model::UserProfile;
use crate::core::validation::{FieldKind, FieldSpec, Guarded, GuardedInput, RouteSchema};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::OnceLock;

/// Inputs of `PUT /update-profile/{user_id}`
///
/// With two body fields the body is `{"user_data": {...}, "importance": n}`.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    pub user_id: i64,
    pub user_data: UserProfile,
    pub importance: i64,
    pub confirm: bool,
}

impl GuardedInput for ProfileUpdate {
    fn schema() -> &'static RouteSchema {
        static SCHEMA: OnceLock<RouteSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            RouteSchema::new(vec![
                FieldSpec::path("user_id", FieldKind::Integer).ge(1.0),
                FieldSpec::body("user_data", UserProfile::kind()),
                FieldSpec::body("importance", FieldKind::Integer)
                    .gt(0.0)
                    .le(10.0),
                FieldSpec::query("confirm", FieldKind::Boolean).default_value(json!(false)),
            ])
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ValidatedPacket {
    pub user_id: i64,
    pub profile: UserProfile,
    pub priority_level: i64,
    pub is_confirmed: bool,
    pub status: &'static str,
}

pub async fn update_user(Guarded(update): Guarded<ProfileUpdate>) -> Json<ValidatedPacket> {
    Json(ValidatedPacket {
        user_id: update.user_id,
        profile: update.user_data,
        priority_level: update.importance,
        is_confirmed: update.confirm,
        status: "Ready for Database",
    })
}
