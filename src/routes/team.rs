//! Enum-typed path segment demo

use crate::core::model::Team;
use crate::core::validation::{FieldKind, FieldSpec, Guarded, GuardedInput, RouteSchema};
use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::OnceLock;

#[derive(Debug, Deserialize)]
pub struct TeamPath {
    pub name: Team,
}

impl GuardedInput for TeamPath {
    fn schema() -> &'static RouteSchema {
        static SCHEMA: OnceLock<RouteSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            RouteSchema::new(vec![
                FieldSpec::path("name", FieldKind::Enum).one_of(Team::MEMBERS),
            ])
        })
    }
}

/// Profile for `me`; `user` has no profile and answers with JSON `null`
pub async fn get_team(Guarded(path): Guarded<TeamPath>) -> Json<Value> {
    match path.name {
        Team::Me => Json(json!({
            "full_name": "gemini_ai",
            "role": "developer",
        })),
        Team::User => Json(Value::Null),
    }
}
