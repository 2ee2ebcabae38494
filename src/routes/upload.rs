//! Upload metadata: body model, query defaults and a shared-secret check

use super::AppState;
use crate::core::error::{GuardResult, StorageError};
use crate::core::model::{FileUpload, UploadRecord};
use crate::core::validation::{FieldKind, FieldSpec, Guarded, GuardedInput, RouteSchema};
use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::OnceLock;

/// Inputs of `POST /upload/{user_id}`
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub user_id: i64,
    pub upload: FileUpload,
    pub category: String,
    pub secret_key: Option<String>,
}

impl GuardedInput for UploadRequest {
    fn schema() -> &'static RouteSchema {
        static SCHEMA: OnceLock<RouteSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            RouteSchema::new(vec![
                FieldSpec::path("user_id", FieldKind::Integer),
                FieldSpec::body("upload", FileUpload::kind()),
                FieldSpec::query("category", FieldKind::String).default_value(json!("general")),
                FieldSpec::query("secret_key", FieldKind::String).optional(),
            ])
        })
    }
}

/// Merge and store upload metadata
///
/// A wrong or missing `secret_key` is answered with a normal 200 body carrying
/// `error` and `status: 401`; the store is not touched.
pub async fn process_user_upload(
    State(state): State<AppState>,
    Guarded(request): Guarded<UploadRequest>,
) -> GuardResult<Json<Value>> {
    if request.secret_key.as_deref() != Some(&*state.upload_secret) {
        tracing::warn!(user_id = request.user_id, "upload refused: secret key mismatch");
        return Ok(Json(json!({
            "error": "Unauthorized Access",
            "status": 401,
        })));
    }

    let record = UploadRecord::merge(request.upload, request.user_id, request.category);

    state
        .uploads
        .put(request.user_id, record.clone())
        .await
        .map_err(|e| StorageError::failed("put", e))?;

    Ok(Json(json!({
        "message": "File metadata processed successfully",
        "data": record,
        "so_yea": "Boilerplate done, Logic complete!",
    })))
}
