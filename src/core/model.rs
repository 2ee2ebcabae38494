//! Request and stored data models
//!
//! Each body model carries its [`ObjectSchema`], which is the single source of
//! its rules; the serde derives only move already-validated data around.

use crate::core::validation::{FieldKind, FieldSpec, ObjectSchema};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::OnceLock;

/// A user record in the append-only mock list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub age: i64,
}

impl UserProfile {
    pub fn new(username: impl Into<String>, age: i64) -> Self {
        Self {
            username: username.into(),
            age,
        }
    }

    /// `username` at least 3 characters, `age` at least 18
    pub fn schema() -> &'static ObjectSchema {
        static SCHEMA: OnceLock<ObjectSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ObjectSchema::new(vec![
                FieldSpec::body("username", FieldKind::String).min_length(3),
                FieldSpec::body("age", FieldKind::Integer).ge(18.0),
            ])
        })
    }

    pub fn kind() -> FieldKind {
        FieldKind::Object(Self::schema().clone())
    }
}

/// Metadata of an uploaded file, as sent by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub size_mb: f64,
    pub is_public: bool,
}

impl FileUpload {
    pub fn schema() -> &'static ObjectSchema {
        static SCHEMA: OnceLock<ObjectSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            ObjectSchema::new(vec![
                FieldSpec::body("filename", FieldKind::String),
                FieldSpec::body("content_type", FieldKind::String),
                FieldSpec::body("size_mb", FieldKind::Float).gt(0.0),
                FieldSpec::body("is_public", FieldKind::Boolean).default_value(json!(false)),
            ])
        })
    }

    pub fn kind() -> FieldKind {
        FieldKind::Object(Self::schema().clone())
    }
}

/// Upload metadata merged with its owner and folder, as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub filename: String,
    pub content_type: String,
    pub size_mb: f64,
    pub is_public: bool,
    pub owner_id: i64,
    pub folder: String,
    pub server_status: String,
}

impl UploadRecord {
    pub const SYNCED: &'static str = "synced";

    pub fn merge(upload: FileUpload, owner_id: i64, folder: String) -> Self {
        Self {
            filename: upload.filename,
            content_type: upload.content_type,
            size_mb: upload.size_mb,
            is_public: upload.is_public,
            owner_id,
            folder,
            server_status: Self::SYNCED.to_string(),
        }
    }
}

/// Closed set of team members addressable by path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Me,
    User,
}

impl Team {
    pub const MEMBERS: [&'static str; 2] = ["me", "user"];

    /// Value carried by each member
    pub fn label(&self) -> &'static str {
        match self {
            Team::Me => "gemini",
            Team::User => "developer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{ValidationOutcome, validate_object};

    #[test]
    fn test_user_profile_schema_accepts_adult() {
        let outcome = validate_object(&json!({"username": "abc", "age": 18}), UserProfile::schema());
        let ValidationOutcome::Valid(value) = outcome else {
            panic!("profile should validate");
        };
        let profile: UserProfile = serde_json::from_value(value).unwrap();
        assert_eq!(profile, UserProfile::new("abc", 18));
    }

    #[test]
    fn test_file_upload_defaults_is_public() {
        let outcome = validate_object(
            &json!({"filename": "a.txt", "content_type": "text/plain", "size_mb": 1}),
            FileUpload::schema(),
        );
        let ValidationOutcome::Valid(value) = outcome else {
            panic!("upload should validate");
        };
        let upload: FileUpload = serde_json::from_value(value).unwrap();
        assert!(!upload.is_public);
        assert_eq!(upload.size_mb, 1.0);
    }

    #[test]
    fn test_file_upload_rejects_zero_size() {
        let outcome = validate_object(
            &json!({"filename": "a.txt", "content_type": "text/plain", "size_mb": 0}),
            FileUpload::schema(),
        );
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_upload_record_merge() {
        let upload = FileUpload {
            filename: "a.txt".to_string(),
            content_type: "text/plain".to_string(),
            size_mb: 2.5,
            is_public: true,
        };
        let record = UploadRecord::merge(upload, 5, "general".to_string());
        assert_eq!(record.owner_id, 5);
        assert_eq!(record.folder, "general");
        assert_eq!(record.server_status, "synced");
    }

    #[test]
    fn test_team_members_and_labels() {
        assert_eq!(serde_json::to_value(Team::Me).unwrap(), json!("me"));
        assert_eq!(serde_json::from_value::<Team>(json!("user")).unwrap(), Team::User);
        assert_eq!(Team::Me.label(), "gemini");
        assert_eq!(Team::User.label(), "developer");
    }
}
