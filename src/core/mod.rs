//! Core module containing the validation pipeline, errors, models and store traits

pub mod error;
pub mod model;
pub mod store;
pub mod validation;

pub use error::{GuardError, GuardResult};
pub use model::{FileUpload, Team, UploadRecord, UserProfile};
pub use store::{UploadStore, UserStore};
