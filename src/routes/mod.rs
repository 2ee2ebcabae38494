//! Tutorial API routes
//!
//! Every handler takes a [`Guarded`](crate::core::validation::Guarded) input,
//! so by the time handler code runs all declared constraints hold.
//!
//! - GET  /items/                  - list demo with repeated query values
//! - GET  /items/{item_id}         - path range + optional query pattern
//! - GET  /whois/{name}            - enum path segment
//! - PUT  /update-profile/{user_id} - path, embedded body fields and query flag
//! - POST /upload/{user_id}        - body model, query defaults, secret check
//! - POST /users/                  - append to the user list
//! - GET  /users/{user_id}         - index lookup in the user list

pub mod items;
pub mod profile;
pub mod team;
pub mod upload;
pub mod users;

use crate::core::store::{UploadStore, UserStore};
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

/// Shared state for the tutorial handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub uploads: Arc<dyn UploadStore>,
    /// Expected `secret_key` for uploads
    pub upload_secret: Arc<str>,
}

/// Build the tutorial routes
pub fn tutorial_routes(state: AppState) -> Router {
    Router::new()
        .route("/items/", get(items::read_items))
        .route("/items/{item_id}", get(items::read_item))
        .route("/whois/{name}", get(team::get_team))
        .route("/update-profile/{user_id}", put(profile::update_user))
        .route("/upload/{user_id}", post(upload::process_user_upload))
        .route("/users/", post(users::create_user))
        .route("/users/{user_id}", get(users::get_user))
        .with_state(state)
}
