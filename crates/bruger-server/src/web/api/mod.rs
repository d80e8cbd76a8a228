pub mod auth;
pub mod middleware;
pub mod users;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // User routes; PATCH and DELETE require a bearer token
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        // Auth routes
        .route("/auth/login", post(auth::login))
        .with_state(state)
}
