use crate::auth::hash_password;
use crate::state::AppState;
use crate::web::api::middleware::AuthUser;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bruger_common::models::user::User;
use bruger_common::validation::{validate_email, validate_password};
use bruger_db::{DbError, UserRepo, UserRow};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

fn read_model(user: &UserRow) -> User {
    User {
        id: user.id,
        email: user.email.clone(),
        full_name: user.full_name.clone(),
    }
}

fn validation_error(issues: Vec<String>) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "ValidationError", "detail": issues.join("; ")})),
    )
        .into_response()
}

/// POST /users - Create a user (public)
#[tracing::instrument(skip(state, req))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> impl IntoResponse {
    let (email, password) = match (&req.email, &req.password) {
        (Some(e), Some(p)) => (e.as_str(), p.as_str()),
        _ => {
            return validation_error(vec!["email and password are required".to_string()]);
        }
    };

    let mut issues = validate_email(email);
    issues.extend(validate_password(password));
    if !issues.is_empty() {
        return validation_error(issues);
    }

    let password_hash = match hash_password(password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response();
        }
    };

    match UserRepo::create(&state.pool, email, &password_hash, req.full_name.as_deref()).await {
        Ok(user) => (StatusCode::CREATED, Json(read_model(&user))).into_response(),
        Err(DbError::DuplicateEmail) => (
            StatusCode::CONFLICT,
            Json(json!({"error": "Conflict", "detail": "Email already exists"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create user: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// GET /users - List users (public, paginated)
#[tracing::instrument(skip(state))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);

    match UserRepo::list(&state.pool, limit, offset).await {
        Ok(users) => {
            let users: Vec<User> = users.iter().map(read_model).collect();
            Json(users).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to list users: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// GET /users/{id} - Get a user by id (public)
#[tracing::instrument(skip(state))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match UserRepo::get_by_id(&state.pool, id).await {
        Ok(Some(user)) => Json(read_model(&user)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "NotFound"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to get user: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// PATCH /users/{id} - Partial update (auth required)
#[tracing::instrument(skip(state, _auth, req))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    let mut issues = Vec::new();
    if let Some(email) = req.email.as_deref() {
        issues.extend(validate_email(email));
    }
    if let Some(password) = req.password.as_deref() {
        issues.extend(validate_password(password));
    }
    if !issues.is_empty() {
        return validation_error(issues);
    }

    let password_hash = match req.password.as_deref() {
        Some(p) => match hash_password(p) {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::error!("Failed to hash password: {:#}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                )
                    .into_response();
            }
        },
        None => None,
    };

    match UserRepo::update(
        &state.pool,
        id,
        req.email.as_deref(),
        password_hash.as_deref(),
        req.full_name.as_deref(),
    )
    .await
    {
        Ok(Some(user)) => Json(read_model(&user)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "NotFound"})),
        )
            .into_response(),
        Err(DbError::DuplicateEmail) => (
            StatusCode::CONFLICT,
            Json(json!({"error": "Conflict", "detail": "Email already exists"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update user: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

/// DELETE /users/{id} - Delete a user (auth required)
#[tracing::instrument(skip(state, _auth))]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match UserRepo::delete(&state.pool, id).await {
        Ok(true) => Json(json!({"status": "deleted"})).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "NotFound"})),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to delete user: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}
