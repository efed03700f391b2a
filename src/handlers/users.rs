//! User handlers: list, create, get, update, delete.

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

use crate::db::{
    user_create, user_delete, user_get_by_id, user_list, user_post_count, user_update_username,
};
use crate::error::AppError;
use crate::handlers::extract::{AppJson, AppPath};
use crate::handlers::http::AppState;
use crate::models::{
    reject_blank, require, validate_body, CreateUserRequest,
    MessageResponse, UpdateUserRequest, User,
};

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let rows = user_list(state.db()).await?;
    Ok(Json(rows.into_iter().map(User::from).collect()))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let username = require("username", body.username.as_deref())?;
    validate_body(&body)?;

    let mut tx = state.db().begin().await?;
    let user = user_create(&mut *tx, &username).await?;
    tx.commit().await?;

    info!(user_id = user.id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<User>, AppError> {
    let user = user_get_by_id(state.db(), id).await?.ok_or_else(|| {
        debug!(user_id = id, "user lookup missed");
        AppError::NotFound("user")
    })?;
    Ok(Json(user.into()))
}

/// PUT /users/:id — replace username when provided.
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    reject_blank("username", body.username.as_deref())?;
    validate_body(&body)?;

    let mut tx = state.db().begin().await?;
    let current = user_get_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let user = match body.username {
        Some(username) if username != current.username => {
            user_update_username(&mut *tx, id, &username).await?
        }
        _ => current,
    };
    tx.commit().await?;

    info!(user_id = id, username = %user.username, "user updated");
    Ok(Json(user.into()))
}

/// DELETE /users/:id — refused while the user still owns posts.
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = state.db().begin().await?;
    user_get_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let posts = user_post_count(&mut *tx, id).await?;
    if posts > 0 {
        return Err(AppError::Conflict(format!("user still has {posts} post(s)")));
    }

    if !user_delete(&mut *tx, id).await? {
        return Err(AppError::NotFound("user"));
    }
    tx.commit().await?;

    info!(user_id = id, "user deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}
