//! Post handlers: list, create, get, update, delete.

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

use crate::db::{
    post_create, post_delete, post_get_by_id, post_list, post_update, user_find_by_username,
};
use crate::error::AppError;
use crate::handlers::extract::{AppJson, AppPath};
use crate::handlers::http::AppState;
use crate::models::{
    reject_blank, require, validate_body, CreatePostRequest,
    MessageResponse, Post, UpdatePostRequest,
};

/// GET /posts
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let rows = post_list(state.db()).await?;
    Ok(Json(rows.into_iter().map(Post::from).collect()))
}

/// POST /posts — the author is resolved by `username` before anything is written.
pub async fn create_post(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let username = require("username", body.username.as_deref())?;
    let title = require("title", body.title.as_deref())?;
    validate_body(&body)?;

    let mut tx = state.db().begin().await?;
    let author = user_find_by_username(&mut *tx, &username)
        .await?
        .ok_or_else(|| {
            debug!(username = %username, "post author lookup missed");
            AppError::NotFound("user")
        })?;
    let post = post_create(&mut *tx, &title, body.content.as_deref(), author.id).await?;
    tx.commit().await?;

    info!(post_id = post.id, user_id = author.id, "post created");
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Post>, AppError> {
    let post = post_get_by_id(state.db(), id).await?.ok_or_else(|| {
        debug!(post_id = id, "post lookup missed");
        AppError::NotFound("post")
    })?;
    Ok(Json(post.into()))
}

/// PUT /posts/:id — absent keys keep their value; an unknown `username` keeps the old author.
pub async fn update_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    reject_blank("title", body.title.as_deref())?;
    validate_body(&body)?;

    let mut tx = state.db().begin().await?;
    let current = post_get_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::NotFound("post"))?;

    let title = body.title.unwrap_or(current.title);
    let content = body.content.unwrap_or(current.content);
    let user_id = match body.username {
        Some(username) => match user_find_by_username(&mut *tx, &username).await? {
            Some(user) => user.id,
            None => {
                debug!(post_id = id, username = %username, "reassignment target not found, keeping author");
                current.user_id
            }
        },
        None => current.user_id,
    };

    let post = post_update(&mut *tx, id, &title, content.as_deref(), user_id).await?;
    tx.commit().await?;

    info!(post_id = id, user_id, "post updated");
    Ok(Json(post.into()))
}

/// DELETE /posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = state.db().begin().await?;
    post_get_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::NotFound("post"))?;

    if !post_delete(&mut *tx, id).await? {
        return Err(AppError::NotFound("post"));
    }
    tx.commit().await?;

    info!(post_id = id, "post deleted");
    Ok(Json(MessageResponse::new("Post deleted")))
}
