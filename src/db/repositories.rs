//! Repositories: users and their posts.
//!
//! Every function takes any `PgExecutor`, so handlers can pass the pool for
//! plain reads or `&mut *tx` to run inside the request's transaction.

use crate::error::{AppError, AppResult};
use sqlx::{FromRow, PgExecutor};

// ---- User ----

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
}

pub async fn user_list<'e, E>(executor: E) -> AppResult<Vec<UserRow>>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, UserRow>("SELECT id, username FROM users ORDER BY id")
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

pub async fn user_get_by_id<'e, E>(executor: E, id: i64) -> AppResult<Option<UserRow>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, UserRow>("SELECT id, username FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn user_find_by_username<'e, E>(executor: E, username: &str) -> AppResult<Option<UserRow>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, UserRow>("SELECT id, username FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn user_create<'e, E>(executor: E, username: &str) -> AppResult<UserRow>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (username) VALUES ($1) RETURNING id, username",
    )
    .bind(username)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "username already exists"))
}

pub async fn user_update_username<'e, E>(executor: E, id: i64, username: &str) -> AppResult<UserRow>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, UserRow>(
        "UPDATE users SET username = $2 WHERE id = $1 RETURNING id, username",
    )
    .bind(id)
    .bind(username)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "username already exists"))
}

/// Number of posts still referencing the user.
pub async fn user_post_count<'e, E>(executor: E, id: i64) -> AppResult<i64>
where
    E: PgExecutor<'e>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE user_id = $1")
        .bind(id)
        .fetch_one(executor)
        .await?;
    Ok(count)
}

pub async fn user_delete<'e, E>(executor: E, id: i64) -> AppResult<bool>
where
    E: PgExecutor<'e>,
{
    let r = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| AppError::conflict_on_foreign_key(e, "user still has posts"))?;
    Ok(r.rows_affected() > 0)
}

// ---- Post ----

/// A post joined with its author's username.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub user_id: i64,
    pub author: Option<String>,
}

const POST_SELECT: &str = r#"
    SELECT p.id, p.title, p.content, p.user_id, u.username AS author
    FROM posts p
    LEFT JOIN users u ON u.id = p.user_id
"#;

pub async fn post_list<'e, E>(executor: E) -> AppResult<Vec<PostRow>>
where
    E: PgExecutor<'e>,
{
    let sql = format!("{POST_SELECT} ORDER BY p.id");
    let rows = sqlx::query_as::<_, PostRow>(&sql)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

pub async fn post_get_by_id<'e, E>(executor: E, id: i64) -> AppResult<Option<PostRow>>
where
    E: PgExecutor<'e>,
{
    let sql = format!("{POST_SELECT} WHERE p.id = $1");
    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn post_create<'e, E>(
    executor: E,
    title: &str,
    content: Option<&str>,
    user_id: i64,
) -> AppResult<PostRow>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        WITH inserted AS (
            INSERT INTO posts (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, user_id
        )
        SELECT i.id, i.title, i.content, i.user_id, u.username AS author
        FROM inserted i
        LEFT JOIN users u ON u.id = i.user_id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::not_found_on_foreign_key(e, "user"))?;
    Ok(row)
}

/// Overwrite every mutable column of a post; callers merge unchanged fields first.
pub async fn post_update<'e, E>(
    executor: E,
    id: i64,
    title: &str,
    content: Option<&str>,
    user_id: i64,
) -> AppResult<PostRow>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        WITH updated AS (
            UPDATE posts SET title = $2, content = $3, user_id = $4
            WHERE id = $1
            RETURNING id, title, content, user_id
        )
        SELECT p.id, p.title, p.content, p.user_id, u.username AS author
        FROM updated p
        LEFT JOIN users u ON u.id = p.user_id
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::not_found_on_foreign_key(e, "user"))?;
    Ok(row)
}

pub async fn post_delete<'e, E>(executor: E, id: i64) -> AppResult<bool>
where
    E: PgExecutor<'e>,
{
    let r = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(r.rows_affected() > 0)
}
