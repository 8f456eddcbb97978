//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresStore`, an implementation of the store traits backed by
//! a `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! postboard = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! Users and posts live in two tables. Email uniqueness and the author
//! foreign key are enforced by the database; multi-statement writes run in a
//! transaction.

use crate::core::{
    ApiError, ApiResult, EntityError, NewDraft, NewUser, Post, PostFilter, PostService,
    StorageError, User, UserService,
};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

const BACKEND: &str = "PostgreSQL";

type UserRow = (i64, String, Option<String>);
type PostRow = (i64, String, Option<String>, bool, Option<i64>);

const POST_COLUMNS: &str = "id, title, content, published, author_id";

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required tables and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> ApiResult<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NULL
        )",
        "CREATE TABLE IF NOT EXISTS posts (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NULL,
            published BOOLEAN NOT NULL DEFAULT FALSE,
            author_id BIGINT NULL REFERENCES users(id)
        )",
        "CREATE INDEX IF NOT EXISTS idx_posts_author ON posts (author_id)",
        "CREATE INDEX IF NOT EXISTS idx_posts_published ON posts (published)",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(query_error)?;
    }

    Ok(())
}

fn query_error(e: sqlx::Error) -> ApiError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    }
    .into()
}

fn transaction_error(e: sqlx::Error) -> ApiError {
    StorageError::TransactionError {
        message: e.to_string(),
    }
    .into()
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

fn user_from_row((id, email, name): UserRow) -> User {
    User { id, email, name }
}

fn post_from_row((id, title, content, published, author_id): PostRow) -> Post {
    Post {
        id,
        title,
        content,
        published,
        author_id,
    }
}

// ---------------------------------------------------------------------------
// PostgresStore
// ---------------------------------------------------------------------------

/// Store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// let store = PostgresStore::connect("postgres://localhost/blog", 5).await?;
/// let user = store.create_user(NewUser::new("alice@example.com")).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new `PostgresStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url` and make sure the tables exist.
    pub async fn connect(url: &str, max_connections: u32) -> ApiResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        ensure_schema(&pool).await?;
        tracing::info!(max_connections, "connected to PostgreSQL");

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserService for PostgresStore {
    async fn find_user(&self, id: i64) -> ApiResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, email, name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(row.map(user_from_row))
    }

    async fn find_user_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let row =
            sqlx::query_as::<_, UserRow>("SELECT id, email, name FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(query_error)?;

        Ok(row.map(user_from_row))
    }

    async fn create_user(&self, new_user: NewUser) -> ApiResult<User> {
        let mut tx = self.pool.begin().await.map_err(transaction_error)?;

        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id, email, name",
        )
        .bind(&new_user.email)
        .bind(&new_user.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::from(EntityError::already_exists("User", "email", &new_user.email))
            } else {
                query_error(e)
            }
        })?;
        let user = user_from_row(row);

        for nested in &new_user.posts {
            sqlx::query(
                "INSERT INTO posts (title, content, published, author_id) VALUES ($1, $2, $3, $4)",
            )
            .bind(&nested.title)
            .bind(&nested.content)
            .bind(nested.published)
            .bind(user.id)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;
        }

        tx.commit().await.map_err(transaction_error)?;

        tracing::debug!(user_id = user.id, posts = new_user.posts.len(), "created user");
        Ok(user)
    }

    async fn connect_post(&self, email: &str, post_id: i64) -> ApiResult<User> {
        let mut tx = self.pool.begin().await.map_err(transaction_error)?;

        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name FROM users WHERE email = $1 FOR SHARE",
        )
        .bind(email)
        .fetch_optional(&mut *tx)
        .await
        .map_err(query_error)?
        .map(user_from_row)
        .ok_or_else(|| EntityError::not_found("User", "email", email))?;

        let result = sqlx::query("UPDATE posts SET author_id = $1 WHERE id = $2")
            .bind(user.id)
            .bind(post_id)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(EntityError::not_found("Post", "id", post_id).into());
        }

        tx.commit().await.map_err(transaction_error)?;

        tracing::debug!(user_id = user.id, post_id, "connected post to user");
        Ok(user)
    }
}

#[async_trait]
impl PostService for PostgresStore {
    async fn find_post(&self, id: i64) -> ApiResult<Option<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(row.map(post_from_row))
    }

    async fn find_posts(&self, filter: &PostFilter) -> ApiResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts \
             WHERE ($1::BOOLEAN IS NULL OR published = $1) \
             AND ($2::BIGINT IS NULL OR author_id = $2) \
             ORDER BY id",
            POST_COLUMNS
        );
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(filter.published)
            .bind(filter.author_id)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(rows.into_iter().map(post_from_row).collect())
    }

    async fn create_draft(&self, draft: NewDraft) -> ApiResult<Post> {
        let mut tx = self.pool.begin().await.map_err(transaction_error)?;

        let author_id = match draft.author_email.as_deref() {
            Some(email) => {
                let id = sqlx::query_scalar::<_, i64>(
                    "SELECT id FROM users WHERE email = $1 FOR SHARE",
                )
                .bind(email)
                .fetch_optional(&mut *tx)
                .await
                .map_err(query_error)?
                .ok_or_else(|| EntityError::not_found("User", "email", email))?;
                Some(id)
            }
            None => None,
        };

        let sql = format!(
            "INSERT INTO posts (title, content, published, author_id) \
             VALUES ($1, $2, FALSE, $3) RETURNING {}",
            POST_COLUMNS
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(author_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(query_error)?;

        tx.commit().await.map_err(transaction_error)?;

        let post = post_from_row(row);
        tracing::debug!(post_id = post.id, "created draft");
        Ok(post)
    }

    async fn publish_post(&self, id: i64) -> ApiResult<Post> {
        let sql = format!(
            "UPDATE posts SET published = TRUE WHERE id = $1 RETURNING {}",
            POST_COLUMNS
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?
            .ok_or_else(|| EntityError::not_found("Post", "id", id))?;

        Ok(post_from_row(row))
    }
}
