//! Service traits for user and post storage
//!
//! Resolvers only talk to these traits. Each method is one round-trip to the
//! backing store, and the store is responsible for email uniqueness, author
//! referential integrity and the atomicity of nested creates.

use crate::core::entity::{NewDraft, NewUser, Post, PostFilter, User};
use crate::core::error::ApiResult;
use async_trait::async_trait;

/// Store operations on users
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get a user by primary key
    async fn find_user(&self, id: i64) -> ApiResult<Option<User>>;

    /// Get a user by unique email
    async fn find_user_by_email(&self, email: &str) -> ApiResult<Option<User>>;

    /// Create a user and its nested posts as one atomic operation
    ///
    /// Fails with `EntityError::AlreadyExists` when the email is taken; in
    /// that case neither the user nor any of its posts are stored.
    async fn create_user(&self, user: NewUser) -> ApiResult<User>;

    /// Connect an existing post to the existing user identified by `email`
    ///
    /// Returns the (unchanged) user row. Fails with `EntityError::NotFound`
    /// if either side is missing.
    async fn connect_post(&self, email: &str, post_id: i64) -> ApiResult<User>;
}

/// Store operations on posts
#[async_trait]
pub trait PostService: Send + Sync {
    /// Get a post by primary key
    async fn find_post(&self, id: i64) -> ApiResult<Option<Post>>;

    /// List posts matching `filter`, ordered by id
    async fn find_posts(&self, filter: &PostFilter) -> ApiResult<Vec<Post>>;

    /// Create an unpublished post, connecting its author by email if given
    ///
    /// Fails with `EntityError::NotFound` when `author_email` does not
    /// resolve to an existing user.
    async fn create_draft(&self, draft: NewDraft) -> ApiResult<Post>;

    /// Mark a post as published
    ///
    /// Publishing an already published post is a no-op that returns it.
    async fn publish_post(&self, id: i64) -> ApiResult<Post>;
}

/// Everything the GraphQL layer needs from a backend
pub trait BlogStore: UserService + PostService {}

impl<T: UserService + PostService> BlogStore for T {}
