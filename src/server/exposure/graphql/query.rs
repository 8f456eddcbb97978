//! Root query resolvers

use super::types::{PostObject, UserObject};
use super::{nullable, resolver_error, store};
use crate::core::{PostFilter, parse_id};
use async_graphql::{Context, ID, Object, Result};

#[derive(Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// All published posts
    async fn feed(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let posts = store(ctx)?
            .find_posts(&PostFilter::published())
            .await
            .map_err(resolver_error)?;

        Ok(posts.into_iter().map(PostObject).collect())
    }

    /// A single post by id, or null when it does not exist
    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<Option<PostObject>> {
        let store = store(ctx)?;

        let post = match parse_id(&id) {
            Ok(id) => store.find_post(id).await,
            Err(e) => Err(e.into()),
        };

        Ok(nullable(ctx, post).flatten().map(PostObject))
    }

    /// A single user by email, or null when it does not exist
    async fn get_user(&self, ctx: &Context<'_>, email: String) -> Result<Option<UserObject>> {
        let user = store(ctx)?.find_user_by_email(&email).await;

        Ok(nullable(ctx, user).flatten().map(UserObject))
    }
}
