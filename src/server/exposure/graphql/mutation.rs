//! Root mutation resolvers

use super::types::{PostObject, UserCreateInput, UserObject};
use super::{nullable, resolver_error, store};
use crate::core::{NewDraft, parse_id};
use async_graphql::{Context, ID, Object, Result};

#[derive(Default)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Create a user, along with any nested posts, atomically
    async fn create_user(&self, ctx: &Context<'_>, data: UserCreateInput) -> Result<UserObject> {
        tracing::debug!(email = %data.email, "createUser");

        let user = store(ctx)?
            .create_user(data.into())
            .await
            .map_err(resolver_error)?;

        Ok(UserObject(user))
    }

    /// Create an unpublished post, optionally connected to an existing author
    async fn create_draft(
        &self,
        ctx: &Context<'_>,
        author_email: Option<String>,
        content: Option<String>,
        title: String,
    ) -> Result<PostObject> {
        let draft = NewDraft {
            title,
            content,
            author_email,
        };

        let post = store(ctx)?
            .create_draft(draft)
            .await
            .map_err(resolver_error)?;

        Ok(PostObject(post))
    }

    /// Mark a post as published
    async fn publish(&self, ctx: &Context<'_>, id: ID) -> Result<Option<PostObject>> {
        let store = store(ctx)?;

        let post = match parse_id(&id) {
            Ok(id) => {
                tracing::debug!(post_id = id, "publish");
                store.publish_post(id).await
            }
            Err(e) => Err(e.into()),
        };

        Ok(nullable(ctx, post).map(PostObject))
    }

    /// Connect an existing post to the user with the given email
    async fn associate_user_with_post(
        &self,
        ctx: &Context<'_>,
        email: String,
        post_id: ID,
    ) -> Result<Option<UserObject>> {
        let store = store(ctx)?;

        let user = match parse_id(&post_id) {
            Ok(post_id) => {
                tracing::debug!(email = %email, post_id, "associateUserWithPost");
                store.connect_post(&email, post_id).await
            }
            Err(e) => Err(e.into()),
        };

        Ok(nullable(ctx, user).map(UserObject))
    }
}
