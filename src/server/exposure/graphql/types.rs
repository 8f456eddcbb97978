//! GraphQL object and input types
//!
//! `User.posts` and `Post.author` each make two explicit store calls: one to
//! locate the owning record, one to fetch across the relation. Nothing is
//! batched or cached between fields.

use super::{nullable, resolver_error, store};
use crate::core::{ApiResult, NewAuthoredPost, NewUser, Post, PostFilter, User};
use async_graphql::{Context, ID, InputObject, Object, Result};

/// A user account
pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Posts written by this user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let store = store(ctx)?;

        let Some(owner) = store.find_user(self.0.id).await.map_err(resolver_error)? else {
            return Ok(Vec::new());
        };

        let posts = store
            .find_posts(&PostFilter::by_author(owner.id))
            .await
            .map_err(resolver_error)?;

        Ok(posts.into_iter().map(PostObject).collect())
    }
}

/// A post, either a draft or published
pub struct PostObject(pub Post);

#[Object(name = "Post")]
impl PostObject {
    async fn content(&self) -> Option<&str> {
        self.0.content.as_deref()
    }

    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn published(&self) -> bool {
        self.0.published
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    /// The user who wrote this post, if any
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let store = store(ctx)?;

        let author: ApiResult<Option<User>> = match store.find_post(self.0.id).await {
            Ok(Some(Post {
                author_id: Some(author_id),
                ..
            })) => store.find_user(author_id).await,
            Ok(_) => Ok(None),
            Err(e) => Err(e),
        };

        Ok(nullable(ctx, author).flatten().map(UserObject))
    }
}

#[derive(InputObject)]
pub struct UserCreateInput {
    pub email: String,
    pub name: Option<String>,
    pub posts: Option<Vec<PostCreateManyWithoutAuthorInput>>,
}

impl From<UserCreateInput> for NewUser {
    fn from(input: UserCreateInput) -> Self {
        NewUser {
            email: input.email,
            name: input.name,
            posts: input
                .posts
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// A post created together with its author
#[derive(InputObject)]
pub struct PostCreateManyWithoutAuthorInput {
    pub content: Option<String>,
    pub published: Option<bool>,
    pub title: String,
}

impl From<PostCreateManyWithoutAuthorInput> for NewAuthoredPost {
    fn from(input: PostCreateManyWithoutAuthorInput) -> Self {
        NewAuthoredPost {
            title: input.title,
            content: input.content,
            published: input.published.unwrap_or(false),
        }
    }
}
