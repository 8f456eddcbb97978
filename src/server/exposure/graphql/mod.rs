//! GraphQL API exposure
//!
//! The schema is built once from the host and shared by every request.
//! Resolvers reach the store through the schema data, so nothing here
//! knows which backend is in use.

mod mutation;
mod query;
mod schema;
pub mod surface;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use schema::{BlogSchema, build_schema};
pub use types::{PostCreateManyWithoutAuthorInput, PostObject, UserCreateInput, UserObject};

use crate::core::{ApiError, ApiResult, BlogStore};
use crate::server::host::ServerHost;
use anyhow::Result;
use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql::{Context, ErrorExtensions};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::sync::Arc;

/// Store handle attached to the schema
pub(crate) fn store<'a>(ctx: &'a Context<'_>) -> async_graphql::Result<&'a Arc<dyn BlogStore>> {
    ctx.data::<Arc<dyn BlogStore>>()
}

/// Convert a domain error into a field error carrying its code
pub(crate) fn resolver_error(err: impl Into<ApiError>) -> async_graphql::Error {
    let err = err.into();
    tracing::debug!(code = err.error_code(), "{}", err);
    err.extend()
}

/// Resolve a nullable field
///
/// A failure is recorded in the response `errors`, with the field's position
/// and path, and the field itself resolves to `null`.
pub(crate) fn nullable<T>(ctx: &Context<'_>, result: ApiResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            let error = resolver_error(err).into_server_error(ctx.item.pos);
            ctx.add_error(ctx.set_error_path(error));
            None
        }
    }
}

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// Routes:
    /// - `POST /graphql` executes queries and mutations
    /// - `GET /graphql/schema` returns the SDL
    /// - `GET /graphql/playground` serves the playground when enabled
    ///
    /// Fails when the built schema does not match the declared surface.
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let schema = build_schema(&host)?;

        let mut router = Router::new()
            .route("/graphql", post(graphql_handler))
            .route("/graphql/schema", get(graphql_schema));

        if host.config.graphql.playground {
            router = router.route("/graphql/playground", get(graphql_playground));
        }

        Ok(router.with_state(schema))
    }
}

async fn graphql_handler(State(schema): State<BlogSchema>, req: GraphQLRequest) -> GraphQLResponse {
    let request = req.into_inner();
    tracing::debug!(operation = ?request.operation_name, "graphql request");

    schema.execute(request).await.into()
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

async fn graphql_schema(State(schema): State<BlogSchema>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        schema.sdl(),
    )
}
