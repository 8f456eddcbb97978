//! Schema construction

use super::mutation::MutationRoot;
use super::query::QueryRoot;
use super::surface;
use crate::core::ConfigError;
use crate::server::host::ServerHost;
use async_graphql::{EmptySubscription, Schema};

pub type BlogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema for `host`
///
/// The store is attached as schema data. Depth and complexity limits come
/// from the GraphQL configuration. The exported SDL is checked against the
/// declared surface before the schema is returned.
pub fn build_schema(host: &ServerHost) -> Result<BlogSchema, ConfigError> {
    let mut builder = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(host.store.clone());

    if let Some(depth) = host.config.graphql.depth_limit {
        builder = builder.limit_depth(depth);
    }
    if let Some(complexity) = host.config.graphql.complexity_limit {
        builder = builder.limit_complexity(complexity);
    }

    let schema = builder.finish();
    surface::verify_sdl(&schema.sdl())?;

    Ok(schema)
}
