//! Blog server example
//!
//! Loads the configuration from `POSTBOARD_CONFIG` (a YAML file) or the
//! defaults, applies environment overrides, connects the configured store
//! and serves the API:
//! - GraphQL endpoint at POST /graphql
//! - GraphQL playground at /graphql/playground
//! - Health checks at /health and /healthz
//!
//! The in-memory backend is seeded with a couple of users and posts.

use anyhow::Result;
use postboard::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,postboard=debug,tower_http=debug")),
        )
        .init();

    let config = match std::env::var("POSTBOARD_CONFIG") {
        Ok(path) => ServerConfig::from_yaml_file(&path)?,
        Err(_) => ServerConfig::default(),
    }
    .with_env_overrides()?;

    let store = postboard::storage::connect(&config.storage).await?;

    if config.storage.backend == StorageBackend::InMemory {
        populate_test_data(store.as_ref()).await?;
    }

    println!("🚀 Starting postboard on {}:{}", config.server.host, config.server.port);
    if config.graphql.playground {
        println!(
            "🎮 Playground: http://{}:{}/graphql/playground",
            config.server.host, config.server.port
        );
    }

    ServerBuilder::new()
        .with_config(config)
        .with_shared_store(store)
        .serve()
        .await
}

async fn populate_test_data(store: &dyn BlogStore) -> Result<()> {
    let alice = store
        .create_user(
            NewUser::new("alice@prisma.io")
                .with_name("Alice")
                .with_post(
                    NewAuthoredPost::new("Join the Prisma Slack")
                        .with_content("https://slack.prisma.io")
                        .published(true),
                ),
        )
        .await?;

    store
        .create_user(
            NewUser::new("nilu@prisma.io")
                .with_name("Nilu")
                .with_post(
                    NewAuthoredPost::new("Follow Prisma on Twitter")
                        .with_content("https://www.twitter.com/prisma")
                        .published(true),
                ),
        )
        .await?;

    store
        .create_draft(
            NewDraft::new("Ask a question about Prisma on GitHub")
                .with_content("https://www.github.com/prisma/prisma/discussions")
                .with_author_email(&alice.email),
        )
        .await?;

    tracing::info!("Seeded in-memory store");
    Ok(())
}
