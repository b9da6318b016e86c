//! Blog backend entry point: load settings, wire the adapters into the
//! workflow services, and serve the axum router.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::AppState;
use auth_adapters::{ArgonPasswordHasher, JwtTokenService};
use chrono::Duration;
use configs::Settings;
use secrecy::ExposeSecret;
use services::{PostService, UserService};
use sqlx::postgres::PgPoolOptions;
use storage_adapters::{postgres, LocalBlobStore, PgPostRepo, PgUserRepo};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    if settings.auth.uses_dev_secret() {
        warn!("running with the built-in development JWT secret; set BLOG__AUTH__JWT_SECRET");
    }

    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await
        .context("failed to connect to Postgres")?;
    postgres::bootstrap_schema(&pool).await?;

    let users: Arc<dyn domains::UserRepo> = Arc::new(PgUserRepo::new(pool.clone()));
    let posts: Arc<dyn domains::PostRepo> = Arc::new(PgPostRepo::new(pool));
    let blobs: Arc<dyn domains::BlobStore> = Arc::new(LocalBlobStore::new(
        settings.media.upload_dir.clone(),
        settings.media.public_prefix.clone(),
    ));
    let passwords: Arc<dyn domains::PasswordHasher> = Arc::new(ArgonPasswordHasher);
    let tokens: Arc<dyn domains::TokenService> = Arc::new(JwtTokenService::new(
        settings.auth.jwt_secret.expose_secret().as_bytes(),
        Duration::hours(settings.auth.token_ttl_hours),
    ));

    let user_service = Arc::new(UserService::new(
        users.clone(),
        blobs.clone(),
        passwords,
        tokens.clone(),
    ));
    let post_service = Arc::new(PostService::new(posts, users, blobs));

    let state = AppState::new(user_service, post_service, tokens);
    let app = api_adapters::router(state, Some(settings.media.upload_dir.clone()));

    let addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "blog server listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
