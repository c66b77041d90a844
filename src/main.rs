use anyhow::Context;
use axum::ServiceExt;
use grit_blog::config::Config;
use grit_blog::mail::{LogRelay, SmtpRelay};
use grit_blog::state::State;
use grit_blog::store::PostStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grit_blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::new().context("error reading configuration")?;

    let store = PostStore::new(&config.database_path);
    store
        .migrate()
        .await
        .with_context(|| format!("error preparing database {:?}", store.path()))?;
    tracing::info!("Using database {:?}", store.path());

    let state = match &config.smtp {
        Some(smtp) => {
            let relay = SmtpRelay::new(smtp).context("error setting up mail relay")?;
            tracing::info!("Relaying contact messages through {} to {}", smtp.host, smtp.mailbox);
            State::new(store, relay, config.secret_key)
        }
        None => {
            tracing::warn!("SMTP_HOST is not set, contact messages will only be logged");
            State::new(store, LogRelay, config.secret_key)
        }
    };

    let app = grit_blog::routes::app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.server_addr)
        .await
        .with_context(|| format!("error binding {}", config.server_addr))?;
    tracing::info!("Listening on {}", config.server_addr);

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .await
    .context("error serving app")
}
