use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tipitaka_app::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tipitaka_app=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tipitaka_app::startup::run(AppConfig::default()).await
}
