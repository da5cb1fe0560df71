//! Startup sequencing: resolve assets, open the browser, then bind the listener.
//!
//! The browser is launched before the listener binds on purpose. If the port is
//! already taken by a previous instance, the user still lands on a working page
//! served by that instance; the launch attempt is given a bounded deadline so a
//! slow or failing opener can never wedge startup.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::assets;
use crate::config::AppConfig;
use crate::handlers::{DictHandler, FtsHandler};
use crate::query::QueryDispatcher;
use crate::server;
use crate::state::AppState;

/// Issue the OS "open default browser" action and wait for it to finish, up to
/// `deadline`. Failure or timeout is logged and swallowed: the user can always
/// navigate manually.
pub async fn launch_browser(url: &str, deadline: Duration) {
    let target = url.to_string();
    let launch = tokio::task::spawn_blocking(move || open::that(&target));

    match tokio::time::timeout(deadline, launch).await {
        Ok(Ok(Ok(()))) => tracing::info!("opened browser at {}", url),
        Ok(Ok(Err(err))) => tracing::warn!("failed to open browser at {}: {}", url, err),
        Ok(Err(err)) => tracing::warn!("browser launch task failed: {}", err),
        Err(_) => tracing::warn!(
            "browser launch did not finish within {:?}, continuing startup",
            deadline
        ),
    }
}

/// Run the application. Executed exactly once per process.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let candidates = assets::candidate_dirs();
    let asset_dir = assets::resolve_asset_dir(&candidates)?;

    let dispatcher = QueryDispatcher::new(
        Arc::new(FtsHandler::new(&asset_dir)),
        Arc::new(DictHandler::new(&asset_dir)),
    );
    let state = Arc::new(AppState { dispatcher });
    let app = server::build_router(state, &asset_dir);

    launch_browser(&config.local_url(), config.browser_deadline).await;

    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr).await.with_context(|| {
        format!(
            "failed to bind {} (is another instance already running?)",
            bind_addr
        )
    })?;

    tracing::info!("listening at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
