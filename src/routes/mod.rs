use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::alert::Notifier;
use crate::Config;

mod health;
mod live;
mod readings;

// ---

/// State shared by every route: the connection pool, the immutable config
/// snapshot, one outbound HTTP client, and the notification channel
/// constructed at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub http: reqwest::Client,
    pub notifier: Arc<dyn Notifier>,
}

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(readings::router())
        .merge(live::router())
        .merge(health::router())
        .with_state(state)
}
