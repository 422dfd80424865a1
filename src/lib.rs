//! Client-side sync for a storefront HTTP API.
//!
//! The core is [`CartBadgeSynchronizer`], which polls the server's cart
//! count and mirrors it into an injected [`BadgeDisplay`]. Around it sit
//! the typed API client, persisted settings, and an auto-dismissing flash
//! board.

mod api;
mod badge;
mod config;
mod error;
mod flash;
mod sync;

use std::sync::Arc;

pub use api::StorefrontClient;
pub use badge::{BadgeDisplay, SharedBadge};
pub use config::{Settings, DEFAULT_BASE_URL};
pub use error::{Result, StorefrontError};
pub use flash::{FlashBoard, FlashLevel, FlashMessage};
pub use sync::{CartBadgeSynchronizer, SyncHandle};

/// Initialize logging with an env-filter override.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("storefront_sync=info")),
        )
        .init();
}

/// Wire a badge poll loop from settings: one immediate refresh, then one
/// per configured interval, until the returned handle is stopped.
pub fn start_badge_sync(settings: &Settings, badge: Arc<dyn BadgeDisplay>) -> SyncHandle {
    let client = StorefrontClient::new(settings.base_url.clone());
    tracing::info!(
        "Starting cart badge sync against {} every {}s",
        settings.base_url,
        settings.poll_interval_secs
    );
    CartBadgeSynchronizer::new(client, badge).start(settings.poll_interval())
}
