//! Cart badge synchronizer.
//!
//! Polls the cart count endpoint and mirrors it into a [`BadgeDisplay`].
//! This is a best-effort display, never a source of truth: failures are
//! logged and the badge keeps its previous value until the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::api::StorefrontClient;
use crate::badge::BadgeDisplay;

/// Keeps a badge in sync with the server-side cart count.
#[derive(Clone)]
pub struct CartBadgeSynchronizer {
    client: StorefrontClient,
    badge: Arc<dyn BadgeDisplay>,
}

impl CartBadgeSynchronizer {
    pub fn new(client: StorefrontClient, badge: Arc<dyn BadgeDisplay>) -> Self {
        Self { client, badge }
    }

    /// Fetch the cart count once and apply it to the badge.
    ///
    /// On success the badge text becomes the count and the badge is shown
    /// iff the count is non-zero. On any failure the badge is left
    /// untouched and the error goes to the log; the next scheduled tick is
    /// the only retry.
    pub async fn refresh(&self) {
        match self.client.cart_count().await {
            Ok(count) => {
                self.badge.set_text(&count.to_string());
                self.badge.set_visible(count > 0);
            }
            Err(e) => {
                tracing::warn!("Cart badge refresh failed: {}", e);
            }
        }
    }

    /// Refresh once immediately, then every `every` until the returned
    /// handle is stopped.
    ///
    /// A slow response delays the following tick instead of bursting
    /// catch-up refreshes, so refreshes never run more often than `every`.
    pub fn start(self, every: Duration) -> SyncHandle {
        let task = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately.
                ticker.tick().await;
                self.refresh().await;
            }
        });
        SyncHandle { task }
    }
}

/// Owned handle to a running badge poll loop.
pub struct SyncHandle {
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Stop polling. A refresh already in flight is cancelled; the badge
    /// keeps whatever value it last showed.
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU64, Ordering};

    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    use crate::badge::SharedBadge;

    /// Serve `app` on an ephemeral port and return its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Router serving a fixed count, recording hits.
    fn count_app(count: u64, hits: Arc<AtomicU64>) -> Router {
        Router::new().route(
            "/api/cart/count",
            get(move || async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "count": count }))
            }),
        )
    }

    fn synchronizer(base_url: String) -> (CartBadgeSynchronizer, Arc<SharedBadge>) {
        let badge = Arc::new(SharedBadge::new());
        let display: Arc<dyn BadgeDisplay> = badge.clone();
        let sync = CartBadgeSynchronizer::new(StorefrontClient::new(base_url), display);
        (sync, badge)
    }

    #[tokio::test]
    async fn test_refresh_shows_count() {
        let hits = Arc::new(AtomicU64::new(0));
        let base = serve(count_app(3, hits)).await;
        let (sync, badge) = synchronizer(base);

        sync.refresh().await;

        assert_eq!(badge.text(), "3");
        assert!(badge.is_visible());
    }

    #[tokio::test]
    async fn test_refresh_zero_hides_badge() {
        let hits = Arc::new(AtomicU64::new(0));
        let base = serve(count_app(0, hits)).await;
        let (sync, badge) = synchronizer(base);

        sync.refresh().await;

        assert_eq!(badge.text(), "0");
        assert!(!badge.is_visible());
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_badge_unchanged() {
        // Reserve a port with no listener behind it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let (sync, badge) = synchronizer(dead);
        badge.set_text("5");
        badge.set_visible(true);

        sync.refresh().await;

        assert_eq!(badge.text(), "5");
        assert!(badge.is_visible());
    }

    #[tokio::test]
    async fn test_scenario_three_then_zero_then_error() {
        // Responses step through: 3, then 0, then a server error.
        let step = Arc::new(AtomicU64::new(0));
        let app = Router::new().route(
            "/api/cart/count",
            get(move || {
                let step = step.clone();
                async move {
                    match step.fetch_add(1, Ordering::SeqCst) {
                        0 => Ok(Json(json!({ "count": 3 }))),
                        1 => Ok(Json(json!({ "count": 0 }))),
                        _ => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
                    }
                }
            }),
        );
        let (sync, badge) = synchronizer(serve(app).await);

        sync.refresh().await;
        assert_eq!(badge.text(), "3");
        assert!(badge.is_visible());

        sync.refresh().await;
        assert_eq!(badge.text(), "0");
        assert!(!badge.is_visible());

        sync.refresh().await;
        assert_eq!(badge.text(), "0");
        assert!(!badge.is_visible());
    }

    #[tokio::test]
    async fn test_start_refreshes_once_immediately() {
        let hits = Arc::new(AtomicU64::new(0));
        let base = serve(count_app(2, hits.clone())).await;
        let (sync, badge) = synchronizer(base);

        let handle = sync.start(Duration::from_secs(60));
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(badge.text(), "2");
        handle.stop();
    }

    #[tokio::test]
    async fn test_start_repeats_on_interval() {
        let hits = Arc::new(AtomicU64::new(0));
        let base = serve(count_app(1, hits.clone())).await;
        let (sync, _badge) = synchronizer(base);

        let handle = sync.start(Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(450)).await;
        handle.stop();

        let seen = hits.load(Ordering::SeqCst);
        assert!(seen >= 3, "expected repeated refreshes, saw {}", seen);
        // Never more frequent than the interval.
        assert!(seen <= 6, "refreshed too often: {}", seen);
    }

    #[tokio::test]
    async fn test_stop_halts_polling() {
        let hits = Arc::new(AtomicU64::new(0));
        let base = serve(count_app(1, hits.clone())).await;
        let (sync, _badge) = synchronizer(base);

        let handle = sync.start(Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(handle.is_running());
        handle.stop();

        tokio::time::sleep(Duration::from_millis(50)).await;
        let at_stop = hits.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), at_stop);
    }
}
