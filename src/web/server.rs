//! Web server for Pluma.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::db::SessionRepository;
use crate::Database;

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: Database) -> Self {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .expect("Invalid web server address");

        let app_state = AppState::new(
            db,
            config.pagination.per_page,
            Duration::from_secs(config.cache.index_ttl_secs),
            config.server.session_expiry_days,
        );

        Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.server.cors_origins.clone(),
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the session cleanup background task.
    ///
    /// Runs every hour and deletes expired and revoked sessions.
    fn start_session_cleanup_task(db: Database) {
        tokio::spawn(async move {
            const CLEANUP_INTERVAL_SECS: u64 = 3600;

            let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let repo = SessionRepository::new(db.pool());
                match repo.cleanup_expired().await {
                    Ok(count) => {
                        if count > 0 {
                            tracing::info!(
                                deleted_count = count,
                                "Cleaned up expired/revoked sessions"
                            );
                        } else {
                            tracing::debug!("No expired sessions to clean up");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to cleanup sessions");
                    }
                }
            }
        });
    }

    fn build_router(&self) -> axum::Router {
        create_router(self.app_state.clone(), &self.cors_origins).merge(create_health_router())
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.build_router();
        let db = self.app_state.db.clone();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_cleanup_task(db);
        tracing::info!("Session cleanup task started (runs every hour)");
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = self.build_router();
        let db = self.app_state.db.clone();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_cleanup_task(db);
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
