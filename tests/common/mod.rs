//! Common test utilities and fixtures.
//!
//! This module provides a test application wrapper and request helpers to
//! reduce duplication across the test suite.

#![cfg(feature = "server")]

use axum_test::TestServer;
use save_vault::RetentionPolicy;
use save_vault::server::{
    AppState, Config, CorsConfig, LoggingConfig, ServerConfig, StorageConfig, router,
};
use tempfile::TempDir;

/// Test application wrapper that manages a temporary store.
pub struct TestApp {
    pub server: TestServer,
    _temp_dir: TempDir, // Keep alive for test duration
}

impl TestApp {
    /// Create a new test application with a fresh temporary store and the
    /// default retention policy.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_policy(RetentionPolicy::default())
    }

    /// Create a new test application with the given retention policy.
    pub fn with_policy(policy: RetentionPolicy) -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("db");
        let config = Config {
            server: ServerConfig {
                bind: "127.0.0.1".into(),
                port: 0,
                static_path: None,
            },
            storage: StorageConfig {
                path: db_path.to_string_lossy().into(),
            },
            retention: policy,
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        };
        let state = AppState::from_config(&config)?;
        let server = TestServer::new(router(state))?;
        Ok(Self {
            server,
            _temp_dir: temp_dir,
        })
    }

    /// Submit a save and assert it was accepted.
    pub async fn submit(&self, body: &serde_json::Value) -> anyhow::Result<serde_json::Value> {
        let response = self.server.post("/api/v1/saves").json(body).await;
        response.assert_status_ok();
        Ok(response.json())
    }

    /// Submit one save per day in `days` for a player.
    pub async fn submit_days(
        &self,
        player_id: &str,
        ident: &str,
        days: impl IntoIterator<Item = u32>,
    ) -> anyhow::Result<()> {
        for day in days {
            self.submit(&save_body(player_id, ident, day)).await?;
        }
        Ok(())
    }
}

/// Build a well-formed save request body.
///
/// `day` selects the calendar day of the timestamp so rotation tests can
/// control date-coalescing.
pub fn save_body(player_id: &str, ident: &str, day: u32) -> serde_json::Value {
    save_body_at(player_id, ident, day, 12)
}

/// Like [`save_body`] with an explicit hour, for same-day saves.
pub fn save_body_at(player_id: &str, ident: &str, day: u32, hour: u32) -> serde_json::Value {
    serde_json::json!({
        "playerId": player_id,
        "ident": ident,
        "deviceDescription": "Test Device",
        "timeStamp": format!("2026-08-{:02}T{:02}:00:00Z", day, hour),
        "saveData": {"day": day, "hour": hour}
    })
}

/// Collect the `timeStamp` of every record in a window.
pub fn time_stamps(window: &serde_json::Value) -> Vec<String> {
    window
        .as_array()
        .map(|records| {
            records
                .iter()
                .filter_map(|r| r["timeStamp"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
