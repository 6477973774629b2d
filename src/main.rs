//! Mercato usage tracker demo agent.
//!
//! Wires the file store, the HTTP collector client, and the tracker the
//! way the mobile shell does, then simulates a session of marketplace
//! activity on a ticker until Ctrl+C. Shutdown ends the session, which
//! force-flushes whatever is still pending.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use collector_client::{CollectorConfig, HttpCollector};
use store::{FileStore, FileStoreConfig};
use telemetry::init_tracing_from_env;
use tracker::{FixedLocation, LocationProvider, Tracker, TrackerConfig};
use tracker_core::{GeoPoint, ItemKind};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    /// User the demo session is attributed to
    #[serde(default = "default_user_id")]
    user_id: String,

    /// Seconds between simulated actions
    #[serde(default = "default_tick_secs")]
    tick_secs: u64,

    #[serde(default)]
    store: FileStoreConfig,

    #[serde(default)]
    collector: CollectorConfig,
}

fn default_user_id() -> String {
    "demo-user".to_string()
}

fn default_tick_secs() -> u64 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            tick_secs: default_tick_secs(),
            store: FileStoreConfig::default(),
            collector: CollectorConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting Mercato usage tracker v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    info!(
        collector = %config.collector.base_url,
        store = %config.store.dir.display(),
        "Loaded configuration"
    );

    let store = Arc::new(FileStore::new(config.store.clone()).context("Failed to open file store")?);
    let collector =
        Arc::new(HttpCollector::new(config.collector.clone()).context("Failed to build collector client")?);
    let tracker = Arc::new(Tracker::new(store, collector, TrackerConfig::default()));
    let location = FixedLocation(GeoPoint::new(19.4326, -99.1332));

    tracker.initialize(&config.user_id).await;

    let mut ticker = tokio::time::interval(Duration::from_secs(config.tick_secs.max(1)));
    let mut step: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                simulate_action(&tracker, &location, step).await;
                step += 1;
            }
            _ = shutdown_signal() => {
                break;
            }
        }
    }

    info!("Shutting down...");
    tracker.dispose().await;

    let usage = tracker.usage_summary();
    info!(
        sessions = usage.total_sessions,
        avg_session_secs = usage.average_session_duration,
        pending = tracker.pending_events(),
        top_categories = ?usage.popular_categories(3),
        "Shutdown complete"
    );
    Ok(())
}

/// One simulated marketplace action per tick, rotating deterministically.
async fn simulate_action(tracker: &Tracker, location: &impl LocationProvider, step: u64) {
    const CATEGORIES: [&str; 4] = ["electronics", "furniture", "vehicles", "services"];
    const QUERIES: [&str; 4] = ["used bikes", "standing desk", "plumber", "phone repair"];

    let pick = (step / 7) as usize;
    match step % 7 {
        0 => {
            tracker
                .track_item_view(
                    &format!("p-{step}"),
                    ItemKind::Product,
                    Some(CATEGORIES[pick % CATEGORIES.len()]),
                )
                .await;
        }
        1 => {
            tracker
                .track_search(QUERIES[pick % QUERIES.len()], (step % 30) as u32)
                .await;
        }
        2 => {
            tracker
                .track_item_view(&format!("j-{step}"), ItemKind::Job, Some("services"))
                .await;
        }
        3 => {
            tracker
                .track_favorite_toggle(&format!("p-{step}"), ItemKind::Product, step % 2 == 0)
                .await;
        }
        4 => {
            if let Some(point) = location.current().await {
                tracker.track_location_change(point).await;
            }
        }
        5 => {
            tracker
                .track_item_view(&format!("c-{step}"), ItemKind::Consultation, None)
                .await;
        }
        _ => {
            tracker
                .track_share_item(&format!("p-{step}"), Some("copy_link"))
                .await;
        }
    }
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("MERCATO")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested sections; the config crate's nested env
    // parsing is unreliable with underscored field names
    if let Ok(base_url) = std::env::var("MERCATO_COLLECTOR_BASE_URL") {
        config.collector.base_url = base_url;
    }
    if let Ok(token) = std::env::var("MERCATO_COLLECTOR_API_TOKEN") {
        config.collector.api_token = token;
    }
    if let Ok(dir) = std::env::var("MERCATO_STORE_DIR") {
        config.store.dir = dir.into();
    }
    if let Ok(user_id) = std::env::var("MERCATO_USER_ID") {
        config.user_id = user_id;
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
