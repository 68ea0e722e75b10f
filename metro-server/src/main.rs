use std::net::SocketAddr;
use std::process::ExitCode;
use std::str::FromStr;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use metro_server::cache::CacheConfig;
use metro_server::planner::SearchConfig;
use metro_server::source::load_catalog;
use metro_server::web::{AppState, create_router};

const DEFAULT_CATALOG: &str = "data/lines.json";

/// Read an environment variable, falling back to `default` when it is unset
/// or does not parse.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, "Ignoring invalid setting");
            default
        }),
        Err(_) => default,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("metro_server=info,tower_http=info")),
        )
        .init();

    let catalog_path =
        std::env::var("METRO_CATALOG").unwrap_or_else(|_| DEFAULT_CATALOG.to_string());

    // Load the catalog (fail fast if unusable)
    let catalog = match load_catalog(&catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "Failed to load station catalog");
            return ExitCode::FAILURE;
        }
    };

    let defaults = SearchConfig::default();
    let mut search_config = SearchConfig::new(
        env_or("METRO_THRESHOLD_M", defaults.default_threshold_m),
        defaults.max_threshold_m,
        env_or("METRO_CLUSTERING", defaults.strategy),
    );
    if !search_config.accepts_threshold(search_config.default_threshold_m) {
        warn!(
            threshold = search_config.default_threshold_m,
            "Default threshold out of range, using {}", defaults.default_threshold_m
        );
        search_config.default_threshold_m = defaults.default_threshold_m;
    }
    info!(
        threshold = search_config.default_threshold_m,
        strategy = %search_config.strategy,
        "Search configured"
    );

    let state = AppState::new(catalog, &CacheConfig::default(), search_config);
    let app = create_router(state);

    let addr = env_or("METRO_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("Metro route planner listening on http://{addr}");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/stations         - All station names");
    info!("  GET  /api/stations/search  - Station autocomplete");
    info!("  GET  /api/lines            - Lines with colours");
    info!("  GET  /route                - Route search");
    info!("  POST /api/routes/batch     - Routes between every pair");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
