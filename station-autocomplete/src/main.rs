use station_autocomplete::autocomplete::Autocomplete;
use station_autocomplete::catalog::CsvStationSource;
use station_autocomplete::config::ServerConfig;
use station_autocomplete::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env()?;
    let source = CsvStationSource::new(&config.stations_csv);
    let autocomplete = Autocomplete::new(source, config.limits);

    let limits = autocomplete.limits();
    info!(
        addr = %config.addr,
        stations_csv = %config.stations_csv.display(),
        min_query_length = limits.min_length,
        max_query_length = limits.max_length,
        "Starting station autocomplete server"
    );

    // A failed preload is not fatal; the first lookup retries the load.
    if config.preload {
        match autocomplete.preload().await {
            Ok(()) => info!(
                stations = autocomplete.index().station_count(),
                tokens = autocomplete.index().token_count(),
                "station index preloaded"
            ),
            Err(e) => warn!(error = %e, "station index preload failed"),
        }
    }

    let state = AppState::new(autocomplete);
    let app = create_router(state);

    info!(addr = %config.addr, "listening; GET /api/v1/auto-complete/:query");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
