use agrosense::logging::init_tracing;
use agrosense::metrics::init_metrics;
use agrosense::router::{init_auth_app, init_ingest_app, init_parcels_app, init_sensors_app};
use agrosense::state::{AuthState, ParcelsState, ReadingsState};
use agrosense_config::{
    CorsConfig, DatabaseConfig, DedupPolicy, IngestConfig, JwtConfig, ObservabilityConfig,
    ServerConfig, Service,
};
use agrosense_db::{PgPool, init_db_pool};
use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "agrosense")]
#[command(about = "Run one agrosense HTTP service", long_about = None)]
struct Args {
    /// Service to run: auth, sensors, ingest or parcels
    service: Service,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let observability = ObservabilityConfig::from_env()?;
    init_tracing(args.service, &observability)?;

    if let Err(err) = run(args.service, &observability).await {
        error!(service = %args.service, error = %err, "Service failed");
        return Err(err);
    }

    Ok(())
}

async fn connect(database_config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    init_db_pool(database_config)
        .await
        .context("Failed to connect to database")
}

async fn run(service: Service, observability: &ObservabilityConfig) -> anyhow::Result<()> {
    let server_config = ServerConfig::from_env(service);
    let cors_config = CorsConfig::from_env();
    let database_config = DatabaseConfig::from_env()?;

    let app = match service {
        Service::Auth => {
            // A missing secret stops startup before any connection is opened.
            let jwt_config = JwtConfig::from_env()?;
            let pool = connect(&database_config).await?;
            let metrics_handle = init_metrics(observability.metrics_enabled)?;
            init_auth_app(
                AuthState::from_pool(pool, jwt_config),
                &cors_config,
                metrics_handle,
            )
        }
        Service::Sensors => {
            let pool = connect(&database_config).await?;
            let metrics_handle = init_metrics(observability.metrics_enabled)?;
            init_sensors_app(
                ReadingsState::from_pool(pool, DedupPolicy::UpsertByTimestamp),
                &cors_config,
                metrics_handle,
            )
        }
        Service::Ingest => {
            let ingest_config = IngestConfig::from_env()?;
            let pool = connect(&database_config).await?;
            let metrics_handle = init_metrics(observability.metrics_enabled)?;
            info!(policy = %ingest_config.dedup_policy, "Ingest dedup policy");
            init_ingest_app(
                ReadingsState::from_pool(pool, ingest_config.dedup_policy),
                &cors_config,
                metrics_handle,
            )
        }
        Service::Parcels => {
            let pool = connect(&database_config).await?;
            let metrics_handle = init_metrics(observability.metrics_enabled)?;
            init_parcels_app(ParcelsState::from_pool(pool), &cors_config, metrics_handle)
        }
    };

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(service = %service, address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
