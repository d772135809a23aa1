use checktable_services::{
    config::Config,
    routes,
    storage::{JsonFileStore, TableStore},
    telemetry,
};
use std::net::{IpAddr, SocketAddr};
use tracing::{info, warn};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const BUILD_DATE: &str = env!("BUILD_DATE");
const BUILD_COMMIT: &str = env!("BUILD_COMMIT");
const BUILD_BRANCH: &str = env!("BUILD_BRANCH");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    print_build_info();

    let config = Config::init()?;
    info!(
        server_addr = %config.server_addr(),
        port = %config.port(),
        data_path = %config.data_path().display(),
        public_dir = %config.public_dir().display(),
        "Configuration loaded"
    );

    let store = JsonFileStore::new(config.data_path());

    // The service still starts without a readable table; /api/data answers 500 until it appears.
    match store.load().await {
        Ok(table) => info!(
            columns = table.columns.len(),
            rows = table.rows.len(),
            "Table document loaded"
        ),
        Err(e) => warn!(error = %e, "Table document is not readable"),
    }

    let route = routes(store, config.clone());

    let addr = SocketAddr::from((config.server_addr().parse::<IpAddr>()?, config.port()));

    info!("Server is running on http://localhost:{}", config.port());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, route).await?;

    Ok(())
}

/// Print build information
fn print_build_info() {
    info!("===========================================");
    info!("  checktable");
    info!("===========================================");
    info!("Build Date:   {}", BUILD_DATE);
    info!("Build Commit: {}", BUILD_COMMIT);
    info!("Build Branch: {}", BUILD_BRANCH);
    info!("===========================================");
}
