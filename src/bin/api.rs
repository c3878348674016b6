use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use host_monit::{
    Monitor,
    alerts::AlertDispatcher,
    api::{self, ApiConfig, ApiState},
    config::ConfigProvider,
    logging::{DEFAULT_LOG_BACKUPS, DEFAULT_LOG_MAX_BYTES, RotatingFileWriter},
    monitors::SysinfoSampler,
    pipeline::ProbeSettings,
    storage::{MemoryReportStore, ReportStore},
    util::{get_bind_addr, get_config_path, get_database_path},
};
use tracing::{info, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Monitoring config file (created with defaults if missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database holding the reports
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Keep reports in memory only
    #[arg(long)]
    in_memory: bool,

    /// Address to listen on
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Host whose configured ports are probed
    #[arg(long, default_value = host_monit::monitors::DEFAULT_PROBE_HOST)]
    probe_host: String,

    /// Per-port probe timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    probe_timeout_ms: u64,

    /// Disk usage is reported for the filesystem containing this path
    #[arg(long, default_value = "/")]
    disk_path: PathBuf,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Also write logs to this file, rotated at 100 KiB with 5 backups
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let file_layer = match log_file {
        Some(path) => {
            let writer = RotatingFileWriter::open(path, DEFAULT_LOG_MAX_BYTES, DEFAULT_LOG_BACKUPS)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(writer))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let filter = filter::Targets::new().with_targets(vec![
        ("host_monit", LevelFilter::DEBUG),
        ("monit_api", LevelFilter::DEBUG),
        ("tower_http", LevelFilter::INFO),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(file_layer)
        .with(filter)
        .init();

    if let Some(path) = log_file {
        info!("logging to {}", path.display());
    }
    Ok(())
}

async fn open_store(args: &Args) -> anyhow::Result<Arc<dyn ReportStore>> {
    if args.in_memory {
        info!("keeping reports in memory");
        return Ok(Arc::new(MemoryReportStore::new()));
    }

    #[cfg(feature = "storage-sqlite")]
    {
        let path = args.database.clone().unwrap_or_else(get_database_path);
        let store = host_monit::storage::sqlite::SqliteReportStore::new(path).await?;
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "storage-sqlite"))]
    {
        tracing::warn!("built without storage-sqlite, keeping reports in memory");
        Ok(Arc::new(MemoryReportStore::new()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init(args.log_file.as_ref())?;
    trace!("started with args: {args:?}");

    let config = ConfigProvider::new(args.config.clone().unwrap_or_else(get_config_path));
    // fail at startup if the config location is unusable
    config.load()?;
    info!("using configuration at {}", config.path().display());

    let store = open_store(&args).await?;

    let monitor = Monitor::new(
        config,
        Arc::new(SysinfoSampler::new(&args.disk_path)),
        store.clone(),
        AlertDispatcher::discord()?,
    )
    .with_probe_settings(ProbeSettings {
        host: args.probe_host.clone(),
        timeout: Duration::from_millis(args.probe_timeout_ms),
    });

    let api_config = ApiConfig {
        bind_addr: args.bind.unwrap_or_else(get_bind_addr),
        enable_cors: !args.no_cors,
    };
    let app = api::router(&api_config, ApiState::new(monitor));
    let listener = api::bind(&api_config).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutting down");
        })
        .await?;

    store.close().await?;
    Ok(())
}
