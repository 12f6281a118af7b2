use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use media_catalog_server::config;
use media_catalog_server::media_store::{
    seed_demo_records, JsonMediaStore, MediaCategory, MediaStore,
};
use media_catalog_server::server::{run_server, RequestsLoggingLevel};

mod cli_style;
use cli_style::get_styles;

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, err));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

fn parse_dir(s: &str) -> Result<PathBuf, String> {
    let path = parse_path(s)?;
    if !path.exists() {
        return Err(format!("Directory does not exist: {}", s));
    }
    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", s));
    }
    Ok(path)
}

#[derive(Parser, Debug)]
#[command(styles = get_styles())]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding the media store file (media_store.json).
    /// Can also be specified in config file.
    #[clap(long, value_parser = parse_dir)]
    pub data_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 5000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Fill an empty store with a few demo items before serving.
    #[clap(long)]
    pub seed_demo_data: bool,

    /// Load the store, print a summary and exit without serving.
    #[clap(long)]
    pub check_only: bool,
}

impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            data_dir: args.data_dir.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
            seed_demo_data: args.seed_demo_data,
        }
    }
}

fn print_summary(store: &dyn MediaStore) {
    let counts = store.count_by_category();
    println!("Media store contains {} item(s)", counts.total());
    for category in MediaCategory::ALL {
        println!("  {}: {}", category, counts.get(category));
    }
}

/// Seeds demo data if asked to. Check mode never writes to the store.
fn seed_unless_checking(store: &dyn MediaStore, seed: bool, check_only: bool) -> Result<usize> {
    if !seed {
        return Ok(0);
    }
    if check_only {
        info!("Check mode, not seeding demo data.");
        return Ok(0);
    }
    seed_demo_records(store).context("Failed to seed demo data")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  data_dir: {:?}", app_config.data_dir);
    info!("  port: {}", app_config.port);
    info!("  logging_level: {:?}", app_config.logging_level);

    let store_path = app_config.media_store_path();
    info!("Opening media store at {:?}...", store_path);
    let media_store = Arc::new(
        JsonMediaStore::open(&store_path)
            .with_context(|| format!("Could not open media store {:?}", store_path))?,
    );

    seed_unless_checking(
        media_store.as_ref(),
        app_config.seed_demo_data,
        cli_args.check_only,
    )?;

    if cli_args.check_only {
        print_summary(media_store.as_ref());
        return Ok(());
    }

    info!("Ready to serve at port {}!", app_config.port);
    run_server(
        media_store,
        app_config.logging_level,
        app_config.port,
        app_config.frontend_dir_path,
    )
    .await
}
