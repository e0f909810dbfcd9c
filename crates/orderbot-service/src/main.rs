//! Main entry point for the ordering assistant service.
//!
//! This binary wires together the configuration, storage backend, dialogue
//! engine, and HTTP server, then serves conversational turns until
//! interrupted.

use clap::Parser;
use orderbot_config::{Config, StorageBackend};
use orderbot_core::{DialogueEngine, MenuCatalog};
use orderbot_storage::implementations::file::FileStorage;
use orderbot_storage::implementations::memory::MemoryStorage;
use orderbot_storage::{OrderLog, StorageInterface, StorageService};
use std::path::PathBuf;
use std::sync::Arc;

mod server;

/// Command-line arguments for the ordering assistant service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file (or defaults when absent)
/// 4. Builds the dialogue engine over the configured storage backend
/// 5. Serves the chat API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.init();

	tracing::info!("Started ordering assistant");

	// Load configuration, falling back to built-in defaults
	let config = if args.config.exists() {
		let config = Config::from_file(&args.config).await?;
		tracing::info!("Loaded configuration from {}", args.config.display());
		config
	} else {
		tracing::info!(
			"No configuration file at {}, using defaults",
			args.config.display()
		);
		Config::default()
	};

	let engine = Arc::new(build_engine(&config));

	server::start_server(config.server.clone(), engine).await?;

	tracing::info!("Stopped ordering assistant");
	Ok(())
}

/// Builds the dialogue engine from configuration.
///
/// Selects the configured storage backend, stacks the order log on top of
/// it, and hands the catalog and tax rate to the engine.
fn build_engine(config: &Config) -> DialogueEngine {
	let backend: Box<dyn StorageInterface> = match config.storage.backend {
		StorageBackend::File => {
			tracing::info!(path = %config.storage.path, "Using file storage");
			Box::new(FileStorage::new(PathBuf::from(&config.storage.path)))
		}
		StorageBackend::Memory => {
			tracing::warn!("Using in-memory storage; orders will not survive a restart");
			Box::new(MemoryStorage::new())
		}
	};

	let log = OrderLog::new(StorageService::new(backend));
	let catalog = MenuCatalog::new(config.menu.items.clone());

	DialogueEngine::new(catalog, config.pricing.tax_rate, log)
}
