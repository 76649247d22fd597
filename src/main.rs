//! User registry service entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use user_registry::api::docs::{openapi_json, OPENAPI_PATH, SWAGGER_UI_PATH};
use user_registry::api::{api_router, create_router, AppState};
use user_registry::config::Config;
use user_registry::metrics;
use user_registry::registry::UserRegistry;
use user_registry::utils::shutdown_signal;

/// In-memory user registry REST service.
#[derive(Parser, Debug)]
#[command(name = "user-registry")]
#[command(about = "Serve an in-memory list of users over a small REST API")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Bind address (overrides HOST).
        #[arg(long)]
        host: Option<String>,

        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the OpenAPI document as JSON.
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let config = Config::load()?;
    init_logging(&config, args.verbose);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Openapi) => cmd_openapi(),
        Some(Command::Serve { host, port }) => cmd_serve(config, host, port.or(args.port)).await,
        None => cmd_serve(config, None, args.port).await,
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("user_registry=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(config.log_json.then(|| fmt::layer().json()))
        .with((!config.log_json).then(fmt::layer))
        .with(filter)
        .init();
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("USER REGISTRY - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    let summary = match config.summary() {
        Ok(lines) => {
            println!("OK");
            lines
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    for line in summary {
        println!("  {}", line);
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the generated OpenAPI document.
fn cmd_openapi() -> anyhow::Result<()> {
    println!("{}", openapi_json()?);
    Ok(())
}

/// Run the HTTP server until shutdown is signalled.
async fn cmd_serve(
    mut config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(host) = host_override {
        config.host = host;
    }
    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let registry = UserRegistry::seeded();
    info!("Registry seeded with {} users", registry.len());

    let mut state = AppState::new(registry);
    if config.enable_metrics {
        match metrics::install_recorder() {
            Ok(handle) => {
                metrics::set_users_registered(state.registry.read().await.len());
                state = state.with_metrics(handle);
            }
            Err(e) => warn!("Metrics disabled, recorder install failed: {}", e),
        }
    }

    let router = if config.enable_docs {
        info!("Swagger UI at {}, OpenAPI document at {}", SWAGGER_UI_PATH, OPENAPI_PATH);
        create_router(state)
    } else {
        api_router(state)
    };

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
