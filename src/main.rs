//! session-tracker binary entry point.

use std::process::ExitCode;
use std::sync::Arc;

use session_tracker::api::{serve_with_state, AppState};
use session_tracker::cli;
use session_tracker::config::Config;
use session_tracker::{logging, SessionRegistry, SystemClock, SystemNetworkInfo};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_with(config.log_filter()) {
        eprintln!("warning: logging already initialized: {}", e);
    }

    info!("session-tracker v{}", env!("CARGO_PKG_VERSION"));

    let (server_config, cookies) = match (config.to_server_config(), config.cookie_config()) {
        (Ok(server), Ok(cookies)) => (server, cookies),
        (Err(e), _) | (_, Err(e)) => {
            error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let network = Arc::new(SystemNetworkInfo::new(config.network_refresh()));
    let registry = SessionRegistry::with_sources(network, Arc::new(SystemClock));

    let server_info = registry.server_info();
    info!(
        ip = server_info.ip.as_deref().unwrap_or("none"),
        mac = server_info.mac.as_deref().unwrap_or("none"),
        "server network info"
    );

    let state = AppState::with_registry(registry)
        .with_cookies(cookies)
        .with_trust_forwarded_for(config.session.trust_forwarded_for);

    match serve_with_state(server_config, state).await {
        Ok(()) => {
            info!("session-tracker stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
