use colored::Colorize;
use log::{error, info};
use thiserror::Error;
use tokio::runtime::{self, Runtime};
use watchparty_collab::{Collab, Config};
use watchparty_server::{ConfigError, ServerConfig};

mod logging;

struct Watchparty {
    collab: Collab,
    config: ServerConfig,
    runtime: Runtime,
}

#[derive(Debug, Error)]
enum WatchpartyError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Server stopped: {0}")]
    Server(std::io::Error),

    #[error("Fatal error: {0}")]
    Fatal(String),
}

impl Watchparty {
    fn new() -> Result<Self, WatchpartyError> {
        info!("Building async runtime...");
        let runtime = runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("watchparty-async")
            .build()
            .map_err(|e| WatchpartyError::Fatal(e.to_string()))?;

        let config = ServerConfig::from_env()?;

        Ok(Self {
            collab: Collab::new(Config::default()),
            config,
            runtime,
        })
    }

    fn run(self) -> Result<(), WatchpartyError> {
        let Self {
            collab,
            config,
            runtime,
        } = self;

        runtime
            .block_on(watchparty_server::run_server(config, collab))
            .map_err(WatchpartyError::Server)
    }
}

impl WatchpartyError {
    fn hint(&self) -> String {
        match self {
            WatchpartyError::Config(_) => "Check the environment variables the server is started with, then try again.".to_string(),
            WatchpartyError::Server(_) => "The server could not listen or was interrupted. Make sure the port is not already in use.".to_string(),
            WatchpartyError::Fatal(_) => "This error is fatal, and should not happen.".to_string(),
        }
    }
}

fn report(error: WatchpartyError) {
    error!("{} Read the error below to troubleshoot the issue.", "Watchparty failed!".bold().red());
    error!("{}", error);
    error!("{}", format!("Hint: {}", error.hint()).dimmed().italic());
}

fn main() {
    if let Err(e) = logging::init_logger() {
        eprintln!("Could not initialize logging: {}", e);
    }

    match Watchparty::new() {
        Ok(watchparty) => {
            info!("Initialized successfully.");

            if let Err(error) = watchparty.run() {
                report(error);
            }
        }
        Err(error) => report(error),
    }
}
