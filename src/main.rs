use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use agentforce_chat::{connections, repl};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let connection = connections::connection_from_env()?;
    repl::run(connection)
        .await
        .map_err(|error| format!("chat loop failed: {error}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
