//! Binary for the job relay: webhook + worker HTTP server, or a single manual worker pass.

use anyhow::Result;
use clap::Parser;
use job_relay::{load_config, run_server, run_worker_once, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { token, port } => {
            let config = load_config(token, port)?;
            run_server(config).await
        }
        Commands::Work { token, batch_size } => {
            let config = load_config(token, None)?;
            let report = run_worker_once(config, batch_size).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
