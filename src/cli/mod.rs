//! Command line interface for the webtoapk server.

mod args;

pub use args::Args;

use std::sync::Arc;

use crate::error::Result;
use crate::pipeline::{detect, BuildPipeline};
use crate::server;

/// Main CLI entry point: parse arguments, load configuration, serve.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = args.load_config()?;

    log::debug!("Loaded configuration: {:?}", config);
    detect::probe_tools(&config.build);

    let listen = config.server.listen;
    let pipeline = Arc::new(BuildPipeline::new(config.build)?);

    server::serve(listen, pipeline).await?;
    Ok(0)
}
