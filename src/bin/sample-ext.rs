//! A sample extension built on the Mercury extension driver.
//!
//! Binds a few demo endpoints and serves them until the daemon closes the
//! socket or the process receives Ctrl-C.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use mercury_ext::config::loader;
use mercury_ext::{ExtensionConfig, Session};

#[derive(Parser)]
#[command(name = "sample-ext")]
#[command(about = "Sample Mercury extension serving a few demo endpoints", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Daemon host; overrides the config file.
    #[arg(long)]
    host: Option<String>,

    /// Daemon extension socket port; overrides the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => ExtensionConfig::default(),
    };
    if let Some(host) = cli.host {
        config.daemon.host = host;
    }
    if let Some(port) = cli.port {
        config.daemon.port = port;
    }

    mercury_ext::observability::logging::init(&config.logging.level);

    tracing::info!(
        host = %config.daemon.host,
        port = config.daemon.port,
        "sample-ext starting"
    );

    let mut session = Session::connect(&config).await?;
    let started = Instant::now();

    session.get("/ping", |_req, res| {
        res.json(&serde_json::json!({ "ping": "pong" }))?;
        Ok(())
    });

    session.get("/uptime", move |_req, res| {
        res.json(&serde_json::json!({ "uptime_secs": started.elapsed().as_secs() }))?;
        Ok(())
    });

    session.post("/echo", |req, res| {
        if let Some(content_type) = req.header("content-type") {
            res.set_header("Content-Type", content_type)?;
        }
        res.send(req.body())?;
        Ok(())
    });

    let shutdown = session.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, shutting down");
            shutdown.trigger();
        }
    });

    session.run().await?;

    tracing::info!("sample-ext stopped");
    Ok(())
}
