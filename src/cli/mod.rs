use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::FixedOffset;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api;
use crate::application::LedgerService;
use crate::storage::Repository;

/// cpf-ledger - in-memory bank-account ledger
#[derive(Parser, Debug)]
#[command(name = "cpf-ledger")]
#[command(about = "Serve an in-memory bank-account ledger over HTTP")]
#[command(version)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "LEDGER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "LEDGER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Hours east of UTC used to decide an entry's calendar day
    #[arg(long, env = "LEDGER_UTC_OFFSET", default_value_t = 0, allow_hyphen_values = true)]
    pub utc_offset: i32,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let addr = self.socket_addr()?;
        let day_offset = self.day_offset()?;

        let ledger = Arc::new(LedgerService::new(Repository::new()).with_day_offset(day_offset));
        let app = api::router(ledger);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!(%addr, %day_offset, "ledger listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        info!("ledger stopped");
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }

    pub fn day_offset(&self) -> Result<FixedOffset> {
        self.utc_offset
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .with_context(|| format!("UTC offset out of range: {} hours", self.utc_offset))
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("cpf_ledger={},tower_http={}", level, level).into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler available; run until killed
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
