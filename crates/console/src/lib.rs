//! # Calendar Console
//!
//! Line-oriented front end for the scheduling engine.
//!
//! - **Commands**: Parse console input into engine requests
//! - **App**: Run the input loop and print replies
//! - **Config**: Settings files and environment

/// Input loop
pub mod app;
/// Console command grammar
pub mod commands;
/// Configuration loading
pub mod config;

use std::io;
use std::sync::Arc;

use calendar_core::store::CalendarStore;
use calendar_db::{create_pool, schema::initialize_database, InMemoryStore, PgCalendarStore};
use calendar_scheduler::Scheduler;
use chrono::{Datelike, Local};
use eyre::{eyre, Result};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::app::App;
use crate::config::ConsoleConfig;

/// Starts the console on stdin and stdout.
///
/// Log output goes to stderr so it never interleaves with command replies.
pub async fn start_console(config: ConsoleConfig) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = build_store(&config).await?;
    let scheduler = Arc::new(Scheduler::new(store, config.scheduler.clone()));
    let app = App::new(scheduler, Local::now().year());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    app.run(stdin, &mut stdout, &mut stderr).await?;

    info!("Console closed");
    Ok(())
}

/// Opens the store selected by `config`, bootstrapping the schema when it is
/// backed by PostgreSQL.
pub async fn build_store(config: &ConsoleConfig) -> Result<Arc<dyn CalendarStore>> {
    if config.in_memory {
        info!("Using in-memory store");
        return Ok(Arc::new(InMemoryStore::new()));
    }

    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| eyre!("DATABASE_URL is not configured"))?;

    let pool = create_pool(database_url, config.max_connections).await?;
    initialize_database(&pool).await?;

    info!("Connected to database");
    Ok(Arc::new(PgCalendarStore::new(pool)))
}
