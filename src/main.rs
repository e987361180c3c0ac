/*
 * Responsibility
 * - Start the tokio runtime
 * - Call app::run() (no logic here)
 */
use anyhow::Result;

mod app;
mod config;
mod error;
mod middleware;
mod routes;
mod services;
mod state;
mod views;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await?;
    Ok(())
}
