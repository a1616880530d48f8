/*
 * Responsibility
 * - tokio runtime
 * - hand off to app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    propelauth_axum::app::run().await
}
