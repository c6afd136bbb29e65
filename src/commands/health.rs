//! Backend liveness check.

use anyhow::Result;
use log::debug;

use crate::api::QuizBackend;

#[tracing::instrument(skip(backend))]
pub async fn health(backend: &dyn QuizBackend) -> Result<()> {
    debug!("Checking backend health...");

    let response = backend.health().await?;
    println!("Backend is {}", response.status);

    Ok(())
}
