use std::process::ExitCode;

use anyhow::{Context, Result};
use study_assist_http::HttpTransport;

pub async fn run(transport: &HttpTransport) -> Result<ExitCode> {
    let status = transport
        .health()
        .await
        .with_context(|| format!("health check against {} failed", transport.base_url()))?;

    println!("{}: {status}", transport.base_url());

    if status.is_healthy() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
