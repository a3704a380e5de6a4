use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct HealthResponse {
    base_url: String,
    healthy: bool,
    body: Option<serde_json::Value>,
    error: Option<String>,
}

/// Handle `autograder health`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let base_url = ctx.client.base_url().to_string();
    let response = match ctx.client.health().await {
        Ok(body) => HealthResponse {
            base_url,
            healthy: true,
            body: Some(body),
            error: None,
        },
        Err(error) => {
            tracing::warn!(%error, "health check failed");
            HealthResponse {
                base_url,
                healthy: false,
                body: None,
                error: Some(error.to_string()),
            }
        }
    };

    let healthy = response.healthy;
    output(&response, flags.format)?;
    if !healthy {
        anyhow::bail!("grading backend is not reachable at {}", ctx.client.base_url());
    }
    Ok(())
}
