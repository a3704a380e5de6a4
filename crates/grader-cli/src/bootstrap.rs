use anyhow::Context;
use grader_config::GraderConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then layered config, then apply `--api-url`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GraderConfig> {
    load_dotenv()?;
    let config = GraderConfig::load_with_api_override(flags.api_url.as_deref())
        .context("failed to load autograder configuration")?;
    tracing::debug!(base_url = config.api.base_url(), "configuration loaded");
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}
