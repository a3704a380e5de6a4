use grader_client::GradingClient;
use grader_config::GraderConfig;
use grader_console::GradingConsole;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: GraderConfig,
    pub client: GradingClient,
}

impl AppContext {
    pub fn init(config: GraderConfig) -> anyhow::Result<Self> {
        let client = GradingClient::from_config(&config.api)?;
        Ok(Self { config, client })
    }

    /// A fresh console session bound to the configured backend.
    pub fn console(&self) -> GradingConsole<GradingClient> {
        GradingConsole::new(self.client.clone(), &self.config)
    }

    /// `explicit`, or the configured default namespace.
    pub fn namespace(&self, explicit: Option<&str>) -> String {
        explicit.map_or_else(|| self.config.defaults.namespace_id.clone(), str::to_string)
    }
}
