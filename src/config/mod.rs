// Configuration module entry point
// Loads environment configuration and owns the shared application state

mod state;
mod types;

pub use state::AppState;
pub use types::Config;

impl Config {
    /// Load configuration from `MEMSITE_*` environment variables.
    ///
    /// The site root directory is required; everything else has a default
    /// or is optional.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("MEMSITE").try_parsing(true))
            .set_default("host", "localhost:8080")?
            .set_default("site", "")?
            .set_default("port", 8080)?
            .set_default("read_timeout", 1)?
            .set_default("write_timeout", 2)?
            .set_default("access_log", true)?
            .set_default("access_log_format", "common")?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        if cfg.site.is_empty() {
            return Err(config::ConfigError::Message(
                "MEMSITE_SITE must point at the site directory".to_string(),
            ));
        }
        Ok(cfg)
    }
}
