use serde::Deserialize;

/// Root configuration. Loaded from environment variables with the prefix
/// `I13N__`, e.g. `I13N__GA__TRACKING_ID=UA-12345-1`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ga: GaConfig,
}

/// Google Analytics loader settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GaConfig {
    /// Property id passed to `create`. Missing ids are tolerated with a warning.
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default = "default_script_src")]
    pub script_src: String,
    /// Cookie domain mode passed as the second `create` argument.
    #[serde(default = "default_cookie_domain")]
    pub cookie_domain: String,
    /// Name of the global slot the tracking callable lives in.
    #[serde(default = "default_global_name")]
    pub global_name: String,
}

impl GaConfig {
    pub fn with_tracking_id(id: impl Into<String>) -> Self {
        Self {
            tracking_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// The tracking id, treating an empty string the same as no id at all.
    pub fn tracking_id(&self) -> Option<&str> {
        self.tracking_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            tracking_id: None,
            script_src: default_script_src(),
            cookie_domain: default_cookie_domain(),
            global_name: default_global_name(),
        }
    }
}

fn default_script_src() -> String {
    "//www.google-analytics.com/analytics.js".to_string()
}
fn default_cookie_domain() -> String {
    "auto".to_string()
}
fn default_global_name() -> String {
    "ga".to_string()
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("I13N")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
