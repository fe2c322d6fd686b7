pub const STATIC_TRANSFORM_TOPIC: &str = "tf_static";
pub const DYNAMIC_TRANSFORM_TOPIC: &str = "tf";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ZenohConfig {
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Key of the latched channel
    #[serde(default = "default_static_key")]
    pub static_key: String,
    /// Key of the continuous channel
    #[serde(default = "default_dynamic_key")]
    pub dynamic_key: String,
}

fn default_mode() -> String {
    "peer".to_string()
}

fn default_static_key() -> String {
    STATIC_TRANSFORM_TOPIC.to_string()
}

fn default_dynamic_key() -> String {
    DYNAMIC_TRANSFORM_TOPIC.to_string()
}

impl Default for ZenohConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            static_key: default_static_key(),
            dynamic_key: default_dynamic_key(),
        }
    }
}

impl ZenohConfig {
    pub fn to_zenoh_config(&self) -> Result<zenoh::Config, crate::error::CommsError> {
        let mut config = zenoh::Config::default();
        config
            .insert_json5("mode", &format!("\"{}\"", self.mode))
            .map_err(|e| {
                crate::error::CommsError::Config(format!("Failed to configure zenoh: {}", e))
            })?;
        Ok(config)
    }
}

/// Layout of the `--config` file accepted by the binaries
#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub panel: tf_broadcaster::PanelConfig,
    #[serde(default)]
    pub zenoh: ZenohConfig,
}

impl AppConfig {
    /// Parse a TOML configuration file
    pub fn from_file(path: &std::path::Path) -> Result<Self, crate::error::CommsError> {
        let config_str = std::fs::read_to_string(path).map_err(|e| {
            crate::error::CommsError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&config_str)
    }

    pub fn from_toml(config_str: &str) -> Result<Self, crate::error::CommsError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(config_str, config::FileFormat::Toml))
            .build()
            .map_err(|e| crate::error::CommsError::Config(format!("Failed to parse config: {}", e)))?;

        settings.try_deserialize().map_err(|e| {
            crate::error::CommsError::Config(format!("Failed to deserialize config: {}", e))
        })
    }
}
