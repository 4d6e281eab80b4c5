use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/finanzas.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub email: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            email: String::new(),
        }
    }
}

/// Layered configuration: optional TOML file, then `FINANZAS_*`
/// environment variables, then explicit flag overrides.
pub fn load(
    path: Option<&str>,
    base_url: Option<String>,
    email: Option<String>,
) -> Result<Settings, config::ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("FINANZAS"))
        .build()?
        .try_deserialize()?;

    if let Some(base_url) = base_url {
        settings.base_url = base_url;
    }
    if let Some(email) = email {
        settings.email = email;
    }

    Ok(settings)
}
