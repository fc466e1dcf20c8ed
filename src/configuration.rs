use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::services::{GEMINI_BASE_URL, OPENAI_BASE_URL};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub api_keys: ApiKeySettings,
    pub generation: GenerationSettings,
    pub storage: StorageSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone)]
pub struct ApiKeySettings {
    #[serde(default)]
    pub gemini: String,
    #[serde(default)]
    pub openai: String,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Openai,
}

#[derive(Deserialize, Clone)]
pub struct GenerationSettings {
    pub provider: ProviderKind,
    pub model: String,
    #[serde(default)]
    base_url: Option<String>,
}

impl GenerationSettings {
    /// Falls back to the provider's public endpoint when none is configured.
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) if !url.trim().is_empty() => url.clone(),
            _ => match self.provider {
                ProviderKind::Gemini => GEMINI_BASE_URL.to_string(),
                ProviderKind::Openai => OPENAI_BASE_URL.to_string(),
            },
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct StorageSettings {
    /// JSON file holding the persisted key-value pairs
    pub path: String,
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // APP_API_KEYS__GEMINI=... sets settings.api_keys.gemini
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
