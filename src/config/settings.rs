use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub hub: HubConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub embedder: EmbedderConfig,

    #[serde(default)]
    pub stylist: StylistConfig,

    #[serde(default)]
    pub closet: ClosetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    pub token: Option<String>,

    #[serde(default = "default_token_env")]
    pub token_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_classifier_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedderConfig {
    #[serde(default = "default_embedder_model")]
    pub model: String,

    #[serde(default = "default_embedder_dimension")]
    pub dimension: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylistConfig {
    #[serde(default = "default_stylist_model")]
    pub model: String,

    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClosetConfig {
    /// Overrides the platform data-directory default.
    pub db_path: Option<PathBuf>,
}

fn default_api_base() -> String {
    "https://api-inference.huggingface.co".to_string()
}
fn default_token_env() -> String {
    "HUGGINGFACEHUB_API_TOKEN".to_string()
}
fn default_classifier_model() -> String {
    "facebook/deit-base-distilled-patch16-224".to_string()
}
fn default_embedder_model() -> String {
    "microsoft/resnet-50".to_string()
}
fn default_embedder_dimension() -> usize {
    2048
}
fn default_stylist_model() -> String {
    "google/flan-t5-small".to_string()
}
fn default_max_new_tokens() -> u32 {
    100
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: None,
            token_env: default_token_env(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: default_classifier_model(),
        }
    }
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model: default_embedder_model(),
            dimension: default_embedder_dimension(),
        }
    }
}

impl Default for StylistConfig {
    fn default() -> Self {
        Self {
            model: default_stylist_model(),
            max_new_tokens: default_max_new_tokens(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).context("Failed to read config file")?;
            let settings: Settings =
                toml::from_str(&content).context("Failed to parse config file")?;
            Ok(settings)
        } else {
            let settings = Settings::default();
            settings.save()?;
            Ok(settings)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("ai", "closet", "closet")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Where the closet database lives: the configured override, or
    /// `closet.json` under the platform data directory.
    pub fn closet_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.closet.db_path {
            return Ok(path.clone());
        }
        let dirs = directories::ProjectDirs::from("ai", "closet", "closet")
            .context("Could not determine data directory")?;
        Ok(dirs.data_dir().join("closet.json"))
    }

    /// Resolve the Inference API token: explicit config value first,
    /// then the configured environment variable.
    pub fn get_api_token(&self) -> Option<String> {
        if let Some(token) = &self.hub.token {
            return Some(token.clone());
        }
        std::env::var(&self.hub.token_env).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.embedder.dimension, 2048);
        assert_eq!(settings.hub.token_env, "HUGGINGFACEHUB_API_TOKEN");
        assert_eq!(settings.stylist.max_new_tokens, 100);
        assert!(settings.closet.db_path.is_none());
    }

    #[test]
    fn test_empty_toml_parses_to_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.classifier.model, "facebook/deit-base-distilled-patch16-224");
        assert_eq!(settings.embedder.model, "microsoft/resnet-50");
    }

    #[test]
    fn test_partial_toml_overrides() {
        let settings: Settings = toml::from_str(
            r#"
[embedder]
model = "google/vit-base-patch16-224"
dimension = 768

[closet]
db_path = "/tmp/closet.json"
"#,
        )
        .unwrap();

        assert_eq!(settings.embedder.model, "google/vit-base-patch16-224");
        assert_eq!(settings.embedder.dimension, 768);
        assert_eq!(settings.closet.db_path, Some(PathBuf::from("/tmp/closet.json")));
        // Untouched sections keep their defaults
        assert_eq!(settings.stylist.model, "google/flan-t5-small");
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.embedder.dimension, settings.embedder.dimension);
        assert_eq!(parsed.classifier.model, settings.classifier.model);
    }
}
