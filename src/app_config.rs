use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory containing input HTML files
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    /// Directory where generated artifacts are written
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Directory containing template HTML files
    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    /// Languages to translate each page into
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,

    /// Process files from the template directory instead of the input directory
    #[serde(default)]
    pub process_templates: bool,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    #[default]
    OpenAI,
    Anthropic,
}

impl TranslationProvider {
    /// Capitalized provider name for display
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }

    /// Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }

    /// Name of the environment variable holding this provider's credential
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    /// Model name
    #[serde(default = "String::new")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Build a provider config with that provider's defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt sent with every translation request
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Per-language context template for translation requests
    /// Placeholder: {target_language}
    #[serde(default = "default_context_template")]
    pub context_template: String,

    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Lower values make output more deterministic, higher values more creative
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens the provider may generate per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            context_template: default_context_template(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_input_dir() -> String {
    "input".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_template_dir() -> String {
    "templates".to_string()
}

fn default_target_languages() -> Vec<String> {
    vec![
        "English".to_string(),
        "Spanish".to_string(),
        "French".to_string(),
        "German".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    500
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional translator. Provide only the translation without any explanations.".to_string()
}

fn default_context_template() -> String {
    "Website content for a landing page. Translate the following texts to {target_language}, maintaining professional tone and technical accuracy:".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language is required"));
        }

        // Both supported providers require a credential
        let api_key = self.translation.get_api_key();
        if api_key.is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider (set {} or the api_key config field)",
                self.translation.provider.display_name(),
                self.translation.provider.api_key_env_var()
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            template_dir: default_template_dir(),
            target_languages: default_target_languages(),
            process_templates: false,
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TranslationProvider::OpenAI => default_openai_model(),
            TranslationProvider::Anthropic => default_anthropic_model(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::OpenAI => default_openai_endpoint(),
            TranslationProvider::Anthropic => default_anthropic_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        default_timeout_secs()
    }

    /// Fill empty API key fields from the provider environment variables
    pub fn apply_env_credentials(&mut self) {
        // A sparse config file may omit the provider table entirely; the
        // active provider still needs an entry for the env credential to
        // land in
        if self.get_active_provider_config().is_none() {
            self.available_providers
                .push(ProviderConfig::new(self.provider.clone()));
        }

        for provider_config in self.available_providers.iter_mut() {
            if !provider_config.api_key.is_empty() {
                continue;
            }
            let env_var = match provider_config.provider_type.as_str() {
                "openai" => "OPENAI_API_KEY",
                "anthropic" => "ANTHROPIC_API_KEY",
                _ => continue,
            };
            if let Ok(key) = std::env::var(env_var) {
                provider_config.api_key = key;
            }
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: TranslationProvider::default(),
            available_providers: Vec::new(),
            common: TranslationCommonConfig::default(),
        };

        // Add default providers
        config
            .available_providers
            .push(ProviderConfig::new(TranslationProvider::OpenAI));
        config
            .available_providers
            .push(ProviderConfig::new(TranslationProvider::Anthropic));

        config
    }
}
