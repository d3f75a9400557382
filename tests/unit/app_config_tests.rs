/*!
 * Tests for application configuration
 */

use std::str::FromStr;

use langding::app_config::{Config, ProviderConfig, TranslationProvider};

/// Test the default configuration values
#[test]
fn test_default_config_shouldMatchDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.input_dir, "input");
    assert_eq!(config.output_dir, "output");
    assert_eq!(config.template_dir, "templates");
    assert!(!config.process_templates);
    assert_eq!(
        config.target_languages,
        vec!["English", "Spanish", "French", "German"]
    );
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.translation.available_providers.len(), 2);
}

/// Test provider parsing and display round trip
#[test]
fn test_provider_fromStr_withValidNames_shouldParse() {
    assert_eq!(
        TranslationProvider::from_str("openai").unwrap(),
        TranslationProvider::OpenAI
    );
    assert_eq!(
        TranslationProvider::from_str("Anthropic").unwrap(),
        TranslationProvider::Anthropic
    );
    assert_eq!(TranslationProvider::OpenAI.to_string(), "openai");
    assert_eq!(TranslationProvider::Anthropic.display_name(), "Anthropic");
}

/// Test that an unknown provider name is rejected
#[test]
fn test_provider_fromStr_withInvalidName_shouldFail() {
    assert!(TranslationProvider::from_str("ollama").is_err());
}

/// Test model resolution falls back to per-provider defaults
#[test]
fn test_get_model_withEmptyOverride_shouldUseProviderDefault() {
    let mut config = Config::default();
    assert_eq!(config.translation.get_model(), "gpt-3.5-turbo");

    config.translation.provider = TranslationProvider::Anthropic;
    assert_eq!(config.translation.get_model(), "claude-3-haiku-20240307");
}

/// Test model override through the active provider config
#[test]
fn test_get_model_withConfiguredModel_shouldUseOverride() {
    let mut config = Config::default();
    config.translation.available_providers[0].model = "gpt-4".to_string();

    assert_eq!(config.translation.get_model(), "gpt-4");
}

/// Test endpoint resolution for both providers
#[test]
fn test_get_endpoint_shouldResolvePerProvider() {
    let mut config = Config::default();
    assert_eq!(config.translation.get_endpoint(), "https://api.openai.com/v1");

    config.translation.provider = TranslationProvider::Anthropic;
    assert_eq!(config.translation.get_endpoint(), "https://api.anthropic.com");
}

/// Test that a missing credential fails validation
#[test]
fn test_validate_withMissingApiKey_shouldFail() {
    let config = Config::default();

    // Default configs carry no api_key field value
    assert!(config.translation.get_api_key().is_empty());
    assert!(config.validate().is_err());
}

/// Test that a configured credential passes validation
#[test]
fn test_validate_withApiKey_shouldSucceed() {
    let mut config = Config::default();
    config.translation.available_providers[0].api_key = "sk-test".to_string();

    assert!(config.validate().is_ok());
}

/// Test that an empty language list fails validation
#[test]
fn test_validate_withNoLanguages_shouldFail() {
    let mut config = Config::default();
    config.translation.available_providers[0].api_key = "sk-test".to_string();
    config.target_languages.clear();

    assert!(config.validate().is_err());
}

/// Test config JSON serialization round trip
#[test]
fn test_config_serde_shouldRoundTrip() -> anyhow::Result<()> {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Anthropic;
    config.target_languages = vec!["Spanish".to_string()];

    let json = serde_json::to_string_pretty(&config)?;
    assert!(json.contains("\"anthropic\""));

    let parsed: Config = serde_json::from_str(&json)?;
    assert_eq!(parsed.translation.provider, TranslationProvider::Anthropic);
    assert_eq!(parsed.target_languages, vec!["Spanish"]);

    Ok(())
}

/// Test that a minimal config file picks up serde defaults
#[test]
fn test_config_deserialize_withMinimalJson_shouldApplyDefaults() -> anyhow::Result<()> {
    let parsed: Config = serde_json::from_str("{}")?;

    assert_eq!(parsed.input_dir, "input");
    assert_eq!(parsed.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(parsed.target_languages.len(), 4);

    Ok(())
}

/// Test that the env-var credential fallback survives a config file whose
/// translation section carries no provider table
#[test]
fn test_apply_env_credentials_withSparseConfig_shouldFillFromEnv() -> anyhow::Result<()> {
    let mut config: Config = serde_json::from_str(r#"{"translation":{"provider":"openai"}}"#)?;
    assert!(config.translation.available_providers.is_empty());

    std::env::set_var("OPENAI_API_KEY", "sk-env-test");
    config.translation.apply_env_credentials();
    std::env::remove_var("OPENAI_API_KEY");

    assert_eq!(config.translation.get_api_key(), "sk-env-test");
    assert!(config.validate().is_ok());

    Ok(())
}

/// Test per-provider defaults in ProviderConfig
#[test]
fn test_provider_config_new_shouldUseProviderDefaults() {
    let openai = ProviderConfig::new(TranslationProvider::OpenAI);
    assert_eq!(openai.provider_type, "openai");
    assert_eq!(openai.model, "gpt-3.5-turbo");

    let anthropic = ProviderConfig::new(TranslationProvider::Anthropic);
    assert_eq!(anthropic.provider_type, "anthropic");
    assert_eq!(anthropic.model, "claude-3-haiku-20240307");
    assert!(anthropic.api_key.is_empty());
}
