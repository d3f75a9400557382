/*!
 * Translation service and orchestration.
 *
 * `TranslationService` wraps the configured provider client behind the
 * `Translator` capability. `translate_all` drives one call per
 * (fragment, language) pair, strictly sequentially, and guarantees a fully
 * populated table: any provider failure falls back to the original text.
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{error, info};
use std::collections::BTreeMap;
use std::path::Path;

use crate::app_config::{TranslationCommonConfig, TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;
use crate::file_utils::FileManager;
use crate::html_processor::Fragment;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::Translator;

/// Fragment text -> (target language -> translated text)
pub type TranslationTable = BTreeMap<String, BTreeMap<String, String>>;

/// Available translation provider implementations
enum TranslationProviderImpl {
    OpenAI { client: OpenAI },
    Anthropic { client: Anthropic },
}

/// Translation service dispatching to the configured provider
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Common request settings
    common: TranslationCommonConfig,

    /// Model identifier for the active provider
    model: String,
}

impl TranslationService {
    /// Create a new translation service from configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let provider = match config.provider {
            TranslationProvider::OpenAI => TranslationProviderImpl::OpenAI {
                client: OpenAI::new(
                    config.get_api_key(),
                    config.get_endpoint(),
                    config.get_timeout_secs(),
                ),
            },
            TranslationProvider::Anthropic => TranslationProviderImpl::Anthropic {
                client: Anthropic::new(
                    config.get_api_key(),
                    config.get_endpoint(),
                    config.get_timeout_secs(),
                ),
            },
        };

        let model = config.get_model();
        Ok(Self {
            provider,
            common: config.common,
            model,
        })
    }

    /// Build the user prompt for one translation call
    fn build_prompt(&self, text: &str, target_language: &str, context: &str) -> String {
        format!(
            "{}\n\nText to translate: \"{}\"\n\nReturn ONLY the translated text in {}. \
             Keep technical terms, proper names, and brand names unchanged. \
             Maintain the original formatting and tone.",
            context, text, target_language
        )
    }
}

#[async_trait]
impl Translator for TranslationService {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        context: &str,
    ) -> Result<String, ProviderError> {
        let prompt = self.build_prompt(text, target_language, context);

        match &self.provider {
            TranslationProviderImpl::OpenAI { client } => {
                let request = OpenAIRequest::new(&self.model)
                    .add_message("system", &self.common.system_prompt)
                    .add_message("user", prompt)
                    .temperature(self.common.temperature)
                    .max_tokens(self.common.max_tokens);

                let response = client.complete(request).await?;
                Ok(OpenAI::extract_text_from_response(&response))
            }
            TranslationProviderImpl::Anthropic { client } => {
                let request = AnthropicRequest::new(&self.model, self.common.max_tokens)
                    .system(&self.common.system_prompt)
                    .temperature(self.common.temperature)
                    .add_message("user", prompt);

                let response = client.complete(request).await?;
                Ok(Anthropic::extract_text_from_response(&response))
            }
        }
    }
}

/// Build the per-language context string from the configured template
pub fn language_context(context_template: &str, target_language: &str) -> String {
    context_template.replace("{target_language}", target_language)
}

/// Translate every fragment into every target language, one call at a time.
///
/// The returned table always holds an entry for every (fragment, language)
/// pair: a failed call is logged and the original text substituted, so
/// rendering never needs a missing-key branch. Calls run in nested loop
/// order (outer: language, inner: fragment) with no retry or rate limiting.
pub async fn translate_all(
    translator: &dyn Translator,
    fragments: &[Fragment],
    target_languages: &[String],
    context_template: &str,
) -> TranslationTable {
    let mut table = TranslationTable::new();
    let total_texts = fragments.len();

    info!(
        "Translating {} text blocks into {} languages ({} calls)",
        total_texts,
        target_languages.len(),
        total_texts * target_languages.len()
    );

    for (lang_idx, language) in target_languages.iter().enumerate() {
        info!(
            "Translating to {} ({}/{})",
            language,
            lang_idx + 1,
            target_languages.len()
        );

        // The context is language-scoped, rebuilt once per language
        let context = language_context(context_template, language);

        for (text_idx, fragment) in fragments.iter().enumerate() {
            if (text_idx + 1) % 10 == 0 {
                info!("  Progress: {}/{} texts", text_idx + 1, total_texts);
            }

            let translated = match translator
                .translate(&fragment.text, language, &context)
                .await
            {
                Ok(translated) => translated,
                Err(e) => {
                    // Fall back to the original text so the table stays total
                    error!("Translation error for '{}': {}", fragment.text, e);
                    fragment.text.clone()
                }
            };

            table
                .entry(fragment.text.clone())
                .or_default()
                .insert(language.clone(), translated);
        }
    }

    table
}

/// Persist a translation table as pretty-printed JSON, keyed by fragment text
pub fn save_translation_table<P: AsRef<Path>>(table: &TranslationTable, path: P) -> Result<()> {
    let json =
        serde_json::to_string_pretty(table).context("Failed to serialize translation table")?;
    FileManager::write_to_file(&path, &json)?;
    info!("Saved translations: {}", path.as_ref().display());
    Ok(())
}

/// Load a previously persisted translation table
pub fn load_translation_table<P: AsRef<Path>>(path: P) -> Result<TranslationTable> {
    let json = FileManager::read_to_string(&path)?;
    serde_json::from_str(&json).context("Failed to parse translation table")
}
