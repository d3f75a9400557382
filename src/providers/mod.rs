/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported LLM
 * providers (OpenAI and Anthropic) plus a mock translator for tests.
 */

use async_trait::async_trait;

use crate::errors::ProviderError;

/// Capability needed by the translation pipeline: one fallible call that
/// turns a text block into its translation for a target language.
///
/// Implementations must treat the context string as language-scoped guidance
/// built once per language, not per fragment.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a single text block into the target language
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `target_language` - Target language name (e.g. "Spanish")
    /// * `context` - Shared per-language context for better translations
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        context: &str,
    ) -> Result<String, ProviderError>;
}

pub mod anthropic;
pub mod mock;
pub mod openai;
