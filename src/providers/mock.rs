/*!
 * Mock translator implementations for testing.
 *
 * This module provides mock translators that simulate different behaviors:
 * - `MockTranslator::working()` - Always succeeds with translated text
 * - `MockTranslator::intermittent(n)` - Fails every nth request
 * - `MockTranslator::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a deterministic translation
    Working,
    /// Fails intermittently (every nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
}

/// Mock translator for testing pipeline behavior without network calls
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared so cloned handles observe the same sequence
    request_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock translator
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of translation calls received so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// The deterministic translation the working mock produces
    pub fn expected_translation(text: &str, target_language: &str) -> String {
        format!("[{}] {}", target_language, text)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        _context: &str,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working => Ok(Self::expected_translation(text, target_language)),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    Err(ProviderError::RequestFailed(format!(
                        "simulated intermittent failure on request {}",
                        count
                    )))
                } else {
                    Ok(Self::expected_translation(text, target_language))
                }
            }
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "simulated provider failure".to_string(),
            )),
        }
    }
}
