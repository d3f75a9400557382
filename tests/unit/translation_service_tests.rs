/*!
 * Tests for the translation orchestration and its fallback policy
 */

use langding::html_processor::Fragment;
use langding::providers::mock::MockTranslator;
use langding::translation_service::{
    language_context, load_translation_table, save_translation_table, translate_all,
};

use crate::common;

fn fragments() -> Vec<Fragment> {
    vec![
        Fragment {
            index: 0,
            text: "First extracted block".to_string(),
        },
        Fragment {
            index: 1,
            text: "Second extracted block".to_string(),
        },
        Fragment {
            index: 2,
            text: "Third extracted block".to_string(),
        },
    ]
}

fn languages() -> Vec<String> {
    vec!["Spanish".to_string(), "French".to_string()]
}

const CONTEXT_TEMPLATE: &str = "Translate the following texts to {target_language}:";

/// Test that a working translator fills every (fragment, language) pair
#[tokio::test]
async fn test_translate_all_withWorkingProvider_shouldFillEveryPair() {
    let translator = MockTranslator::working();
    let fragments = fragments();
    let languages = languages();

    let table = translate_all(&translator, &fragments, &languages, CONTEXT_TEMPLATE).await;

    assert_eq!(table.len(), fragments.len());
    for fragment in &fragments {
        let per_lang = table.get(&fragment.text).expect("fragment entry missing");
        for language in &languages {
            assert_eq!(
                per_lang.get(language).expect("language entry missing"),
                &MockTranslator::expected_translation(&fragment.text, language)
            );
        }
    }
}

/// Test that provider failure substitutes the original text for every pair
#[tokio::test]
async fn test_translate_all_withFailingProvider_shouldFallBackToOriginal() {
    let translator = MockTranslator::failing();
    let fragments = fragments();
    let languages = languages();

    let table = translate_all(&translator, &fragments, &languages, CONTEXT_TEMPLATE).await;

    for fragment in &fragments {
        let per_lang = table.get(&fragment.text).expect("fragment entry missing");
        for language in &languages {
            assert_eq!(
                per_lang.get(language).expect("language entry missing"),
                &fragment.text
            );
        }
    }
}

/// Test that intermittent failures still leave a fully populated table
#[tokio::test]
async fn test_translate_all_withIntermittentProvider_shouldStayTotal() {
    let translator = MockTranslator::intermittent(3);
    let fragments = fragments();
    let languages = languages();

    let table = translate_all(&translator, &fragments, &languages, CONTEXT_TEMPLATE).await;

    for fragment in &fragments {
        let per_lang = table.get(&fragment.text).expect("fragment entry missing");
        for language in &languages {
            let value = per_lang.get(language).expect("language entry missing");
            let translated = MockTranslator::expected_translation(&fragment.text, language);
            assert!(value == &translated || value == &fragment.text);
        }
    }
}

/// Test that the call count is exactly fragments x languages
#[tokio::test]
async fn test_translate_all_callCount_shouldBeFragmentsTimesLanguages() {
    let translator = MockTranslator::working();
    let fragments = fragments();
    let languages = languages();

    let _ = translate_all(&translator, &fragments, &languages, CONTEXT_TEMPLATE).await;

    assert_eq!(translator.call_count(), fragments.len() * languages.len());
}

/// Test that no calls are made for an empty fragment list
#[tokio::test]
async fn test_translate_all_withNoFragments_shouldMakeNoCalls() {
    let translator = MockTranslator::working();
    let languages = languages();

    let table = translate_all(&translator, &[], &languages, CONTEXT_TEMPLATE).await;

    assert!(table.is_empty());
    assert_eq!(translator.call_count(), 0);
}

/// Test per-language context construction from the template
#[test]
fn test_language_context_withTemplate_shouldSubstituteLanguage() {
    let context = language_context(CONTEXT_TEMPLATE, "Spanish");
    assert_eq!(context, "Translate the following texts to Spanish:");
}

/// Test that a persisted table can be read back
#[tokio::test]
async fn test_translation_table_persistence_shouldRoundTrip() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let translator = MockTranslator::working();
    let fragments = fragments();
    let languages = languages();

    let table = translate_all(&translator, &fragments, &languages, CONTEXT_TEMPLATE).await;

    let path = temp_dir.path().join("page_translations.json");
    save_translation_table(&table, &path)?;

    let loaded = load_translation_table(&path)?;
    assert_eq!(loaded, table);

    // Human-readable indentation in the persisted file
    let raw = std::fs::read_to_string(&path)?;
    assert!(raw.contains("\n  "));

    Ok(())
}
