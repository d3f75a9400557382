/*!
 * Rendering of per-language pages and the language-redirect entry page.
 *
 * Rendering is plain substring replacement over the serialized template:
 * each `{{text_N}}` placeholder becomes the translated text for the target
 * language. The redirect page is a self-contained script that picks the
 * visitor's language and navigates to the matching rendered file.
 */

use anyhow::Result;
use log::{info, warn};
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::html_processor::PlaceholderMap;
use crate::translation_service::TranslationTable;

/// Language code the redirect page falls back to when the visitor's
/// resolved language is not in the supported set
pub const DEFAULT_LANGUAGE: &str = "english";

/// Render one language's page from the placeholder template.
///
/// A placeholder whose fragment has no table entry for this language is left
/// untouched and reported as a data-integrity warning; the fallback in the
/// orchestrator means this should not happen for well-formed input.
pub fn render_language(
    template_html: &str,
    table: &TranslationTable,
    placeholders: &PlaceholderMap,
    target_language: &str,
) -> String {
    let mut rendered = template_html.to_string();

    for (text, token) in placeholders.entries() {
        let pattern = PlaceholderMap::delimited(token);
        match table.get(text).and_then(|langs| langs.get(target_language)) {
            Some(translated) => {
                rendered = rendered.replace(&pattern, translated);
            }
            None => {
                warn!(
                    "No {} translation recorded for '{}', leaving placeholder {} in place",
                    target_language, text, pattern
                );
            }
        }
    }

    if let Ok(leftover_re) = Regex::new(r"\{\{text_\d+\}\}") {
        let leftover = leftover_re.find_iter(&rendered).count();
        if leftover > 0 {
            warn!(
                "{} unresolved placeholder(s) remain in {} output",
                leftover, target_language
            );
        }
    }

    rendered
}

/// Render and write one file per target language next to the template
pub fn write_language_files(
    template_html: &str,
    table: &TranslationTable,
    placeholders: &PlaceholderMap,
    target_languages: &[String],
    output_dir: &Path,
    original_name: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(target_languages.len());

    for language in target_languages {
        let rendered = render_language(template_html, table, placeholders, language);
        let path = output_dir.join(FileManager::rendered_filename(language, original_name));

        FileManager::write_to_file(&path, &rendered)
            .map_err(|e| PipelineError::Render(e.to_string()))?;
        info!("Generated: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

const REDIRECT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Language Selection</title>
    <script>
        function getPreferredLanguage() {
            const urlParams = new URLSearchParams(window.location.search);
            let lang = urlParams.get('lang') || localStorage.getItem('preferred_language');

            if (!lang) {
                lang = navigator.language || navigator.userLanguage;
                lang = lang.split('-')[0].toLowerCase();
            }

            const supportedLangs = __SUPPORTED_LANGUAGES__;

            if (!supportedLangs.includes(lang)) {
                lang = '__DEFAULT_LANGUAGE__';
            }

            return lang;
        }

        const lang = getPreferredLanguage();
        localStorage.setItem('preferred_language', lang);

        // Redirect to language-specific file
        window.location.href = lang + '_' + '__ORIGINAL_FILENAME__';
    </script>
</head>
<body>
    <p>Detecting your language preference...</p>
</body>
</html>"#;

/// Build the client-side redirect page for a source file.
///
/// Language resolution order in the emitted script: `lang` query parameter,
/// stored preference, then the browser locale trimmed to a bare code, with
/// unsupported codes falling back to the default language.
pub fn redirect_page(original_filename: &str, target_languages: &[String]) -> String {
    let supported: Vec<String> = target_languages
        .iter()
        .map(|lang| lang.to_lowercase())
        .collect();
    // Safe: a Vec<String> always serializes
    let supported_json = serde_json::to_string(&supported).unwrap_or_else(|_| "[]".to_string());

    REDIRECT_TEMPLATE
        .replace("__SUPPORTED_LANGUAGES__", &supported_json)
        .replace("__DEFAULT_LANGUAGE__", DEFAULT_LANGUAGE)
        .replace("__ORIGINAL_FILENAME__", original_filename)
}

/// Write the redirect page at the original filename in the output directory.
///
/// This intentionally shadows a same-named file already in the output tree:
/// after generation the redirect page is the canonical entry point.
pub fn write_redirect_file(
    output_dir: &Path,
    original_filename: &str,
    target_languages: &[String],
) -> Result<PathBuf> {
    let html = redirect_page(original_filename, target_languages);
    let path = output_dir.join(original_filename);

    FileManager::write_to_file(&path, &html).map_err(|e| PipelineError::Render(e.to_string()))?;
    info!("Generated redirect file: {}", path.display());

    Ok(path)
}
