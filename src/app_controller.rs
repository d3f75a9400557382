use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::Path;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::html_processor::{build_template, extract_fragments, HtmlDocument};
use crate::providers::Translator;
use crate::renderer;
use crate::translation_service::{save_translation_table, translate_all};

// @module: Application controller for page translation

/// Outcome of a single-file pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// All artifacts for the file were generated
    Processed,
    /// Nothing to translate, no artifacts emitted
    Skipped,
}

/// Main application controller for the page translation pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        FileManager::ensure_dir(&config.output_dir)?;
        Ok(Self { config })
    }

    /// Directory the controller reads pages from, per the processing mode
    pub fn source_dir(&self) -> &str {
        if self.config.process_templates {
            &self.config.template_dir
        } else {
            &self.config.input_dir
        }
    }

    /// Run the full pipeline over every HTML file in the source directory.
    ///
    /// Per-file errors are logged and do not stop the batch; only the counts
    /// change. Returns Ok even when individual files failed.
    pub async fn run(&self, translator: &dyn Translator) -> Result<()> {
        let start_time = std::time::Instant::now();
        let source_dir = self.source_dir();

        if !FileManager::dir_exists(source_dir) {
            warn!("Source directory not found: {}", source_dir);
            return Ok(());
        }

        let html_files = FileManager::find_html_files(source_dir)?;
        if html_files.is_empty() {
            warn!("No HTML files found in {}", source_dir);
            return Ok(());
        }

        let progress_bar = ProgressBar::new(html_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result);

        let mut success_count = 0;
        let mut skip_count = 0;
        let mut error_count = 0;

        for html_file in &html_files {
            let file_name = html_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress_bar.set_message(format!("Processing: {}", file_name));

            match self.process_file(html_file, translator).await {
                Ok(FileOutcome::Processed) => success_count += 1,
                Ok(FileOutcome::Skipped) => skip_count += 1,
                Err(e) => {
                    error!("Error processing {}: {}", file_name, e);
                    error_count += 1;
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        info!(
            "Directory processing completed: {} processed, {} skipped, {} errors in {}",
            success_count,
            skip_count,
            error_count,
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Process a single HTML file end to end: extract, template, translate
    /// into every target language, render, and emit the redirect page.
    pub async fn process_file(
        &self,
        html_file: &Path,
        translator: &dyn Translator,
    ) -> Result<FileOutcome> {
        info!("Processing: {}", html_file.display());

        let document = HtmlDocument::load(html_file)?;

        let fragments = extract_fragments(&document);
        if fragments.is_empty() {
            warn!("No translatable text found in {}", html_file.display());
            return Ok(FileOutcome::Skipped);
        }

        let output_dir = Path::new(&self.config.output_dir);
        FileManager::ensure_dir(output_dir)?;

        // Build and persist the language-neutral template
        let (template_html, placeholders) = build_template(&document, &fragments)?;
        let template_path = output_dir.join(FileManager::template_filename(&document.file_name()));
        FileManager::write_to_file(&template_path, &template_html)?;
        info!("Created template: {}", template_path.display());

        // One call per (fragment, language) pair, original text on failure
        let table = translate_all(
            translator,
            &fragments,
            &self.config.target_languages,
            &self.config.translation.common.context_template,
        )
        .await;

        let translations_path =
            output_dir.join(FileManager::translations_filename(&document.file_stem()));
        save_translation_table(&table, &translations_path)?;

        renderer::write_language_files(
            &template_html,
            &table,
            &placeholders,
            &self.config.target_languages,
            output_dir,
            &document.file_name(),
        )?;

        renderer::write_redirect_file(
            output_dir,
            &document.file_name(),
            &self.config.target_languages,
        )?;

        Ok(FileOutcome::Processed)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
