/*!
 * # Langding - AI-driven landing page auto-translation
 *
 * A Rust library for translating static HTML pages into multiple languages
 * using LLM providers.
 *
 * ## Features
 *
 * - Extract translatable text blocks from HTML pages
 * - Build language-neutral placeholder templates
 * - Translate fragments using OpenAI or Anthropic APIs
 * - Render one page per target language
 * - Emit a client-side language-redirect entry page
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `html_processor`: HTML parsing, text extraction and templating
 * - `translation_service`: Provider dispatch and translation orchestration
 * - `renderer`: Per-language rendering and redirect page generation
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Client implementations for the supported LLM providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod html_processor;
pub mod providers;
pub mod renderer;
pub mod translation_service;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, PipelineError, ProviderError};
pub use html_processor::{extract_fragments, Fragment, HtmlDocument, PlaceholderMap};
pub use providers::Translator;
pub use translation_service::{TranslationService, TranslationTable};
