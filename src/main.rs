// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;

use langding::app_config::{Config, LogLevel, TranslationProvider};
use langding::app_controller::Controller;
use langding::translation_service::TranslationService;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    OpenAI,
    Anthropic,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for langding
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Langding - AI-driven landing page auto-translation tool
///
/// Extracts translatable text from static HTML pages, translates it with an
/// LLM provider, and generates one page per language plus a redirect page.
#[derive(Parser, Debug)]
#[command(name = "langding")]
#[command(version = "1.0.0")]
#[command(about = "AI-driven landing page auto-translation tool")]
#[command(long_about = "Langding translates static HTML pages into multiple languages.

EXAMPLES:
    langding                                     # Translate ./input with default config
    langding --languages Spanish French          # Explicit target languages
    langding --provider anthropic                # Use Anthropic instead of OpenAI
    langding --process-templates                 # Read pages from the template directory
    langding completions bash > langding.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. API keys are read from the config file or
    the OPENAI_API_KEY / ANTHROPIC_API_KEY environment variables.

SUPPORTED PROVIDERS:
    openai    - OpenAI API (default: gpt-3.5-turbo)
    anthropic - Anthropic Claude API (default: claude-3-haiku-20240307)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing input HTML files
    #[arg(short, long)]
    input_dir: Option<String>,

    /// Directory to save output files
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Directory containing template HTML files
    #[arg(long)]
    template_dir: Option<String>,

    /// Languages to translate into
    #[arg(short = 'L', long, num_args = 1..)]
    languages: Option<Vec<String>>,

    /// Process files from the template directory instead of the input directory
    #[arg(long)]
    process_templates: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default.
    // The level is updated after the config is loaded.
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "langding", &mut std::io::stdout());
        return Ok(());
    }

    run_translate(cli).await
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    let start_time = std::time::Instant::now();

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        config
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(input_dir) = &options.input_dir {
        config.input_dir = input_dir.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(template_dir) = &options.template_dir {
        config.template_dir = template_dir.clone();
    }
    if let Some(languages) = &options.languages {
        config.target_languages = languages.clone();
    }
    if options.process_templates {
        config.process_templates = true;
    }
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        let provider_str = config.translation.provider.to_lowercase_string();
        if let Some(provider_config) = config
            .translation
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            provider_config.model = model.clone();
        }
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Credentials may come from the environment rather than the config file
    config.translation.apply_env_credentials();

    // Validate before any file is touched; a missing credential aborts the run
    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e).context("Configuration validation failed");
    }

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    info!("Starting langding translation process");
    info!(
        "Provider: {} - {}",
        config.translation.provider.display_name(),
        config.translation.get_model()
    );
    info!("Target languages: {}", config.target_languages.join(", "));

    let result = async {
        let translation_service = TranslationService::new(config.translation.clone())?;
        let controller = Controller::with_config(config.clone())?;

        if config.process_templates {
            info!("Processing templates directory");
        } else {
            info!("Processing input directory");
        }
        controller.run(&translation_service).await
    }
    .await;

    match &result {
        Ok(()) => info!("Translation process completed successfully"),
        Err(e) => error!("Fatal error: {}", e),
    }

    info!(
        "Total execution time: {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    result
}
