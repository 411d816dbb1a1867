// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, warn};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use baba::app_config::{self, Config};
use baba::language_utils;
use baba::models::{AudienceType, Gender, Language, UserSettings};
use baba::translation::TranslationOutcome;
use baba::translation::prompts::context_instruction;
use baba::{AppError, Controller};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for AudienceType to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliAudience {
    General,
    Male,
    Female,
    GroupMales,
    GroupFemales,
    MixedGroup,
}

impl From<CliAudience> for AudienceType {
    fn from(cli_audience: CliAudience) -> Self {
        match cli_audience {
            CliAudience::General => AudienceType::General,
            CliAudience::Male => AudienceType::Male,
            CliAudience::Female => AudienceType::Female,
            CliAudience::GroupMales => AudienceType::GroupMales,
            CliAudience::GroupFemales => AudienceType::GroupFemales,
            CliAudience::MixedGroup => AudienceType::MixedGroup,
        }
    }
}

/// CLI Wrapper for Gender to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliGender {
    Male,
    Female,
}

impl From<CliGender> for Gender {
    fn from(cli_gender: CliGender) -> Self {
        match cli_gender {
            CliGender::Male => Gender::Male,
            CliGender::Female => Gender::Female,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate text between English and Hebrew
    Translate {
        /// Text to translate; read from stdin when omitted
        #[arg(value_name = "TEXT")]
        text: Vec<String>,

        /// Who the text is addressed to
        #[arg(short, long, value_enum, default_value = "general")]
        audience: CliAudience,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Also print the grammatical context sent to the model
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show which language a text is detected as
    Detect {
        /// Text to inspect
        #[arg(value_name = "TEXT", required = true)]
        text: Vec<String>,
    },

    /// Show or change the stored user settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Check that the translation API is reachable and accepts the API key
    Check,

    /// Generate shell completions for baba
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print the current settings (default)
    Show,
    /// Set your gender, used to conjugate Hebrew output
    SetGender {
        #[arg(value_enum)]
        gender: CliGender,
    },
    /// Set your preferred language (english, hebrew, en, he, ...)
    SetLanguage {
        language: String,
    },
    /// Restore the default settings
    Reset,
}

/// BABA - gender-aware English/Hebrew translation
#[derive(Parser, Debug)]
#[command(name = "baba")]
#[command(version)]
#[command(about = "Gender- and audience-aware English/Hebrew translator")]
#[command(long_about = "baba translates text between English and Hebrew using a chat-completion model.
The source language is detected automatically and the text is translated into the other one.
When translating into Hebrew, your gender and the audience select the right conjugations.

EXAMPLES:
    baba translate \"How are you?\"                 # Translate with no audience context
    baba translate -a group-females \"Come in\"      # Address a group of women
    baba translate \"מה שלומך\"                       # Hebrew input is translated to English
    baba settings set-gender female                 # Store your gender
    baba detect \"hi שלום\"                           # Prints: hebrew
    baba check                                      # Verify the API key and endpoint
    baba completions bash > baba.bash               # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one will be created automatically. The API key is read from the
    OPENAI_API_KEY environment variable; without it every translation returns
    placeholder text.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Model name to use for translation
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Chat-completion API base URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Settings database file
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
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
    // Warn by default so command output stays clean; config may raise it
    CustomLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "baba", &mut std::io::stdout());
            Ok(())
        }
        Commands::Detect { ref text } => {
            let text = text.join(" ");
            println!("{}", language_utils::detect_language(&text));
            Ok(())
        }
        Commands::Translate { ref text, audience, json, verbose } => {
            let controller = build_controller(&cli)?;
            let text = if text.is_empty() { read_stdin()? } else { text.join(" ") };
            run_translate(&controller, &text, audience.into(), json, verbose).await
        }
        Commands::Check => {
            let controller = build_controller(&cli)?;
            controller.check_connection().await.context("Translation API check failed")?;
            println!("OK");
            Ok(())
        }
        Commands::Settings { ref action } => {
            let controller = build_controller(&cli)?;
            run_settings(&controller, action.as_ref().unwrap_or(&SettingsAction::Show)).await
        }
    }
}

fn build_controller(options: &CommandLineOptions) -> Result<Controller> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }
    if let Some(endpoint) = &options.endpoint {
        config.translation.endpoint = endpoint.clone();
    }
    if let Some(db_path) = &options.db_path {
        config.storage.database_path = db_path.to_string_lossy().into_owned();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate().context("Configuration validation failed")?;

    Controller::with_config(&config)
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    Ok(buffer)
}

async fn run_translate(controller: &Controller, text: &str, audience: AudienceType, json: bool, verbose: bool) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Translating...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = controller.translate_text(text, audience).await;
    spinner.finish_and_clear();

    let report = match report {
        Ok(report) => report,
        Err(AppError::EmptyInput) => {
            warn!("Please enter some text to translate");
            return Ok(());
        }
        Err(e) => return Err(anyhow!(e)),
    };

    if let TranslationOutcome::Fallback(reason) = &report.outcome {
        error!("Translation Error: Failed to translate ({}). Showing placeholder text.", reason);
    }

    if verbose {
        let settings = controller.settings().await;
        let context = context_instruction(report.result.to_language, settings.user_gender, audience);
        eprintln!(
            "{} -> {} | audience: {} | context: {}",
            report.result.from_language.display_name(),
            report.result.to_language.display_name(),
            audience.label(),
            context.as_deref().unwrap_or("none")
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report.result)?);
    } else {
        println!("{}", report.result.translated_text);
    }
    Ok(())
}

async fn run_settings(controller: &Controller, action: &SettingsAction) -> Result<()> {
    let result = match action {
        SettingsAction::Show => Ok(controller.settings().await),
        SettingsAction::SetGender { gender } => controller.set_gender((*gender).into()).await,
        SettingsAction::SetLanguage { language } => {
            let language: Language = language.parse()?;
            controller.set_preferred_language(language).await
        }
        SettingsAction::Reset => controller.reset_settings().await,
    };

    match result {
        Ok(settings) => print_settings(&settings),
        Err(e) => {
            // Settings failures are not fatal; show what is currently in effect
            warn!("Failed to update settings: {}", e);
            print_settings(&controller.settings().await);
        }
    }
    Ok(())
}

fn print_settings(settings: &UserSettings) {
    println!("Gender:             {}", settings.user_gender);
    println!("Preferred language: {}", settings.preferred_language.display_name());
}
