//! Binary entry point for mailbook.
//!
//! This binary provides the CLI interface for the mailbook template library.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use mailbook::cli::{self, SaveTemplateArgs};
use mailbook::config::MailbookConfig;
use mailbook::observability::{self, LoggingConfig};
use mailbook::services::{TemplateService, open_store};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Mailbook - a local library of reusable email templates.
#[derive(Parser)]
#[command(name = "mailbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Manage categories.
    Category {
        /// Category subcommand.
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage templates.
    Template {
        /// Template subcommand.
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Convert text between plain and markup.
    Convert {
        /// Conversion direction.
        #[command(subcommand)]
        action: ConvertAction,
    },

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },

    /// Show status.
    Status,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Category subcommands.
#[derive(Subcommand)]
enum CategoryAction {
    /// Create a category.
    Create {
        /// Category name.
        name: String,

        /// Fail if the category already exists.
        #[arg(long)]
        strict: bool,
    },

    /// Delete a category and all of its templates.
    Delete {
        /// Category name.
        name: String,
    },

    /// List categories.
    List {
        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: Option<String>,
    },
}

/// Template subcommands.
#[derive(Subcommand)]
enum TemplateAction {
    /// List templates.
    List {
        /// Only templates in this category.
        #[arg(long)]
        category: Option<String>,

        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: Option<String>,
    },

    /// Print a template.
    Get {
        /// Template id.
        id: i64,

        /// Body to print: plain or markup.
        #[arg(short, long, default_value = "plain")]
        mode: Option<String>,

        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: Option<String>,
    },

    /// Save a template.
    Save {
        /// Template name.
        #[arg(short, long)]
        name: String,

        /// Category name (created if missing).
        #[arg(long)]
        category: String,

        /// Update this template instead of creating one.
        #[arg(long)]
        id: Option<i64>,

        /// Plain content.
        #[arg(long, conflicts_with = "from_file")]
        content: Option<String>,

        /// Path to file containing the plain content.
        #[arg(long)]
        from_file: Option<PathBuf>,

        /// Markup content.
        #[arg(long)]
        markup: Option<String>,
    },

    /// Delete a template.
    Delete {
        /// Template id.
        id: i64,
    },

    /// Search template names and bodies.
    Search {
        /// Text to look for (case-insensitive).
        query: String,

        /// Only templates in this category.
        #[arg(long)]
        category: Option<String>,
    },

    /// Export a template.
    Export {
        /// Template id.
        id: i64,

        /// Output file path (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format: json or markup.
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Import a template file as a new template.
    Import {
        /// File to import.
        path: PathBuf,

        /// Category (required for markup files).
        #[arg(long)]
        category: Option<String>,

        /// Name (defaults to the document's name or the file stem).
        #[arg(short, long)]
        name: Option<String>,

        /// Import format: json or markup.
        #[arg(short, long)]
        format: Option<String>,
    },
}

/// Convert subcommands.
#[derive(Subcommand)]
enum ConvertAction {
    /// Wrap plain text in markup.
    ToMarkup {
        /// Text to convert.
        text: String,
    },

    /// Escape markup into plain text.
    ToPlain {
        /// Markup to convert.
        text: String,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match MailbookConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_settings(Some(&config.logging), cli.verbose);
    if let Err(e) = observability::init(&logging) {
        eprintln!("Error: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Opens the configured store.
fn open_service(config: &MailbookConfig) -> anyhow::Result<TemplateService> {
    Ok(TemplateService::new(Arc::new(open_store(config)?)))
}

/// Runs the selected command.
fn run_command(command: Commands, config: &MailbookConfig) -> anyhow::Result<()> {
    let limit = config.list_limit;

    match command {
        Commands::Category { action } => {
            let service = open_service(config)?;
            match action {
                CategoryAction::Create { name, strict } => {
                    cli::cmd_category_create(&service, name, strict)
                },
                CategoryAction::Delete { name } => cli::cmd_category_delete(&service, name),
                CategoryAction::List { format } => cli::cmd_category_list(&service, format),
            }
        },

        Commands::Template { action } => {
            let service = open_service(config)?;
            match action {
                TemplateAction::List { category, format } => {
                    cli::cmd_template_list(&service, category, format, limit)
                },
                TemplateAction::Get { id, mode, format } => {
                    cli::cmd_template_get(&service, id, mode, format)
                },
                TemplateAction::Save {
                    name,
                    category,
                    id,
                    content,
                    from_file,
                    markup,
                } => cli::cmd_template_save(
                    &service,
                    SaveTemplateArgs {
                        name,
                        category,
                        id,
                        content,
                        from_file,
                        markup,
                    },
                ),
                TemplateAction::Delete { id } => cli::cmd_template_delete(&service, id),
                TemplateAction::Search { query, category } => {
                    cli::cmd_template_search(&service, query, category, limit)
                },
                TemplateAction::Export { id, output, format } => {
                    cli::cmd_template_export(&service, id, output, format)
                },
                TemplateAction::Import {
                    path,
                    category,
                    name,
                    format,
                } => cli::cmd_template_import(&service, path, category, name, format),
            }
        },

        Commands::Convert { action } => match action {
            ConvertAction::ToMarkup { text } => cli::cmd_convert_to_markup(text),
            ConvertAction::ToPlain { text } => cli::cmd_convert_to_plain(text),
        },

        Commands::Config { show } => cli::cmd_config(config, show),

        Commands::Status => cli::cmd_status(config, &open_service(config)?),

        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "mailbook", &mut std::io::stdout());
            Ok(())
        },
    }
}
