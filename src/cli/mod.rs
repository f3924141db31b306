//! CLI command implementations.
//!
//! Each submodule implements one command group. Commands that change state
//! run through the [editor commands](crate::editor) so the CLI and any other
//! front end share the same behavior.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `category` | Create, delete and list categories |
//! | `template` | Save, get, list, search, delete, import and export templates |
//! | `convert` | Plain/markup conversion of arbitrary text |
//! | `config` | Show the effective configuration |
//! | `status` | Database location and row counts |
//!
//! # Example Usage
//!
//! ```bash
//! mailbook category create Sales
//! mailbook template save --name Welcome --category Sales --content "Hello"
//! mailbook template list --category Sales
//! mailbook template export 1 --output welcome.json
//! ```

// CLI commands are allowed to use println! for output
#![allow(clippy::print_stdout)]
// CLI commands take owned strings from clap parsing
#![allow(clippy::needless_pass_by_value)]
// Uniform signatures across command functions
#![allow(clippy::unnecessary_wraps)]

mod category;
mod config;
mod convert;
mod status;
mod template;

pub use category::{cmd_category_create, cmd_category_delete, cmd_category_list};
pub use config::cmd_config;
pub use convert::{cmd_convert_to_markup, cmd_convert_to_plain};
pub use status::cmd_status;
pub use template::{
    SaveTemplateArgs, cmd_template_delete, cmd_template_export, cmd_template_get,
    cmd_template_import, cmd_template_list, cmd_template_save, cmd_template_search,
};

use crate::models::TemplateSummary;

/// Output format for list and get commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned columns (default for lists).
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// Just the body (default for get).
    Text,
}

impl OutputFormat {
    /// Parses output format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "text" | "plain" => Self::Text,
            _ => Self::Table,
        }
    }
}

fn print_templates_table(templates: &[TemplateSummary]) {
    if templates.is_empty() {
        println!("No templates found.");
        return;
    }

    println!("{:<8} NAME", "ID");
    println!("{}", "-".repeat(40));
    for template in templates {
        println!("{:<8} {}", template.id, template.name);
    }

    println!();
    println!("Total: {} templates", templates.len());
}
