//! Convert CLI commands.

use crate::content::{markup_to_plain, plain_to_markup};

/// Prints the markup form of `text`.
pub fn cmd_convert_to_markup(text: String) -> anyhow::Result<()> {
    println!("{}", plain_to_markup(&text));
    Ok(())
}

/// Prints the plain form of `markup`.
pub fn cmd_convert_to_plain(markup: String) -> anyhow::Result<()> {
    println!("{}", markup_to_plain(&markup));
    Ok(())
}
