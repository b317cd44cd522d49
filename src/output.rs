//! Rendering of classified arguments and temporary file output.

use crate::classify::Classified;
use anyhow::Result;
use clap::ValueEnum;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Output format for classified arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// A JSON array of tagged records
    Json,
    /// One line per token: `<kind> <name>[=<value>]`
    Text,
}

/// Render classified arguments in the given format.
///
/// JSON output ends with a newline so it can be printed as-is.
pub fn render(tokens: &[Classified], format: Format) -> Result<String> {
    match format {
        Format::Json => {
            let mut json = serde_json::to_string_pretty(tokens)?;
            json.push('\n');
            Ok(json)
        }
        Format::Text => Ok(render_text(tokens)),
    }
}

fn render_text(tokens: &[Classified]) -> String {
    let mut output = String::new();
    for token in tokens {
        let line = match token {
            Classified::Long { name, value } => format!("long {}{}\n", name, format_value(value)),
            Classified::Short { name, value } => format!("short {}{}\n", name, format_value(value)),
            Classified::Positional { text } => format!("positional {}\n", text),
        };
        output.push_str(&line);
    }
    output
}

fn format_value(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("={}", v),
        None => String::new(),
    }
}

/// Write content to a temporary file and return its path.
///
/// The file persists after the process exits.
pub fn write_temp_file(content: &str) -> Result<PathBuf> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    let path = file.into_temp_path().keep()?;
    Ok(path)
}
