//! Output writer
//!
//! Renders results as JSON and writes them to a file when a path is given,
//! or to stdout otherwise.

use crate::error::{Error, Result, ResultExt};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON
    #[default]
    Pretty,
    /// Compact JSON on one line
    Json,
    /// One JSON document per line (arrays are split into their elements)
    Jsonl,
}

/// Render a value in the given format
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Jsonl => match serde_json::to_value(value)? {
            Value::Array(elements) => elements
                .iter()
                .map(serde_json::to_string)
                .collect::<std::result::Result<Vec<_>, _>>()?
                .join("\n"),
            other => serde_json::to_string(&other)?,
        },
    };
    Ok(rendered)
}

/// Write a value to `path`, or to stdout when no path is given
pub fn write_output<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    path: Option<&Path>,
) -> Result<()> {
    let mut rendered = render(value, format)?;
    if !rendered.is_empty() {
        rendered.push('\n');
    }

    match path {
        Some(path) => {
            info!("Writing to output file {}", path.display());
            fs::write(path, rendered).map_err(|e| {
                Error::output(format!(
                    "failed to write output file '{}': {e}",
                    path.display()
                ))
            })?;
            info!("Wrote to output file {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write results to stdout")?;
        }
    }

    Ok(())
}
