//
//  bitbucket-deploy-keys
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! Provides formatters for the two output modes the CLI supports:
//!
//! - Table format: human-readable output for interactive use
//! - JSON format: structured output for scripting and automation
//!
//! Color output is automatically detected based on terminal capabilities
//! and disabled when output is piped or redirected.

use serde::Serialize;

/// Output format for rendering values.
///
/// The default is [`OutputFormat::Table`], which provides the best
/// experience for interactive terminal use.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    /// Human-readable format with optional color support.
    #[default]
    Table,
    /// JSON format for scripting and automation. Pretty-printed.
    Json,
}

/// A unified output writer that handles both output formats.
///
/// `OutputWriter` abstracts away the details of the output format and
/// provides a consistent API for writing data, status messages, and errors.
///
/// # Example
///
/// ```rust,ignore
/// let writer = OutputWriter::new(OutputFormat::Json);
/// writer.write_list(&items)?;  // Outputs a JSON array
/// ```
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a new output writer with the specified format.
    ///
    /// Color support is detected from the terminal.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Returns whether color output is enabled.
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Writes a single value to stdout using the configured format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value)?;
                println!("{}", json);
            }
            OutputFormat::Table => {
                value.print_table(self.color);
            }
        }
        Ok(())
    }

    /// Writes a list of values to stdout using the configured format.
    ///
    /// For JSON format the entire list is serialized as a JSON array; for
    /// table format each value is rendered individually.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(values)?;
                println!("{}", json);
            }
            OutputFormat::Table => {
                for value in values {
                    value.print_table(self.color);
                }
            }
        }
        Ok(())
    }
}

/// Trait for types that can render themselves as table output.
///
/// Implemented by the CLI's display types; used by [`OutputWriter::write`]
/// and [`OutputWriter::write_list`] for the table format.
pub trait TableOutput {
    /// Prints this value in table format.
    ///
    /// # Parameters
    ///
    /// * `color` - Whether to apply color styling
    fn print_table(&self, color: bool);
}

/// Prints a styled header with an underline.
///
/// The header text is printed in bold, followed by a dashed underline of
/// the same length.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.len()));
}

/// Prints a key-value pair with optional styling.
///
/// The key is dimmed when color is enabled to provide visual separation
/// from the value. Commonly used in [`TableOutput::print_table`]
/// implementations for rendering object fields.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
