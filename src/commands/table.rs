//! Table command: render JSON or YAML data as a text or HTML table.
//!
//! # Input
//!
//! Any JSON/YAML document accepted by [`Table::from_data`]. With
//! `with_metadata` set, a top-level object of the form
//! `{"data": ..., "metadata": {...}}` is unwrapped so the metadata can be
//! rendered alongside the rows.
//!
//! # Examples
//!
//! ```bash
//! echo '[{"a": 1, "b": 2}, {"a": 3, "b": 4}]' | bittab table
//! bittab table -i rows.yaml --data-format yaml --format html --orientation vertical
//! ```

use serde_json::{Map, Value};
use termcolor::{ColorSpec, WriteColor};
use tracing::debug;

use super::Command;
use crate::error::{BittabError, Result};
use crate::table::{FromDataConfig, HtmlConfig, Orientation, Table, TextConfig};
use crate::utils::parsing::parse_table_input;
use crate::InputSource;

/// Output format for the table command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Centered fixed-width columns
    #[default]
    Text,
    Html,
}

impl TableFormat {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(TableFormat::Text),
            "html" => Ok(TableFormat::Html),
            _ => Err(BittabError::InvalidInput(format!(
                "Unknown table format: '{}'. Valid formats: text, html",
                s
            ))),
        }
    }
}

/// Configuration for the table command.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub source: InputSource,
    /// Input document format (json, yaml)
    pub data_format: String,
    pub format: TableFormat,
    pub orientation: Orientation,
    pub max_depth: usize,
    pub maxlen: Option<usize>,
    pub with_headers: bool,
    pub with_metadata: bool,
    pub with_newlines: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            source: InputSource::Stdin,
            data_format: "json".to_string(),
            format: TableFormat::Text,
            orientation: Orientation::Auto,
            max_depth: 1,
            maxlen: None,
            with_headers: true,
            with_metadata: false,
            with_newlines: true,
        }
    }
}

pub struct TableCommand {
    config: TableConfig,
}

impl TableCommand {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Reads and parses the configured source into a table.
    pub fn load(&self) -> Result<Table> {
        let raw = self.config.source.read_to_string()?;
        let document = parse_table_input(&raw, &self.config.data_format)?;
        self.build(document)
    }

    /// Builds a table from an already parsed document.
    pub fn build(&self, document: Value) -> Result<Table> {
        let (data, metadata) = if self.config.with_metadata {
            split_metadata(document)?
        } else {
            (document, None)
        };

        let table = Table::from_data(
            &data,
            FromDataConfig {
                headers: None,
                max_depth: self.config.max_depth,
                metadata,
            },
        )?;
        debug!(rows = table.len(), columns = table.width(), "loaded table");
        Ok(table)
    }

    /// Renders a table in the configured output format.
    pub fn render(&self, table: &Table) -> Result<String> {
        match self.config.format {
            TableFormat::Text => Ok(table.to_text(&TextConfig {
                with_headers: self.config.with_headers,
                maxlen: self.config.maxlen,
            })),
            TableFormat::Html => table.to_html(&HtmlConfig {
                orientation: self.config.orientation,
                wrapped: true,
                with_headers: self.config.with_headers,
                with_newlines: self.config.with_newlines,
                with_metadata: self.config.with_metadata,
                max_depth: self.config.max_depth,
            }),
        }
    }

    fn write_output(&self, table: &Table, out: &mut dyn WriteColor) -> Result<()> {
        let rendered = self.render(table)?;

        // Header line and rule are highlighted in text output.
        let highlighted = match self.config.format {
            TableFormat::Text if self.config.with_headers && !table.headers().is_empty() => 2,
            _ => 0,
        };

        for (i, line) in rendered.lines().enumerate() {
            if i < highlighted {
                out.set_color(ColorSpec::new().set_bold(true))?;
                write!(out, "{}", line)?;
                out.reset()?;
                writeln!(out)?;
            } else {
                writeln!(out, "{}", line)?;
            }
        }
        Ok(())
    }
}

impl Command for TableCommand {
    fn execute(&self, out: &mut dyn WriteColor) -> Result<()> {
        let table = self.load()?;
        self.write_output(&table, out)
    }
}

/// Separates `{"data": ..., "metadata": {...}}` into its parts.
///
/// Documents without that shape are returned unchanged.
fn split_metadata(document: Value) -> Result<(Value, Option<Map<String, Value>>)> {
    match document {
        Value::Object(mut map) if map.contains_key("data") => {
            let metadata = match map.remove("metadata") {
                Some(Value::Object(metadata)) => Some(metadata),
                Some(Value::Null) | None => None,
                Some(_) => {
                    return Err(BittabError::InvalidInput(
                        "'metadata' must be an object".to_string(),
                    ))
                }
            };
            let data = map.remove("data").unwrap_or(Value::Null);
            Ok((data, metadata))
        }
        other => Ok((other, None)),
    }
}
