//! Row/column tables built from heterogeneous data.
//!
//! A [`Table`] holds optional column headers, rows of [`Cell`]s padded to a
//! common width, and a free-form metadata mapping. Tables are usually built
//! with [`Table::from_data`], which inspects the input shape:
//!
//! | Input                          | Result                               |
//! |--------------------------------|--------------------------------------|
//! | array of objects               | one row per object, sorted key headers |
//! | array of arrays                | one row per array, no headers        |
//! | array of scalars               | a single row                         |
//! | object                         | a single row, sorted key headers     |
//! | scalar                         | a 1x1 table                          |
//!
//! Tables render to fixed-width text ([`Table::to_text`]) and HTML
//! ([`Table::to_html`]).

pub mod html;
pub mod input;
pub mod text;

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{BittabError, Result};
use crate::utils::display::truncate;

pub use html::{HtmlConfig, Orientation};
pub use input::InputType;
pub use text::TextConfig;

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Value(Value),
    /// A nested table, produced when building with `max_depth > 1`.
    Table(Box<Table>),
}

impl Cell {
    pub fn null() -> Self {
        Cell::Value(Value::Null)
    }

    /// Plain-text form of the cell, optionally truncated.
    ///
    /// Nulls render empty, strings render unquoted and compound values
    /// render as compact JSON.
    pub fn to_text(&self, maxlen: Option<usize>) -> String {
        let text = match self {
            Cell::Value(Value::Null) => String::new(),
            Cell::Value(Value::String(s)) => s.clone(),
            Cell::Value(other) => other.to_string(),
            Cell::Table(table) => table.summary(),
        };
        truncate(&text, maxlen)
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        Cell::Value(value)
    }
}

impl From<Table> for Cell {
    fn from(table: Table) -> Self {
        Cell::Table(Box::new(table))
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Value(Value::String(s.to_string()))
    }
}

/// Options for [`Table::from_data`] and friends.
#[derive(Debug, Clone)]
pub struct FromDataConfig {
    /// Column headers; `None` guesses them from the input shape
    pub headers: Option<Vec<String>>,
    /// Levels of nesting converted into tables (values below 1 give an
    /// empty table)
    pub max_depth: usize,
    /// Metadata attached to the resulting table
    pub metadata: Option<Map<String, Value>>,
}

impl Default for FromDataConfig {
    fn default() -> Self {
        Self {
            headers: None,
            max_depth: 1,
            metadata: None,
        }
    }
}

/// Row/column data with optional headers and metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Vec<String>,
    data: Vec<Vec<Cell>>,
    metadata: Map<String, Value>,
    width: usize,
}

impl Table {
    /// Creates a table from rows of cells.
    ///
    /// When `headers` is `None`, the first row is taken as the headers.
    pub fn new<I, R, C>(
        rows: I,
        headers: Option<Vec<String>>,
        metadata: Option<Map<String, Value>>,
    ) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let mut rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect::<Vec<Cell>>());
        let headers = match headers {
            Some(headers) => headers,
            None => rows
                .next()
                .map(|first| first.iter().map(|cell| cell.to_text(None)).collect())
                .unwrap_or_default(),
        };

        let mut table = Self {
            headers,
            data: Vec::new(),
            metadata: metadata.unwrap_or_default(),
            width: 0,
        };
        table.extend_cells(rows);
        table
    }

    fn with_headers(headers: Vec<String>, metadata: Option<Map<String, Value>>) -> Self {
        let mut table = Self {
            headers,
            metadata: metadata.unwrap_or_default(),
            ..Self::default()
        };
        table.set_width();
        table
    }

    /// Builds a table from arbitrary JSON-model data, detecting its shape.
    ///
    /// # Errors
    /// Returns `BittabError::UnsupportedData` if a row does not have the
    /// shape detected from the first row.
    pub fn from_data(data: &Value, config: FromDataConfig) -> Result<Self> {
        Self::build(data, config, None)
    }

    /// Builds a table treating every row as a key/value mapping.
    pub fn from_dict(data: &Value, config: FromDataConfig) -> Result<Self> {
        Self::build(data, config, Some(InputType::Mapping))
    }

    /// Builds a table treating every row as a positional list.
    pub fn from_list(data: &Value, config: FromDataConfig) -> Result<Self> {
        Self::build(data, config, Some(InputType::Sequence))
    }

    /// Builds a table from serializable records, one row per record.
    ///
    /// Headers are the field names in declaration order. Records must
    /// serialize to maps (structs with named fields or maps).
    pub fn from_records<T: Serialize>(records: &[T], config: FromDataConfig) -> Result<Self> {
        let data = serde_json::to_value(records)?;
        Self::build(&data, config, Some(InputType::Record))
    }

    fn build(data: &Value, config: FromDataConfig, forced: Option<InputType>) -> Result<Self> {
        let FromDataConfig {
            headers,
            max_depth,
            metadata,
        } = config;

        if max_depth < 1 {
            return Ok(Self::with_headers(headers.unwrap_or_default(), metadata));
        }

        let (input_type, headers, mut entries) = match data {
            Value::Array(items) if items.is_empty() => {
                return Ok(Self::with_headers(headers.unwrap_or_default(), metadata));
            }
            Value::Array(items) => match forced.or_else(|| InputType::detect(&items[0])) {
                Some(input_type) if input_type.check_type(&items[0]) => {
                    if let Some(bad) =
                        items.iter().position(|item| !input_type.check_type(item))
                    {
                        return Err(unsupported(input_type, &items[bad], Some(bad)));
                    }
                    let headers =
                        headers.unwrap_or_else(|| input_type.guess_headers(&items[0]));
                    let entries = input_type.get_entries(items, &headers);
                    (input_type, headers, entries)
                }
                // Otherwise the array itself is the single row.
                _ => single_entry(data, headers, forced.unwrap_or(InputType::Sequence))?,
            },
            Value::Object(_) => single_entry(data, headers, forced.unwrap_or(InputType::Mapping))?,
            scalar => {
                if let Some(input_type) = forced {
                    return Err(unsupported(input_type, scalar, None));
                }
                trace!("scalar table input");
                let table = Self::new(
                    vec![vec![Cell::Value(scalar.clone())]],
                    Some(headers.unwrap_or_default()),
                    metadata,
                );
                return Ok(table);
            }
        };

        debug!(
            ?input_type,
            rows = entries.len(),
            columns = headers.len(),
            "classified table input"
        );

        if max_depth > 1 {
            nest_cells(&mut entries, max_depth - 1)?;
        }

        Ok(Self::new(entries, Some(headers), metadata))
    }

    /// Appends rows and pads every row to the table width.
    ///
    /// The width is the larger of the header count and the longest row.
    pub fn extend<I, R, C>(&mut self, rows: I)
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.extend_cells(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect()),
        );
    }

    fn extend_cells(&mut self, rows: impl Iterator<Item = Vec<Cell>>) {
        self.data.extend(rows);
        self.set_width();
        self.fill();
    }

    fn set_width(&mut self) {
        let longest = self.data.iter().map(Vec::len).max().unwrap_or(0);
        self.width = self.width.max(self.headers.len()).max(longest);
    }

    fn fill(&mut self) {
        let width = self.width;
        for row in &mut self.data {
            if row.len() < width {
                row.resize(width, Cell::null());
            }
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.data.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// One-line description used where a nested table appears in text.
    pub fn summary(&self) -> String {
        format!("Table(headers={:?}, rows={})", self.headers, self.data.len())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(&TextConfig::default()))
    }
}

type Classified = (InputType, Vec<String>, Vec<Vec<Cell>>);

/// Converts a single non-sequence value (or a flat array) into one row.
fn single_entry(
    data: &Value,
    headers: Option<Vec<String>>,
    input_type: InputType,
) -> Result<Classified> {
    if !input_type.check_type(data) {
        return Err(unsupported(input_type, data, None));
    }
    let headers = headers.unwrap_or_else(|| input_type.guess_headers(data));
    let entry = input_type.get_entry(data, &headers);
    Ok((input_type, headers, vec![entry]))
}

/// Replaces compound cells with nested tables.
fn nest_cells(entries: &mut [Vec<Cell>], max_depth: usize) -> Result<()> {
    for row in entries.iter_mut() {
        for cell in row.iter_mut() {
            let value = match cell {
                Cell::Value(value) if !input::is_scalar(value) => value,
                _ => continue,
            };
            let config = FromDataConfig {
                max_depth,
                ..FromDataConfig::default()
            };
            match Table::from_data(value, config) {
                Ok(nested) => *cell = Cell::from(nested),
                Err(BittabError::UnsupportedData(reason)) => {
                    trace!(%reason, "keeping cell as a value");
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(())
}

fn unsupported(input_type: InputType, value: &Value, index: Option<usize>) -> BittabError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    match index {
        Some(i) => BittabError::UnsupportedData(format!(
            "row {} is {} {}, expected {:?} input",
            i,
            if kind == "array" || kind == "object" { "an" } else { "a" },
            kind,
            input_type
        )),
        None => BittabError::UnsupportedData(format!(
            "unsupported data type {} for {:?} input",
            kind, input_type
        )),
    }
}
