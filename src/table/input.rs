//! Classification of table input.
//!
//! Each [`InputType`] knows how to recognise one shape of row data, how to
//! guess column headers from it, and how to turn it into a row of cells.

use serde_json::{Map, Value};

use super::Cell;

/// The shape of one input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// A key/value mapping; headers are the sorted keys.
    Mapping,
    /// A record with named fields; headers are the field names in the
    /// order they were serialized.
    Record,
    /// A positional list or tuple; no headers can be guessed.
    Sequence,
}

impl InputType {
    /// Shapes tried, in order, when the caller does not force one.
    pub const AUTO_DETECT: [InputType; 2] = [InputType::Mapping, InputType::Sequence];

    /// Returns the first auto-detectable shape matching `value`.
    pub fn detect(value: &Value) -> Option<Self> {
        Self::AUTO_DETECT
            .iter()
            .copied()
            .find(|input_type| input_type.check_type(value))
    }

    pub fn check_type(&self, value: &Value) -> bool {
        match self {
            InputType::Mapping | InputType::Record => value.is_object(),
            InputType::Sequence => value.is_array(),
        }
    }

    pub fn guess_headers(&self, value: &Value) -> Vec<String> {
        match (self, value) {
            (InputType::Mapping, Value::Object(map)) => {
                let mut keys: Vec<String> = map.keys().cloned().collect();
                keys.sort();
                keys
            }
            (InputType::Record, Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Converts one input value into a row.
    ///
    /// The caller checks the shape first; a value of the wrong shape gives
    /// an empty row.
    pub fn get_entry(&self, value: &Value, headers: &[String]) -> Vec<Cell> {
        match (self, value) {
            (InputType::Mapping | InputType::Record, Value::Object(map)) => {
                entry_from_map(map, headers)
            }
            (InputType::Sequence, Value::Array(items)) => {
                items.iter().cloned().map(Cell::Value).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn get_entries(&self, values: &[Value], headers: &[String]) -> Vec<Vec<Cell>> {
        values
            .iter()
            .map(|value| self.get_entry(value, headers))
            .collect()
    }
}

fn entry_from_map(map: &Map<String, Value>, headers: &[String]) -> Vec<Cell> {
    headers
        .iter()
        .map(|header| Cell::Value(map.get(header).cloned().unwrap_or(Value::Null)))
        .collect()
}

/// Scalars are never expanded into nested tables.
pub fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}
