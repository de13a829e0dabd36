//! Parsing utilities for bittab.
//!
//! This module provides functions for parsing:
//! - Numbers in decimal or hexadecimal notation (shift amounts, widths)
//! - Bit sequences in various textual formats (bin, hex, int, bytes, list)
//! - Structured table input (JSON or YAML)
use num_bigint::BigUint;
use serde_json::Value;

use crate::bits::Bits;
use crate::error::{BittabError, Result};

/// Parses a number from a string, supporting decimal and hexadecimal formats.
///
/// # Supported Formats
/// - Decimal: `"123"`, `"0"`, `"255"`
/// - Hexadecimal: `"0x1F"`, `"0X1f"`
///
/// # Errors
/// Returns `BittabError::Parse` if the string cannot be parsed.
pub fn parse_number(s: &str) -> Result<usize> {
    let s = s.trim();
    if s.is_empty() {
        return Err(BittabError::Parse("Empty number string".to_string()));
    }

    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        usize::from_str_radix(digits, 16).map_err(|e| {
            BittabError::Parse(format!("Invalid hexadecimal number '{}': {}", s, e))
        })
    } else {
        s.parse::<usize>()
            .map_err(|e| BittabError::Parse(format!("Invalid decimal number '{}': {}", s, e)))
    }
}

/// Parses a bit sequence from its textual form.
///
/// # Supported Formats
/// - `bin`: Binary digits, optional `0b` prefix (e.g., "0b1010")
/// - `hex`: Hexadecimal digits, optional `0x` prefix (e.g., "0x1F")
/// - `int`: Unsigned decimal integer (e.g., "42"); width is inferred
///   unless `len` is given
/// - `bytes`: Hex byte pairs with or without separators (e.g., "DE AD")
/// - `list`: Comma or space separated booleans (`1`, `0`, `true`, `false`)
/// - `auto`: `0x` prefix selects hex, `0b` prefix or only 0/1 digits selects
///   bin, anything else is read as an integer
///
/// # Arguments
/// * `input` - The input string
/// * `format` - The format identifier
/// * `len` - Optional explicit width, applied to `int` input
///
/// # Errors
/// Returns `BittabError::Parse` if the input is malformed for the given format.
/// Returns `BittabError::InvalidInput` if the format is unknown.
pub fn parse_bits(input: &str, format: &str, len: Option<usize>) -> Result<Bits> {
    let bits = match format.to_lowercase().as_str() {
        "bin" => Bits::from_bin(input)?,
        "hex" => Bits::from_hex(input)?,
        "int" | "dec" => parse_int_input(input, len)?,
        "bytes" => Bits::from_bytes(&parse_hex_bytes(input)?)?,
        "list" => Bits::from_list(&parse_bool_list(input)?),
        "auto" => return parse_bits(input, detect_format(input), len),
        _ => {
            return Err(BittabError::InvalidInput(format!(
                "Unknown input format: '{}'. Supported: bin, hex, int, bytes, list, auto",
                format
            )))
        }
    };

    match len {
        Some(len) if len != bits.len() => Bits::new(bits.as_int().clone(), Some(len)),
        _ => Ok(bits),
    }
}

/// Picks a format for `auto` parsing.
fn detect_format(input: &str) -> &'static str {
    let s = input.trim();
    if s.starts_with("0x") || s.starts_with("0X") {
        "hex"
    } else if s.starts_with("0b") || s.starts_with("0B") {
        "bin"
    } else if !s.is_empty() && s.chars().all(|c| c == '0' || c == '1') {
        "bin"
    } else {
        "int"
    }
}

/// Parses an unsigned decimal integer of any size.
fn parse_int_input(input: &str, len: Option<usize>) -> Result<Bits> {
    let s = input.trim();
    if let Some(stripped) = s.strip_prefix('-') {
        if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
            // Magnitudes beyond i128 are reported at the type's limit.
            let magnitude: i128 = stripped.parse().unwrap_or(i128::MAX);
            if magnitude > 0 {
                return Err(BittabError::NegativeValue(-magnitude));
            }
        }
    }
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(BittabError::Parse(format!(
            "Invalid decimal integer '{}'",
            input
        )));
    }
    let val = BigUint::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| BittabError::Parse(format!("Invalid decimal integer '{}'", input)))?;
    Bits::new(val, len)
}

/// Parses hexadecimal byte pairs into bytes.
///
/// Accepts an optional `0x` prefix and whitespace, `:`, `-` or `,` between
/// digits. Examples: "DEADBEEF", "DE AD BE EF", "de-ad-be-ef", "0XDEAD"
fn parse_hex_bytes(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let mut cleaned = String::with_capacity(digits.len());
    for c in digits.chars() {
        match c {
            c if c.is_ascii_hexdigit() => cleaned.push(c),
            c if c.is_whitespace() || matches!(c, ':' | '-' | ',') => {}
            other => {
                return Err(BittabError::Parse(format!(
                    "Invalid character '{}' in byte input '{}'",
                    other, input
                )))
            }
        }
    }

    if cleaned.len() % 2 != 0 {
        return Err(BittabError::Parse(format!(
            "Byte input must have even number of hex digits, got {} digits",
            cleaned.len()
        )));
    }

    hex::decode(&cleaned).map_err(|e| BittabError::Parse(format!("Invalid byte input: {}", e)))
}

/// Parses a boolean list such as "1, 0, true, false".
fn parse_bool_list(input: &str) -> Result<Vec<bool>> {
    let inner = input.trim().trim_start_matches('[').trim_end_matches(']');
    inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| match part.to_lowercase().as_str() {
            "1" | "true" | "t" => Ok(true),
            "0" | "false" | "f" => Ok(false),
            _ => Err(BittabError::Parse(format!(
                "Invalid boolean '{}' in list input",
                part
            ))),
        })
        .collect()
}

/// Parses structured table input.
///
/// # Supported Formats
/// - `json`: Any JSON document
/// - `yaml`: Any YAML document (converted to the JSON data model)
pub fn parse_table_input(input: &str, format: &str) -> Result<Value> {
    match format.to_lowercase().as_str() {
        "json" => Ok(serde_json::from_str(input)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(input)?),
        _ => Err(BittabError::InvalidInput(format!(
            "Unknown data format: '{}'. Supported: json, yaml",
            format
        ))),
    }
}
