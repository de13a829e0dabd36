//! Display utilities for bittab.
//!
//! This module provides functions for formatting bit sequences and table
//! cells into human-readable representations.
use crate::bits::Bits;
use crate::error::{BittabError, Result};

/// Formats a bit sequence for display in the specified format.
///
/// # Arguments
/// * `bits` - The bit sequence to display
/// * `format` - The output format (bin, hex, int, bytes, list, repr)
///
/// # Errors
/// Returns `BittabError::InvalidInput` if the format is unknown.
///
/// # Examples
/// ```ignore
/// let bits = Bits::from_hex("0xDEAD")?;
/// let output = display_bits(&bits, "bytes")?;
/// // Output: "de ad"
/// ```
pub fn display_bits(bits: &Bits, format: &str) -> Result<String> {
    match format.to_lowercase().as_str() {
        "bin" => Ok(bits.as_bin()),
        "hex" => Ok(format!("0x{}", bits.as_hex())),
        "int" | "dec" => Ok(bits.as_int().to_string()),
        "bytes" => Ok(format_bytes(&bits.as_bytes())),
        "list" => Ok(format_list(&bits.as_list())),
        "repr" => Ok(format!("{:?}", bits)),
        _ => Err(BittabError::InvalidInput(format!(
            "Unknown output format: '{}'. Supported: bin, hex, int, bytes, list, repr",
            format
        ))),
    }
}

/// Space separated lowercase hex pairs.
fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_list(list: &[bool]) -> String {
    let items: Vec<&str> = list
        .iter()
        .map(|&b| if b { "true" } else { "false" })
        .collect();
    format!("[{}]", items.join(", "))
}

/// Centers `text` in a field of `width` characters.
///
/// When the padding is odd, the extra space goes left only if both the
/// padding and the width are odd. Text wider than `width` is returned as-is.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Shortens `text` to at most `maxlen` characters, ending in `...`.
pub fn truncate(text: &str, maxlen: Option<usize>) -> String {
    match maxlen {
        Some(max) if max > 0 && text.chars().count() > max => {
            let keep = max.saturating_sub(3);
            let mut out: String = text.chars().take(keep).collect();
            out.push_str("...");
            out
        }
        _ => text.to_string(),
    }
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_bin() {
        let bits = Bits::new(5u8, Some(4)).unwrap();
        assert_eq!(display_bits(&bits, "bin").unwrap(), "0101");
    }

    #[test]
    fn test_display_hex() {
        let bits = Bits::new(0xABCu32, Some(12)).unwrap();
        assert_eq!(display_bits(&bits, "hex").unwrap(), "0x0ABC");
    }

    #[test]
    fn test_display_int() {
        let bits = Bits::from_hex("0xFF").unwrap();
        assert_eq!(display_bits(&bits, "int").unwrap(), "255");
    }

    #[test]
    fn test_display_bytes() {
        let bits = Bits::from_hex("0xDEAD").unwrap();
        assert_eq!(display_bits(&bits, "bytes").unwrap(), "de ad");
    }

    #[test]
    fn test_display_list_and_repr() {
        let bits = Bits::from_bin("10").unwrap();
        assert_eq!(display_bits(&bits, "list").unwrap(), "[true, false]");
        assert_eq!(display_bits(&bits, "REPR").unwrap(), "Bits('10')");
    }

    #[test]
    fn test_display_unknown_format() {
        let bits = Bits::empty();
        assert!(matches!(
            display_bits(&bits, "oct"),
            Err(BittabError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_center() {
        assert_eq!(center("a", 1), "a");
        assert_eq!(center("a", 3), " a ");
        assert_eq!(center("ab", 5), "  ab ");
        assert_eq!(center("abc", 6), " abc  ");
        assert_eq!(center("toolong", 3), "toolong");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdefgh", Some(6)), "abc...");
        assert_eq!(truncate("abc", Some(6)), "abc");
        assert_eq!(truncate("abcdefgh", None), "abcdefgh");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }
}
