//! HTML rendering for tables.

use serde_json::Value;

use super::{Cell, FromDataConfig, Table};
use crate::error::{BittabError, Result};
use crate::utils::display::escape_html;

const TABLE: &str = "<table>";
const TABLE_CLOSE: &str = "</table>";
const THEAD: &str = "<thead>";
const THEAD_CLOSE: &str = "</thead>";
const TBODY: &str = "<tbody>";
const TBODY_CLOSE: &str = "</tbody>";
const TR: &str = "<tr>";
const TR_CLOSE: &str = "</tr>";
const TH: &str = "<th>";
const TH_CLOSE: &str = "</th>";
const TD: &str = "<td>";
const TD_CLOSE: &str = "</td>";

/// Table layout for HTML output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Horizontal for more than one row, vertical otherwise
    #[default]
    Auto,
    /// One `<tr>` per data row, headers in `<thead>`
    Horizontal,
    /// One `<tr>` per column, header in a leading `<th>`
    Vertical,
}

impl Orientation {
    /// Parses an orientation from its first letter (`a`, `h` or `v`).
    pub fn from_str(s: &str) -> Result<Self> {
        match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('a') => Ok(Orientation::Auto),
            Some('h') => Ok(Orientation::Horizontal),
            Some('v') => Ok(Orientation::Vertical),
            _ => Err(BittabError::InvalidInput(format!(
                "Unknown orientation: '{}'. Expected one of 'auto', 'vertical', or 'horizontal'",
                s
            ))),
        }
    }
}

/// Options for [`Table::to_html`].
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    pub orientation: Orientation,
    /// Surround the output with `<table>` tags
    pub wrapped: bool,
    pub with_headers: bool,
    /// Join tags with newlines instead of nothing
    pub with_newlines: bool,
    /// Render the metadata as its own table before this one
    pub with_metadata: bool,
    /// Nested tables are rendered inline when greater than 1
    pub max_depth: usize,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Auto,
            wrapped: true,
            with_headers: true,
            with_newlines: true,
            with_metadata: false,
            max_depth: 1,
        }
    }
}

impl Table {
    /// Renders the table as HTML.
    ///
    /// # Errors
    /// Propagates errors from building the metadata table.
    pub fn to_html(&self, config: &HtmlConfig) -> Result<String> {
        let mut lines = Vec::new();

        if config.with_metadata && !self.metadata.is_empty() {
            let metadata_table = Table::from_data(
                &Value::Object(self.metadata.clone()),
                FromDataConfig {
                    max_depth: config.max_depth,
                    ..FromDataConfig::default()
                },
            )?;
            let metadata_html = metadata_table.to_html(&HtmlConfig {
                with_headers: true,
                with_newlines: config.with_newlines,
                with_metadata: false,
                max_depth: config.max_depth,
                ..HtmlConfig::default()
            })?;
            if !metadata_html.is_empty() {
                lines.push(metadata_html);
            }
        }

        if config.wrapped {
            lines.push(TABLE.to_string());
        }

        let headers: &[String] = if config.with_headers {
            &self.headers
        } else {
            &[]
        };

        let orientation = match config.orientation {
            Orientation::Auto if self.len() > 1 => Orientation::Horizontal,
            Orientation::Auto => Orientation::Vertical,
            other => other,
        };
        match orientation {
            Orientation::Vertical => {
                self.add_vertical_html_lines(&mut lines, headers, config.max_depth)?
            }
            _ => self.add_horizontal_html_lines(&mut lines, headers, config.max_depth)?,
        }

        if config.wrapped {
            lines.push(TABLE_CLOSE.to_string());
        }

        let sep = if config.with_newlines { "\n" } else { "" };
        Ok(lines.join(sep))
    }

    fn add_horizontal_html_lines(
        &self,
        lines: &mut Vec<String>,
        headers: &[String],
        max_depth: usize,
    ) -> Result<()> {
        if !headers.is_empty() {
            let cells: Vec<String> = headers.iter().map(|h| escape_html(h)).collect();
            let sep = format!("{}{}", TH_CLOSE, TH);
            lines.push(THEAD.to_string());
            lines.push(format!("{}{}{}{}{}", TR, TH, cells.join(&sep), TH_CLOSE, TR_CLOSE));
            lines.push(THEAD_CLOSE.to_string());
        }

        let sep = format!("{}{}", TD_CLOSE, TD);
        lines.push(TBODY.to_string());
        for row in &self.data {
            let cells = row
                .iter()
                .map(|cell| cell_html(cell, max_depth))
                .collect::<Result<Vec<_>>>()?;
            lines.push(format!("{}{}{}{}{}", TR, TD, cells.join(&sep), TD_CLOSE, TR_CLOSE));
        }
        lines.push(TBODY_CLOSE.to_string());
        Ok(())
    }

    fn add_vertical_html_lines(
        &self,
        lines: &mut Vec<String>,
        headers: &[String],
        max_depth: usize,
    ) -> Result<()> {
        let sep = format!("{}{}", TD_CLOSE, TD);
        for i in 0..self.width {
            let mut line = String::from(TR);
            if !headers.is_empty() {
                let header = headers.get(i).map(String::as_str).unwrap_or("");
                line.push_str(TH);
                line.push_str(&escape_html(header));
                line.push_str(TH_CLOSE);
            }
            let cells = self
                .data
                .iter()
                .map(|row| cell_html(&row[i], max_depth))
                .collect::<Result<Vec<_>>>()?;
            line.push_str(TD);
            line.push_str(&cells.join(&sep));
            line.push_str(TD_CLOSE);
            line.push_str(TR_CLOSE);
            lines.push(line);
        }
        Ok(())
    }
}

fn cell_html(cell: &Cell, max_depth: usize) -> Result<String> {
    match cell {
        Cell::Table(nested) if max_depth > 1 => nested.to_html(&HtmlConfig {
            max_depth: max_depth - 1,
            ..HtmlConfig::default()
        }),
        _ => Ok(escape_html(&cell.to_text(None))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn two_by_two() -> Table {
        Table::from_data(&json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]), FromDataConfig::default())
            .unwrap()
    }

    #[test]
    fn test_orientation_parsing() {
        assert_eq!(Orientation::from_str("auto").unwrap(), Orientation::Auto);
        assert_eq!(Orientation::from_str("H").unwrap(), Orientation::Horizontal);
        assert_eq!(Orientation::from_str("vert").unwrap(), Orientation::Vertical);
        assert!(matches!(
            Orientation::from_str("diagonal"),
            Err(BittabError::InvalidInput(_))
        ));
        assert!(Orientation::from_str("").is_err());
    }

    #[test]
    fn test_horizontal_html() {
        let html = two_by_two().to_html(&HtmlConfig::default()).unwrap();
        let expected = [
            "<table>",
            "<thead>",
            "<tr><th>a</th><th>b</th></tr>",
            "</thead>",
            "<tbody>",
            "<tr><td>1</td><td>2</td></tr>",
            "<tr><td>3</td><td>4</td></tr>",
            "</tbody>",
            "</table>",
        ]
        .join("\n");
        assert_eq!(html, expected);
    }

    #[test]
    fn test_auto_single_row_is_vertical() {
        let table = Table::from_data(&json!({"a": 1, "b": 2}), FromDataConfig::default()).unwrap();
        let html = table.to_html(&HtmlConfig::default()).unwrap();
        assert_eq!(
            html,
            "<table>\n<tr><th>a</th><td>1</td></tr>\n<tr><th>b</th><td>2</td></tr>\n</table>"
        );
    }

    #[test]
    fn test_vertical_multi_row() {
        let config = HtmlConfig {
            orientation: Orientation::Vertical,
            with_newlines: false,
            ..HtmlConfig::default()
        };
        let html = two_by_two().to_html(&config).unwrap();
        assert_eq!(
            html,
            "<table><tr><th>a</th><td>1</td><td>3</td></tr><tr><th>b</th><td>2</td><td>4</td></tr></table>"
        );
    }

    #[test]
    fn test_unwrapped_without_headers() {
        let config = HtmlConfig {
            wrapped: false,
            with_headers: false,
            with_newlines: false,
            ..HtmlConfig::default()
        };
        let html = two_by_two().to_html(&config).unwrap();
        assert_eq!(
            html,
            "<tbody><tr><td>1</td><td>2</td></tr><tr><td>3</td><td>4</td></tr></tbody>"
        );
    }

    #[test]
    fn test_cells_are_escaped() {
        let table = Table::from_data(&json!([["<b>", "a&b"]]), FromDataConfig::default()).unwrap();
        let config = HtmlConfig {
            orientation: Orientation::Horizontal,
            with_newlines: false,
            ..HtmlConfig::default()
        };
        let html = table.to_html(&config).unwrap();
        assert!(html.contains("<td>&lt;b&gt;</td><td>a&amp;b</td>"));
    }

    #[test]
    fn test_metadata_table_comes_first() {
        let mut metadata = Map::new();
        metadata.insert("author".to_string(), json!("me"));
        let table = Table::from_data(
            &json!([[1], [2]]),
            FromDataConfig {
                metadata: Some(metadata),
                ..FromDataConfig::default()
            },
        )
        .unwrap();
        let config = HtmlConfig {
            with_metadata: true,
            with_newlines: false,
            ..HtmlConfig::default()
        };
        let html = table.to_html(&config).unwrap();
        assert!(html.starts_with("<table><tr><th>author</th><td>me</td></tr></table><table>"));
        assert!(html.ends_with("</tbody></table>"));
    }

    #[test]
    fn test_nested_table_html() {
        let data = json!([{"inner": [{"k": "v"}]}, {"inner": [{"k": "w"}]}]);
        let table = Table::from_data(
            &data,
            FromDataConfig {
                max_depth: 2,
                ..FromDataConfig::default()
            },
        )
        .unwrap();
        let config = HtmlConfig {
            with_newlines: false,
            max_depth: 2,
            ..HtmlConfig::default()
        };
        let html = table.to_html(&config).unwrap();
        assert!(html.contains("<td><table>\n<tr><th>k</th><td>v</td></tr>\n</table></td>"));
    }

    #[test]
    fn test_nested_table_flattened_at_depth_one() {
        let data = json!([{"inner": [{"k": "v"}]}]);
        let table = Table::from_data(
            &data,
            FromDataConfig {
                max_depth: 2,
                ..FromDataConfig::default()
            },
        )
        .unwrap();
        let html = table.to_html(&HtmlConfig::default()).unwrap();
        assert!(html.contains("Table(headers=[&quot;k&quot;], rows=1)"));
    }
}
