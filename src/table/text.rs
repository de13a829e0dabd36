//! Fixed-width text rendering for tables.

use super::Table;
use crate::utils::display::{center, truncate};

/// Options for [`Table::to_text`].
#[derive(Debug, Clone)]
pub struct TextConfig {
    pub with_headers: bool,
    /// Cells longer than this are cut and end in `...`
    pub maxlen: Option<usize>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            with_headers: true,
            maxlen: None,
        }
    }
}

impl Table {
    /// Renders the table as centered, `|`-separated text columns.
    ///
    /// Each column is as wide as its widest cell (header included). A
    /// `-|-` rule separates the header line from the data rows.
    ///
    /// # Examples
    /// ```
    /// use bittab::table::{FromDataConfig, Table, TextConfig};
    /// use serde_json::json;
    ///
    /// let data = json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]);
    /// let table = Table::from_data(&data, FromDataConfig::default()).unwrap();
    /// assert_eq!(table.to_text(&TextConfig::default()), "a | b\n--|--\n1 | 2\n3 | 4");
    /// ```
    pub fn to_text(&self, config: &TextConfig) -> String {
        let text_data: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_text(config.maxlen)).collect())
            .collect();
        let show_headers = config.with_headers && !self.headers.is_empty();
        let headers: Vec<String> = (0..self.width)
            .map(|i| {
                let header = self.headers.get(i).map(String::as_str).unwrap_or("");
                truncate(header, config.maxlen)
            })
            .collect();

        let widths: Vec<usize> = (0..self.width)
            .map(|i| {
                let data_width = text_data
                    .iter()
                    .map(|row| row[i].chars().count())
                    .max()
                    .unwrap_or(0);
                if show_headers {
                    data_width.max(headers[i].chars().count())
                } else {
                    data_width
                }
            })
            .collect();

        let mut lines = Vec::with_capacity(text_data.len() + 2);
        if show_headers {
            lines.push(join_centered(&headers, &widths));
            let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            lines.push(rule.join("-|-"));
        }
        for row in &text_data {
            lines.push(join_centered(row, &widths));
        }
        lines.join("\n")
    }
}

fn join_centered(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| center(cell, width))
        .collect::<Vec<_>>()
        .join(" | ")
}
