//! Bits command: parse a bit sequence and print it in one or more formats.

use termcolor::{Color, ColorSpec, WriteColor};
use tracing::debug;

use super::Command;
use crate::bits::Bits;
use crate::error::Result;
use crate::utils::{display_bits, parse_bits};

/// Configuration for the bits command.
#[derive(Debug, Clone)]
pub struct BitsConfig {
    /// The value as typed by the user
    pub value: String,
    /// Input format (bin, hex, int, bytes, list, auto)
    pub input_format: String,
    /// Explicit width in bits
    pub len: Option<usize>,
    /// Output formats, printed in order
    pub formats: Vec<String>,
}

impl Default for BitsConfig {
    fn default() -> Self {
        Self {
            value: String::new(),
            input_format: "auto".to_string(),
            len: None,
            formats: vec!["bin".to_string()],
        }
    }
}

pub struct BitsCommand {
    config: BitsConfig,
}

impl BitsCommand {
    pub fn new(config: BitsConfig) -> Self {
        Self { config }
    }

    pub fn parse(&self) -> Result<Bits> {
        parse_bits(&self.config.value, &self.config.input_format, self.config.len)
    }

    /// Returns `(format, rendered)` pairs for every requested format.
    pub fn render(&self) -> Result<Vec<(String, String)>> {
        let bits = self.parse()?;
        debug!(width = bits.len(), formats = self.config.formats.len(), "rendering bits");
        self.config
            .formats
            .iter()
            .map(|format| Ok((format.clone(), display_bits(&bits, format)?)))
            .collect()
    }
}

impl Command for BitsCommand {
    fn execute(&self, out: &mut dyn WriteColor) -> Result<()> {
        let rendered = self.render()?;
        if let [(_, only)] = rendered.as_slice() {
            writeln!(out, "{}", only)?;
            return Ok(());
        }

        let label_width = rendered.iter().map(|(f, _)| f.len()).max().unwrap_or(0);
        for (format, text) in &rendered {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
            write!(out, "{:>width$}", format, width = label_width)?;
            out.reset()?;
            writeln!(out, ": {}", text)?;
        }
        Ok(())
    }
}
