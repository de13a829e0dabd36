/// src/lib.rs
pub mod bits;
pub mod commands;
pub mod error;
pub mod table;
pub mod utils;

use std::io::Read;

pub use bits::Bits;
pub use commands::{
    BitOp, BitsCommand, BitsConfig, Command, OpCommand, OpConfig, TableCommand, TableConfig,
    TableFormat,
};
pub use error::{BittabError, Result};
pub use table::{Cell, FromDataConfig, HtmlConfig, InputType, Orientation, Table, TextConfig};
pub use utils::{display, parsing};
pub use utils::{display_bits, parse_bits, parse_number};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Always use colors, even if output is not a terminal
    Always,
    /// Automatically detect if terminal supports colors
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorMode {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "always" => Ok(ColorMode::Always),
            "auto" => Ok(ColorMode::Auto),
            "never" => Ok(ColorMode::Never),
            _ => Err(BittabError::InvalidInput(format!(
                "Unknown color mode: '{}'. Valid modes: always, auto, never",
                s
            ))),
        }
    }

    /// Resolves the mode against the current stdout.
    pub fn color_choice(&self) -> termcolor::ColorChoice {
        match self {
            ColorMode::Always => termcolor::ColorChoice::Always,
            ColorMode::Never => termcolor::ColorChoice::Never,
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => termcolor::ColorChoice::Auto,
            ColorMode::Auto => termcolor::ColorChoice::Never,
        }
    }
}

/// Represents the input source for structured data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(std::path::PathBuf),
    Stdin,
    RawData(String),
}

impl InputSource {
    /// Maps a CLI argument to a source; `None` and `-` mean stdin.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => InputSource::Stdin,
            Some(path) => InputSource::File(path.into()),
        }
    }

    pub fn read_to_string(&self) -> Result<String> {
        match self {
            InputSource::File(path) => Ok(std::fs::read_to_string(path)?),
            InputSource::Stdin => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
            InputSource::RawData(data) => Ok(data.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_color_mode_parsing() {
        assert_eq!(ColorMode::from_str("ALWAYS").unwrap(), ColorMode::Always);
        assert_eq!(ColorMode::from_str("never").unwrap(), ColorMode::Never);
        assert!(ColorMode::from_str("sometimes").is_err());
        assert_eq!(ColorMode::default(), ColorMode::Auto);
    }

    #[test]
    fn test_color_choice_fixed_modes() {
        assert_eq!(
            ColorMode::Never.color_choice(),
            termcolor::ColorChoice::Never
        );
        assert_eq!(
            ColorMode::Always.color_choice(),
            termcolor::ColorChoice::Always
        );
    }

    #[test]
    fn test_input_source_from_arg() {
        assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
        assert_eq!(InputSource::from_arg(Some("-")), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Some("rows.json")),
            InputSource::File("rows.json".into())
        );
    }

    #[test]
    fn test_input_source_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[1, 2]]").unwrap();
        let source = InputSource::File(file.path().to_path_buf());
        assert_eq!(source.read_to_string().unwrap(), "[[1, 2]]");
    }

    #[test]
    fn test_input_source_missing_file() {
        let source = InputSource::File("/definitely/not/here.json".into());
        assert!(matches!(source.read_to_string(), Err(BittabError::Io(_))));
    }

    #[test]
    fn test_input_source_raw() {
        let source = InputSource::RawData("{}".to_string());
        assert_eq!(source.read_to_string().unwrap(), "{}");
    }
}
