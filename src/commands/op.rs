//! Op command: combine two bit sequences with a bitwise operator.

use termcolor::WriteColor;
use tracing::debug;

use super::Command;
use crate::bits::Bits;
use crate::error::{BittabError, Result};
use crate::utils::{display_bits, parse_bits, parse_number};

/// Bitwise operation to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOp {
    And,
    Or,
    /// Shift left by a number of bits
    Shl,
    /// Shift right by a number of bits
    Shr,
}

impl BitOp {
    /// Parses an operation from its name or symbol.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "and" | "&" => Ok(BitOp::And),
            "or" | "|" => Ok(BitOp::Or),
            "shl" | "<<" => Ok(BitOp::Shl),
            "shr" | ">>" => Ok(BitOp::Shr),
            _ => Err(BittabError::InvalidInput(format!(
                "Unknown operation: '{}'. Valid operations: and, or, shl, shr",
                s
            ))),
        }
    }

    fn is_shift(&self) -> bool {
        matches!(self, BitOp::Shl | BitOp::Shr)
    }
}

/// Configuration for the op command.
#[derive(Debug, Clone)]
pub struct OpConfig {
    pub op: BitOp,
    pub lhs: String,
    /// Second operand, or the shift amount for shifts
    pub rhs: String,
    /// Input format for the operands
    pub input_format: String,
    /// Output format for the result
    pub format: String,
}

impl Default for OpConfig {
    fn default() -> Self {
        Self {
            op: BitOp::Or,
            lhs: String::new(),
            rhs: String::new(),
            input_format: "auto".to_string(),
            format: "bin".to_string(),
        }
    }
}

pub struct OpCommand {
    config: OpConfig,
}

impl OpCommand {
    pub fn new(config: OpConfig) -> Self {
        Self { config }
    }

    /// Applies the operation and returns the resulting bit sequence.
    pub fn apply(&self) -> Result<Bits> {
        let lhs = parse_bits(&self.config.lhs, &self.config.input_format, None)?;

        let result = if self.config.op.is_shift() {
            let amount = parse_number(&self.config.rhs)?;
            match self.config.op {
                BitOp::Shl => lhs << amount,
                _ => lhs >> amount,
            }
        } else {
            let rhs = parse_bits(&self.config.rhs, &self.config.input_format, None)?;
            match self.config.op {
                BitOp::And => lhs & rhs,
                _ => lhs | rhs,
            }
        };

        debug!(op = ?self.config.op, width = result.len(), "applied bit operation");
        Ok(result)
    }
}

impl Command for OpCommand {
    fn execute(&self, out: &mut dyn WriteColor) -> Result<()> {
        let result = self.apply()?;
        writeln!(out, "{}", display_bits(&result, &self.config.format)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    fn op(op: BitOp, lhs: &str, rhs: &str) -> OpCommand {
        OpCommand::new(OpConfig {
            op,
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
            ..OpConfig::default()
        })
    }

    #[test]
    fn test_bit_op_parsing() {
        assert_eq!(BitOp::from_str("AND").unwrap(), BitOp::And);
        assert_eq!(BitOp::from_str("|").unwrap(), BitOp::Or);
        assert_eq!(BitOp::from_str("<<").unwrap(), BitOp::Shl);
        assert_eq!(BitOp::from_str("shr").unwrap(), BitOp::Shr);
        assert!(BitOp::from_str("xor").is_err());
    }

    #[test]
    fn test_or_and() {
        assert_eq!(op(BitOp::Or, "1010", "0101").apply().unwrap().as_bin(), "1111");
        assert_eq!(op(BitOp::And, "1100", "1010").apply().unwrap().as_bin(), "1000");
    }

    #[test]
    fn test_shifts() {
        let r = op(BitOp::Shl, "1", "3").apply().unwrap();
        assert_eq!(r.as_bin(), "1000");
        let r = op(BitOp::Shr, "0xF0", "0x4").apply().unwrap();
        assert_eq!(r.as_bin(), "1111");
    }

    #[test]
    fn test_bad_shift_amount() {
        assert!(op(BitOp::Shl, "1", "many").apply().is_err());
    }

    #[test]
    fn test_execute_uses_output_format() {
        let cmd = OpCommand::new(OpConfig {
            op: BitOp::Or,
            lhs: "0x0F".to_string(),
            rhs: "0xF0".to_string(),
            format: "hex".to_string(),
            ..OpConfig::default()
        });
        let mut buffer = Buffer::no_color();
        cmd.execute(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), "0xFF\n");
    }
}
