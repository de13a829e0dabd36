/// src/commands/mod.rs
use termcolor::WriteColor;

use crate::Result;

pub mod bits;
pub mod op;
pub mod table;

pub use bits::{BitsCommand, BitsConfig};
pub use op::{BitOp, OpCommand, OpConfig};
pub use table::{TableCommand, TableConfig, TableFormat};

pub trait Command {
    fn execute(&self, out: &mut dyn WriteColor) -> Result<()>;
}
