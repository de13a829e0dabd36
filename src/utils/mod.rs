//! Utility modules for bittab.
//!
//! This module provides parsing and display utilities for bit sequences and
//! table cells.

pub mod display;
pub mod parsing;

// Re-export commonly used functions at the module level
pub use display::display_bits;
pub use parsing::{parse_bits, parse_number, parse_table_input};
