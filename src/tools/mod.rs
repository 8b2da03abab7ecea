//! TDEE Tools module
//!
//! MCP tool implementations for the TDEE calculator.

pub mod calculator;
pub mod reports;
pub mod status;
