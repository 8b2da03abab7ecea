//! TDEE Calculator Library
//!
//! Validates body measurements and derives energy expenditure, body
//! composition and macronutrient targets from them.

pub mod build_info;
pub mod mcp;
pub mod metrics;
pub mod models;
pub mod normalizer;
pub mod tools;
pub mod transport;
