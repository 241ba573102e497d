//! Tool definitions module.
//!
//! This module exports all built-in tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod calculator;
pub mod time;
pub mod weather;

pub use calculator::{CalculatorTool, Operation};
pub use time::CurrentTimeTool;
pub use weather::WeatherTool;
