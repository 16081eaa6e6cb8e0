//! # Time MCP Server Core
//!
//! This module provides timezone-aware time operations for the MCP server.
//!
//! ## Features
//! - Current time queries for any IANA timezone
//! - Time conversion between timezones
//! - Timezone details (abbreviation, offsets, DST)
//! - Date arithmetic in calendar and clock units
//! - Curated list of common timezones by region
//!
//! ## Modules
//! - `error`: Custom error types and error handling
//! - `logger`: Injectable logging capability
//! - `models`: Data structures for requests and responses
//! - `operation`: Typed dispatch over the tool catalog
//! - `prompts`: Comparison and meeting scheduling prompt text
//! - `provider`: Core timezone operations and time calculations
//! - `utils`: Helper functions for formatting and parsing

pub mod error;
pub mod logger;
pub mod models;
pub mod operation;
pub mod prompts;
pub mod provider;
pub mod utils;
