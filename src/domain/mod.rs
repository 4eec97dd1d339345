//! Core domain types for the script relay.
//!
//! This module contains pure domain types with no I/O dependencies:
//! - Script numbers, ranges, and URL synthesis
//! - Fetch outcome classification and per-script results

pub mod script;
pub mod status;

pub use script::{script_url, ScriptNumber, ScriptRange, SCRIPT_NUMBER_PAD};
pub use status::{FetchStatus, ScriptResult};
