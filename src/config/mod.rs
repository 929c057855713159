// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for formcheck.
//!
//! This module handles loading, parsing, and merging form configuration,
//! plus the process-wide settings shared by every form.

pub mod default;
pub mod global;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{find_config_file, find_config_file_from, load_config, merge_configs, parse_config};
pub use schema::*;
