//! File I/O operations for device configs.
//!
//! This module provides functionality to load configs from disk, stdin or
//! any reader, including gzip-compressed input.

pub mod loader;
