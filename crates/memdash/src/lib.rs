//! # memdash
//!
//! Command-line entry point for the memory analysis dashboard server.
//!
//! - [`cli`]: argument parsing and command-line overrides on top of settings
//! - [`report`]: the startup banner printed before serving
//! - [`browser`]: delayed, best-effort launch of the default browser

#![deny(unsafe_code)]

pub mod browser;
pub mod cli;
pub mod report;
