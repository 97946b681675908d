//! CLI interface for dhcpscout
//!
//! This crate provides the command-line front end: argument parsing and
//! the text rendering of query results.

pub mod args;
pub mod output;

pub use args::{Cli, Commands};
