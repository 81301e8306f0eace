//! Flightlink CLI - Command-line interface for Arrow Flight SQL connection URLs.
//!
//! This crate provides the `flightlink` tool for parsing, validating and
//! probing connection URLs, with named profiles kept in `flightlink.toml`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
