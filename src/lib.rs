//! Storage Bot Configuration Library
//!
//! Configuration loading and validation for Telegram file-storage bots.
//!
//! This crate provides the core functionality for:
//! - Capturing an immutable environment snapshot
//! - Parsing typed configuration values with defaults
//! - Fail-fast validation naming the offending key
//! - Redacted configuration summaries for diagnostics

pub mod config;
