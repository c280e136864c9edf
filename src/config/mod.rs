//! Configuration module for the storage bots.
//!
//! Handles environment capture, typed parsing, validation, and redacted
//! summaries for the file-store and Wasabi upload deployments.

mod common;
mod env;
mod error;
mod file_store;
mod summary;
mod wasabi;

pub use common::CoreConfig;
pub use env::EnvSnapshot;
pub use error::ConfigError;
pub use file_store::FileStoreConfig;
pub use summary::{ConfigSummary, SummaryEntry, human_bytes, redact};
pub use wasabi::{WASABI_REGIONS, WasabiConfig};

/// Default maximum upload size for the file-store deployment, in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 2000;

/// Default maximum upload size for the Wasabi deployment, in bytes (4 GiB).
pub const DEFAULT_WASABI_MAX_FILE_SIZE: u64 = 4 * 1024 * 1024 * 1024;

/// Default multipart chunk size for Wasabi uploads, in bytes (100 MiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 100 * 1024 * 1024;

/// Media kinds accepted by the file-store deployment when `ALLOWED_FILE_TYPES` is unset.
pub const DEFAULT_ALLOWED_FILE_TYPES: &[&str] = &["document", "video", "audio"];

/// Default bucket name for the Wasabi deployment.
pub const DEFAULT_WASABI_BUCKET: &str = "wasabi-upload-bot";

/// Default Wasabi region code.
pub const DEFAULT_WASABI_REGION: &str = "us-east-1";

/// Default subscription price in whole currency units.
pub const DEFAULT_SUBSCRIPTION_PRICE: i64 = 100;

/// Default subscription length in days.
pub const DEFAULT_SUBSCRIPTION_DAYS: i64 = 30;

/// Default base URL for the external render/playback service.
pub const DEFAULT_EXTERNAL_SERVICE_URL: &str = "http://localhost:8000";
