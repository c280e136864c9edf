//! Redacted configuration summaries for diagnostics.

use std::fmt;

use serde::Serialize;

/// Truncates a secret to a short, non-reversible prefix.
///
/// Values of four characters or fewer collapse entirely so that short
/// secrets never leak through the summary.
#[must_use]
pub fn redact(secret: &str) -> String {
    let mut chars = secret.chars();
    let prefix: String = chars.by_ref().take(4).collect();

    if chars.next().is_none() {
        "****".to_owned()
    } else {
        format!("{prefix}\u{2026}")
    }
}

/// Formats a byte quantity with 1024-based units and two decimal places.
///
/// Scaling stops at the first unit where the remaining magnitude drops
/// below 1024, topping out at terabytes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.2} {}", UNITS[unit])
}

/// A single labeled line of a configuration summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryEntry {
    /// Field label shown in the report.
    pub label: &'static str,

    /// Rendered value, already redacted and unit-formatted.
    pub value: String,
}

/// A redacted configuration report.
///
/// Built by the deployment schemas after validation; secrets are truncated
/// and byte quantities human-scaled before they ever reach the report, so
/// the summary is safe to log verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    /// Deployment name shown in the report header.
    pub deployment: &'static str,

    /// Ordered report lines.
    pub entries: Vec<SummaryEntry>,
}

impl ConfigSummary {
    /// Creates an empty summary for the named deployment.
    #[must_use]
    pub const fn new(deployment: &'static str) -> Self {
        Self {
            deployment,
            entries: Vec::new(),
        }
    }

    /// Appends a labeled line to the report.
    pub fn push(&mut self, label: &'static str, value: impl Into<String>) {
        self.entries.push(SummaryEntry {
            label,
            value: value.into(),
        });
    }

    /// Checks whether any rendered value contains the given text.
    ///
    /// Used by tests to prove that secrets never appear untruncated.
    #[must_use]
    pub fn contains_value(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.value.contains(needle))
    }
}

impl fmt::Display for ConfigSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration ({})", self.deployment)?;

        let width = self
            .entries
            .iter()
            .map(|e| e.label.len())
            .max()
            .unwrap_or(0);

        for entry in &self.entries {
            writeln!(f, "  {:width$}  {}", entry.label, entry.value)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_keeps_short_prefix() {
        assert_eq!(redact("0123456789abcdef"), "0123\u{2026}");
    }

    #[test]
    fn test_redact_collapses_short_secrets() {
        assert_eq!(redact("abcd"), "****");
        assert_eq!(redact(""), "****");
    }

    #[test]
    fn test_human_bytes_bytes() {
        assert_eq!(human_bytes(512), "512.00 B");
    }

    #[test]
    fn test_human_bytes_megabytes() {
        assert_eq!(human_bytes(1_048_576), "1.00 MB");
    }

    #[test]
    fn test_human_bytes_gigabytes() {
        assert_eq!(human_bytes(1_073_741_824), "1.00 GB");
    }

    #[test]
    fn test_human_bytes_fractional() {
        assert_eq!(human_bytes(1536), "1.50 KB");
    }

    #[test]
    fn test_human_bytes_caps_at_terabytes() {
        assert_eq!(human_bytes(1024 * 1024 * 1024 * 1024 * 2048), "2048.00 TB");
    }

    #[test]
    fn test_display_aligns_labels() {
        let mut summary = ConfigSummary::new("file-store");
        summary.push("api_id", "12345");
        summary.push("max_file_size", "1.00 GB");

        let text = summary.to_string();
        assert!(text.contains("Configuration (file-store)"));
        assert!(text.contains("api_id"));
        assert!(text.contains("1.00 GB"));
    }

    #[test]
    fn test_serializes_to_json() {
        let mut summary = ConfigSummary::new("wasabi");
        summary.push("bucket", "wasabi-upload-bot");

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"deployment\":\"wasabi\""));
        assert!(json.contains("wasabi-upload-bot"));
    }
}
