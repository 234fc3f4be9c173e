//! TOML parser with helpful error messages

use super::schema::DevSyncConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse devsync.toml with detailed error messages
pub fn parse_devsync_toml(path: &Path) -> Result<DevSyncConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_devsync_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse devsync.toml content from string
pub fn parse_devsync_toml_str(content: &str) -> Result<DevSyncConfig> {
    let config: DevSyncConfig =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;

    config.validate()?;

    Ok(config)
}

/// Attach the offending source lines to a TOML error when a position is known
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let message = error.message().to_string();

    let line_num = error.span().map(|span| {
        let end = span.start.min(content.len());
        content.as_bytes()[..end]
            .iter()
            .filter(|b| **b == b'\n')
            .count()
            + 1
    });

    match line_num {
        Some(line_num) => anyhow::anyhow!(
            "TOML parsing error at line {}:\n{}\n\nError: {}",
            line_num,
            get_line_context(content, line_num),
            message
        ),
        None => anyhow::anyhow!("TOML parsing error: {}", message),
    }
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 2).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize a configuration to TOML string
pub fn to_toml(config: &DevSyncConfig) -> Result<String> {
    config.validate()?;
    toml::to_string_pretty(config).with_context(|| "Failed to serialize configuration to TOML")
}
