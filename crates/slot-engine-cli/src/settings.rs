//! Layered scheduling configuration: defaults, then a TOML file, then flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use slot_engine::{SchedulingConfig, WorkingHours};

#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// TOML file with bufferMinutes / workingHours / maxSuggestions
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Minutes of padding around every event
    #[arg(long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub buffer: Option<i64>,
    /// Working hours as HH:MM-HH:MM (UTC)
    #[arg(long, value_name = "RANGE")]
    pub working_hours: Option<WorkingHours>,
    /// Maximum number of suggestions to return
    #[arg(long, value_name = "N")]
    pub max_suggestions: Option<usize>,
}

impl ConfigOverrides {
    pub fn resolve(&self) -> Result<SchedulingConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse config: {}", path.display()))?
            }
            None => SchedulingConfig::default(),
        };

        if let Some(buffer) = self.buffer {
            config.buffer_minutes = buffer;
        }
        if let Some(hours) = self.working_hours {
            config.working_hours = hours;
        }
        if let Some(max) = self.max_suggestions {
            config.max_suggestions = max;
        }
        Ok(config)
    }
}
