//! Adjustable simulation parameters.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest accepted cell size, in display units.
pub const MAX_CELL_SIZE: u32 = 64;
/// Slowest accepted step interval.
pub const MAX_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Side length of one cell, in pixels or terminal characters
    pub cell_size: u32,
    /// Time between two generations while running
    pub interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_size: 1,
            interval_ms: 100,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIZE {
            return Err(Error::InvalidSetting(format!(
                "cell size must be within 1..={MAX_CELL_SIZE}, got {}",
                self.cell_size
            )));
        }
        if self.interval_ms == 0 || self.interval_ms > MAX_INTERVAL_MS {
            return Err(Error::InvalidSetting(format!(
                "interval must be within 1..={MAX_INTERVAL_MS}ms, got {}ms",
                self.interval_ms
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn faster(&mut self) {
        self.interval_ms = (self.interval_ms / 2).max(1);
    }
    pub fn slower(&mut self) {
        self.interval_ms = (self.interval_ms * 2).min(MAX_INTERVAL_MS);
    }

    pub fn grow(&mut self) {
        self.cell_size = (self.cell_size + 1).min(MAX_CELL_SIZE);
    }
    pub fn shrink(&mut self) {
        self.cell_size = self.cell_size.saturating_sub(1).max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.interval(), Duration::from_millis(100));
    }

    #[test]
    fn rejects_out_of_range() {
        let zero_size = Settings {
            cell_size: 0,
            ..Settings::default()
        };
        let zero_interval = Settings {
            interval_ms: 0,
            ..Settings::default()
        };

        assert!(matches!(zero_size.validate(), Err(Error::InvalidSetting(_))));
        assert!(matches!(zero_interval.validate(), Err(Error::InvalidSetting(_))));
    }

    #[test]
    fn adjustments_stay_in_range() {
        let mut settings = Settings {
            cell_size: 1,
            interval_ms: 1,
        };
        settings.shrink();
        settings.faster();
        assert_eq!(settings, Settings { cell_size: 1, interval_ms: 1 });

        for _ in 0..100 {
            settings.grow();
            settings.slower();
        }
        assert_eq!(settings.cell_size, MAX_CELL_SIZE);
        assert_eq!(settings.interval_ms, MAX_INTERVAL_MS);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"interval_ms": 250}"#).unwrap();

        assert_eq!(settings.cell_size, 1);
        assert_eq!(settings.interval_ms, 250);
    }
}
