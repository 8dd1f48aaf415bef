//! Analytics configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::activity::DayConvention;

/// Length of the trailing activity window, in days, ending today.
pub const WINDOW_DAYS: u32 = 365;

/// Year length used for the Year Progress bar.
pub const DAYS_IN_YEAR: u32 = 365;

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Value out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Goal constants and the day-boundary convention.
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Study minutes credited per worksheet
    pub minutes_per_item: u32,

    /// Study Hours goal for the year
    pub yearly_study_hours: u32,

    /// Tasks Completed goal for the year
    pub yearly_task_goal: u32,

    /// Offset from UTC, in minutes, used to cut timestamps into calendar days
    pub utc_offset_minutes: i32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            minutes_per_item: 45,
            yearly_study_hours: 200,
            yearly_task_goal: 200,
            utc_offset_minutes: 0,
        }
    }
}

impl AnalyticsConfig {
    /// Read a JSON config file and validate it.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        let config: AnalyticsConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject goals of zero and offsets a day or more away from UTC.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.yearly_study_hours == 0 {
            return Err(ConfigError::Invalid("yearly_study_hours must be positive".to_string()));
        }
        if self.yearly_task_goal == 0 {
            return Err(ConfigError::Invalid("yearly_task_goal must be positive".to_string()));
        }
        if self.day_convention().is_none() {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            )));
        }
        Ok(())
    }

    /// Yearly study goal in minutes.
    pub fn yearly_study_minutes(&self) -> u64 {
        self.yearly_study_hours as u64 * 60
    }

    /// The calendar-day convention, if the offset is representable.
    pub fn day_convention(&self) -> Option<DayConvention> {
        DayConvention::from_offset_minutes(self.utc_offset_minutes)
    }
}
