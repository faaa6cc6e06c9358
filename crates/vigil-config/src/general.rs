//! General analysis window configuration.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_start_year() -> i32 {
    2015
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// First year of the analysis window (inclusive).
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// Last year of the analysis window (inclusive). `0` means the current UTC year.
    #[serde(default)]
    pub end_year: i32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: 0,
        }
    }
}

impl GeneralConfig {
    /// End year with the `0` placeholder replaced by the current UTC year.
    #[must_use]
    pub fn resolved_end_year(&self) -> i32 {
        if self.end_year == 0 {
            chrono::Utc::now().year()
        } else {
            self.end_year
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.start_year > self.resolved_end_year() {
            return Err(ConfigError::invalid(
                "general.start_year",
                "must not be after general.end_year",
            ));
        }
        Ok(())
    }
}
