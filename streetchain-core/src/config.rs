use serde::Deserialize;

use crate::DEFAULT_SPEED_KMH;

/// Settings shared by the metric calculator and the semantic encoder
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Speed used for edges without a speed limit, km/h
    pub default_speed_kmh: u32,
    /// Label encoded in place of a start address that could not be geocoded
    pub unknown_start_label: String,
    /// Label encoded in place of an end address that could not be geocoded
    pub unknown_end_label: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            default_speed_kmh: DEFAULT_SPEED_KMH,
            unknown_start_label: "unknown start address".to_string(),
            unknown_end_label: "unknown end address".to_string(),
        }
    }
}

impl EncoderConfig {
    /// Configured default speed, never zero
    pub fn default_speed(&self) -> u32 {
        if self.default_speed_kmh == 0 {
            DEFAULT_SPEED_KMH
        } else {
            self.default_speed_kmh
        }
    }
}
