//! Chart configuration.
//!
//! Defaults live in code and can be overridden from a JSON file, so a
//! lesson plan can ship its own chart settings next to its data files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::acoustics::error::{AshbyError, Result};

/// Rendering settings shared by all chart kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Output width in pixels.
    pub width: u32,

    /// Output height in pixels.
    pub height: u32,

    /// Samples per contour-grid axis.
    pub grid_samples: usize,

    /// Scatter marker radius in pixels.
    pub point_size: u32,

    /// Substances to mark with an enlarged point; the contour level range
    /// is snapped to the span of their impedances. Missing names surface
    /// as lookup errors when the chart is drawn, not at load time.
    pub highlights: Vec<String>,

    /// Overlay the ideal-gas sound-speed curves on the sound-speed chart.
    pub ideal_gas_curves: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 1024,
            height: 768,
            grid_samples: 50,
            point_size: 4,
            highlights: vec!["Air".to_string(), "Water".to_string()],
            ideal_gas_curves: true,
        }
    }
}

impl ChartConfig {
    /// Loads settings from a JSON file; absent keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&text).map_err(|e| {
            AshbyError::Validation(format!("config file {}: {e}", path.as_ref().display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ChartConfig =
            serde_json::from_str(r#"{ "width": 640, "highlights": [] }"#).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 768);
        assert!(config.highlights.is_empty());
        assert!(config.ideal_gas_curves);
    }
}
