//! Display configuration.
//!
//! Every field has a default, so a configuration file only needs to name
//! what it changes:
//!
//! ```
//! use celestial_axes::AxesConfig;
//!
//! let config = AxesConfig::from_json_str(r#"{ "toggle_key": "c", "tick_number": 7 }"#).unwrap();
//! assert_eq!(config.toggle_key, 'c');
//! assert_eq!(config.tick_number, 7);
//! assert_eq!(config.pixel_precision, 6);
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{AxesError, AxesResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    /// Key that cycles pixel / world / overlay readouts.
    pub toggle_key: char,
    /// Decimals of pixel-mode readouts.
    pub pixel_precision: usize,
    /// Shown in place of each coordinate when the pointer is outside the
    /// transform's domain.
    pub placeholder: String,
    /// Map readout positions back to pixels and reject them if they do not
    /// land within `round_trip_tolerance` pixels of the pointer.
    pub check_round_trip: bool,
    pub round_trip_tolerance: f64,
    /// Target number of ticks per axis when no spacing is configured.
    pub tick_number: usize,
    /// Samples along each frame edge when locating ticks.
    pub edge_samples: usize,
    /// Vertices per gridline.
    pub grid_samples: usize,
    /// Samples per side of the mesh used to find world ranges.
    pub range_samples: usize,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            toggle_key: 'w',
            pixel_precision: 6,
            placeholder: "--".to_string(),
            check_round_trip: true,
            round_trip_tolerance: 1.0,
            tick_number: 5,
            edge_samples: 100,
            grid_samples: 60,
            range_samples: 50,
        }
    }
}

impl AxesConfig {
    pub fn from_json_str(json: &str) -> AxesResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AxesError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_reader(reader: impl Read) -> AxesResult<Self> {
        let config: Self =
            serde_json::from_reader(reader).map_err(|e| AxesError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AxesResult<()> {
        if self.tick_number == 0 {
            return Err(AxesError::config("tick_number must be at least 1"));
        }
        for (name, samples) in [
            ("edge_samples", self.edge_samples),
            ("grid_samples", self.grid_samples),
            ("range_samples", self.range_samples),
        ] {
            if samples < 2 {
                return Err(AxesError::config(format!("{name} must be at least 2")));
            }
        }
        if self.round_trip_tolerance.is_nan() || self.round_trip_tolerance < 0.0 {
            return Err(AxesError::config(
                "round_trip_tolerance must be a non-negative number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AxesConfig::default();
        assert_eq!(config.toggle_key, 'w');
        assert_eq!(config.pixel_precision, 6);
        assert!(config.check_round_trip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(AxesConfig::from_json_str("{}").unwrap(), AxesConfig::default());
    }

    #[test]
    fn test_from_reader() {
        let json = br#"{ "placeholder": "n/a", "check_round_trip": false }"#;
        let config = AxesConfig::from_reader(&json[..]).unwrap();
        assert_eq!(config.placeholder, "n/a");
        assert!(!config.check_round_trip);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AxesConfig::from_json_str(r#"{ "tick_number": 0 }"#).is_err());
        assert!(AxesConfig::from_json_str(r#"{ "grid_samples": 1 }"#).is_err());
        assert!(AxesConfig::from_json_str(r#"{ "round_trip_tolerance": -1.0 }"#).is_err());
        assert!(AxesConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = AxesConfig {
            toggle_key: 'c',
            edge_samples: 20,
            ..AxesConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AxesConfig::from_json_str(&json).unwrap(), config);
    }
}
