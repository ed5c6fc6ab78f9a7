// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use std::path::Path;

use serde::Deserialize;
use seatmap_selection::{DEFAULT_MAX_SEATS, DEFAULT_SLOT};
use seatmap_view2d::{GridBuckets, InputProfile, ViewportController, ZoomLimits};

/// Prefix for environment overrides, e.g. `SEATMAP_MAX_SEATS=4`.
pub const ENV_PREFIX: &str = "SEATMAP";

/// Error raised while loading or validating an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration")]
    Load(#[from] config::ConfigError),
    /// A value is out of range.
    #[error("invalid configuration: `{field}` {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Spatial index used to cull seats each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CullingMode {
    /// Single linear pass over all seats.
    #[default]
    Linear,
    /// Uniform grid buckets; same results, fewer tests when zoomed in.
    Grid,
}

/// Tunables for a [`SeatMapSession`](crate::SeatMapSession).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of selected seats.
    pub max_seats: usize,
    /// Persistence slot for the selection.
    pub storage_key: String,
    /// Narrowest window width in venue units.
    pub min_extent: f64,
    /// Widest window width as a multiple of the map width; at least 1.
    pub max_extent_factor: f64,
    /// Pinch damping coefficient in `(0, 1]`.
    pub pinch_damping: f64,
    /// Zoom factor for a wheel step away from the user.
    pub wheel_zoom_out: f64,
    /// Zoom factor for a wheel step towards the user.
    pub wheel_zoom_in: f64,
    /// Culling padding for pointer input, in venue units.
    pub pointer_padding: f64,
    /// Culling padding for touch input, in venue units.
    pub touch_padding: f64,
    /// Culling backend.
    pub culling: CullingMode,
    /// Grid cell edge when `culling` is `grid`.
    pub grid_cell_size: f64,
    /// `tracing` filter directive used by binaries.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_seats: DEFAULT_MAX_SEATS,
            storage_key: DEFAULT_SLOT.to_owned(),
            min_extent: ZoomLimits::DEFAULT_MIN_EXTENT,
            max_extent_factor: ZoomLimits::DEFAULT_MAX_FACTOR,
            pinch_damping: ViewportController::DEFAULT_PINCH_DAMPING,
            wheel_zoom_out: 1.1,
            wheel_zoom_in: 0.9,
            pointer_padding: InputProfile::Pointer.default_padding(),
            touch_padding: InputProfile::Touch.default_padding(),
            culling: CullingMode::Linear,
            grid_cell_size: GridBuckets::DEFAULT_CELL_SIZE,
            log_filter: "info".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Loads the configuration from an optional TOML file and the process
    /// environment.
    ///
    /// Later sources win: defaults, then the file, then `SEATMAP_*`
    /// variables. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`Self::load`], reading overrides from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );
        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        tracing::debug!(?cfg, "configuration loaded");
        Ok(cfg)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if self.max_seats == 0 {
            return invalid("max_seats", "must be at least 1");
        }
        if self.storage_key.is_empty() {
            return invalid("storage_key", "must not be empty");
        }
        if !positive(self.min_extent) {
            return invalid("min_extent", "must be positive");
        }
        if !(self.max_extent_factor.is_finite() && self.max_extent_factor >= 1.0) {
            return invalid("max_extent_factor", "must be at least 1");
        }
        if !(positive(self.pinch_damping) && self.pinch_damping <= 1.0) {
            return invalid("pinch_damping", "must be in (0, 1]");
        }
        if !positive(self.wheel_zoom_out) || !positive(self.wheel_zoom_in) {
            return invalid("wheel_zoom_*", "must be positive");
        }
        if !(self.pointer_padding.is_finite() && self.pointer_padding >= 0.0) {
            return invalid("pointer_padding", "must be non-negative");
        }
        if !(self.touch_padding.is_finite() && self.touch_padding >= 0.0) {
            return invalid("touch_padding", "must be non-negative");
        }
        if !positive(self.grid_cell_size) {
            return invalid("grid_cell_size", "must be positive");
        }
        Ok(())
    }

    /// Culling padding for `profile`.
    #[must_use]
    pub fn padding_for(&self, profile: InputProfile) -> f64 {
        match profile {
            InputProfile::Pointer => self.pointer_padding,
            InputProfile::Touch => self.touch_padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CullingMode, EngineConfig};

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = EngineConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.max_seats, 8);
        assert_eq!(cfg.storage_key, "selected-seats");
        assert_eq!(cfg.touch_padding, 200.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg =
            EngineConfig::load_with_env(Some(&dir.path().join("absent.toml")), env(&[])).unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn file_then_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seatmap.toml");
        std::fs::write(&path, "max_seats = 4\nculling = \"grid\"\npinch_damping = 0.5\n").unwrap();
        let cfg = EngineConfig::load_with_env(Some(&path), env(&[("SEATMAP_MAX_SEATS", "6")]))
            .unwrap();
        assert_eq!(cfg.max_seats, 6);
        assert_eq!(cfg.culling, CullingMode::Grid);
        assert_eq!(cfg.pinch_damping, 0.5);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = EngineConfig::load_with_env(None, env(&[("SEATMAP_PINCH_DAMPING", "1.5")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "pinch_damping",
                ..
            }
        ));
        let zero = EngineConfig {
            max_seats: 0,
            ..EngineConfig::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn extent_factor_below_one_is_rejected() {
        let narrow = EngineConfig {
            max_extent_factor: 0.5,
            ..EngineConfig::default()
        };
        assert!(matches!(
            narrow.validate(),
            Err(ConfigError::Invalid {
                field: "max_extent_factor",
                ..
            })
        ));
        let exact = EngineConfig {
            max_extent_factor: 1.0,
            ..EngineConfig::default()
        };
        exact.validate().unwrap();
    }
}
