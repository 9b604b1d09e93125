//! Tunable engine constants.
//!
//! The floors and tolerances are pixel-scale heuristics in image space, so
//! they are exposed as configuration rather than hardcoded.

use serde::{Deserialize, Serialize};

/// Geometry and interaction tuning for the annotation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum radius / width / height any resize may produce
    pub min_size: f64,
    /// Distance from an outline that still counts as a hit
    pub hit_threshold: f64,
    /// Half extent of a handle's square hit region
    pub handle_size: f64,
    /// Radius of a circle placed with a single click
    pub default_circle_radius: f64,
    /// Size of a rectangle placed with a single click
    pub default_rectangle_width: f64,
    pub default_rectangle_height: f64,
    /// Size of an ellipse placed with a single click
    pub default_ellipse_width: f64,
    pub default_ellipse_height: f64,
    /// Decimal places in measurement labels
    pub label_precision: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_size: 10.0,
            hit_threshold: 5.0,
            handle_size: 10.0,
            default_circle_radius: 50.0,
            default_rectangle_width: 100.0,
            default_rectangle_height: 80.0,
            default_ellipse_width: 120.0,
            default_ellipse_height: 80.0,
            label_precision: 2,
        }
    }
}

impl EngineConfig {
    /// Returns a description of the first invalid value, if any.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("min_size", self.min_size),
            ("hit_threshold", self.hit_threshold),
            ("handle_size", self.handle_size),
            ("default_circle_radius", self.default_circle_radius),
            ("default_rectangle_width", self.default_rectangle_width),
            ("default_rectangle_height", self.default_rectangle_height),
            ("default_ellipse_width", self.default_ellipse_width),
            ("default_ellipse_height", self.default_ellipse_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be > 0", name));
            }
        }
        if self.default_circle_radius < self.min_size {
            return Err("default_circle_radius must not be below min_size".to_string());
        }
        Ok(())
    }
}
