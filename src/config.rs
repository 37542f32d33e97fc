//! Field and neuron configuration.
//!
//! Every value has a default, so a JSON file only needs the keys it changes:
//!
//! ```json
//! { "neuron_count": 400, "neuron": { "flash_duration": 0.1 } }
//! ```

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::error::ConfigError;
use crate::scene::template;

/// Per-neuron appearance and flash timing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NeuronConfig {
    /// Length of a flash in animation time units.
    pub flash_duration: f32,
    /// Exponent of the ease-out curve. Below 1 the flash lingers near its
    /// peak, above 1 it drops off quickly.
    pub easing_exponent: f32,
    /// Resting color as `0xRRGGBB`.
    pub base_color: u32,
    /// Peak flash color as `0xRRGGBB`.
    pub flash_color: u32,
    /// Material opacity of every neuron mesh.
    pub opacity: f32,
    /// Mean uniform scale applied to the template.
    pub base_scale: f32,
    /// Scale is drawn uniformly from `base_scale ± scale_variation`.
    pub scale_variation: f32,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            flash_duration: 0.05,
            easing_exponent: 0.1,
            base_color: color::DEFAULT_BASE,
            flash_color: color::DEFAULT_FLASH,
            opacity: 0.3,
            base_scale: 0.25,
            scale_variation: 0.125,
        }
    }
}

impl NeuronConfig {
    /// Resting color as RGB.
    pub fn base_rgb(&self) -> Vec3 {
        color::from_hex(self.base_color)
    }

    /// Flash color as RGB.
    pub fn flash_rgb(&self) -> Vec3 {
        color::from_hex(self.flash_color)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("neuron.flash_duration", self.flash_duration)?;
        positive("neuron.easing_exponent", self.easing_exponent)?;
        unit("neuron.opacity", self.opacity)?;
        positive("neuron.base_scale", self.base_scale)?;
        non_negative("neuron.scale_variation", self.scale_variation)?;
        if self.scale_variation > self.base_scale {
            return Err(ConfigError::Invalid(format!(
                "neuron.scale_variation ({}) exceeds neuron.base_scale ({})",
                self.scale_variation, self.base_scale
            )));
        }
        Ok(())
    }
}

/// Layout of the whole field and its per-frame driver.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// How many neurons to place.
    pub neuron_count: usize,
    /// Extent of the placement rectangle along world X.
    pub length: f32,
    /// Extent of the placement rectangle along world Z.
    pub width: f32,
    /// Thickness of the placement slab along world Y.
    pub depth: f32,
    /// Chance per neuron per frame of (re)starting a flash.
    pub flash_probability: f32,
    /// Converts clock milliseconds into animation time units.
    pub delta_scale: f32,
    /// Name of the template to instantiate for each neuron.
    pub template: String,
    /// Fixed random seed. Unset means a different field every run.
    pub seed: Option<u64>,
    /// Extra room added around the placement volume by the bounds helper
    /// (world X, Y, Z).
    pub bounds_padding: [f32; 3],
    /// Bounds helper line color as `0xRRGGBB`.
    pub bounds_color: u32,
    /// Per-neuron settings.
    pub neuron: NeuronConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            neuron_count: 120,
            length: 5.0,
            width: 5.0,
            depth: 0.5,
            flash_probability: 0.1,
            delta_scale: 0.00015,
            template: template::NEURON.into(),
            seed: None,
            bounds_padding: [0.5, 1.25, 0.5],
            bounds_color: color::DEFAULT_FLASH,
            neuron: NeuronConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of neurons.
    pub fn with_neuron_count(mut self, count: usize) -> Self {
        self.neuron_count = count;
        self
    }

    /// Set the placement rectangle (length along X, width along Z) and slab
    /// depth (along Y).
    pub fn with_bounds(mut self, length: f32, width: f32, depth: f32) -> Self {
        self.length = length;
        self.width = width;
        self.depth = depth;
        self
    }

    /// Set the per-frame flash probability.
    pub fn with_flash_probability(mut self, p: f32) -> Self {
        self.flash_probability = p;
        self
    }

    /// Set the clock-to-animation time factor.
    pub fn with_delta_scale(mut self, scale: f32) -> Self {
        self.delta_scale = scale;
        self
    }

    /// Set the template name.
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = name.into();
        self
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the per-neuron settings.
    pub fn with_neuron(mut self, neuron: NeuronConfig) -> Self {
        self.neuron = neuron;
        self
    }

    /// Full extents of the bounds helper box (world X, Y, Z).
    pub fn bounds_size(&self) -> Vec3 {
        Vec3::new(self.length, self.depth, self.width) + Vec3::from(self.bounds_padding)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("length", self.length)?;
        non_negative("width", self.width)?;
        non_negative("depth", self.depth)?;
        if self.neuron_count > 0 && (self.length <= 0.0 || self.width <= 0.0) {
            return Err(ConfigError::Invalid(
                "length and width must be positive when neurons are placed".into(),
            ));
        }
        unit("flash_probability", self.flash_probability)?;
        non_negative("delta_scale", self.delta_scale)?;
        for (axis, pad) in ["x", "y", "z"].iter().zip(self.bounds_padding) {
            if !pad.is_finite() {
                return Err(ConfigError::Invalid(format!("bounds_padding.{} must be finite", axis)));
            }
        }
        if self.template.is_empty() {
            return Err(ConfigError::Invalid("template name is empty".into()));
        }
        self.neuron.validate()
    }

    /// Save as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse from a JSON string and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be >= 0, got {}", name, value)))
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be > 0, got {}", name, value)))
    }
}

fn unit(name: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be in [0, 1], got {}", name, value)))
    }
}
