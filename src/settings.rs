//! Beam tuning
//!
//! Loaded from JSON authored alongside level data. Missing fields fall back to
//! defaults so older files keep working.

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_POWER, DEFAULT_INTENSITY, FAR_DISTANCE, MAX_SEGMENTS, RENDER_DISTANCE};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Wave polyline samples per wavelength
    pub fn samples_per_wavelength(&self) -> u32 {
        match self {
            QualityPreset::Low => 4,
            QualityPreset::Medium => 8,
            QualityPreset::High => 16,
        }
    }

    /// Upper bound on wave polyline steps for one segment
    pub fn max_wave_steps(&self) -> u32 {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }

    /// Whether hit-point light markers are drawn
    pub fn markers_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Transverse wave overlay parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    /// Peak offset from the straight line at the reference power
    pub amplitude: f32,
    /// Wavelength at the reference power
    pub wavelength: f32,
    /// Phase speed (radians per second)
    pub speed: f32,
    pub samples_per_wavelength: u32,
    pub max_steps: u32,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            amplitude: 6.0,
            wavelength: 48.0,
            speed: 12.0,
            samples_per_wavelength: 8,
            max_steps: 256,
        }
    }
}

/// Beam settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamSettings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Tracing ===
    /// Depth budget: bounces before the beam gives out
    pub intensity: u32,
    /// Power at the emitter, also the reference for power ratios
    pub base_power: u32,
    /// Segment ceiling per trace
    pub max_segments: usize,
    /// Length of the synthetic hit for escaped rays
    pub far_distance: f32,

    // === Rendering ===
    /// Longest drawn stretch of one segment
    pub render_distance: f32,
    /// Beam width at the reference power
    pub beam_width: f32,
    /// Draw segments as sine waves instead of straight lines
    pub wave_enabled: bool,
    pub wave: WaveSettings,
    /// Light markers where segments end
    pub markers: bool,
    /// Seed for marker flicker
    pub flicker_seed: u64,
}

impl Default for BeamSettings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            intensity: DEFAULT_INTENSITY,
            base_power: BASE_POWER,
            max_segments: MAX_SEGMENTS,
            far_distance: FAR_DISTANCE,

            render_distance: RENDER_DISTANCE,
            beam_width: 4.0,
            wave_enabled: true,
            wave: WaveSettings::default(),
            markers: true,
            flicker_seed: 0x5eed_bea5,
        }
    }
}

impl BeamSettings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.wave.samples_per_wavelength = preset.samples_per_wavelength();
        self.wave.max_steps = preset.max_wave_steps();
        self.markers = preset.markers_enabled();
    }

    /// Effective marker toggle (respects the preset)
    pub fn effective_markers(&self) -> bool {
        self.markers && self.quality.markers_enabled()
    }

    /// Parse settings from JSON, sanitizing out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replace values that would break tracing or sampling with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.max_segments == 0 {
            log::warn!("max_segments must be positive, using {}", defaults.max_segments);
            self.max_segments = defaults.max_segments;
        }
        if !(self.far_distance.is_finite() && self.far_distance > 0.0) {
            log::warn!("Invalid far_distance {}, using default", self.far_distance);
            self.far_distance = defaults.far_distance;
        }
        if !(self.render_distance.is_finite() && self.render_distance > 0.0) {
            log::warn!("Invalid render_distance {}, using default", self.render_distance);
            self.render_distance = defaults.render_distance;
        }
        if !(self.wave.wavelength.is_finite() && self.wave.wavelength > 0.0) {
            log::warn!("Invalid wave wavelength {}, using default", self.wave.wavelength);
            self.wave.wavelength = defaults.wave.wavelength;
        }
        if !self.wave.amplitude.is_finite() {
            self.wave.amplitude = defaults.wave.amplitude;
        }
        self.wave.samples_per_wavelength = self.wave.samples_per_wavelength.max(1);
        self.wave.max_steps = self.wave.max_steps.clamp(1, 1 << 16);
        self
    }

    /// Ratio of `power` to the reference power
    pub fn power_ratio(&self, power: u32) -> f32 {
        power as f32 / self.base_power.max(1) as f32
    }
}
