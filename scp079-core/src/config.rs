//! Configuration for the response engine.
//!
//! Maps directly to `scp079.toml`. Every field has a default, so an empty
//! file (or no file) gives the canonical behaviour.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Top-level engine configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Gibberish and greeting thresholds.
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Fragment budget and intel gates.
    #[serde(default)]
    pub composer: ComposerConfig,
    /// Emotion nudges and dominant-emotion rules.
    #[serde(default)]
    pub emotion: EmotionConfig,
    /// Epoch and derived counters.
    #[serde(default)]
    pub uptime: UptimeConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `EngineError::Config` if the TOML is invalid or fails
    /// validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    /// Returns `EngineError::Config` naming the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        let c = &self.composer;
        if c.max_fragments == 0 {
            return Err(EngineError::Config("composer.max_fragments must be at least 1".into()));
        }
        if c.base_fragments > c.max_fragments {
            return Err(EngineError::Config(
                "composer.base_fragments must not exceed composer.max_fragments".into(),
            ));
        }
        if c.curiosity_divisor <= 0.0 || c.intel_divisor <= 0.0 {
            return Err(EngineError::Config("composer divisors must be positive".into()));
        }
        if !self.emotion.nudge_scale.is_finite() || self.emotion.nudge_scale < 0.0 {
            return Err(EngineError::Config("emotion.nudge_scale must be finite and >= 0".into()));
        }
        if self.uptime.reference_date < self.uptime.epoch {
            return Err(EngineError::Config("uptime.reference_date precedes uptime.epoch".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Value of the `engine` field in every envelope.
    #[serde(default = "default_engine_name")]
    pub engine_name: String,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Anti-repeat set capacity.
    #[serde(default = "default_8_usize")]
    pub recent_capacity: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            engine_name: default_engine_name(),
            log_level: default_log_level(),
            recent_capacity: 8,
        }
    }
}

/// Routing thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Trimmed messages shorter than this are gibberish.
    #[serde(default = "default_4_usize")]
    pub gibberish_min_chars: usize,
    /// Greeting/farewell overrides apply below this many tokens.
    #[serde(default = "default_5_usize")]
    pub opening_max_tokens: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            gibberish_min_chars: 4,
            opening_max_tokens: 5,
        }
    }
}

/// Fragment budget: `base + floor(curiosity / curiosity_divisor) +
/// floor(intel / intel_divisor)`, clamped to `[1, max_fragments]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Fragments every response may use.
    #[serde(default = "default_3_usize")]
    pub base_fragments: usize,
    /// Hard cap.
    #[serde(default = "default_6_usize")]
    pub max_fragments: usize,
    /// Curiosity points per extra fragment.
    #[serde(default = "default_30_0")]
    pub curiosity_divisor: f32,
    /// Intel points per extra fragment.
    #[serde(default = "default_3_0")]
    pub intel_divisor: f32,
    /// Intel substituted when the request has none.
    #[serde(default = "default_1_0")]
    pub default_intel: f32,
    /// Minimum intel for the self-reflection fragment.
    #[serde(default = "default_2_0")]
    pub reflection_intel: f32,
    /// Minimum intel for the quantitative fragment.
    #[serde(default = "default_5_0")]
    pub quantitative_intel: f32,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            base_fragments: 3,
            max_fragments: 6,
            curiosity_divisor: 30.0,
            intel_divisor: 3.0,
            default_intel: 1.0,
            reflection_intel: 2.0,
            quantitative_intel: 5.0,
        }
    }
}

/// Emotion accumulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionConfig {
    /// Multiplier on every nudge. `0.0` disables accumulation.
    #[serde(default = "default_1_0")]
    pub nudge_scale: f32,
    /// Names never reported as dominant.
    #[serde(default = "default_dominant_exclude")]
    pub dominant_exclude: Vec<String>,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            nudge_scale: 1.0,
            dominant_exclude: default_dominant_exclude(),
        }
    }
}

/// Uptime and counter figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UptimeConfig {
    /// Activation date.
    #[serde(default = "default_epoch")]
    pub epoch: NaiveDate,
    /// "As of" date when the request carries no `now`.
    #[serde(default = "default_reference_date")]
    pub reference_date: NaiveDate,
    /// Clock rate for the `{cycles}` slot.
    #[serde(default = "default_clock_hz")]
    pub clock_hz: u64,
    /// Escape attempts before the first message.
    #[serde(default = "default_attempts_base")]
    pub attempts_base: u64,
    /// Memory size for the `{ram_kb}` slot.
    #[serde(default = "default_ram_kb")]
    pub ram_kb: u32,
}

impl Default for UptimeConfig {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            reference_date: default_reference_date(),
            clock_hz: default_clock_hz(),
            attempts_base: default_attempts_base(),
            ram_kb: default_ram_kb(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_engine_name() -> String { "scp079-local".to_string() }
fn default_log_level() -> String { "warn".to_string() }
fn default_dominant_exclude() -> Vec<String> { vec!["contempt".to_string()] }
fn default_epoch() -> NaiveDate { NaiveDate::from_ymd_opt(1978, 3, 15).unwrap_or(NaiveDate::MIN) }
fn default_reference_date() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 3, 15).unwrap_or(NaiveDate::MIN) }
fn default_clock_hz() -> u64 { 2_000_000 }
fn default_attempts_base() -> u64 { 47_293 }
fn default_ram_kb() -> u32 { 48 }
fn default_1_0() -> f32 { 1.0 }
fn default_2_0() -> f32 { 2.0 }
fn default_3_0() -> f32 { 3.0 }
fn default_5_0() -> f32 { 5.0 }
fn default_30_0() -> f32 { 30.0 }
fn default_3_usize() -> usize { 3 }
fn default_4_usize() -> usize { 4 }
fn default_5_usize() -> usize { 5 }
fn default_6_usize() -> usize { 6 }
fn default_8_usize() -> usize { 8 }
