use serde::{Deserialize, Serialize};

/// Thresholds and multipliers driving the weighting rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightingConfig {
    pub gap_threshold: f64,
    pub gap_multiplier: f64,
    pub tension_threshold: f64,
    pub trailing_tension_multiplier: f64,
    pub leading_tension_multiplier: f64,
    pub low_context_threshold: f64,
    pub high_context_threshold: f64,
    pub context_multiplier: f64,
    pub dampening_ist_threshold: f64,
    pub dampening_multiplier: f64,
    pub minimum_weight: f64,
    pub residual_correction_threshold: f64,
    pub residual_warning_threshold: f64,
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            gap_threshold: 1.5,
            gap_multiplier: 1.2,
            tension_threshold: 3.0,
            trailing_tension_multiplier: 1.3,
            leading_tension_multiplier: 1.1,
            low_context_threshold: 0.2,
            high_context_threshold: 0.8,
            context_multiplier: 1.2,
            dampening_ist_threshold: 3.5,
            dampening_multiplier: 0.8,
            minimum_weight: 0.01,
            residual_correction_threshold: 0.0001,
            residual_warning_threshold: 0.001,
        }
    }
}
