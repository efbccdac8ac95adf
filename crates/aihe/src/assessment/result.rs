use super::domain::{Archetype, DimensionId, PriorityLevel};
use super::metrics::CoreMetrics;
use super::recommendations::{Recommendation, RecommendationSummary};
use super::weighting::{BaseWeightSource, DimensionWeights, RuleApplication};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionAnalysis {
    pub dimension_id: DimensionId,
    pub dimension_label: &'static str,
    pub ist_value: f64,
    pub soll_value: f64,
    pub gap: f64,
    pub gap_percent: f64,
    pub priority: PriorityLevel,
    pub priority_label: &'static str,
    pub dynamic_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationMetadata {
    pub archetype: String,
    pub resolved_archetype: Archetype,
    pub is_kmu: bool,
    pub base_weight_source: BaseWeightSource,
    pub total_gap: f64,
    pub average_ist_value: f64,
    pub average_soll_value: f64,
    pub critical_dimensions: Vec<DimensionId>,
    pub high_priority_dimensions: Vec<DimensionId>,
    pub rounding_residual: f64,
    pub rounding_anomaly: bool,
    pub calculation_rules_applied: Vec<&'static str>,
}

/// Everything one calculation produces. Contains no clock or random values, so
/// identical inputs serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub core_metrics: CoreMetrics,
    pub dynamic_weights: DimensionWeights,
    pub weighting_trail: Vec<RuleApplication>,
    pub dimension_analysis: Vec<DimensionAnalysis>,
    pub recommendations: Vec<Recommendation>,
    pub recommendation_summary: RecommendationSummary,
    pub metadata: CalculationMetadata,
}
