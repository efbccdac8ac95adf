use super::aggregation::{aggregate_subdimensions, CalculationError};
use super::context::ContextScorer;
use super::domain::{round_to, Archetype, ContextFactor, DimensionScore, SubdimensionScore};
use super::gap::GapAnalyzer;
use super::metrics::MetricsEngine;
use super::recommendations::RecommendationEngine;
use super::result::{CalculationMetadata, CalculationResult, DimensionAnalysis};
use super::weighting::{DynamicWeightEngine, WeightingConfig, WeightingRule};
use serde::{Deserialize, Serialize};
use tracing::info;

const CRITICAL_IST_BELOW: f64 = 2.0;
const CRITICAL_GAP_ABOVE: f64 = 1.5;
const HIGH_PRIORITY_IST_BELOW: f64 = 2.5;
const HIGH_PRIORITY_GAP_ABOVE: f64 = 1.0;

fn default_archetype() -> String {
    Archetype::BalancedTransformer.code().to_string()
}

/// A completed self-assessment: sixteen subdimension ratings plus context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub subdimension_scores: Vec<SubdimensionScore>,
    #[serde(default)]
    pub context_factors: Vec<ContextFactor>,
    #[serde(default = "default_archetype")]
    pub archetype: String,
    #[serde(default)]
    pub is_kmu: bool,
}

/// Pre-aggregated variant used for previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAssessmentInput {
    pub dimension_scores: Vec<DimensionScore>,
    #[serde(default)]
    pub context_factors: Vec<ContextFactor>,
    #[serde(default = "default_archetype")]
    pub archetype: String,
    #[serde(default)]
    pub is_kmu: bool,
}

/// Sequences context scoring, weighting, metrics, and recommendations.
#[derive(Debug, Clone, Default)]
pub struct CalculationOrchestrator {
    weighting: DynamicWeightEngine,
}

impl CalculationOrchestrator {
    pub fn new(config: WeightingConfig) -> Self {
        Self {
            weighting: DynamicWeightEngine::new(config),
        }
    }

    pub fn weighting(&self) -> &DynamicWeightEngine {
        &self.weighting
    }

    /// Full pipeline from raw subdimension ratings. Fails only when the ratings do
    /// not form eight complete dimensions.
    pub fn calculate(&self, input: &AssessmentInput) -> Result<CalculationResult, CalculationError> {
        let dimension_scores = aggregate_subdimensions(&input.subdimension_scores)?;
        Ok(self.calculate_dimensions(
            dimension_scores,
            &input.context_factors,
            &input.archetype,
            input.is_kmu,
        ))
    }

    pub fn preview(&self, input: &DimensionAssessmentInput) -> CalculationResult {
        self.calculate_dimensions(
            input.dimension_scores.clone(),
            &input.context_factors,
            &input.archetype,
            input.is_kmu,
        )
    }

    /// Pipeline over pre-aggregated dimension scores. Malformed shapes degrade to
    /// zeroed metrics rather than failing.
    pub fn calculate_dimensions(
        &self,
        dimension_scores: Vec<DimensionScore>,
        context_factors: &[ContextFactor],
        archetype: &str,
        is_kmu: bool,
    ) -> CalculationResult {
        let context_score = ContextScorer::score(context_factors);
        let resolved_archetype = Archetype::parse(archetype);

        let outcome =
            self.weighting
                .compute(&dimension_scores, context_score, resolved_archetype, is_kmu);

        let dimension_scores: Vec<DimensionScore> = dimension_scores
            .into_iter()
            .map(|score| {
                let weight = outcome.weights[score.dimension_id];
                score.with_weight(weight)
            })
            .collect();

        let core_metrics = MetricsEngine::compute(&dimension_scores, context_score);
        let recommendations = RecommendationEngine::generate(&dimension_scores);
        let recommendation_summary = RecommendationEngine::summarize(&recommendations);
        let dimension_analysis = analyze_dimensions(&dimension_scores);

        let metadata = CalculationMetadata {
            archetype: archetype.to_string(),
            resolved_archetype,
            is_kmu,
            base_weight_source: outcome.base_source,
            total_gap: round_to(dimension_scores.iter().map(DimensionScore::gap).sum(), 3),
            average_ist_value: average(dimension_scores.iter().map(|score| score.ist_value)),
            average_soll_value: average(dimension_scores.iter().map(|score| score.soll_value)),
            critical_dimensions: dimension_scores
                .iter()
                .filter(|score| {
                    score.ist_value < CRITICAL_IST_BELOW && score.gap() > CRITICAL_GAP_ABOVE
                })
                .map(|score| score.dimension_id)
                .collect(),
            high_priority_dimensions: dimension_scores
                .iter()
                .filter(|score| {
                    score.ist_value < HIGH_PRIORITY_IST_BELOW
                        && score.gap() > HIGH_PRIORITY_GAP_ABOVE
                })
                .map(|score| score.dimension_id)
                .collect(),
            rounding_residual: outcome.rounding_residual,
            rounding_anomaly: outcome.rounding_anomaly,
            calculation_rules_applied: WeightingRule::ordered()
                .into_iter()
                .map(WeightingRule::label)
                .collect(),
        };

        info!(
            archetype = resolved_archetype.code(),
            is_kmu,
            eqi = core_metrics.eqi,
            rgi = core_metrics.rgi,
            si = core_metrics.si,
            sbs = core_metrics.sbs,
            recommendations = recommendations.len(),
            "assessment calculated"
        );

        CalculationResult {
            core_metrics,
            dynamic_weights: outcome.weights,
            weighting_trail: outcome.trail,
            dimension_analysis,
            recommendations,
            recommendation_summary,
            metadata,
        }
    }
}

fn analyze_dimensions(scores: &[DimensionScore]) -> Vec<DimensionAnalysis> {
    scores
        .iter()
        .map(|score| {
            let analysis = GapAnalyzer::analyze(score.ist_value, score.soll_value);
            DimensionAnalysis {
                dimension_id: score.dimension_id,
                dimension_label: score.dimension_id.label(),
                ist_value: score.ist_value,
                soll_value: score.soll_value,
                gap: analysis.gap,
                gap_percent: analysis.gap_percent,
                priority: analysis.priority,
                priority_label: analysis.priority.label(),
                dynamic_weight: score.dynamic_weight,
            }
        })
        .collect()
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        round_to(sum / count as f64, 3)
    }
}
