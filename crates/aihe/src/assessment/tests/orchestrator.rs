use super::common::{mixed_preview, subdimensions, uniform_assessment};
use crate::assessment::domain::{Archetype, DimensionId, PriorityLevel};
use crate::assessment::{
    AssessmentInput, BaseWeightSource, CalculationError, CalculationOrchestrator, WeightingConfig,
    WeightingRule,
};

#[test]
fn uniform_half_point_gap_end_to_end() {
    let result = CalculationOrchestrator::default()
        .calculate(&uniform_assessment(2.5, 3.0))
        .expect("complete assessment calculates");

    assert_eq!(result.core_metrics.context_score, 0.5);
    assert_eq!(result.core_metrics.eqi, 0.833);
    assert_eq!(result.core_metrics.rgi, 0.625);
    assert_eq!(result.core_metrics.si, 0.0);
    assert_eq!(result.core_metrics.sbs, 0.819);
    assert!(result.recommendations.is_empty());
    assert_eq!(result.recommendation_summary.total_recommendations, 0);
    assert_eq!(result.metadata.total_gap, 4.0);
    assert_eq!(result.metadata.average_ist_value, 2.5);
    assert_eq!(result.metadata.average_soll_value, 3.0);
    assert!(result
        .dimension_analysis
        .iter()
        .all(|analysis| analysis.priority == PriorityLevel::Low && analysis.dynamic_weight == 0.125));
}

#[test]
fn mixed_profile_prioritises_critical_dimensions() {
    let result = CalculationOrchestrator::default().preview(&mixed_preview("BALANCED_TRANSFORMER", false));

    let order: Vec<_> = result
        .recommendations
        .iter()
        .map(|recommendation| recommendation.dimension_id)
        .collect();
    assert_eq!(
        order,
        vec![DimensionId::D4, DimensionId::D7, DimensionId::D8, DimensionId::D3]
    );
    assert_eq!(result.recommendation_summary.critical_count, 2);
    assert_eq!(result.recommendation_summary.high_count, 2);
    assert_eq!(
        result.metadata.critical_dimensions,
        vec![DimensionId::D4, DimensionId::D7]
    );
    assert_eq!(
        result.metadata.high_priority_dimensions,
        vec![DimensionId::D3, DimensionId::D4, DimensionId::D7, DimensionId::D8]
    );
    assert_eq!(result.core_metrics.context_score, 0.375);
}

#[test]
fn unrecognised_archetype_is_reported_not_rejected() {
    let result = CalculationOrchestrator::default().preview(&mixed_preview("VISIONARY", false));

    assert_eq!(result.metadata.archetype, "VISIONARY");
    assert_eq!(result.metadata.resolved_archetype, Archetype::Unknown);
    assert_eq!(result.metadata.base_weight_source, BaseWeightSource::Equal);
}

#[test]
fn kmu_flag_is_carried_into_metadata() {
    let result = CalculationOrchestrator::default().preview(&mixed_preview("BALANCED_TRANSFORMER", true));
    assert!(result.metadata.is_kmu);
    assert_eq!(result.metadata.base_weight_source, BaseWeightSource::Kmu);

    let chaotic = CalculationOrchestrator::default().preview(&mixed_preview("CHAOTIC_DOER", true));
    assert_eq!(chaotic.metadata.base_weight_source, BaseWeightSource::Archetype);
}

#[test]
fn weights_flow_into_dimension_analysis() {
    let result = CalculationOrchestrator::default().preview(&mixed_preview("STAGNANT_ESTABLISHED", false));

    for analysis in &result.dimension_analysis {
        assert_eq!(analysis.dynamic_weight, result.dynamic_weights[analysis.dimension_id]);
    }
    let rules: Vec<_> = result.metadata.calculation_rules_applied.clone();
    assert_eq!(rules.len(), WeightingRule::ordered().len());
    assert_eq!(rules[7], "Rule 8: Normalization (sum = 1.0)");
}

#[test]
fn incomplete_subdimensions_are_rejected() {
    let mut scores = subdimensions([(2.0, 3.0); 8]);
    scores.truncate(12);
    let input = AssessmentInput {
        subdimension_scores: scores,
        context_factors: Vec::new(),
        archetype: "BALANCED_TRANSFORMER".to_string(),
        is_kmu: false,
    };

    assert_eq!(
        CalculationOrchestrator::default().calculate(&input),
        Err(CalculationError::SubdimensionCount {
            expected: 16,
            found: 12
        })
    );
}

#[test]
fn malformed_preview_degrades_to_zeroed_metrics() {
    let mut input = mixed_preview("BALANCED_TRANSFORMER", false);
    input.dimension_scores.truncate(5);

    let result = CalculationOrchestrator::default().preview(&input);
    assert_eq!(result.core_metrics.eqi, 0.0);
    assert_eq!(result.core_metrics.rgi, 0.0);
    assert_eq!(result.core_metrics.si, 0.0);
    assert_eq!(result.dimension_analysis.len(), 5);
}

#[test]
fn input_defaults_apply_when_fields_are_missing() {
    let input: AssessmentInput = serde_json::from_value(serde_json::json!({
        "subdimension_scores": subdimensions([(3.0, 3.0); 8]),
    }))
    .expect("minimal input deserializes");

    assert_eq!(input.archetype, "BALANCED_TRANSFORMER");
    assert!(!input.is_kmu);
    assert!(input.context_factors.is_empty());
}

#[test]
fn rounding_anomaly_is_reported_in_metadata() {
    let input = mixed_preview("CHAOTIC_DOER", false);

    let default = CalculationOrchestrator::default().preview(&input);
    assert_eq!(
        default.metadata.rounding_anomaly,
        default.metadata.rounding_residual.abs() > 0.001
    );

    // Negative tolerance turns any residual, including zero, into an anomaly.
    let strict = CalculationOrchestrator::new(WeightingConfig {
        residual_warning_threshold: -1.0,
        ..WeightingConfig::default()
    })
    .preview(&input);
    assert!(strict.metadata.rounding_anomaly);
    assert!((strict.dynamic_weights.sum() - 1.0).abs() < 1e-9);
}
