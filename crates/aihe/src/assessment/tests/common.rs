use crate::assessment::domain::{
    ContextFactor, ContextFactorKind, DimensionId, DimensionScore, SubdimensionScore,
};
use crate::assessment::{AssessmentInput, DimensionAssessmentInput};

/// Sixteen subdimension ratings whose children average to the given dimension values.
pub(super) fn subdimensions(pairs: [(f64, f64); 8]) -> Vec<SubdimensionScore> {
    DimensionId::ordered()
        .into_iter()
        .zip(pairs)
        .flat_map(|(dimension, (ist, soll))| {
            [
                SubdimensionScore::new(format!("{dimension}.1"), ist, soll),
                SubdimensionScore::new(format!("{dimension}.2"), ist, soll),
            ]
        })
        .collect()
}

pub(super) fn dimensions(pairs: [(f64, f64); 8]) -> Vec<DimensionScore> {
    DimensionId::ordered()
        .into_iter()
        .zip(pairs)
        .map(|(dimension, (ist, soll))| DimensionScore::new(dimension, ist, soll))
        .collect()
}

pub(super) fn uniform_assessment(ist: f64, soll: f64) -> AssessmentInput {
    AssessmentInput {
        subdimension_scores: subdimensions([(ist, soll); 8]),
        context_factors: Vec::new(),
        archetype: "BALANCED_TRANSFORMER".to_string(),
        is_kmu: false,
    }
}

/// Mixed maturity profile with two critical and two high priority dimensions.
pub(super) fn mixed_profile() -> [(f64, f64); 8] {
    [
        (2.5, 3.0),
        (2.8, 3.2),
        (1.8, 3.0),
        (1.5, 3.5),
        (2.3, 3.0),
        (3.5, 3.0),
        (1.2, 3.0),
        (2.0, 3.5),
    ]
}

pub(super) fn mixed_preview(archetype: &str, is_kmu: bool) -> DimensionAssessmentInput {
    DimensionAssessmentInput {
        dimension_scores: dimensions(mixed_profile()),
        context_factors: uniform_context(1),
        archetype: archetype.to_string(),
        is_kmu,
    }
}

pub(super) fn uniform_context(value: u8) -> Vec<ContextFactor> {
    ContextFactorKind::ordered()
        .into_iter()
        .map(|kind| ContextFactor::of(kind, value))
        .collect()
}
