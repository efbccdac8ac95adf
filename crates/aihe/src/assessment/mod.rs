//! AIHE assessment calculation core.
//!
//! Pure, synchronous computation: sixteen subdimension ratings and the
//! organisational context go in, composite maturity metrics, dynamic dimension
//! weights, and a prioritised recommendation list come out. Nothing here performs
//! I/O or keeps state between calls, so one [`CalculationOrchestrator`] can be
//! shared freely across threads.

pub mod aggregation;
pub mod context;
pub mod domain;
pub mod gap;
pub mod metrics;
mod orchestrator;
pub mod recommendations;
pub mod result;
pub mod weighting;

#[cfg(test)]
mod tests;

pub use aggregation::{aggregate_subdimensions, CalculationError};
pub use context::ContextScorer;
pub use domain::{
    Archetype, ContextFactor, ContextFactorKind, DimensionId, DimensionScore, PriorityLevel,
    SubdimensionScore,
};
pub use gap::{GapAnalysis, GapAnalyzer, GapMeasure};
pub use metrics::{CoreMetrics, MetricsEngine, TENSION_PAIRS};
pub use orchestrator::{AssessmentInput, CalculationOrchestrator, DimensionAssessmentInput};
pub use recommendations::{Recommendation, RecommendationEngine, RecommendationSummary};
pub use result::{CalculationMetadata, CalculationResult, DimensionAnalysis};
pub use weighting::{
    BaseWeightSource, DimensionWeights, DynamicWeightEngine, RuleApplication, WeightOutcome,
    WeightingConfig, WeightingRule,
};
