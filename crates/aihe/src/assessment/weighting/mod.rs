//! Dynamic dimension weighting.
//!
//! Weights start from an archetype (or KMU) base table and are folded through the
//! ordered adjustment rules in [`rules`]. Each rule receives the previous weight
//! vector by value and returns a new one, so the pipeline is a plain left fold and
//! the audit trail falls out of comparing consecutive vectors.

mod config;
mod rules;
mod tables;

pub use config::WeightingConfig;
pub use tables::BaseWeightSource;

use super::domain::{Archetype, DimensionId, DimensionScore};
use rules::RuleInput;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::ops::Index;
use tracing::debug;

/// One weight per dimension, indexed by [`DimensionId`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionWeights([f64; 8]);

impl DimensionWeights {
    pub const fn new(values: [f64; 8]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; 8] {
        &self.0
    }

    pub fn get(&self, dimension: DimensionId) -> f64 {
        self.0[dimension.index()]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Heaviest dimension; the earliest one wins ties.
    pub fn largest(&self) -> DimensionId {
        DimensionId::ordered()
            .into_iter()
            .fold(DimensionId::D1, |best, dimension| {
                if self.get(dimension) > self.get(best) {
                    dimension
                } else {
                    best
                }
            })
    }

    pub fn to_map(&self) -> BTreeMap<DimensionId, f64> {
        DimensionId::ordered()
            .into_iter()
            .map(|dimension| (dimension, self.get(dimension)))
            .collect()
    }

    pub(crate) fn with(mut self, dimension: DimensionId, value: f64) -> Self {
        self.0[dimension.index()] = value;
        self
    }

    pub(crate) fn scale(self, dimension: DimensionId, factor: f64) -> Self {
        let value = self.get(dimension) * factor;
        self.with(dimension, value)
    }

    pub(crate) fn map(self, f: impl Fn(DimensionId, f64) -> f64) -> Self {
        let mut values = self.0;
        for dimension in DimensionId::ordered() {
            values[dimension.index()] = f(dimension, values[dimension.index()]);
        }
        Self(values)
    }
}

impl Index<DimensionId> for DimensionWeights {
    type Output = f64;

    fn index(&self, dimension: DimensionId) -> &Self::Output {
        &self.0[dimension.index()]
    }
}

impl Serialize for DimensionWeights {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_map().serialize(serializer)
    }
}

/// The ordered weighting steps after the base load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingRule {
    TightGaps,
    LargeGaps,
    TechCultureTension,
    ContextComplexity,
    AboveAverageDampening,
    ArchetypeFactors,
    MinimumFloor,
    Normalization,
}

impl WeightingRule {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::TightGaps,
            Self::LargeGaps,
            Self::TechCultureTension,
            Self::ContextComplexity,
            Self::AboveAverageDampening,
            Self::ArchetypeFactors,
            Self::MinimumFloor,
            Self::Normalization,
        ]
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::TightGaps => 1,
            Self::LargeGaps => 2,
            Self::TechCultureTension => 3,
            Self::ContextComplexity => 4,
            Self::AboveAverageDampening => 5,
            Self::ArchetypeFactors => 6,
            Self::MinimumFloor => 7,
            Self::Normalization => 8,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TightGaps => "Rule 1: Tight gaps reinforcement",
            Self::LargeGaps => "Rule 2: Large gaps reinforcement",
            Self::TechCultureTension => "Rule 3: High tension response (Tech-Culture)",
            Self::ContextComplexity => "Rule 4: Context complexity adjustment",
            Self::AboveAverageDampening => "Rule 5: Above-average dimension dampening",
            Self::ArchetypeFactors => "Rule 6: Archetype-specific adjustments",
            Self::MinimumFloor => "Rule 7: Minimum security (1% minimum weight)",
            Self::Normalization => "Rule 8: Normalization (sum = 1.0)",
        }
    }
}

/// Audit entry naming the dimensions a rule changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleApplication {
    pub rule: WeightingRule,
    pub label: &'static str,
    pub adjusted: Vec<DimensionId>,
}

impl RuleApplication {
    fn between(rule: WeightingRule, before: &DimensionWeights, after: &DimensionWeights) -> Self {
        let adjusted = DimensionId::ordered()
            .into_iter()
            .filter(|dimension| before.get(*dimension) != after.get(*dimension))
            .collect();

        Self {
            rule,
            label: rule.label(),
            adjusted,
        }
    }
}

/// Final weights plus how they were reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightOutcome {
    pub weights: DimensionWeights,
    pub base_source: BaseWeightSource,
    pub rounding_residual: f64,
    pub rounding_anomaly: bool,
    pub trail: Vec<RuleApplication>,
}

/// Stateless engine deriving per-dimension weights for one assessment.
#[derive(Debug, Clone, Default)]
pub struct DynamicWeightEngine {
    config: WeightingConfig,
}

impl DynamicWeightEngine {
    pub fn new(config: WeightingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WeightingConfig {
        &self.config
    }

    /// Runs the base load, rules 1 to 7 as a fold, then normalization.
    pub fn compute(
        &self,
        scores: &[DimensionScore],
        context_score: f64,
        archetype: Archetype,
        is_kmu: bool,
    ) -> WeightOutcome {
        let (base, base_source) = tables::base_weights(archetype, is_kmu);
        let input = RuleInput {
            scores,
            context_score,
            archetype,
            config: &self.config,
        };

        let (adjusted, mut trail) = rules::PIPELINE.iter().fold(
            (base, Vec::with_capacity(WeightingRule::ordered().len())),
            |(weights, mut trail), (rule, apply)| {
                let next = apply(weights, &input);
                let application = RuleApplication::between(*rule, &weights, &next);
                if !application.adjusted.is_empty() {
                    debug!(
                        rule = rule.number(),
                        label = rule.label(),
                        adjusted = ?application.adjusted,
                        "weighting rule applied"
                    );
                }
                trail.push(application);
                (next, trail)
            },
        );

        let normalized = rules::normalize(adjusted, &self.config);
        trail.push(RuleApplication::between(
            WeightingRule::Normalization,
            &adjusted,
            &normalized.weights,
        ));

        WeightOutcome {
            weights: normalized.weights,
            base_source,
            rounding_residual: normalized.residual,
            rounding_anomaly: normalized.anomaly,
            trail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn largest_prefers_earliest_on_ties() {
        let weights = DimensionWeights::new([0.1, 0.2, 0.2, 0.1, 0.1, 0.1, 0.1, 0.1]);
        assert_eq!(weights.largest(), DimensionId::D2);
    }

    #[test]
    fn serializes_as_dimension_map() {
        let weights = DimensionWeights::new([0.125; 8]);
        let value = serde_json::to_value(weights).expect("weights serialize");
        assert_eq!(value["D1"], 0.125);
        assert_eq!(value.as_object().map(|map| map.len()), Some(8));
    }

    #[test]
    fn rule_labels_are_numbered_in_order() {
        for (position, rule) in WeightingRule::ordered().into_iter().enumerate() {
            assert_eq!(rule.number() as usize, position + 1);
            assert!(rule.label().starts_with(&format!("Rule {}", position + 1)));
        }
    }
}
