use super::super::domain::{round_to, settle, Archetype, DimensionId, DimensionScore, EQUAL_WEIGHT};
use super::super::metrics::TENSION_PAIRS;
use super::config::WeightingConfig;
use super::tables::archetype_factors;
use super::{DimensionWeights, WeightingRule};
use tracing::warn;

pub(crate) struct RuleInput<'a> {
    pub scores: &'a [DimensionScore],
    pub context_score: f64,
    pub archetype: Archetype,
    pub config: &'a WeightingConfig,
}

impl RuleInput<'_> {
    fn score(&self, dimension: DimensionId) -> Option<&DimensionScore> {
        self.scores
            .iter()
            .find(|score| score.dimension_id == dimension)
    }

    /// First score per dimension in D1..D8 order; repeated ids count once.
    fn distinct_scores(&self) -> impl Iterator<Item = &DimensionScore> + '_ {
        DimensionId::ordered()
            .into_iter()
            .filter_map(move |dimension| self.score(dimension))
    }
}

pub(crate) type RuleFn = fn(DimensionWeights, &RuleInput<'_>) -> DimensionWeights;

/// Rules 1 to 7 in application order. Later rules see the product of earlier ones.
pub(crate) const PIPELINE: [(WeightingRule, RuleFn); 7] = [
    (WeightingRule::TightGaps, tight_gaps),
    (WeightingRule::LargeGaps, large_gaps),
    (WeightingRule::TechCultureTension, tech_culture_tension),
    (WeightingRule::ContextComplexity, context_complexity),
    (WeightingRule::AboveAverageDampening, above_average_dampening),
    (WeightingRule::ArchetypeFactors, apply_archetype_factors),
    (WeightingRule::MinimumFloor, minimum_floor),
];

fn tight_gaps(weights: DimensionWeights, input: &RuleInput<'_>) -> DimensionWeights {
    input
        .distinct_scores()
        .filter(|score| score.gap() <= input.config.gap_threshold)
        .fold(weights, |weights, score| {
            weights.scale(score.dimension_id, input.config.gap_multiplier)
        })
}

fn large_gaps(weights: DimensionWeights, input: &RuleInput<'_>) -> DimensionWeights {
    input
        .distinct_scores()
        .filter(|score| score.gap() > input.config.gap_threshold)
        .fold(weights, |weights, score| {
            weights.scale(score.dimension_id, input.config.gap_multiplier)
        })
}

fn tech_culture_tension(weights: DimensionWeights, input: &RuleInput<'_>) -> DimensionWeights {
    let (Some(technology), Some(culture)) = (
        input.score(DimensionId::D6),
        input.score(DimensionId::D3),
    ) else {
        return weights;
    };

    let technology_gap = technology.signed_gap();
    let culture_gap = culture.signed_gap();
    let tension = settle(technology_gap - culture_gap);
    if tension.abs() <= input.config.tension_threshold {
        return weights;
    }

    let (trailing, leading) = if culture_gap < technology_gap {
        (DimensionId::D3, DimensionId::D6)
    } else {
        (DimensionId::D6, DimensionId::D3)
    };

    weights
        .scale(trailing, input.config.trailing_tension_multiplier)
        .scale(leading, input.config.leading_tension_multiplier)
}

fn context_complexity(weights: DimensionWeights, input: &RuleInput<'_>) -> DimensionWeights {
    let config = input.config;
    if input.context_score < config.low_context_threshold {
        weights.scale(DimensionId::D7, config.context_multiplier)
    } else if input.context_score > config.high_context_threshold {
        weights
            .scale(DimensionId::D1, config.context_multiplier)
            .scale(DimensionId::D2, config.context_multiplier)
    } else {
        weights
    }
}

fn above_average_dampening(weights: DimensionWeights, input: &RuleInput<'_>) -> DimensionWeights {
    let config = input.config;
    input
        .distinct_scores()
        .filter(|score| {
            score.ist_value > config.dampening_ist_threshold
                && score.ist_value >= score.soll_value
                && !in_critical_tension(score.dimension_id, input)
        })
        .fold(weights, |weights, score| {
            weights.scale(score.dimension_id, config.dampening_multiplier)
        })
}

/// True when any tension pair containing `dimension` exceeds the tension threshold.
pub(crate) fn in_critical_tension(dimension: DimensionId, input: &RuleInput<'_>) -> bool {
    TENSION_PAIRS
        .iter()
        .filter(|(a, b)| *a == dimension || *b == dimension)
        .any(|(a, b)| match (input.score(*a), input.score(*b)) {
            (Some(first), Some(second)) => {
                settle(first.signed_gap() - second.signed_gap()).abs()
                    > input.config.tension_threshold
            }
            _ => false,
        })
}

fn apply_archetype_factors(weights: DimensionWeights, input: &RuleInput<'_>) -> DimensionWeights {
    let factors = archetype_factors(input.archetype);
    weights.map(|dimension, weight| weight * factors[dimension])
}

fn minimum_floor(weights: DimensionWeights, input: &RuleInput<'_>) -> DimensionWeights {
    let minimum = input.config.minimum_weight;
    weights.map(|_, weight| weight.max(minimum))
}

pub(crate) struct Normalized {
    pub weights: DimensionWeights,
    pub residual: f64,
    pub anomaly: bool,
}

/// Rule 8: scale to a unit sum, round to three decimals, and push the rounding
/// residual onto the heaviest dimension.
pub(crate) fn normalize(weights: DimensionWeights, config: &WeightingConfig) -> Normalized {
    let total = weights.sum();
    let scaled = if total > 0.0 && total.is_finite() {
        weights.map(|_, weight| weight / total)
    } else {
        warn!(total, "weight sum not positive; falling back to equal weights");
        DimensionWeights::new([EQUAL_WEIGHT; 8])
    };

    let rounded = scaled.map(|_, weight| round_to(weight, 3));
    let residual = settle(1.0 - rounded.sum());
    let anomaly = residual.abs() > config.residual_warning_threshold;
    if anomaly {
        warn!(residual, "rounding residual exceeds tolerance while normalizing weights");
    }

    let weights = if residual.abs() > config.residual_correction_threshold {
        let largest = rounded.largest();
        rounded.with(largest, round_to(rounded[largest] + residual, 3))
    } else {
        rounded
    };

    Normalized {
        weights,
        residual,
        anomaly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: [(f64, f64); 8]) -> Vec<DimensionScore> {
        DimensionId::ordered()
            .into_iter()
            .zip(pairs)
            .map(|(dimension, (ist, soll))| DimensionScore::new(dimension, ist, soll))
            .collect()
    }

    fn input<'a>(
        scores: &'a [DimensionScore],
        context_score: f64,
        config: &'a WeightingConfig,
    ) -> RuleInput<'a> {
        RuleInput {
            scores,
            context_score,
            archetype: Archetype::BalancedTransformer,
            config,
        }
    }

    fn equal() -> DimensionWeights {
        DimensionWeights::new([0.125; 8])
    }

    #[test]
    fn gap_rules_partition_dimensions_and_scale_uniformly() {
        let config = WeightingConfig::default();
        let scores = scores([
            (1.0, 4.0),
            (2.0, 2.5),
            (3.0, 3.0),
            (1.5, 3.5),
            (2.0, 2.0),
            (2.0, 3.5),
            (2.5, 3.0),
            (3.5, 1.5),
        ]);
        let input = input(&scores, 0.5, &config);

        let after_tight = tight_gaps(equal(), &input);
        assert_eq!(after_tight[DimensionId::D1], 0.125);
        assert_eq!(after_tight[DimensionId::D6], 0.125 * 1.2);

        let after_both = large_gaps(after_tight, &input);
        assert!(after_both
            .values()
            .iter()
            .all(|weight| (*weight - 0.15).abs() < 1e-12));
    }

    #[test]
    fn tension_boosts_the_trailing_dimension_most() {
        let config = WeightingConfig::default();
        let mut pairs = [(2.5, 2.5); 8];
        // D3 culture far behind, D6 technology ahead of target: tension 3.5
        pairs[2] = (1.0, 3.5);
        pairs[5] = (4.0, 3.0);
        let scores = scores(pairs);

        let weights = tech_culture_tension(equal(), &input(&scores, 0.5, &config));

        assert!((weights[DimensionId::D3] - 0.125 * 1.3).abs() < 1e-12);
        assert!((weights[DimensionId::D6] - 0.125 * 1.1).abs() < 1e-12);
        assert_eq!(weights[DimensionId::D1], 0.125);
    }

    #[test]
    fn tension_boosts_technology_when_it_trails() {
        let config = WeightingConfig::default();
        let mut pairs = [(2.5, 2.5); 8];
        // D6 technology far behind, D3 culture far ahead: tension -6.0
        pairs[2] = (4.0, 1.0);
        pairs[5] = (1.0, 4.0);
        let scores = scores(pairs);

        let weights = tech_culture_tension(equal(), &input(&scores, 0.5, &config));

        assert!((weights[DimensionId::D6] - 0.125 * 1.3).abs() < 1e-12);
        assert!((weights[DimensionId::D3] - 0.125 * 1.1).abs() < 1e-12);
        assert_eq!(weights[DimensionId::D1], 0.125);
    }

    #[test]
    fn tension_at_threshold_is_ignored() {
        let config = WeightingConfig::default();
        let mut pairs = [(2.5, 2.5); 8];
        pairs[2] = (1.0, 3.0);
        pairs[5] = (4.0, 3.0);
        let scores = scores(pairs);

        let weights = tech_culture_tension(equal(), &input(&scores, 0.5, &config));
        assert_eq!(weights, equal());
    }

    #[test]
    fn context_complexity_targets_processes_or_leadership() {
        let config = WeightingConfig::default();
        let scores = scores([(2.5, 2.5); 8]);

        let simple = context_complexity(equal(), &input(&scores, 0.1, &config));
        assert!((simple[DimensionId::D7] - 0.15).abs() < 1e-12);
        assert_eq!(simple[DimensionId::D1], 0.125);

        let complex = context_complexity(equal(), &input(&scores, 0.9, &config));
        assert!((complex[DimensionId::D1] - 0.15).abs() < 1e-12);
        assert!((complex[DimensionId::D2] - 0.15).abs() < 1e-12);
        assert_eq!(complex[DimensionId::D7], 0.125);

        let neutral = context_complexity(equal(), &input(&scores, 0.5, &config));
        assert_eq!(neutral, equal());
    }

    #[test]
    fn dampening_skips_dimensions_in_critical_tension() {
        let config = WeightingConfig::default();
        let mut pairs = [(2.5, 2.5); 8];
        // D5 strong and above target, no strong tension partner
        pairs[4] = (3.8, 3.5);
        // D6 strong but paired with a far-behind D3: tension 0.5 - (-3.0) = 3.5
        pairs[5] = (4.0, 3.5);
        pairs[2] = (1.0, 4.0);
        let scores = scores(pairs);
        let input = input(&scores, 0.5, &config);

        assert!(in_critical_tension(DimensionId::D6, &input));
        assert!(!in_critical_tension(DimensionId::D5, &input));

        let weights = above_average_dampening(equal(), &input);
        assert!((weights[DimensionId::D5] - 0.1).abs() < 1e-12);
        assert_eq!(weights[DimensionId::D6], 0.125);
    }

    #[test]
    fn minimum_floor_raises_tiny_weights() {
        let config = WeightingConfig::default();
        let scores = scores([(2.5, 2.5); 8]);
        let weights = DimensionWeights::new([0.005, 0.2, 0.3, 0.095, 0.1, 0.1, 0.1, 0.1]);

        let floored = minimum_floor(weights, &input(&scores, 0.5, &config));
        assert_eq!(floored[DimensionId::D1], 0.01);
        assert_eq!(floored[DimensionId::D2], 0.2);
    }

    #[test]
    fn normalize_corrects_residual_on_largest_weight() {
        let config = WeightingConfig::default();
        // Thirds round to 0.333 each, leaving 0.001 for the largest.
        let weights = DimensionWeights::new([1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        let normalized = normalize(weights, &config);

        assert_eq!(normalized.residual, 0.001);
        assert!(!normalized.anomaly);
        assert_eq!(normalized.weights[DimensionId::D1], 0.334);
        assert_eq!(normalized.weights[DimensionId::D2], 0.333);
        assert!((normalized.weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_flags_residual_beyond_tolerance() {
        let config = WeightingConfig::default();
        let weights = DimensionWeights::new([
            0.1234, 0.1234, 0.1234, 0.1234, 0.1234, 0.1234, 0.1234, 0.1362,
        ]);

        let normalized = normalize(weights, &config);

        assert_eq!(normalized.residual, 0.003);
        assert!(normalized.anomaly);
        assert_eq!(normalized.weights[DimensionId::D8], 0.139);
        assert_eq!(normalized.weights[DimensionId::D1], 0.123);
        assert!((normalized.weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_dimension_ids_are_scaled_once() {
        let config = WeightingConfig::default();
        let mut repeated = scores([(2.5, 2.5); 8]);
        repeated.push(DimensionScore::new(DimensionId::D1, 2.5, 2.5));
        repeated.push(DimensionScore::new(DimensionId::D1, 2.5, 2.5));
        repeated.push(DimensionScore::new(DimensionId::D5, 3.8, 3.0));
        repeated[4] = DimensionScore::new(DimensionId::D5, 3.8, 3.0);
        let input = input(&repeated, 0.5, &config);

        let tight = tight_gaps(equal(), &input);
        assert!((tight[DimensionId::D1] - 0.15).abs() < 1e-12);

        let dampened = above_average_dampening(equal(), &input);
        assert!((dampened[DimensionId::D5] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn normalize_falls_back_to_equal_weights_for_empty_sum() {
        let config = WeightingConfig::default();
        let normalized = normalize(DimensionWeights::new([0.0; 8]), &config);
        assert_eq!(normalized.weights, DimensionWeights::new([0.125; 8]));
        assert_eq!(normalized.residual, 0.0);
    }
}
