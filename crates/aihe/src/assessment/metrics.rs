//! Composite indices over the eight weighted dimension scores.
//!
//! Every index lands in `[0, 1]` and is rounded to three decimals. A score set that
//! does not hold exactly one entry per dimension yields `0.0` for the index instead
//! of an error.

use super::domain::{round_to, DimensionId, DimensionScore, MAX_GAP, SCALE_MAX};
use serde::{Deserialize, Serialize};

/// Known organisational tensions compared by the tension index and rule 5.
pub const TENSION_PAIRS: [(DimensionId, DimensionId); 12] = [
    (DimensionId::D6, DimensionId::D3), // technology vs culture
    (DimensionId::D1, DimensionId::D6), // governance vs innovation
    (DimensionId::D2, DimensionId::D4), // strategy vs competencies
    (DimensionId::D5, DimensionId::D7), // data vs processes
    (DimensionId::D1, DimensionId::D8), // ethics vs impact
    (DimensionId::D3, DimensionId::D4), // culture vs competencies
    (DimensionId::D2, DimensionId::D1), // strategy vs governance
    (DimensionId::D6, DimensionId::D5), // technology vs data
    (DimensionId::D7, DimensionId::D8), // processes vs impact
    (DimensionId::D3, DimensionId::D1), // innovation vs governance
    (DimensionId::D4, DimensionId::D6), // competencies vs technology
    (DimensionId::D2, DimensionId::D7), // alignment vs execution
];

/// Theoretical maximum of the summed, weighted pair tension.
const MAX_TENSION: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreMetrics {
    pub eqi: f64,
    pub rgi: f64,
    pub si: f64,
    pub sbs: f64,
    pub context_score: f64,
}

pub struct MetricsEngine;

impl MetricsEngine {
    pub fn compute(scores: &[DimensionScore], context_score: f64) -> CoreMetrics {
        let eqi = Self::eqi(scores);
        let rgi = Self::rgi(scores);
        let si = Self::si(scores);
        CoreMetrics {
            eqi,
            rgi,
            si,
            sbs: Self::sbs(eqi, si, rgi),
            context_score: round_to(context_score, 3),
        }
    }

    /// Equilibrium Quality Index: 1.0 when every dimension meets its target.
    pub fn eqi(scores: &[DimensionScore]) -> f64 {
        if !is_complete(scores) {
            return 0.0;
        }

        let total_gap: f64 = scores.iter().map(DimensionScore::gap).sum();
        let max_total = DimensionId::COUNT as f64 * MAX_GAP;
        round_to(1.0 - (total_gap / max_total).min(1.0), 3)
    }

    /// Maturity index: weighted mean of current ratings over the scale ceiling.
    pub fn rgi(scores: &[DimensionScore]) -> f64 {
        if !is_complete(scores) {
            return 0.0;
        }

        let weighted: f64 = scores
            .iter()
            .map(|score| score.ist_value * score.dynamic_weight)
            .sum();
        round_to((weighted / SCALE_MAX).clamp(0.0, 1.0), 3)
    }

    /// Tension index: current-state divergence across the tension pairs,
    /// scaled by each pair's mean dynamic weight.
    pub fn si(scores: &[DimensionScore]) -> f64 {
        if !is_complete(scores) {
            return 0.0;
        }

        let lookup = |dimension: DimensionId| {
            scores
                .iter()
                .find(|score| score.dimension_id == dimension)
        };

        let total: f64 = TENSION_PAIRS
            .iter()
            .filter_map(|(a, b)| Some((lookup(*a)?, lookup(*b)?)))
            .map(|(first, second)| {
                let divergence = (first.ist_value - second.ist_value).abs();
                let pair_weight = (first.dynamic_weight + second.dynamic_weight) / 2.0;
                divergence * pair_weight
            })
            .sum();

        round_to((total / MAX_TENSION).clamp(0.0, 1.0), 3)
    }

    /// System Balance Score combining equilibrium, inverse tension, and maturity.
    pub fn sbs(eqi: f64, si: f64, rgi: f64) -> f64 {
        round_to(((eqi + (1.0 - si) + rgi) / 3.0).clamp(0.0, 1.0), 3)
    }
}

fn is_complete(scores: &[DimensionScore]) -> bool {
    scores.len() == DimensionId::COUNT
        && DimensionId::ordered()
            .into_iter()
            .all(|dimension| scores.iter().any(|score| score.dimension_id == dimension))
}
