use super::domain::{round_to, ContextFactor, ContextFactorKind};
use std::collections::BTreeMap;
use tracing::debug;

/// Score returned when no context factors were captured.
pub const NEUTRAL_CONTEXT_SCORE: f64 = 0.5;

const DEFAULT_FACTOR_VALUE: u8 = 1;
const MAX_FACTOR_VALUE: u8 = 3;

/// Aggregates the eight context factors into a complexity score in `[0, 1]`.
pub struct ContextScorer;

impl ContextScorer {
    pub fn score(factors: &[ContextFactor]) -> f64 {
        if factors.is_empty() {
            return NEUTRAL_CONTEXT_SCORE;
        }

        let supplied = Self::resolve(factors);
        let total: u32 = ContextFactorKind::ordered()
            .into_iter()
            .map(|kind| {
                let value = supplied
                    .get(&kind)
                    .copied()
                    .unwrap_or(DEFAULT_FACTOR_VALUE);
                let effective = if kind.is_inverted() {
                    MAX_FACTOR_VALUE - value
                } else {
                    value
                };
                u32::from(effective)
            })
            .sum();

        let ceiling = (ContextFactorKind::COUNT as u32 * u32::from(MAX_FACTOR_VALUE)) as f64;
        round_to(f64::from(total) / ceiling, 3)
    }

    fn resolve(factors: &[ContextFactor]) -> BTreeMap<ContextFactorKind, u8> {
        let mut supplied = BTreeMap::new();
        for factor in factors {
            match ContextFactorKind::from_name(&factor.factor_name) {
                Some(kind) => {
                    supplied.insert(kind, factor.factor_value.min(MAX_FACTOR_VALUE));
                }
                None => debug!(factor = %factor.factor_name, "ignoring unrecognised context factor"),
            }
        }
        supplied
    }
}
