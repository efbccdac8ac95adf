use super::super::domain::Archetype;
use super::DimensionWeights;
use serde::Serialize;

/// Where the starting weights of a calculation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseWeightSource {
    Archetype,
    Kmu,
    Equal,
}

impl BaseWeightSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Archetype => "archetype base table",
            Self::Kmu => "KMU base table",
            Self::Equal => "equal weights",
        }
    }
}

const EQUAL_BASE: [f64; 8] = [0.125; 8];

// Small and medium enterprises: leaner governance, stronger people and process focus.
const KMU_BASE: [f64; 8] = [0.10, 0.15, 0.15, 0.15, 0.10, 0.10, 0.15, 0.10];

const CHAOTIC_DOER_BASE: [f64; 8] = [0.20, 0.18, 0.10, 0.12, 0.12, 0.08, 0.10, 0.10];
const CAUTIOUS_CORPORATE_BASE: [f64; 8] = [0.15, 0.15, 0.15, 0.15, 0.10, 0.12, 0.08, 0.10];
const STAGNANT_ESTABLISHED_BASE: [f64; 8] = [0.12, 0.18, 0.18, 0.15, 0.10, 0.15, 0.07, 0.05];

const NEUTRAL_FACTORS: [f64; 8] = [1.0; 8];
const CHAOTIC_DOER_FACTORS: [f64; 8] = [1.5, 1.4, 0.9, 1.1, 1.1, 0.7, 1.3, 1.2];
const CAUTIOUS_CORPORATE_FACTORS: [f64; 8] = [0.8, 1.0, 1.5, 1.4, 1.0, 1.3, 1.0, 1.1];
const STAGNANT_ESTABLISHED_FACTORS: [f64; 8] = [1.2, 1.4, 1.3, 1.2, 1.0, 1.2, 1.0, 1.3];

/// Starting weights. Archetypes with their own table win over the KMU flag.
pub(crate) fn base_weights(archetype: Archetype, is_kmu: bool) -> (DimensionWeights, BaseWeightSource) {
    match archetype {
        Archetype::ChaoticDoer => (
            DimensionWeights::new(CHAOTIC_DOER_BASE),
            BaseWeightSource::Archetype,
        ),
        Archetype::CautiousCorporate => (
            DimensionWeights::new(CAUTIOUS_CORPORATE_BASE),
            BaseWeightSource::Archetype,
        ),
        Archetype::StagnantEstablished => (
            DimensionWeights::new(STAGNANT_ESTABLISHED_BASE),
            BaseWeightSource::Archetype,
        ),
        Archetype::BalancedTransformer | Archetype::Unknown if is_kmu => {
            (DimensionWeights::new(KMU_BASE), BaseWeightSource::Kmu)
        }
        Archetype::BalancedTransformer | Archetype::Unknown => {
            (DimensionWeights::new(EQUAL_BASE), BaseWeightSource::Equal)
        }
    }
}

/// Per-dimension multipliers nudging each archetype toward its blind spots.
pub(crate) fn archetype_factors(archetype: Archetype) -> DimensionWeights {
    DimensionWeights::new(match archetype {
        Archetype::ChaoticDoer => CHAOTIC_DOER_FACTORS,
        Archetype::CautiousCorporate => CAUTIOUS_CORPORATE_FACTORS,
        Archetype::StagnantEstablished => STAGNANT_ESTABLISHED_FACTORS,
        Archetype::BalancedTransformer | Archetype::Unknown => NEUTRAL_FACTORS,
    })
}
