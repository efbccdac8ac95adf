use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the maturity rating scale.
pub const SCALE_MAX: f64 = 4.0;

/// Largest possible distance between two ratings on the 1.0 to 4.0 scale.
pub const MAX_GAP: f64 = 3.0;

/// Weight every dimension carries before dynamic weighting runs.
pub const EQUAL_WEIGHT: f64 = 0.125;

/// The eight assessment dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DimensionId {
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
}

impl DimensionId {
    pub const COUNT: usize = 8;

    pub const fn ordered() -> [Self; 8] {
        [
            Self::D1,
            Self::D2,
            Self::D3,
            Self::D4,
            Self::D5,
            Self::D6,
            Self::D7,
            Self::D8,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::D1 => 0,
            Self::D2 => 1,
            Self::D3 => 2,
            Self::D4 => 3,
            Self::D5 => 4,
            Self::D6 => 5,
            Self::D7 => 6,
            Self::D8 => 7,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::D1 => "D1",
            Self::D2 => "D2",
            Self::D3 => "D3",
            Self::D4 => "D4",
            Self::D5 => "D5",
            Self::D6 => "D6",
            Self::D7 => "D7",
            Self::D8 => "D8",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::D1 => "Governance & Leadership",
            Self::D2 => "Strategy",
            Self::D3 => "Culture",
            Self::D4 => "Competencies",
            Self::D5 => "Data",
            Self::D6 => "Technology",
            Self::D7 => "Processes",
            Self::D8 => "Impact & Ethics",
        }
    }

    /// Resolves a dimension code such as `"D3"`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|dimension| dimension.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw rating for one of the sixteen subdimensions (`"D{n}.{k}"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdimensionScore {
    pub subdimension_id: String,
    pub ist_value: f64,
    pub soll_value: f64,
}

impl SubdimensionScore {
    pub fn new(subdimension_id: impl Into<String>, ist_value: f64, soll_value: f64) -> Self {
        Self {
            subdimension_id: subdimension_id.into(),
            ist_value,
            soll_value,
        }
    }
}

/// Dimension-level ist/soll pair with the weight assigned by dynamic weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension_id: DimensionId,
    pub ist_value: f64,
    pub soll_value: f64,
    #[serde(default = "equal_weight")]
    pub dynamic_weight: f64,
}

fn equal_weight() -> f64 {
    EQUAL_WEIGHT
}

impl DimensionScore {
    pub fn new(dimension_id: DimensionId, ist_value: f64, soll_value: f64) -> Self {
        Self {
            dimension_id,
            ist_value,
            soll_value,
            dynamic_weight: EQUAL_WEIGHT,
        }
    }

    pub fn with_weight(mut self, dynamic_weight: f64) -> Self {
        self.dynamic_weight = dynamic_weight;
        self
    }

    /// Absolute distance between current and target maturity.
    pub fn gap(&self) -> f64 {
        settle(self.signed_gap().abs())
    }

    /// `ist - soll`; negative when the dimension trails its target.
    pub fn signed_gap(&self) -> f64 {
        settle(self.ist_value - self.soll_value)
    }
}

/// The eight organisational context factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextFactorKind {
    OrganisationSize,
    IndustryDynamics,
    RegulatoryPressure,
    TechnologicalComplexity,
    ChangeHistory,
    MarketDynamics,
    CompetitivePressure,
    ResourceAvailability,
}

impl ContextFactorKind {
    pub const COUNT: usize = 8;

    pub const fn ordered() -> [Self; 8] {
        [
            Self::OrganisationSize,
            Self::IndustryDynamics,
            Self::RegulatoryPressure,
            Self::TechnologicalComplexity,
            Self::ChangeHistory,
            Self::MarketDynamics,
            Self::CompetitivePressure,
            Self::ResourceAvailability,
        ]
    }

    /// Assessment questionnaire label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::OrganisationSize => "Organisationsgröße",
            Self::IndustryDynamics => "Branchendynamik",
            Self::RegulatoryPressure => "Regulatorischer Druck",
            Self::TechnologicalComplexity => "Technologische Komplexität",
            Self::ChangeHistory => "Change-Historie",
            Self::MarketDynamics => "Marktdynamik",
            Self::CompetitivePressure => "Wettbewerbsdruck",
            Self::ResourceAvailability => "Ressourcenverfügbarkeit",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::OrganisationSize => "organisation_size",
            Self::IndustryDynamics => "industry_dynamics",
            Self::RegulatoryPressure => "regulatory_pressure",
            Self::TechnologicalComplexity => "technological_complexity",
            Self::ChangeHistory => "change_history",
            Self::MarketDynamics => "market_dynamics",
            Self::CompetitivePressure => "competitive_pressure",
            Self::ResourceAvailability => "resource_availability",
        }
    }

    /// High availability lowers complexity, so this factor is scored inverted.
    pub const fn is_inverted(self) -> bool {
        matches!(self, Self::ResourceAvailability)
    }

    /// Accepts either the questionnaire label or the snake_case key.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label() == name || kind.key().eq_ignore_ascii_case(name))
    }
}

/// Supplied context factor rated 0 to 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFactor {
    pub factor_name: String,
    pub factor_value: u8,
}

impl ContextFactor {
    pub fn new(factor_name: impl Into<String>, factor_value: u8) -> Self {
        Self {
            factor_name: factor_name.into(),
            factor_value,
        }
    }

    pub fn of(kind: ContextFactorKind, factor_value: u8) -> Self {
        Self::new(kind.label(), factor_value)
    }
}

/// Organisational profile steering base weights and rule 6 factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Archetype {
    ChaoticDoer,
    CautiousCorporate,
    StagnantEstablished,
    BalancedTransformer,
    Unknown,
}

impl Archetype {
    /// Never fails: anything unrecognised resolves to [`Archetype::Unknown`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CHAOTIC_DOER" => Self::ChaoticDoer,
            "CAUTIOUS_CORPORATE" => Self::CautiousCorporate,
            "STAGNANT_ESTABLISHED" => Self::StagnantEstablished,
            "BALANCED_TRANSFORMER" => Self::BalancedTransformer,
            _ => Self::Unknown,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::ChaoticDoer => "CHAOTIC_DOER",
            Self::CautiousCorporate => "CAUTIOUS_CORPORATE",
            Self::StagnantEstablished => "STAGNANT_ESTABLISHED",
            Self::BalancedTransformer => "BALANCED_TRANSFORMER",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ChaoticDoer => "Chaotic Doer",
            Self::CautiousCorporate => "Cautious Corporate",
            Self::StagnantEstablished => "Stagnant Established",
            Self::BalancedTransformer => "Balanced Transformer",
            Self::Unknown => "Unknown (balanced)",
        }
    }

    /// Whether the archetype brings its own base-weight table.
    pub const fn selects_base_weights(self) -> bool {
        matches!(
            self,
            Self::ChaoticDoer | Self::CautiousCorporate | Self::StagnantEstablished
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Sort key: most urgent first.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// Ratings are decimal; drop binary noise before threshold comparisons.
pub(crate) fn settle(value: f64) -> f64 {
    round_to(value, 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archetype_parse_falls_back_to_unknown() {
        assert_eq!(Archetype::parse("chaotic_doer"), Archetype::ChaoticDoer);
        assert_eq!(
            Archetype::parse(" STAGNANT_ESTABLISHED "),
            Archetype::StagnantEstablished
        );
        assert_eq!(Archetype::parse("NOT_A_REAL_TYPE"), Archetype::Unknown);
        assert_eq!(Archetype::parse(""), Archetype::Unknown);
    }

    #[test]
    fn context_factor_names_accept_label_and_key() {
        assert_eq!(
            ContextFactorKind::from_name("Ressourcenverfügbarkeit"),
            Some(ContextFactorKind::ResourceAvailability)
        );
        assert_eq!(
            ContextFactorKind::from_name("market_dynamics"),
            Some(ContextFactorKind::MarketDynamics)
        );
        assert_eq!(ContextFactorKind::from_name("Digitalisierungsgrad"), None);
    }

    #[test]
    fn dimension_gap_ignores_binary_noise() {
        let score = DimensionScore::new(DimensionId::D4, 1.9, 3.4);
        assert_eq!(score.gap(), 1.5);
        assert_eq!(score.signed_gap(), -1.5);
    }

    #[test]
    fn round_to_rounds_half_away_from_zero() {
        assert_eq!(round_to(0.8335, 2), 0.83);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.13);
        assert_eq!(round_to(2.0 / 3.0, 3), 0.667);
    }

    #[test]
    fn dimension_codes_round_trip() {
        for dimension in DimensionId::ordered() {
            assert_eq!(DimensionId::from_code(dimension.code()), Some(dimension));
        }
        assert_eq!(DimensionId::from_code("D9"), None);
    }
}
