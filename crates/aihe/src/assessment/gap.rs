use super::domain::{round_to, PriorityLevel, SCALE_MAX};
use serde::{Deserialize, Serialize};

/// Gap between current and target maturity, rounded for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapMeasure {
    pub gap: f64,
    pub gap_percent: f64,
}

/// Gap plus the priority it implies for the rated item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub gap: f64,
    pub gap_percent: f64,
    pub priority: PriorityLevel,
}

/// Stateless gap and priority classification.
pub struct GapAnalyzer;

impl GapAnalyzer {
    /// `gap` to one decimal, `gap_percent` of the 4.0 scale to two decimals.
    pub fn gap(ist_value: f64, soll_value: f64) -> GapMeasure {
        let gap = round_to((ist_value - soll_value).abs(), 1);
        GapMeasure {
            gap,
            gap_percent: round_to(gap / SCALE_MAX * 100.0, 2),
        }
    }

    /// First matching branch wins.
    pub fn priority(ist_value: f64, gap: f64) -> PriorityLevel {
        if ist_value < 2.0 && gap > 1.5 {
            PriorityLevel::Critical
        } else if ist_value < 2.5 && gap > 1.0 {
            PriorityLevel::High
        } else if gap > 1.5 {
            PriorityLevel::High
        } else if gap > 0.8 {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        }
    }

    pub fn analyze(ist_value: f64, soll_value: f64) -> GapAnalysis {
        let GapMeasure { gap, gap_percent } = Self::gap(ist_value, soll_value);
        GapAnalysis {
            gap,
            gap_percent,
            priority: Self::priority(ist_value, gap),
        }
    }
}
