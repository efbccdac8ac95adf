use super::domain::{DimensionId, DimensionScore, PriorityLevel};
use super::gap::GapAnalyzer;
use serde::{Deserialize, Serialize};

/// Action item for a dimension whose gap warrants attention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub dimension_id: DimensionId,
    pub dimension_label: String,
    pub priority: PriorityLevel,
    pub gap: f64,
    pub gap_percent: f64,
    pub ist_value: f64,
    pub soll_value: f64,
    pub description: String,
}

/// Per-priority counts over a recommendation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub total_recommendations: usize,
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
}

pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Critical and high priority dimensions, most urgent and then largest gap first.
    pub fn generate(scores: &[DimensionScore]) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = scores
            .iter()
            .filter_map(|score| {
                let analysis = GapAnalyzer::analyze(score.ist_value, score.soll_value);
                analysis.priority.is_actionable().then(|| Recommendation {
                    dimension_id: score.dimension_id,
                    dimension_label: score.dimension_id.label().to_string(),
                    priority: analysis.priority,
                    gap: analysis.gap,
                    gap_percent: analysis.gap_percent,
                    ist_value: score.ist_value,
                    soll_value: score.soll_value,
                    description: describe(score, analysis.priority, analysis.gap),
                })
            })
            .collect();

        recommendations.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then_with(|| b.gap.total_cmp(&a.gap))
        });
        recommendations
    }

    pub fn summarize(recommendations: &[Recommendation]) -> RecommendationSummary {
        recommendations.iter().fold(
            RecommendationSummary {
                total_recommendations: recommendations.len(),
                ..RecommendationSummary::default()
            },
            |mut summary, recommendation| {
                match recommendation.priority {
                    PriorityLevel::Critical => summary.critical_count += 1,
                    PriorityLevel::High => summary.high_count += 1,
                    PriorityLevel::Medium => summary.medium_count += 1,
                    PriorityLevel::Low => summary.low_count += 1,
                }
                summary
            },
        )
    }
}

fn describe(score: &DimensionScore, priority: PriorityLevel, gap: f64) -> String {
    let dimension = score.dimension_id;
    match priority {
        PriorityLevel::Critical => format!(
            "{} ({dimension}) is critically behind: raise maturity from {:.1} toward {:.1} (gap {gap:.1})",
            dimension.label(),
            score.ist_value,
            score.soll_value
        ),
        _ => format!(
            "{} ({dimension}) needs attention: close the {gap:.1} point gap between {:.1} and {:.1}",
            dimension.label(),
            score.ist_value,
            score.soll_value
        ),
    }
}
