use crate::infra::load_json;
use aihe::assessment::{
    AssessmentInput, CalculationOrchestrator, CalculationResult, ContextFactor, ContextFactorKind,
    DimensionId, SubdimensionScore,
};
use aihe::config::AppConfig;
use aihe::error::AppError;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Assessment JSON with subdimension_scores, context_factors, archetype, is_kmu
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Pretty-print the JSON result
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Archetype code used for the sample organisation
    #[arg(long, default_value = "BALANCED_TRANSFORMER")]
    pub(crate) archetype: String,
    /// Treat the sample organisation as a small or medium enterprise
    #[arg(long)]
    pub(crate) kmu: bool,
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let input: AssessmentInput = load_json(&args.input)?;
    let result = CalculationOrchestrator::new(config.weighting).calculate(&input)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let input = sample_assessment(args.archetype, args.kmu);
    let result = CalculationOrchestrator::new(config.weighting).calculate(&input)?;

    println!("AIHE maturity demo");
    print!("{}", render_report(&result));
    Ok(())
}

/// Mid-sized manufacturer with strong technology and lagging culture and processes.
fn sample_assessment(archetype: String, is_kmu: bool) -> AssessmentInput {
    let ratings: [(f64, f64, f64, f64); 8] = [
        (2.0, 3.0, 2.5, 3.5),
        (3.0, 3.0, 2.5, 3.5),
        (1.5, 3.0, 2.0, 3.0),
        (1.0, 3.5, 2.0, 3.5),
        (2.0, 3.0, 2.5, 3.0),
        (3.5, 3.0, 4.0, 3.5),
        (1.0, 3.0, 1.5, 3.0),
        (2.0, 3.5, 2.0, 3.5),
    ];

    let subdimension_scores = DimensionId::ordered()
        .into_iter()
        .zip(ratings)
        .flat_map(|(dimension, (ist_a, soll_a, ist_b, soll_b))| {
            [
                SubdimensionScore::new(format!("{dimension}.1"), ist_a, soll_a),
                SubdimensionScore::new(format!("{dimension}.2"), ist_b, soll_b),
            ]
        })
        .collect();

    let context_factors = [2, 2, 3, 2, 1, 2, 2, 1]
        .into_iter()
        .zip(ContextFactorKind::ordered())
        .map(|(value, kind)| ContextFactor::of(kind, value))
        .collect();

    AssessmentInput {
        subdimension_scores,
        context_factors,
        archetype,
        is_kmu,
    }
}

fn render_report(result: &CalculationResult) -> String {
    let metadata = &result.metadata;
    let metrics = &result.core_metrics;
    let mut lines = vec![
        format!(
            "Archetype: {} ({}){}",
            metadata.resolved_archetype.label(),
            metadata.base_weight_source.label(),
            if metadata.is_kmu { " | KMU" } else { "" }
        ),
        format!(
            "EQI {:.3} | RGI {:.3} | SI {:.3} | SBS {:.3} | context {:.3}",
            metrics.eqi, metrics.rgi, metrics.si, metrics.sbs, metrics.context_score
        ),
        format!(
            "Average ist {:.2} -> soll {:.2} (total gap {:.1})",
            metadata.average_ist_value, metadata.average_soll_value, metadata.total_gap
        ),
        "Dimensions:".to_string(),
    ];

    for analysis in &result.dimension_analysis {
        lines.push(format!(
            "  - {} {}: {:.1} -> {:.1} | gap {:.1} ({:.0}%) | {} | weight {:.3}",
            analysis.dimension_id,
            analysis.dimension_label,
            analysis.ist_value,
            analysis.soll_value,
            analysis.gap,
            analysis.gap_percent,
            analysis.priority_label,
            analysis.dynamic_weight
        ));
    }

    let summary = &result.recommendation_summary;
    if result.recommendations.is_empty() {
        lines.push("Recommendations: none, every dimension is on track".to_string());
    } else {
        lines.push(format!(
            "Recommendations ({} critical, {} high):",
            summary.critical_count, summary.high_count
        ));
        for recommendation in &result.recommendations {
            lines.push(format!(
                "  - [{}] {}",
                recommendation.priority.label(),
                recommendation.description
            ));
        }
    }

    let active: Vec<_> = result
        .weighting_trail
        .iter()
        .filter(|entry| !entry.adjusted.is_empty())
        .map(|entry| entry.label)
        .collect();
    lines.push(format!("Weighting rules that moved weights: {}", active.len()));
    for label in active {
        lines.push(format!("  - {label}"));
    }

    if metadata.rounding_anomaly {
        lines.push(format!(
            "Warning: weight rounding residual {:.4}",
            metadata.rounding_residual
        ));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}
