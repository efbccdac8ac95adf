use super::domain::{round_to, DimensionId, DimensionScore, SubdimensionScore};
use std::collections::BTreeMap;

/// Subdimensions expected per dimension.
pub const SUBDIMENSIONS_PER_DIMENSION: usize = 2;

/// Subdimension ratings expected per assessment.
pub const EXPECTED_SUBDIMENSIONS: usize = DimensionId::COUNT * SUBDIMENSIONS_PER_DIMENSION;

/// Input contract violations raised before any metric is computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error("expected {expected} subdimension scores, found {found}")]
    SubdimensionCount { expected: usize, found: usize },
    #[error("subdimension id '{0}' is not of the form D<1-8>.<1-2>")]
    InvalidSubdimensionId(String),
    #[error("subdimension '{0}' was supplied more than once")]
    DuplicateSubdimension(String),
    #[error("dimension {dimension} needs {expected} subdimension scores, found {found}")]
    IncompleteDimension {
        dimension: DimensionId,
        expected: usize,
        found: usize,
    },
}

/// Splits `"D{n}.{k}"` into its dimension and child index.
pub fn parse_subdimension_id(raw: &str) -> Result<(DimensionId, u8), CalculationError> {
    let invalid = || CalculationError::InvalidSubdimensionId(raw.to_string());
    let (dimension, child) = raw.trim().split_once('.').ok_or_else(invalid)?;
    let dimension = DimensionId::from_code(dimension).ok_or_else(invalid)?;
    let child = child.parse::<u8>().map_err(|_| invalid())?;
    if !(1..=SUBDIMENSIONS_PER_DIMENSION as u8).contains(&child) {
        return Err(invalid());
    }
    Ok((dimension, child))
}

/// Collapses sixteen subdimension ratings into eight dimension scores in D1..D8
/// order, each ist/soll being the mean of its two children rounded to one decimal.
pub fn aggregate_subdimensions(
    scores: &[SubdimensionScore],
) -> Result<Vec<DimensionScore>, CalculationError> {
    if scores.len() != EXPECTED_SUBDIMENSIONS {
        return Err(CalculationError::SubdimensionCount {
            expected: EXPECTED_SUBDIMENSIONS,
            found: scores.len(),
        });
    }

    let mut grouped: BTreeMap<DimensionId, BTreeMap<u8, &SubdimensionScore>> = BTreeMap::new();
    for score in scores {
        let (dimension, child) = parse_subdimension_id(&score.subdimension_id)?;
        let children = grouped.entry(dimension).or_default();
        if children.insert(child, score).is_some() {
            return Err(CalculationError::DuplicateSubdimension(
                score.subdimension_id.clone(),
            ));
        }
    }

    DimensionId::ordered()
        .into_iter()
        .map(|dimension| {
            let children = grouped.get(&dimension);
            let found = children.map_or(0, BTreeMap::len);
            match children {
                Some(children) if found == SUBDIMENSIONS_PER_DIMENSION => {
                    let count = found as f64;
                    let ist = children.values().map(|score| score.ist_value).sum::<f64>() / count;
                    let soll = children.values().map(|score| score.soll_value).sum::<f64>() / count;
                    Ok(DimensionScore::new(
                        dimension,
                        round_to(ist, 1),
                        round_to(soll, 1),
                    ))
                }
                _ => Err(CalculationError::IncompleteDimension {
                    dimension,
                    expected: SUBDIMENSIONS_PER_DIMENSION,
                    found,
                }),
            }
        })
        .collect()
}
