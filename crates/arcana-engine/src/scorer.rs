//! Dimensional scoring of a completed self-report session.

use arcana_core::{Dimension, DimensionScores, Error, ItemPool, Result, Session};

/// Map a session's response record to a score in [0, 100] per dimension.
///
/// Each answered item contributes its reverse-keyed, unit-normalized value
/// weighted by the item's correlation. Deterministic and invariant under
/// submission order. Fails with [`Error::DimensionUncovered`] if any
/// dimension has no answered items.
pub fn score_self(session: &Session, pool: &ItemPool) -> Result<DimensionScores> {
    let mut scores = DimensionScores::new();

    for dimension in Dimension::ALL {
        scores.set(dimension, score_dimension(session, pool, dimension)?);
    }

    tracing::debug!(session = ?session.id, "self scores computed");
    Ok(scores)
}

/// Score a single dimension. Exposed for the adaptive tester's provisional
/// scoring pass.
pub fn score_dimension(
    session: &Session,
    pool: &ItemPool,
    dimension: Dimension,
) -> Result<f64> {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for item in pool.items_by_dimension(dimension) {
        let Some(response) = session.response(&item.id) else {
            continue;
        };
        if response.unsure {
            continue;
        }
        let weight = item.correlation;
        weighted_sum += weight * response.normalized(item.reversed);
        weight_total += weight;
    }

    if weight_total <= 0.0 {
        return Err(Error::DimensionUncovered { dimension });
    }

    Ok(100.0 * weighted_sum / weight_total)
}
