//! Adaptive item selection.
//!
//! Given a session, the tester either yields the next item to present or
//! signals termination. Selection runs four stages in order: emergency
//! recovery for uncovered dimensions, the per-dimension coverage floor,
//! uncertainty-driven selection, and the termination predicate. The tester
//! recomputes everything from the session on every call, so a revised
//! answer transparently reopens selection for its dimension.

use arcana_core::{AdaptiveConfig, Dimension, Error, Item, ItemId, ItemPool, Result, Session};
use std::sync::Arc;

/// Outcome of a selection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Present this item next.
    Next(ItemId),
    /// The session is complete; it has been frozen.
    Terminate,
}

/// Adaptive next-item selector over a shared read-only pool.
pub struct AdaptiveTester {
    pool: Arc<ItemPool>,
    config: AdaptiveConfig,
}

impl AdaptiveTester {
    pub fn new(pool: Arc<ItemPool>, config: AdaptiveConfig) -> Self {
        Self { pool, config }
    }

    pub fn pool(&self) -> &ItemPool {
        &self.pool
    }

    /// Select the next item for the session, or terminate it.
    ///
    /// Proposed items are marked pending on the session and are not
    /// proposed again until answered or cleared. On termination the
    /// session is frozen.
    pub fn select_next(&self, session: &mut Session) -> Result<Selection> {
        let answered = session.answered_count();

        // Stage 1: emergency recovery. A dimension with zero answered items
        // past the warmup forbids termination and preempts everything else.
        let uncovered: Vec<Dimension> = Dimension::ALL
            .into_iter()
            .filter(|d| session.answered_in_dimension(&self.pool, *d) == 0)
            .collect();

        if !uncovered.is_empty() && answered >= self.config.warmup_items {
            return self.emergency_pick(session, &uncovered);
        }

        // Stage 4a: item cap. Zero-coverage recovery above outranks the cap,
        // though the default floor and cap make that combination unreachable.
        if answered >= self.config.max_items && uncovered.is_empty() {
            tracing::info!(answered, "item cap reached, terminating");
            session.freeze();
            return Ok(Selection::Terminate);
        }

        // Stage 2: coverage floor.
        let mut under_floor: Vec<(usize, Dimension)> = Dimension::ALL
            .into_iter()
            .map(|d| (session.answered_in_dimension(&self.pool, d), d))
            .filter(|(count, _)| *count < self.config.min_per_dimension)
            .collect();

        if !under_floor.is_empty() {
            // Least-covered first; ties break by dimension code.
            under_floor.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.code().cmp(b.1.code())));
            for (_, dimension) in under_floor {
                if let Some(item) = self.best_unanswered(session, dimension) {
                    let id = item.id.clone();
                    tracing::debug!(%id, %dimension, "coverage floor pick");
                    session.mark_pending(id.clone());
                    return Ok(Selection::Next(id));
                }
            }
            return Err(Error::NoItemsRemaining);
        }

        // Stage 3: uncertainty-driven selection.
        let mut uncertain: Vec<(f64, Dimension)> = Dimension::ALL
            .into_iter()
            .map(|d| (self.uncertainty(session, d), d))
            .filter(|(se, _)| *se > self.config.uncertainty_threshold)
            .collect();

        if uncertain.is_empty() {
            tracing::info!(answered, "all dimensions settled, terminating");
            session.freeze();
            return Ok(Selection::Terminate);
        }

        uncertain.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.code().cmp(b.1.code()))
        });

        for (se, dimension) in uncertain {
            if let Some(item) = self.best_unanswered(session, dimension) {
                let id = item.id.clone();
                tracing::debug!(%id, %dimension, standard_error = se, "uncertainty pick");
                session.mark_pending(id.clone());
                return Ok(Selection::Next(id));
            }
        }

        // Dimensions remain unsettled but their items are exhausted.
        Err(Error::NoItemsRemaining)
    }

    /// Emergency pick for dimensions with zero coverage, cycling among them
    /// in a stable order as answers land.
    fn emergency_pick(&self, session: &mut Session, uncovered: &[Dimension]) -> Result<Selection> {
        let mut ordered: Vec<Dimension> = uncovered.to_vec();
        ordered.sort_by(|a, b| a.code().cmp(b.code()));

        let start = session.answered_count() % ordered.len();
        for offset in 0..ordered.len() {
            let dimension = ordered[(start + offset) % ordered.len()];
            if let Some(item) = self.best_unanswered(session, dimension) {
                let id = item.id.clone();
                tracing::warn!(%id, %dimension, "emergency recovery pick for uncovered dimension");
                session.mark_pending(id.clone());
                return Ok(Selection::Next(id));
            }
        }
        Err(Error::NoItemsRemaining)
    }

    /// Highest-correlation item of the dimension that is neither answered
    /// nor pending.
    fn best_unanswered(&self, session: &Session, dimension: Dimension) -> Option<&Item> {
        self.pool
            .items_by_dimension(dimension)
            .iter()
            .filter(|item| !session.is_answered(&item.id) && !session.is_pending(&item.id))
            .max_by(|a, b| {
                a.correlation
                    .partial_cmp(&b.correlation)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Uncertainty proxy for a dimension: the standard error of the
    /// correlation-weighted mean of unit-normalized answered values, with
    /// effective sample size `(Σw)² / Σw²`. A single answered item reports
    /// maximal uncertainty.
    pub fn uncertainty(&self, session: &Session, dimension: Dimension) -> f64 {
        let mut values: Vec<(f64, f64)> = Vec::new();
        for item in self.pool.items_by_dimension(dimension) {
            if let Some(response) = session.response(&item.id) {
                if !response.unsure {
                    values.push((item.correlation, response.normalized(item.reversed)));
                }
            }
        }

        if values.len() < 2 {
            return 1.0;
        }

        let mut weight_sum = 0.0;
        let mut weight_sq_sum = 0.0;
        for (w, _) in &values {
            weight_sum += w;
            weight_sq_sum += w * w;
        }
        if weight_sum <= 0.0 {
            return 1.0;
        }

        let mean = values.iter().map(|(w, n)| w * n).sum::<f64>() / weight_sum;
        let variance = values
            .iter()
            .map(|(w, n)| w * (n - mean).powi(2))
            .sum::<f64>()
            / weight_sum;
        let effective_n = weight_sum * weight_sum / weight_sq_sum;

        (variance / effective_n).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_core::Session;

    fn tester() -> AdaptiveTester {
        AdaptiveTester::new(
            Arc::new(ItemPool::bundled_self().unwrap()),
            AdaptiveConfig::default(),
        )
    }

    fn answer(tester: &AdaptiveTester, session: &mut Session, id: &ItemId, value: u8) {
        session
            .submit(tester.pool(), id.clone(), value, 1000, false)
            .unwrap();
    }

    /// Answer two items per dimension for every dimension in `dims`.
    fn cover(tester: &AdaptiveTester, session: &mut Session, dims: &[Dimension], value: u8) {
        for &dim in dims {
            let ids: Vec<ItemId> = tester.pool().items_by_dimension(dim)[..2]
                .iter()
                .map(|i| i.id.clone())
                .collect();
            for id in ids {
                answer(tester, session, &id, value);
            }
        }
    }

    #[test]
    fn test_never_proposes_answered_item() {
        let tester = tester();
        let mut session = Session::new();

        for _ in 0..30 {
            match tester.select_next(&mut session).unwrap() {
                Selection::Next(id) => {
                    assert!(!session.is_answered(&id), "re-proposed answered item {id}");
                    answer(&tester, &mut session, &id, 3);
                }
                Selection::Terminate => break,
            }
        }
    }

    #[test]
    fn test_pending_item_not_reproposed() {
        let tester = tester();
        let mut session = Session::new();

        let first = match tester.select_next(&mut session).unwrap() {
            Selection::Next(id) => id,
            Selection::Terminate => panic!("terminated on empty session"),
        };
        let second = match tester.select_next(&mut session).unwrap() {
            Selection::Next(id) => id,
            Selection::Terminate => panic!("terminated on empty session"),
        };
        assert_ne!(first, second);
    }

    #[test]
    fn test_uncovered_dimension_forces_emergency_pick() {
        let tester = tester();
        let mut session = Session::new();

        // Two straight answers to every dimension except UMBRA.
        let covered: Vec<Dimension> = Dimension::ALL
            .into_iter()
            .filter(|d| *d != Dimension::Umbra)
            .collect();
        cover(&tester, &mut session, &covered, 3);

        // Scoring before UMBRA is answered fails.
        let err = crate::scorer::score_self(&session, tester.pool()).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionUncovered { dimension: Dimension::Umbra }
        ));

        // Selection must return the highest-correlation UMBRA item.
        match tester.select_next(&mut session).unwrap() {
            Selection::Next(id) => {
                let item = tester.pool().item(&id).unwrap();
                assert_eq!(item.dimension, Dimension::Umbra);
                let best = tester
                    .pool()
                    .items_by_dimension(Dimension::Umbra)
                    .iter()
                    .map(|i| i.correlation)
                    .fold(f64::MIN, f64::max);
                assert!((item.correlation - best).abs() < 1e-12);
            }
            Selection::Terminate => panic!("termination is forbidden with an uncovered dimension"),
        }
    }

    #[test]
    fn test_coverage_floor_before_uncertainty() {
        let tester = tester();
        let mut session = Session::new();

        // One answer in every dimension: all covered, all under the floor.
        for dim in Dimension::ALL {
            let id = tester.pool().items_by_dimension(dim)[0].id.clone();
            answer(&tester, &mut session, &id, 3);
        }

        match tester.select_next(&mut session).unwrap() {
            Selection::Next(id) => {
                // Least-covered ties break by code: AETHER comes first.
                let item = tester.pool().item(&id).unwrap();
                assert_eq!(item.dimension, Dimension::Aether);
            }
            Selection::Terminate => panic!("floor unmet, must not terminate"),
        }
    }

    #[test]
    fn test_termination_requires_floor_and_settled_uncertainty() {
        let tester = tester();
        let mut session = Session::new();

        // Identical answers produce zero variance, so every dimension
        // settles once the floor is met.
        cover(&tester, &mut session, &Dimension::ALL, 3);

        match tester.select_next(&mut session).unwrap() {
            Selection::Terminate => {
                assert!(session.is_frozen());
                for dim in Dimension::ALL {
                    assert!(
                        session.answered_in_dimension(tester.pool(), dim)
                            >= AdaptiveConfig::default().min_per_dimension
                    );
                    assert!(
                        tester.uncertainty(&session, dim)
                            <= AdaptiveConfig::default().uncertainty_threshold
                    );
                }
            }
            Selection::Next(id) => panic!("expected termination, got {id}"),
        }
    }

    #[test]
    fn test_disagreement_keeps_dimension_in_play() {
        let tester = tester();
        let mut session = Session::new();

        cover(&tester, &mut session, &Dimension::ALL, 3);

        // Revise the two LUMEN answers to opposite extremes: the weighted
        // standard error rises above threshold and selection reopens.
        let lumen: Vec<ItemId> = tester.pool().items_by_dimension(Dimension::Lumen)[..2]
            .iter()
            .map(|i| i.id.clone())
            .collect();
        answer(&tester, &mut session, &lumen[0], 5);
        answer(&tester, &mut session, &lumen[1], 1);

        assert!(
            tester.uncertainty(&session, Dimension::Lumen)
                > AdaptiveConfig::default().uncertainty_threshold
        );
        match tester.select_next(&mut session).unwrap() {
            Selection::Next(id) => {
                assert_eq!(tester.pool().item(&id).unwrap().dimension, Dimension::Lumen);
            }
            Selection::Terminate => panic!("unsettled dimension must not terminate"),
        }
    }

    #[test]
    fn test_item_cap_terminates() {
        let pool = Arc::new(ItemPool::bundled_self().unwrap());
        let config = AdaptiveConfig {
            max_items: 16,
            ..AdaptiveConfig::default()
        };
        let tester = AdaptiveTester::new(pool, config);
        let mut session = Session::new();

        // Alternating extremes keep uncertainty high so only the cap stops
        // the loop.
        let mut flip = false;
        loop {
            match tester.select_next(&mut session).unwrap() {
                Selection::Next(id) => {
                    flip = !flip;
                    answer(&tester, &mut session, &id, if flip { 5 } else { 1 });
                }
                Selection::Terminate => break,
            }
            assert!(session.answered_count() <= 16);
        }
        assert_eq!(session.answered_count(), 16);
        assert!(session.is_frozen());
    }

    #[test]
    fn test_exhausted_pool_fails() {
        // A pool with a single item per dimension cannot satisfy the
        // default floor of two.
        let json = r#"{
            "LUMEN": [{"item": "l_01", "text": "l", "reversed": false, "correlation": 1.0}],
            "VESPER": [{"item": "v_01", "text": "v", "reversed": false, "correlation": 1.0}],
            "AETHER": [{"item": "a_01", "text": "a", "reversed": false, "correlation": 1.0}],
            "ORPHEUS": [{"item": "o_01", "text": "o", "reversed": false, "correlation": 1.0}],
            "CHRONOS": [{"item": "c_01", "text": "c", "reversed": false, "correlation": 1.0}],
            "TERRA": [{"item": "t_01", "text": "t", "reversed": false, "correlation": 1.0}],
            "IGNIS": [{"item": "i_01", "text": "i", "reversed": false, "correlation": 1.0}],
            "UMBRA": [{"item": "u_01", "text": "u", "reversed": false, "correlation": 1.0}]
        }"#;
        let tester = AdaptiveTester::new(
            Arc::new(ItemPool::from_snapshot(json).unwrap()),
            AdaptiveConfig::default(),
        );
        let mut session = Session::new();

        loop {
            match tester.select_next(&mut session) {
                Ok(Selection::Next(id)) => answer(&tester, &mut session, &id, 3),
                Ok(Selection::Terminate) => panic!("floor cannot be met with one item each"),
                Err(Error::NoItemsRemaining) => break,
                Err(e) => panic!("unexpected error {e}"),
            }
        }
    }
}
