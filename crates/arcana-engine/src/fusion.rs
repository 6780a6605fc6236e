//! Fusion of self scores with weighted friend observations.

use arcana_core::{Dimension, DimensionScores};

/// Blend friend score vectors into the self scores.
///
/// Per dimension this is a weighted mean with the self contribution fixed
/// at weight 1.0 and each friend at its class weight. A friend vector
/// missing a dimension simply does not contribute there. With zero total
/// friend weight the self score passes through unchanged. The result is
/// stable under reordering of the friend set.
pub fn fuse(self_scores: &DimensionScores, friends: &[(DimensionScores, f64)]) -> DimensionScores {
    let mut fused = DimensionScores::new();

    for dimension in Dimension::ALL {
        let Some(own) = self_scores.get(dimension) else {
            continue;
        };

        let mut numerator = own;
        let mut denominator = 1.0;
        for (scores, weight) in friends {
            if *weight <= 0.0 {
                continue;
            }
            if let Some(score) = scores.get(dimension) {
                numerator += weight * score;
                denominator += weight;
            }
        }

        fused.set(dimension, numerator / denominator);
    }

    fused
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_friends_passes_through() {
        let own = DimensionScores::uniform(62.0);
        let fused = fuse(&own, &[]);
        assert_eq!(fused, own);
    }

    #[test]
    fn test_zero_weight_passes_through() {
        let own = DimensionScores::uniform(62.0);
        let friend = DimensionScores::uniform(10.0);
        let fused = fuse(&own, &[(friend, 0.0)]);
        assert_eq!(fused, own);
    }

    #[test]
    fn test_weighted_mean() {
        let own = DimensionScores::uniform(80.0);
        let friend = DimensionScores::uniform(40.0);

        // (1.0 * 80 + 1.0 * 40) / 2.0 = 60
        let fused = fuse(&own, &[(friend.clone(), 1.0)]);
        assert!((fused.get(Dimension::Lumen).unwrap() - 60.0).abs() < 1e-9);

        // (1.0 * 80 + 0.1 * 40) / 1.1 ≈ 76.36
        let fused = fuse(&own, &[(friend, 0.1)]);
        assert!((fused.get(Dimension::Lumen).unwrap() - 84.0 / 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_order_stability() {
        let own = DimensionScores::uniform(50.0);
        let a = DimensionScores::uniform(90.0);
        let b = DimensionScores::uniform(20.0);

        let forward = fuse(&own, &[(a.clone(), 1.0), (b.clone(), 0.5)]);
        let backward = fuse(&own, &[(b, 0.5), (a, 1.0)]);
        for dim in Dimension::ALL {
            assert!((forward.get(dim).unwrap() - backward.get(dim).unwrap()).abs() < 1e-9);
        }
    }
}
