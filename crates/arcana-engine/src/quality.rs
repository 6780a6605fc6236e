//! Friend-response quality scoring.
//!
//! A friend's completed response record is condensed to a 0-100 quality
//! score built from four banded sub-scores (response time, reverse-key
//! consistency, unsure ratio, and answer variance), then mapped to a weight
//! class consumed by score fusion.

use arcana_core::{Error, ItemPool, Result, Session};
use serde::{Deserialize, Serialize};

const TIME_WEIGHT: f64 = 0.30;
const CONSISTENCY_WEIGHT: f64 = 0.30;
const UNSURE_WEIGHT: f64 = 0.15;
const VARIANCE_WEIGHT: f64 = 0.25;

/// One friend response annotated with its item's polarity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityResponse {
    pub value: u8,
    pub unsure: bool,
    pub latency_ms: u64,
    pub reversed: bool,
}

/// Per-component sub-scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityBreakdown {
    pub time: f64,
    pub consistency: f64,
    pub unsure_ratio: f64,
    pub variance: f64,
}

/// Weight class applied to a friend's observations during fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightClass {
    High,
    Medium,
    Low,
}

impl WeightClass {
    /// Tier partition: >= 70 high, >= 50 medium, below low.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            WeightClass::High
        } else if score >= 50.0 {
            WeightClass::Medium
        } else {
            WeightClass::Low
        }
    }

    /// Fusion weight for this class.
    pub fn weight(&self) -> f64 {
        match self {
            WeightClass::High => 1.0,
            WeightClass::Medium => 0.5,
            WeightClass::Low => 0.1,
        }
    }
}

/// Quality scoring result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Final score in [0, 100], rounded to two decimals.
    pub score: f64,
    pub class: WeightClass,
    pub breakdown: QualityBreakdown,
}

/// Score a friend's response record.
///
/// Fails with [`Error::InsufficientResponses`] on an empty record.
pub fn score_quality(responses: &[QualityResponse]) -> Result<QualityReport> {
    if responses.is_empty() {
        return Err(Error::InsufficientResponses);
    }

    let breakdown = QualityBreakdown {
        time: time_score(responses),
        consistency: consistency_score(responses),
        unsure_ratio: unsure_score(responses),
        variance: variance_score(responses),
    };

    let raw = 100.0
        * (TIME_WEIGHT * breakdown.time
            + CONSISTENCY_WEIGHT * breakdown.consistency
            + UNSURE_WEIGHT * breakdown.unsure_ratio
            + VARIANCE_WEIGHT * breakdown.variance);
    let score = (raw * 100.0).round() / 100.0;
    let class = WeightClass::from_score(score);

    tracing::debug!(score, ?class, "friend quality scored");
    Ok(QualityReport {
        score,
        class,
        breakdown,
    })
}

/// Build quality rows from a friend session against the friend pool.
/// Responses to items missing from the pool are skipped.
pub fn quality_rows(session: &Session, pool: &ItemPool) -> Vec<QualityResponse> {
    session
        .answer_history()
        .iter()
        .filter_map(|id| {
            let response = session.response(id)?;
            let item = pool.item(id)?;
            Some(QualityResponse {
                value: response.value,
                unsure: response.unsure,
                latency_ms: response.latency_ms,
                reversed: item.reversed,
            })
        })
        .collect()
}

/// Median response latency banded into [0, 1]. Very fast answering reads
/// as inattentive.
fn time_score(responses: &[QualityResponse]) -> f64 {
    let mut latencies: Vec<u64> = responses.iter().map(|r| r.latency_ms).collect();
    latencies.sort_unstable();
    let mid = latencies.len() / 2;
    let median = if latencies.len() % 2 == 0 {
        (latencies[mid - 1] + latencies[mid]) as f64 / 2.0
    } else {
        latencies[mid] as f64
    };

    if median < 2_000.0 {
        0.0
    } else if median < 3_000.0 {
        0.2
    } else if median < 4_000.0 {
        0.5
    } else if median < 6_000.0 {
        0.8
    } else {
        1.0
    }
}

/// Agreement between reverse-keyed items (after inversion) and normal
/// items. With fewer than two usable items of either class there is no
/// evidence either way and the sub-score is neutral (0.7).
fn consistency_score(responses: &[QualityResponse]) -> f64 {
    let usable = responses.iter().filter(|r| !r.unsure);
    let mut normal: Vec<f64> = Vec::new();
    let mut inverted: Vec<f64> = Vec::new();
    for r in usable {
        if r.reversed {
            inverted.push(6.0 - r.value as f64);
        } else {
            normal.push(r.value as f64);
        }
    }

    if normal.len() < 2 || inverted.len() < 2 {
        return 0.7;
    }

    let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;
    let diff = (mean(&inverted) - mean(&normal)).abs();

    if diff < 0.5 {
        1.0
    } else if diff < 1.0 {
        0.8
    } else if diff < 1.5 {
        0.6
    } else {
        0.3
    }
}

/// Fraction of items marked unsure. A modest unsure rate signals honest
/// reporting; none at all is suspicious, too many is uninformative.
fn unsure_score(responses: &[QualityResponse]) -> f64 {
    let p = responses.iter().filter(|r| r.unsure).count() as f64 / responses.len() as f64;

    if (0.10..=0.30).contains(&p) {
        1.0
    } else if p < 0.10 {
        0.7
    } else if p > 0.50 {
        0.3
    } else {
        0.5
    }
}

/// Sample variance of non-unsure values banded into [0, 1]. Flat answer
/// patterns read as straightlining.
fn variance_score(responses: &[QualityResponse]) -> f64 {
    let values: Vec<f64> = responses
        .iter()
        .filter(|r| !r.unsure)
        .map(|r| r.value as f64)
        .collect();
    if values.len() < 2 {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    if variance < 0.3 {
        0.0
    } else if variance < 0.5 {
        0.2
    } else if variance < 1.0 {
        0.6
    } else {
        1.0
    }
}
