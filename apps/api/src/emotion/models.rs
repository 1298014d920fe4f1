use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One webcam-derived sample: expression intensities in [0, 1] plus the
/// derived confidence metrics. Collected as an append-only sequence per
/// question, owned by the client session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionSample {
    /// Milliseconds since the epoch.
    pub timestamp: i64,
    pub expressions: BTreeMap<String, f64>,
    #[serde(rename = "confidenceMetrics")]
    pub confidence_metrics: ConfidenceMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceMetrics {
    /// 0-10 scalar derived from the expression classification.
    #[serde(rename = "confidenceScore")]
    pub confidence_score: f64,
    #[serde(rename = "primaryEmotion")]
    pub primary_emotion: String,
}

/// Percentage-scale classifier outputs are tolerated: any intensity above
/// 1 is divided by 100.
pub fn normalize_expressions(expressions: &mut BTreeMap<String, f64>) {
    for value in expressions.values_mut() {
        if *value > 1.0 {
            *value /= 100.0;
        }
    }
}

/// Arithmetic mean of per-sample confidence scores; 0 when there are no
/// samples.
pub fn mean_confidence(samples: &[EmotionSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples
        .iter()
        .map(|s| s.confidence_metrics.confidence_score)
        .sum::<f64>()
        / samples.len() as f64
}
