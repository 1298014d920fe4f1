//! Synthetic emotion samples, used whenever live classification is
//! unavailable or the feed has degraded.

use std::collections::BTreeMap;

use rand::Rng;

use crate::emotion::models::{ConfidenceMetrics, EmotionSample};

const EMOTIONS: [&str; 7] = [
    "happy",
    "neutral",
    "surprised",
    "sad",
    "angry",
    "fearful",
    "disgusted",
];

const POSITIVE_EMOTIONS: [&str; 3] = ["happy", "neutral", "surprised"];

/// Produces a plausible sample biased toward composed expressions: 70% of
/// the time the primary emotion is positive, its intensity dominates, and
/// the confidence score lands in the 6-10 band.
pub fn simulated_sample() -> EmotionSample {
    let mut rng = rand::thread_rng();

    let primary = if rng.gen_bool(0.7) {
        POSITIVE_EMOTIONS[rng.gen_range(0..POSITIVE_EMOTIONS.len())]
    } else {
        EMOTIONS[rng.gen_range(0..EMOTIONS.len())]
    };

    let mut expressions = BTreeMap::new();
    for emotion in EMOTIONS {
        let intensity = if emotion == primary {
            rng.gen_range(0.5..=1.0)
        } else {
            rng.gen_range(0.0..0.3)
        };
        expressions.insert(emotion.to_string(), intensity);
    }

    let confidence_score = (rng.gen_range(6.0..=10.0_f64) * 10.0).round() / 10.0;

    EmotionSample {
        timestamp: chrono::Utc::now().timestamp_millis(),
        expressions,
        confidence_metrics: ConfidenceMetrics {
            confidence_score,
            primary_emotion: primary.to_string(),
        },
    }
}
