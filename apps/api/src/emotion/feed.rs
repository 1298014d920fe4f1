//! The per-process emotion feed: live classification while the service
//! cooperates, permanent simulation after repeated failures.

use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::AbortHandle;
use tracing::{info, warn};

use crate::emotion::models::{normalize_expressions, EmotionSample};
use crate::emotion::simulate::simulated_sample;

/// Consecutive live failures tolerated before the feed degrades for the
/// rest of the process lifetime.
const MAX_CONSECUTIVE_FAILURES: u32 = 3;

const SERVICE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    Live,
    Simulated,
}

struct FeedState {
    mode: FeedMode,
    consecutive_failures: u32,
    /// Bumped once per `next_sample` call; the slot below belongs to the
    /// request that observed the current value.
    generation: u64,
    in_flight: Option<AbortHandle>,
}

/// One sample as handed to clients, annotated with how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct FeedSample {
    #[serde(flatten)]
    pub sample: EmotionSample,
    pub mode: FeedMode,
    pub simulated: bool,
    /// Set exactly once, on the request that tips the feed into
    /// simulation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub struct EmotionFeed {
    client: reqwest::Client,
    base_url: String,
    state: Mutex<FeedState>,
}

impl EmotionFeed {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(SERVICE_TIMEOUT)
            .build()
            .expect("failed to build emotion service client");
        Self {
            client,
            base_url,
            state: Mutex::new(FeedState {
                mode: FeedMode::Live,
                consecutive_failures: 0,
                generation: 0,
                in_flight: None,
            }),
        }
    }

    pub fn mode(&self) -> FeedMode {
        self.state.lock().mode
    }

    /// Produces the next sample. A new request aborts any still-running
    /// predecessor so stale frames never land after fresher ones.
    pub async fn next_sample(&self, image_base64: Option<&str>) -> FeedSample {
        let (generation, image) = {
            let mut state = self.state.lock();
            if let Some(previous) = state.in_flight.take() {
                previous.abort();
            }
            state.generation += 1;
            let image = match (state.mode, image_base64) {
                (FeedMode::Live, Some(image)) => Some(image.to_string()),
                _ => None,
            };
            (state.generation, image)
        };
        let Some(image) = image else {
            return self.simulated(None);
        };

        let client = self.client.clone();
        let url = format!("{}/analyze-emotion", self.base_url);
        let handle = tokio::spawn(live_request(client, url, image));
        {
            let mut state = self.state.lock();
            if state.generation == generation {
                state.in_flight = Some(handle.abort_handle());
            }
        }

        match handle.await {
            Ok(Ok(sample)) => {
                self.finish_live(generation);
                FeedSample {
                    sample,
                    mode: FeedMode::Live,
                    simulated: false,
                    notice: None,
                }
            }
            Ok(Err(e)) => {
                warn!("live emotion request failed: {e}");
                let notice = self.record_failure();
                self.simulated(notice)
            }
            // Aborted by a newer request; not evidence the service is
            // unhealthy, so the failure counter is untouched.
            Err(_) => self.simulated(None),
        }
    }

    /// Success path cleanup. The slot is cleared only if it still belongs
    /// to this request; a newer request may have stored its own handle.
    fn finish_live(&self, generation: u64) {
        let mut state = self.state.lock();
        state.consecutive_failures = 0;
        if state.generation == generation {
            state.in_flight = None;
        }
    }

    /// Counts a live failure; returns the degradation notice if this one
    /// crossed the threshold. Leaves the in-flight slot alone: aborting a
    /// finished task is a no-op, and the slot may already be a newer
    /// request's.
    fn record_failure(&self) -> Option<String> {
        let mut state = self.state.lock();
        if state.mode == FeedMode::Simulated {
            return None;
        }
        state.consecutive_failures += 1;
        if state.consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
            state.mode = FeedMode::Simulated;
            info!(
                failures = state.consecutive_failures,
                "emotion feed degraded to simulation"
            );
            Some("Emotion tracking switched to simulation mode".to_string())
        } else {
            None
        }
    }

    fn simulated(&self, notice: Option<String>) -> FeedSample {
        FeedSample {
            sample: simulated_sample(),
            mode: self.mode(),
            simulated: true,
            notice,
        }
    }
}

#[derive(Serialize)]
struct AnalyzeBody<'a> {
    #[serde(rename = "imageData")]
    image_data: &'a str,
}

async fn live_request(
    client: reqwest::Client,
    url: String,
    image_base64: String,
) -> Result<EmotionSample, anyhow::Error> {
    let body = AnalyzeBody {
        image_data: &image_base64,
    };
    let response = client.post(&url).json(&body).send().await?;
    if !response.status().is_success() {
        anyhow::bail!("emotion service returned {}", response.status());
    }
    let mut sample: EmotionSample = response.json().await?;
    normalize_expressions(&mut sample.expressions);
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> EmotionFeed {
        EmotionFeed::new("http://localhost:9".to_string())
    }

    #[test]
    fn test_feed_starts_live() {
        assert_eq!(feed().mode(), FeedMode::Live);
    }

    #[test]
    fn test_third_failure_degrades_with_notice() {
        let feed = feed();
        assert!(feed.record_failure().is_none());
        assert!(feed.record_failure().is_none());
        let notice = feed.record_failure();
        assert_eq!(
            notice.as_deref(),
            Some("Emotion tracking switched to simulation mode")
        );
        assert_eq!(feed.mode(), FeedMode::Simulated);
    }

    #[test]
    fn test_notice_emitted_only_once() {
        let feed = feed();
        for _ in 0..3 {
            feed.record_failure();
        }
        assert!(feed.record_failure().is_none());
        assert_eq!(feed.mode(), FeedMode::Simulated);
    }

    #[tokio::test]
    async fn test_no_image_yields_simulated_sample() {
        let feed = feed();
        let sample = feed.next_sample(None).await;
        assert!(sample.simulated);
        assert_eq!(sample.mode, FeedMode::Live);
        assert_eq!(feed.mode(), FeedMode::Live);
    }

    #[tokio::test]
    async fn test_degraded_feed_ignores_images() {
        let feed = feed();
        for _ in 0..3 {
            feed.record_failure();
        }
        let sample = feed.next_sample(Some("aGVsbG8=")).await;
        assert!(sample.simulated);
        assert_eq!(sample.mode, FeedMode::Simulated);
    }

    #[tokio::test]
    async fn test_completed_request_only_clears_its_own_handle() {
        let feed = feed();
        let newer = tokio::spawn(std::future::pending::<()>());
        {
            let mut state = feed.state.lock();
            state.generation = 2;
            state.in_flight = Some(newer.abort_handle());
        }
        // An older request finishing must not drop the newer handle.
        feed.finish_live(1);
        assert!(feed.state.lock().in_flight.is_some());
        feed.finish_live(2);
        assert!(feed.state.lock().in_flight.is_none());
        newer.abort();
    }

    #[tokio::test]
    async fn test_unreachable_service_counts_failures() {
        let feed = feed();
        for _ in 0..3 {
            let sample = feed.next_sample(Some("aGVsbG8=")).await;
            assert!(sample.simulated);
        }
        assert_eq!(feed.mode(), FeedMode::Simulated);
    }

    #[test]
    fn test_feed_sample_wire_shape() {
        let sample = FeedSample {
            sample: simulated_sample(),
            mode: FeedMode::Simulated,
            simulated: true,
            notice: Some("Emotion tracking switched to simulation mode".to_string()),
        };
        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["mode"], "simulated");
        assert_eq!(value["simulated"], true);
        assert!(value.get("expressions").is_some());
        assert!(value.get("confidenceMetrics").is_some());
    }
}
