//! Bridge to the Python expression classifier. The classifier is a short
//! lived subprocess: one image in via argv, one JSON object out on stdout.

use std::collections::BTreeMap;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::emotion::models::{normalize_expressions, ConfidenceMetrics, EmotionSample};

const CLASSIFIER_SCRIPT: &str = "emotion_analyzer.py";

/// Hard wall-clock bound on one classification; CPU-only inference on a
/// large frame can otherwise hang a request indefinitely.
const CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(20);

/// How long a timed-out classifier gets to exit after SIGTERM before it
/// is killed outright.
const KILL_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier process error: {0}")]
    Io(#[from] std::io::Error),
    #[error("classifier exceeded {0:?}")]
    Timeout(Duration),
    #[error("classifier exited with {status}: {stderr}")]
    NonZeroExit { status: String, stderr: String },
    #[error("classifier output unusable: {0}")]
    Output(String),
}

/// Raw shape the script prints. Every field is optional so a partially
/// working classifier still yields a sample.
#[derive(serde::Deserialize)]
struct ClassifierOutput {
    #[serde(default)]
    emotions: BTreeMap<String, f64>,
    #[serde(default = "default_dominant")]
    dominant_emotion: String,
    #[serde(default = "default_confidence")]
    confidence: f64,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

fn default_dominant() -> String {
    "neutral".to_string()
}

fn default_confidence() -> f64 {
    0.5
}

/// Runs one classification round trip: spawn, feed the base64 frame,
/// collect stdout/stderr, enforce the timeout, decode.
pub async fn classify(image_base64: &str) -> Result<EmotionSample, ClassifierError> {
    let mut child = Command::new("python")
        .arg(CLASSIFIER_SCRIPT)
        .arg("--base64")
        .arg(image_base64)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();

    let collect = async {
        let mut stdout = String::new();
        let mut stderr = String::new();
        if let Some(pipe) = stdout_pipe.as_mut() {
            pipe.read_to_string(&mut stdout).await?;
        }
        if let Some(pipe) = stderr_pipe.as_mut() {
            pipe.read_to_string(&mut stderr).await?;
        }
        let status = child.wait().await?;
        Ok::<_, std::io::Error>((status, stdout, stderr))
    };

    let (status, stdout, stderr) = match tokio::time::timeout(CLASSIFIER_TIMEOUT, collect).await {
        Ok(collected) => collected?,
        Err(_) => {
            terminate(&mut child).await;
            return Err(ClassifierError::Timeout(CLASSIFIER_TIMEOUT));
        }
    };

    if !status.success() {
        return Err(ClassifierError::NonZeroExit {
            status: status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    decode_output(&stdout)
}

/// Graceful-then-forced shutdown: SIGTERM lets the script release the
/// camera and model handles, SIGKILL covers a script that ignores it.
async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        // SAFETY: pid comes from a child we spawned and still own.
        unsafe {
            libc::kill(pid as libc::pid_t, libc::SIGTERM);
        }
        tokio::time::sleep(KILL_GRACE).await;
        if child.try_wait().ok().flatten().is_some() {
            return;
        }
    }
    if let Err(e) = child.start_kill() {
        warn!("failed to kill timed-out classifier: {e}");
    }
}

/// The script may emit warnings before the JSON object; decoding starts
/// at the first `{`.
fn decode_output(stdout: &str) -> Result<EmotionSample, ClassifierError> {
    let start = stdout
        .find('{')
        .ok_or_else(|| ClassifierError::Output("no JSON object on stdout".to_string()))?;
    let raw: ClassifierOutput = serde_json::from_str(&stdout[start..])
        .map_err(|e| ClassifierError::Output(format!("invalid JSON on stdout: {e}")))?;

    if raw.success == Some(false) {
        let message = raw
            .error
            .unwrap_or_else(|| "classifier reported failure".to_string());
        return Err(ClassifierError::Output(message));
    }

    let mut expressions = raw.emotions;
    if expressions.is_empty() {
        expressions.insert("neutral".to_string(), 1.0);
    }
    normalize_expressions(&mut expressions);

    let sample = EmotionSample {
        timestamp: chrono::Utc::now().timestamp_millis(),
        expressions,
        confidence_metrics: ConfidenceMetrics {
            confidence_score: (raw.confidence * 10.0).clamp(0.0, 10.0),
            primary_emotion: raw.dominant_emotion,
        },
    };
    debug!(
        primary = %sample.confidence_metrics.primary_emotion,
        score = sample.confidence_metrics.confidence_score,
        "classifier sample decoded"
    );
    Ok(sample)
}
