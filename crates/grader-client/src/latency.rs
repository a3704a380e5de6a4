//! Latency probes against `POST /grade-answer`.
//!
//! Two modes:
//! - [`GradingClient::measure_latency`]: one warm-up call, then every case of a
//!   dataset in sequence.
//! - [`GradingClient::load_test`]: `n` identical requests in flight at once.

use std::time::Instant;

use grader_core::GradeAnswerRequest;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::{ClientError, GradingClient};

/// Answers to grade against one question, as stored in a JSON dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyDataset {
    pub user_id: String,
    pub question: String,
    pub cases: Vec<LatencyCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyCase {
    pub name: String,
    pub student_response: String,
}

impl LatencyDataset {
    /// # Errors
    ///
    /// Returns [`ClientError::Parse`] if `json` does not describe a dataset.
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        serde_json::from_str(json).map_err(|e| ClientError::Parse(format!("invalid dataset: {e}")))
    }

    fn request_for(&self, case: &LatencyCase) -> GradeAnswerRequest {
        GradeAnswerRequest {
            user_id: self.user_id.clone(),
            question: self.question.clone(),
            student_response: case.student_response.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySample {
    pub name: String,
    pub seconds: f64,
}

/// Sequential latency measurement over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyReport {
    pub samples: Vec<LatencySample>,
    pub mean_seconds: Option<f64>,
    pub max_seconds: Option<f64>,
}

impl LatencyReport {
    fn from_samples(samples: Vec<LatencySample>) -> Self {
        let seconds: Vec<f64> = samples.iter().map(|s| s.seconds).collect();
        Self {
            samples,
            mean_seconds: mean(&seconds),
            max_seconds: max(&seconds),
        }
    }
}

/// Concurrent load measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub requests: usize,
    pub failures: usize,
    pub mean_seconds: Option<f64>,
    pub max_seconds: Option<f64>,
}

impl GradingClient {
    /// Grade every case of `dataset` in order and time each call.
    ///
    /// The first case is sent once beforehand to warm the backend up; the
    /// warm-up outcome is discarded.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] raised by a measured case.
    pub async fn measure_latency(
        &self,
        dataset: &LatencyDataset,
    ) -> Result<LatencyReport, ClientError> {
        if let Some(first) = dataset.cases.first()
            && let Err(error) = self.grade_answer(&dataset.request_for(first)).await
        {
            tracing::warn!(%error, "warm-up grading call failed");
        }

        let mut samples = Vec::with_capacity(dataset.cases.len());
        for case in &dataset.cases {
            let started = Instant::now();
            self.grade_answer(&dataset.request_for(case)).await?;
            let seconds = started.elapsed().as_secs_f64();
            tracing::info!(case = %case.name, seconds, "graded");
            samples.push(LatencySample {
                name: case.name.clone(),
                seconds,
            });
        }

        Ok(LatencyReport::from_samples(samples))
    }

    /// Send `n` copies of `request` concurrently.
    ///
    /// Failed calls are counted, not raised; only successful calls contribute
    /// to the latency figures.
    pub async fn load_test(&self, request: &GradeAnswerRequest, n: usize) -> LoadReport {
        let mut tasks = JoinSet::new();
        for _ in 0..n {
            let client = self.clone();
            let request = request.clone();
            tasks.spawn(async move {
                let started = Instant::now();
                client
                    .grade_answer(&request)
                    .await
                    .map(|_| started.elapsed().as_secs_f64())
            });
        }

        let mut seconds = Vec::with_capacity(n);
        let mut failures = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(elapsed)) => seconds.push(elapsed),
                Ok(Err(error)) => {
                    tracing::warn!(%error, "load test request failed");
                    failures += 1;
                }
                Err(error) => {
                    tracing::warn!(%error, "load test task panicked");
                    failures += 1;
                }
            }
        }

        LoadReport {
            requests: n,
            failures,
            mean_seconds: mean(&seconds),
            max_seconds: max(&seconds),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "user_id": "12345test",
        "question": "Explain what a binary search tree is.",
        "cases": [
            { "name": "good", "student_response": "Left subtree smaller, right larger." },
            { "name": "wrong", "student_response": "A tree with two roots." }
        ]
    }"#;

    #[test]
    fn parse_dataset() {
        let dataset = LatencyDataset::from_json(FIXTURE).unwrap();
        assert_eq!(dataset.user_id, "12345test");
        assert_eq!(dataset.cases.len(), 2);
        assert_eq!(dataset.cases[1].name, "wrong");

        let req = dataset.request_for(&dataset.cases[0]);
        assert_eq!(req.question, "Explain what a binary search tree is.");
        assert_eq!(req.student_response, "Left subtree smaller, right larger.");
    }

    #[test]
    fn dataset_missing_cases_is_parse_error() {
        let err = LatencyDataset::from_json(r#"{ "user_id": "u", "question": "q" }"#).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn report_statistics() {
        let report = LatencyReport::from_samples(vec![
            LatencySample { name: "a".into(), seconds: 1.0 },
            LatencySample { name: "b".into(), seconds: 3.0 },
            LatencySample { name: "c".into(), seconds: 2.0 },
        ]);
        assert_eq!(report.mean_seconds, Some(2.0));
        assert_eq!(report.max_seconds, Some(3.0));
    }

    #[test]
    fn empty_report_has_no_statistics() {
        let report = LatencyReport::from_samples(Vec::new());
        assert!(report.mean_seconds.is_none());
        assert!(report.max_seconds.is_none());
    }
}
