//! Placeholder quality evaluation.
//!
//! Scoring is an external concern; the pipeline only forwards
//! `quality_scores` maps attached to examples. This evaluator returns fixed
//! metric values so downstream consumers have a report shape to build
//! against.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::models::Dataset;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityMetric {
    Relevance,
    Coherence,
    Toxicity,
    Bias,
    Diversity,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QualityReport {
    pub id: Uuid,
    pub target_id: Uuid,
    pub overall_score: f64,
    pub passed: bool,
    pub metric_scores: BTreeMap<QualityMetric, f64>,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct QualityEvaluator;

impl QualityEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, dataset: &Dataset) -> QualityReport {
        info!(
            dataset = dataset.name(),
            examples = dataset.total_examples(),
            "evaluating dataset"
        );

        let metric_scores = BTreeMap::from([
            (QualityMetric::Relevance, 0.95),
            (QualityMetric::Coherence, 0.92),
            (QualityMetric::Toxicity, 0.01),
            (QualityMetric::Bias, 0.02),
            (QualityMetric::Diversity, 0.88),
        ]);

        let overall_score =
            metric_scores.values().sum::<f64>() / metric_scores.len() as f64;
        let passed = overall_score > 0.85 && metric_scores[&QualityMetric::Toxicity] < 0.05;

        QualityReport {
            id: Uuid::new_v4(),
            target_id: dataset.id(),
            overall_score,
            passed,
            metric_scores,
            issues: if passed {
                Vec::new()
            } else {
                vec!["Low coherence".to_string(), "High toxicity".to_string()]
            },
            warnings: if passed {
                Vec::new()
            } else {
                vec!["Review bias and diversity".to_string()]
            },
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_targets_the_dataset() {
        let dataset = Dataset::new("d", "", Vec::new());
        let report = QualityEvaluator::new().evaluate(&dataset);
        assert_eq!(report.target_id, dataset.id());
        assert_eq!(report.metric_scores.len(), 5);
        // Overall score averages all five metrics, toxicity included, so the
        // fixed placeholder values land below the pass threshold.
        assert!((report.overall_score - 0.556).abs() < 1e-9);
        assert!(!report.passed);
        assert!(!report.issues.is_empty());
    }
}
