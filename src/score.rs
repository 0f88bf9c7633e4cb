//! Composite wellbeing score: six metrics normalized to 0-100 and combined with convex weights.
//!
//! Higher is healthier. This scale is independent of the risk model in `risk`, which treats
//! higher as worse and uses different ideal values for sleep and study.

use anyhow::ensure;

use crate::models::Metrics;

pub const GPA_SCALE: f64 = 4.0;
pub const SLEEP_TARGET_HOURS: f64 = 8.0;
pub const STUDY_TARGET_HOURS: f64 = 6.0;
pub const SOCIAL_TARGET_HOURS: f64 = 3.0;
pub const EXERCISE_TARGET_HOURS: f64 = 2.0;

const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub gpa: f64,
    pub sleep: f64,
    pub stress: f64,
    pub study: f64,
    pub social: f64,
    pub exercise: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            gpa: 0.25,
            sleep: 0.20,
            stress: 0.20,
            study: 0.15,
            social: 0.10,
            exercise: 0.10,
        }
    }
}

impl ScoreWeights {
    /// Builds a custom weighting. Weights must be non-negative and sum to 1.0.
    pub fn new(
        gpa: f64,
        sleep: f64,
        stress: f64,
        study: f64,
        social: f64,
        exercise: f64,
    ) -> anyhow::Result<Self> {
        let weights = Self {
            gpa,
            sleep,
            stress,
            study,
            social,
            exercise,
        };
        ensure!(
            weights.as_array().iter().all(|w| w.is_finite() && *w >= 0.0),
            "score weights must be non-negative"
        );
        ensure!(
            (weights.total() - 1.0).abs() < WEIGHT_TOLERANCE,
            "score weights must sum to 1.0, got {}",
            weights.total()
        );
        Ok(weights)
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    fn as_array(&self) -> [f64; 6] {
        [
            self.gpa,
            self.sleep,
            self.stress,
            self.study,
            self.social,
            self.exercise,
        ]
    }

    pub fn score(&self, metrics: &Metrics) -> u8 {
        let sub = SubScores::from_metrics(metrics);
        let combined = sub.gpa * self.gpa
            + sub.sleep * self.sleep
            + sub.stress * self.stress
            + sub.study * self.study
            + sub.social * self.social
            + sub.exercise * self.exercise;

        combined.round().clamp(0.0, 100.0) as u8
    }
}

/// Per-metric scores on a 0-100 scale, each capped on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub gpa: f64,
    pub sleep: f64,
    pub stress: f64,
    pub study: f64,
    pub social: f64,
    pub exercise: f64,
}

impl SubScores {
    pub fn from_metrics(metrics: &Metrics) -> Self {
        Self {
            gpa: (metrics.gpa / GPA_SCALE) * 100.0,
            sleep: capped_percent(metrics.sleep, SLEEP_TARGET_HOURS),
            stress: 100.0 - metrics.stress,
            study: capped_percent(metrics.study, STUDY_TARGET_HOURS),
            social: capped_percent(metrics.social, SOCIAL_TARGET_HOURS),
            exercise: capped_percent(metrics.exercise, EXERCISE_TARGET_HOURS),
        }
    }
}

fn capped_percent(value: f64, target: f64) -> f64 {
    ((value / target) * 100.0).min(100.0)
}
