use std::fmt::Write;

use serde::Serialize;

use crate::chart;
use crate::error::SyncError;
use crate::models::{Metrics, NormalizedVector, RiskAssessment, StudentRecord};
use crate::risk;
use crate::score::ScoreWeights;
use crate::sync::SyncOutcome;

/// Everything the dashboard shows for one set of metrics.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub metrics: Metrics,
    pub risk: RiskAssessment,
    pub chart: NormalizedVector,
    pub wellbeing_score: u8,
}

impl Dashboard {
    pub fn build(metrics: &Metrics, weights: &ScoreWeights) -> Self {
        Self {
            metrics: *metrics,
            risk: risk::assess(metrics.gpa, metrics.sleep, metrics.stress, metrics.study),
            chart: chart::normalize_for_chart(
                metrics.sleep,
                metrics.study,
                metrics.social,
                metrics.exercise,
            ),
            wellbeing_score: weights.score(metrics),
        }
    }
}

pub fn render_dashboard(student: Option<&str>, dashboard: &Dashboard) -> String {
    let mut output = String::new();
    let metrics = &dashboard.metrics;

    let _ = writeln!(output, "# Student Well-being Dashboard");
    if let Some(student) = student {
        let _ = writeln!(output, "Generated for {student}");
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "## Metrics");
    let _ = writeln!(output, "- GPA: {:.2}", metrics.gpa);
    let _ = writeln!(output, "- Sleep: {:.1} h", metrics.sleep);
    let _ = writeln!(output, "- Stress: {}%", metrics.stress);
    let _ = writeln!(output, "- Study: {:.1} h", metrics.study);
    let _ = writeln!(output, "- Social: {:.1} h", metrics.social);
    let _ = writeln!(output, "- Exercise: {:.1} h", metrics.exercise);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk");
    let _ = writeln!(output, "- Probability: {}%", dashboard.risk.probability);
    let _ = writeln!(output, "- Category: {}", dashboard.risk.category.label());
    let _ = writeln!(
        output,
        "- Suggested action: {}",
        dashboard.risk.recommended_action
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Lifestyle (0-10)");
    for (axis, value) in dashboard.chart.axes() {
        let _ = writeln!(output, "- {}: {:.1}", axis.label(), value);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Wellbeing score: {}%", dashboard.wellbeing_score);

    output
}

pub fn render_sync_result(result: &Result<SyncOutcome, SyncError>) -> String {
    match result {
        Ok(SyncOutcome::Created(record)) => format!(
            "Profile created! Wellbeing score: {}%",
            score_label(record)
        ),
        Ok(SyncOutcome::Updated(record)) => format!(
            "Data saved successfully! Wellbeing score: {}%",
            score_label(record)
        ),
        Err(err) => format!("Could not save to server: {err}"),
    }
}

pub fn render_welcome(record: Option<&StudentRecord>) -> String {
    match record {
        // a zero score is treated as "no score yet"
        Some(record) => match record.wellbeing_score {
            Some(score) if score > 0 => {
                format!("Welcome back! Your last wellbeing score: {score}%")
            }
            _ => format!("Welcome back, {}!", record.name),
        },
        None => "Student not found in database, will create on first data submission".to_string(),
    }
}

fn score_label(record: &StudentRecord) -> String {
    record
        .wellbeing_score
        .map(|score| score.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}
