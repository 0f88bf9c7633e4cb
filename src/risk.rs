use crate::models::{RiskAssessment, RiskCategory};

pub const BASE_RISK: f64 = 10.0;
pub const GPA_CEILING: f64 = 4.0;
pub const GPA_WEIGHT: f64 = 5.0;
pub const IDEAL_SLEEP_HOURS: f64 = 8.0;
pub const SLEEP_WEIGHT: f64 = 3.0;
pub const STRESS_WEIGHT: f64 = 0.4;
pub const IDEAL_STUDY_HOURS: f64 = 5.0;
pub const STUDY_WEIGHT: f64 = 1.0;

pub const LOW_ACTION: &str = "Keep up the excellent work!";
pub const MEDIUM_ACTION: &str =
    "Consider increasing sleep or reducing stressors. Bi-weekly review suggested.";
pub const HIGH_ACTION: &str =
    "Immediate counseling referral. Focus on stress and sleep management.";

/// Additive penalty model: base risk plus deviations from the ideal values, clamped to 0..=100.
pub fn calculate_risk(gpa: f64, sleep: f64, stress: f64, study: f64) -> u8 {
    let gpa_risk = (GPA_CEILING - gpa) * GPA_WEIGHT;
    let sleep_risk = (sleep - IDEAL_SLEEP_HOURS).abs() * SLEEP_WEIGHT;
    let stress_risk = stress * STRESS_WEIGHT;
    let study_risk = (study - IDEAL_STUDY_HOURS).abs() * STUDY_WEIGHT;

    let total = BASE_RISK + gpa_risk + sleep_risk + stress_risk + study_risk;
    total.clamp(0.0, 100.0).round() as u8
}

pub fn classify_risk(risk: u8) -> (RiskCategory, &'static str) {
    match risk {
        0..=29 => (RiskCategory::Low, LOW_ACTION),
        30..=59 => (RiskCategory::Medium, MEDIUM_ACTION),
        _ => (RiskCategory::High, HIGH_ACTION),
    }
}

pub fn assess(gpa: f64, sleep: f64, stress: f64, study: f64) -> RiskAssessment {
    let probability = calculate_risk(gpa, sleep, stress, study);
    let (category, recommended_action) = classify_risk(probability);
    RiskAssessment {
        probability,
        category,
        recommended_action,
    }
}
