use anyhow::bail;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Self-reported lifestyle metrics for a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub gpa: f64,
    pub sleep: f64,
    pub stress: f64,
    pub study: f64,
    pub social: f64,
    pub exercise: f64,
}

impl Metrics {
    /// Values shown before the student submits anything.
    pub fn seed() -> Self {
        Self {
            gpa: 3.0,
            sleep: 7.0,
            stress: 40.0,
            study: 4.5,
            social: 1.5,
            exercise: 0.5,
        }
    }

    /// Rejects NaN and infinities. Finite out-of-range values pass through.
    pub fn validate(&self) -> anyhow::Result<()> {
        let fields = [
            ("gpa", self.gpa),
            ("sleep", self.sleep),
            ("stress", self.stress),
            ("study", self.study),
            ("social", self.social),
            ("exercise", self.exercise),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                bail!("{name} must be a finite number, got {value}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub probability: u8,
    pub category: RiskCategory,
    pub recommended_action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartAxis {
    Sleep,
    Study,
    Exercise,
    Social,
    ScreenTime,
}

impl ChartAxis {
    pub const ORDER: [ChartAxis; 5] = [
        ChartAxis::Sleep,
        ChartAxis::Study,
        ChartAxis::Exercise,
        ChartAxis::Social,
        ChartAxis::ScreenTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartAxis::Sleep => "Sleep",
            ChartAxis::Study => "Study",
            ChartAxis::Exercise => "Exercise",
            ChartAxis::Social => "Social",
            ChartAxis::ScreenTime => "Screen Time",
        }
    }
}

/// Radar chart values on a 0-10 scale, indexed in `ChartAxis::ORDER`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedVector(pub [f64; 5]);

impl NormalizedVector {
    #[cfg(test)]
    pub fn values(&self) -> [f64; 5] {
        self.0
    }

    pub fn axes(&self) -> impl Iterator<Item = (ChartAxis, f64)> + '_ {
        ChartAxis::ORDER.iter().copied().zip(self.0.iter().copied())
    }
}

/// A student as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub cohort: Option<String>,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub wellbeing_score: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Body for both create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentPayload {
    pub name: String,
    pub email: String,
    pub cohort: String,
    pub wellbeing_score: u8,
}

/// Scores may come back as floats or null; round and clamp into 0..=100.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 100.0) as u8))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_timestamp))
}

/// Accepts RFC 3339 and the naive `YYYY-MM-DDTHH:MM:SS[.f]` form (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
