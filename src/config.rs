use std::time::Duration;

use anyhow::{ensure, Context};

use crate::score::ScoreWeights;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub page_limit: u32,
    pub weights: ScoreWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_limit: DEFAULT_PAGE_LIMIT,
            weights: ScoreWeights::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Config::default();

        if let Some(url) = lookup("WELLBEING_API_URL") {
            config.api_url = normalize_url(&url)?;
        }

        if let Some(raw) = lookup("WELLBEING_API_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("WELLBEING_API_TIMEOUT_SECS is not a number: {raw}"))?;
            ensure!(secs > 0, "WELLBEING_API_TIMEOUT_SECS must be greater than zero");
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("WELLBEING_PAGE_LIMIT") {
            let limit: u32 = raw
                .trim()
                .parse()
                .with_context(|| format!("WELLBEING_PAGE_LIMIT is not a number: {raw}"))?;
            ensure!(limit > 0, "WELLBEING_PAGE_LIMIT must be greater than zero");
            config.page_limit = limit;
        }

        if let Some(raw) = lookup("WELLBEING_SCORE_WEIGHTS") {
            config.weights = parse_weights(&raw).context("invalid WELLBEING_SCORE_WEIGHTS")?;
        }

        Ok(config)
    }

    pub fn with_api_url(mut self, url: &str) -> anyhow::Result<Self> {
        self.api_url = normalize_url(url)?;
        Ok(self)
    }
}

/// `gpa,sleep,stress,study,social,exercise`, e.g. `0.25,0.2,0.2,0.15,0.1,0.1`.
fn parse_weights(raw: &str) -> anyhow::Result<ScoreWeights> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("not a number: {part:?}"))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;
    ensure!(values.len() == 6, "expected 6 weights, got {}", values.len());
    ScoreWeights::new(values[0], values[1], values[2], values[3], values[4], values[5])
}

fn normalize_url(raw: &str) -> anyhow::Result<String> {
    let url = raw.trim().trim_end_matches('/');
    ensure!(
        url.starts_with("http://") || url.starts_with("https://"),
        "API url must start with http:// or https://, got {raw:?}"
    );
    Ok(url.to_string())
}
