use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::Metrics;
use crate::session::Session;
use crate::store::StudentStore;
use crate::sync::Synchronizer;

#[derive(Debug, Deserialize)]
struct CsvRow {
    username: String,
    gpa: f64,
    sleep: f64,
    stress: f64,
    study: f64,
    social: f64,
    exercise: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub synced: usize,
    pub failed: usize,
}

/// Submits one row per student. A bad row or a failed sync is logged and counted; the rest of
/// the file is still processed.
pub async fn import_csv<S: StudentStore>(
    sync: &Synchronizer<S>,
    csv_path: &Path,
) -> anyhow::Result<ImportSummary> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut summary = ImportSummary::default();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let line = index + 2;
        let row = match result {
            Ok(row) => row,
            Err(err) => {
                warn!(line, error = %err, "skipping unreadable row");
                summary.failed += 1;
                continue;
            }
        };

        let metrics = Metrics {
            gpa: row.gpa,
            sleep: row.sleep,
            stress: row.stress,
            study: row.study,
            social: row.social,
            exercise: row.exercise,
        };
        let prepared = Session::login(&row.username).and_then(|session| {
            metrics.validate()?;
            Ok(session)
        });
        let mut session = match prepared {
            Ok(session) => session,
            Err(err) => {
                warn!(line, error = %err, "skipping invalid row");
                summary.failed += 1;
                continue;
            }
        };

        match sync.synchronize(&mut session, &metrics).await {
            Ok(_) => summary.synced += 1,
            Err(err) => {
                warn!(line, username = %row.username, error = %err, "row not synchronized");
                summary.failed += 1;
            }
        }
    }

    info!(synced = summary.synced, failed = summary.failed, "import finished");
    Ok(summary)
}
