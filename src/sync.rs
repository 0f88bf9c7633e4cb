//! Create-or-update reconciliation of a locally scored student against the remote store.
//!
//! The score is computed before any network call. The caller renders the dashboard first, so a
//! failed synchronization never rolls back what the student already sees.

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::SyncError;
use crate::models::{Metrics, StudentPayload, StudentRecord};
use crate::score::ScoreWeights;
use crate::session::Session;
use crate::store::{self, StudentStore};

pub const DEFAULT_COHORT: &str = "2024-Fall";

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Created(StudentRecord),
    Updated(StudentRecord),
}

impl SyncOutcome {
    pub fn record(&self) -> &StudentRecord {
        match self {
            SyncOutcome::Created(record) | SyncOutcome::Updated(record) => record,
        }
    }
}

pub struct Synchronizer<S> {
    store: S,
    page_limit: u32,
    weights: ScoreWeights,
}

impl<S: StudentStore> Synchronizer<S> {
    pub fn new(store: S, page_limit: u32) -> Self {
        Self {
            store,
            page_limit,
            weights: ScoreWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Scores `metrics` and writes them for the session's student.
    ///
    /// With a known id this is a single update. Otherwise the collection is scanned for the
    /// session email first; a hit is updated, a miss is created. Either way the id is
    /// remembered on the session so later calls skip the scan.
    pub async fn synchronize(
        &self,
        session: &mut Session,
        metrics: &Metrics,
    ) -> Result<SyncOutcome, SyncError> {
        let span = info_span!("sync", sync_id = %Uuid::new_v4(), email = %session.email());
        self.write_record(session, metrics).instrument(span).await
    }

    /// Looks up the stored record for a fresh session and remembers its id.
    pub async fn load(&self, session: &mut Session) -> Result<Option<StudentRecord>, SyncError> {
        let span = info_span!("load", sync_id = %Uuid::new_v4(), email = %session.email());
        self.load_record(session).instrument(span).await
    }

    async fn write_record(
        &self,
        session: &mut Session,
        metrics: &Metrics,
    ) -> Result<SyncOutcome, SyncError> {
        let payload = StudentPayload {
            name: session.display_name(),
            email: session.email().to_string(),
            cohort: DEFAULT_COHORT.to_string(),
            wellbeing_score: self.weights.score(metrics),
        };

        let known_id = match session.known_id() {
            Some(id) => Some(id),
            None => self.discover_id(session).await?,
        };

        let result = match known_id {
            Some(id) => self.store.update(id, &payload).await.map(SyncOutcome::Updated),
            None => self.store.create(&payload).await.map(SyncOutcome::Created),
        };

        match result {
            Ok(outcome) => {
                let record = outcome.record();
                session.remember_id(record.id);
                info!(
                    id = record.id,
                    score = payload.wellbeing_score,
                    created = matches!(outcome, SyncOutcome::Created(_)),
                    "student synchronized"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(error = %err, "synchronization failed");
                Err(err)
            }
        }
    }

    async fn load_record(&self, session: &mut Session) -> Result<Option<StudentRecord>, SyncError> {
        let found = store::find_by_email(&self.store, session.email(), self.page_limit).await?;
        match &found {
            Some(record) => {
                session.remember_id(record.id);
                info!(id = record.id, "student record loaded");
            }
            None => info!("student not found, will create on first submission"),
        }
        Ok(found)
    }

    async fn discover_id(&self, session: &Session) -> Result<Option<i64>, SyncError> {
        let found = store::find_by_email(&self.store, session.email(), self.page_limit).await?;
        Ok(found.map(|record| record.id))
    }
}
