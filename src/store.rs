//! Client for the remote `students` collection.
//!
//! The backend exposes plain CRUD over `/students` and no query-by-email endpoint, so
//! [`find_by_email`] scans the whole collection page by page. The scan is linear in the
//! number of stored students; an indexed lookup on the backend would remove it.

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::SyncError;
use crate::models::{StudentPayload, StudentRecord};

#[allow(async_fn_in_trait)]
pub trait StudentStore {
    async fn health(&self) -> Result<String, SyncError>;
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<StudentRecord>, SyncError>;
    async fn get(&self, id: i64) -> Result<Option<StudentRecord>, SyncError>;
    async fn create(&self, payload: &StudentPayload) -> Result<StudentRecord, SyncError>;
    async fn update(&self, id: i64, payload: &StudentPayload) -> Result<StudentRecord, SyncError>;
    async fn delete(&self, id: i64) -> Result<(), SyncError>;
}

/// Walks every page until a short one comes back. `None` means the email is unknown to the
/// store, which callers treat as "create", not as a failure.
///
/// A backend that ignores `skip` would hand back the same full page forever, so the scan
/// stops with `SyncError::Scan` when a page starts with the previous page's first id or the
/// offset would overflow.
pub async fn find_by_email<S: StudentStore>(
    store: &S,
    email: &str,
    page_limit: u32,
) -> Result<Option<StudentRecord>, SyncError> {
    let page_limit = page_limit.max(1);
    let mut skip = 0u32;
    let mut previous_first: Option<i64> = None;

    loop {
        let page = store.list(skip, page_limit).await?;
        let page_len = page.len();
        debug!(skip, page_len, "scanned student page");

        let first_id = page.first().map(|student| student.id);
        if first_id.is_some() && first_id == previous_first {
            return Err(SyncError::Scan {
                reason: format!("page at skip={skip} repeats the previous page"),
            });
        }

        if let Some(found) = page.into_iter().find(|student| student.email == email) {
            return Ok(Some(found));
        }
        if page_len < page_limit as usize {
            return Ok(None);
        }

        previous_first = first_id;
        skip = skip.checked_add(page_limit).ok_or_else(|| SyncError::Scan {
            reason: format!("offset overflow after skip={skip}"),
        })?;
    }
}

pub struct HttpStudentStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStudentStore {
    pub fn new(config: &Config) -> Result<Self, SyncError> {
        Self::from_builder(config, reqwest::Client::builder())
    }

    fn from_builder(
        config: &Config,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, SyncError> {
        let client = builder.timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    fn students_url(&self) -> String {
        format!("{}/students", self.base_url)
    }

    fn student_url(&self, id: i64) -> String {
        format!("{}/students/{id}", self.base_url)
    }
}

impl StudentStore for HttpStudentStore {
    async fn health(&self) -> Result<String, SyncError> {
        #[derive(Deserialize)]
        struct HealthBody {
            status: String,
        }

        let url = format!("{}/health", self.base_url);
        let response = ensure_success(self.client.get(&url).send().await?).await?;
        let body: HealthBody = response.json().await?;
        Ok(body.status)
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<StudentRecord>, SyncError> {
        debug!(skip, limit, "GET /students");
        let response = self
            .client
            .get(self.students_url())
            .query(&[("skip", skip), ("limit", limit)])
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn get(&self, id: i64) -> Result<Option<StudentRecord>, SyncError> {
        debug!(id, "GET /students/{{id}}");
        let response = self.client.get(self.student_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        Ok(Some(response.json().await?))
    }

    async fn create(&self, payload: &StudentPayload) -> Result<StudentRecord, SyncError> {
        debug!(email = %payload.email, "POST /students");
        let response = self
            .client
            .post(self.students_url())
            .json(payload)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: i64, payload: &StudentPayload) -> Result<StudentRecord, SyncError> {
        debug!(id, email = %payload.email, "PUT /students/{{id}}");
        let response = self
            .client
            .put(self.student_url(id))
            .json(payload)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: i64) -> Result<(), SyncError> {
        debug!(id, "DELETE /students/{{id}}");
        let response = self.client.delete(self.student_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SyncError::Http {
        status: status.as_u16(),
        detail: extract_detail(&body),
    })
}

/// Pulls `detail` out of an error body. Validation errors carry a structured detail, which is
/// kept as JSON text.
pub fn extract_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) => Some(detail),
        other => Some(other.to_string()),
    }
}
