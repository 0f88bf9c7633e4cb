//! In-memory student store for unit tests.

use std::sync::{Mutex, MutexGuard};

use crate::error::SyncError;
use crate::models::{StudentPayload, StudentRecord};
use crate::store::StudentStore;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub health: usize,
    pub list: usize,
    pub get: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

#[derive(Default)]
struct State {
    students: Vec<StudentRecord>,
    next_id: i64,
    calls: CallCounts,
    fail_next: Option<SyncError>,
    ignore_skip: bool,
}

#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
}

pub fn student(id: i64, email: &str) -> StudentRecord {
    StudentRecord {
        id,
        name: format!("Student {id}"),
        email: email.to_string(),
        cohort: Some("2024-Fall".to_string()),
        wellbeing_score: Some(50),
        timestamp: None,
    }
}

impl FakeStore {
    pub fn with_students(students: Vec<StudentRecord>) -> Self {
        let next_id = students.iter().map(|s| s.id).max().unwrap_or(0);
        Self {
            state: Mutex::new(State {
                students,
                next_id,
                ..State::default()
            }),
        }
    }

    /// Serves the first page for every `list` call, whatever `skip` is.
    pub fn ignoring_skip(students: Vec<StudentRecord>) -> Self {
        let store = Self::with_students(students);
        store.lock().ignore_skip = true;
        store
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    pub fn students(&self) -> Vec<StudentRecord> {
        self.lock().students.clone()
    }

    /// The next call of any kind fails with `err`.
    pub fn fail_next(&self, err: SyncError) {
        self.lock().fail_next = Some(err);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn take_failure(state: &mut State) -> Result<(), SyncError> {
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn from_payload(id: i64, payload: &StudentPayload) -> StudentRecord {
    StudentRecord {
        id,
        name: payload.name.clone(),
        email: payload.email.clone(),
        cohort: Some(payload.cohort.clone()),
        wellbeing_score: Some(payload.wellbeing_score),
        timestamp: None,
    }
}

impl StudentStore for FakeStore {
    async fn health(&self) -> Result<String, SyncError> {
        let mut state = self.lock();
        state.calls.health += 1;
        Self::take_failure(&mut state)?;
        Ok("healthy".to_string())
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<StudentRecord>, SyncError> {
        let mut state = self.lock();
        state.calls.list += 1;
        Self::take_failure(&mut state)?;
        let skip = if state.ignore_skip { 0 } else { skip as usize };
        Ok(state
            .students
            .iter()
            .skip(skip)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Option<StudentRecord>, SyncError> {
        let mut state = self.lock();
        state.calls.get += 1;
        Self::take_failure(&mut state)?;
        Ok(state.students.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, payload: &StudentPayload) -> Result<StudentRecord, SyncError> {
        let mut state = self.lock();
        state.calls.create += 1;
        Self::take_failure(&mut state)?;
        if state.students.iter().any(|s| s.email == payload.email) {
            return Err(SyncError::Http {
                status: 400,
                detail: Some("Email already registered".to_string()),
            });
        }
        state.next_id += 1;
        let record = from_payload(state.next_id, payload);
        state.students.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, payload: &StudentPayload) -> Result<StudentRecord, SyncError> {
        let mut state = self.lock();
        state.calls.update += 1;
        Self::take_failure(&mut state)?;
        let existing = state
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SyncError::Http {
                status: 404,
                detail: Some(format!("Student with id {id} not found")),
            })?;
        *existing = from_payload(id, payload);
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), SyncError> {
        let mut state = self.lock();
        state.calls.delete += 1;
        Self::take_failure(&mut state)?;
        let before = state.students.len();
        state.students.retain(|s| s.id != id);
        if state.students.len() == before {
            return Err(SyncError::Http {
                status: 404,
                detail: Some(format!("Student with id {id} not found")),
            });
        }
        Ok(())
    }
}
