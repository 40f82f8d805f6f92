//! Job state storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use reel_models::{Job, JobId};

use crate::error::EngineResult;

/// Job persistence seam. The in-memory store backs the single-process
/// deployment; swapping in a shared backend is a matter of implementing
/// this trait.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, job: Job) -> EngineResult<()>;
    async fn get(&self, id: JobId) -> EngineResult<Option<Job>>;
    async fn update(&self, job: Job) -> EngineResult<()>;
    async fn delete(&self, id: JobId) -> EngineResult<bool>;
}

/// In-memory job store.
#[derive(Debug, Default)]
pub struct MemoryJobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl MemoryJobStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create(&self, job: Job) -> EngineResult<()> {
        self.jobs.write().await.insert(job.id.clone(), job);
        Ok(())
    }

    async fn get(&self, id: JobId) -> EngineResult<Option<Job>> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn update(&self, job: Job) -> EngineResult<()> {
        self.jobs.write().await.insert(job.id.clone(), job);
        Ok(())
    }

    async fn delete(&self, id: JobId) -> EngineResult<bool> {
        Ok(self.jobs.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::JobStatus;

    #[tokio::test]
    async fn test_create_get_roundtrip() {
        let store = MemoryJobStore::new();
        let job = Job::new();
        let id = job.id.clone();

        store.create(job).await.unwrap();
        let fetched = store.get(id.clone()).await.unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.status, JobStatus::Queued);
    }

    #[tokio::test]
    async fn test_update_replaces_state() {
        let store = MemoryJobStore::new();
        let job = Job::new();
        let id = job.id.clone();
        store.create(job.clone()).await.unwrap();

        let job = job.with_progress(30, "Generating voiceovers...");
        store.update(job).await.unwrap();

        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.progress, 30);
        assert_eq!(fetched.status, JobStatus::Building);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryJobStore::new();
        let job = Job::new();
        let id = job.id.clone();
        store.create(job).await.unwrap();

        assert!(store.delete(id.clone()).await.unwrap());
        assert!(!store.delete(id.clone()).await.unwrap());
        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_job_is_none() {
        let store = MemoryJobStore::new();
        assert!(store.get(JobId::new()).await.unwrap().is_none());
    }
}
