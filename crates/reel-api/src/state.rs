//! Application state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use reel_engine::{
    ChatClient, EdgeTts, EngineConfig, JobStore, MemoryJobStore, Pipeline, SpeechSynthesizer,
};
use reel_models::JobId;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub engine: EngineConfig,
    pub store: Arc<dyn JobStore>,
    pub chat: ChatClient,
    pub pipeline: Pipeline,
    /// Cancellation senders for in-flight builds, removed on completion
    pub cancels: Arc<Mutex<HashMap<JobId, watch::Sender<bool>>>>,
}

impl AppState {
    /// Create state with the production synthesizer.
    pub fn new(config: ApiConfig, engine: EngineConfig) -> Result<Self, reel_engine::EngineError> {
        let tts = EdgeTts::new(engine.edge_tts_bin.clone());
        Self::with_synthesizer(config, engine, Arc::new(tts))
    }

    /// Create state with a caller-supplied synthesizer (used by tests).
    pub fn with_synthesizer(
        config: ApiConfig,
        engine: EngineConfig,
        tts: Arc<dyn SpeechSynthesizer>,
    ) -> Result<Self, reel_engine::EngineError> {
        let store: Arc<dyn JobStore> = MemoryJobStore::new();
        let chat = ChatClient::new(&engine)?;
        let pipeline = Pipeline::new(engine.clone(), Arc::clone(&store), chat.clone(), tts);

        Ok(Self {
            config,
            engine,
            store,
            chat,
            pipeline,
            cancels: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Register a cancellation channel for a job, returning the receiver
    /// its worker watches.
    pub async fn register_cancel(&self, id: JobId) -> watch::Receiver<bool> {
        let (tx, rx) = watch::channel(false);
        self.cancels.lock().await.insert(id, tx);
        rx
    }

    /// Signal cancellation. True when the job had a live worker.
    pub async fn cancel(&self, id: &JobId) -> bool {
        match self.cancels.lock().await.remove(id) {
            Some(tx) => tx.send(true).is_ok(),
            None => false,
        }
    }

    /// Drop the cancellation channel once a build reaches a terminal state.
    pub async fn clear_cancel(&self, id: &JobId) {
        self.cancels.lock().await.remove(id);
    }
}
