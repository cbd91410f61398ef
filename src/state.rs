use std::sync::Arc;

use thiserror::Error;

use crate::config::{AppPaths, PipelineConfig, Secrets, SecretsError};
use crate::llm::{select_generation_model, GeminiProvider, GenerativeProvider};
use crate::pipeline::ResponsePipeline;
use crate::rag::{ProductStore, SupabaseStore};

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to load secrets: {0}")]
    Secrets(#[from] SecretsError),
}

/// Application state shared across requests.
///
/// Collaborator handles are created exactly once here and reused; nothing
/// in them is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub provider: Arc<dyn GenerativeProvider>,
    pub generation_model: String,
    pub pipeline: Arc<ResponsePipeline>,
}

impl AppState {
    /// Build every collaborator handle once, at process start.
    ///
    /// Missing secrets are the only fatal condition. Model selection never
    /// fails; enumeration errors degrade to the default identifier.
    pub async fn initialize() -> Result<Arc<Self>, InitializationError> {
        let paths = Arc::new(AppPaths::new());
        let secrets = Secrets::load(&paths)?;
        let config = PipelineConfig::from_env();

        let provider: Arc<dyn GenerativeProvider> =
            Arc::new(GeminiProvider::new(secrets.gemini_api_key.clone()));
        let store: Arc<dyn ProductStore> = Arc::new(SupabaseStore::new(
            secrets.supabase_url.clone(),
            secrets.supabase_key.clone(),
        ));

        let generation_model = select_generation_model(provider.as_ref()).await;

        let pipeline = Arc::new(ResponsePipeline::new(
            provider.clone(),
            store,
            generation_model.clone(),
            config,
        ));

        Ok(Arc::new(AppState {
            paths,
            provider,
            generation_model,
            pipeline,
        }))
    }
}
