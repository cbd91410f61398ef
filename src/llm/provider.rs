use async_trait::async_trait;

use super::types::ProviderModel;
use crate::errors::ApiError;

/// Interface to the hosted embedding + text-generation service.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// return the provider name (e.g. "gemini")
    fn name(&self) -> &str;

    /// list available models; used only at startup for model selection
    async fn list_models(&self) -> Result<Vec<ProviderModel>, ApiError>;

    /// single-shot text generation from an assembled prompt
    async fn generate(&self, prompt: &str, model_id: &str) -> Result<String, ApiError>;

    /// embed one text into a fixed-dimension vector
    async fn embed(&self, text: &str, model_id: &str) -> Result<Vec<f32>, ApiError>;
}
