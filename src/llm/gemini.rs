use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::provider::GenerativeProvider;
use super::types::ProviderModel;
use crate::errors::ApiError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key)
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    /// Resolve a model id to a full URL path segment. Listing entries carry
    /// the `models/` prefix, selected ids do not.
    fn model_path(&self, model_id: &str) -> String {
        if model_id.starts_with("models/") {
            format!("{}/{}", self.base_url, model_id)
        } else {
            format!("{}/models/{}", self.base_url, model_id)
        }
    }
}

#[derive(Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ProviderModel>,
}

/// Text of the first candidate, if the response carries one.
fn extract_candidate_text(payload: &Value) -> Option<&str> {
    payload["candidates"][0]["content"]["parts"][0]["text"].as_str()
}

fn extract_embedding_values(payload: &Value) -> Option<Vec<f32>> {
    let values = payload["embedding"]["values"].as_array()?;
    Some(
        values
            .iter()
            .filter_map(|v| v.as_f64().map(|f| f as f32))
            .collect(),
    )
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn list_models(&self) -> Result<Vec<ProviderModel>, ApiError> {
        let url = format!("{}/models", self.base_url);
        let res = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(ApiError::internal)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!(
                "Gemini list models error ({}): {}",
                status.as_u16(),
                text
            )));
        }

        let payload: ModelsResponse = res.json().await.map_err(ApiError::internal)?;
        Ok(payload.models)
    }

    async fn generate(&self, prompt: &str, model_id: &str) -> Result<String, ApiError> {
        let url = format!("{}:generateContent", self.model_path(model_id));
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        });

        let res = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(ApiError::internal)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!(
                "Gemini generate error ({}): {}",
                status.as_u16(),
                text
            )));
        }

        let payload: Value = res.json().await.map_err(ApiError::internal)?;
        let text = extract_candidate_text(&payload).ok_or_else(|| {
            ApiError::Internal("Gemini generate returned no text candidate".to_string())
        })?;

        Ok(text.to_string())
    }

    async fn embed(&self, text: &str, model_id: &str) -> Result<Vec<f32>, ApiError> {
        let url = format!("{}:embedContent", self.model_path(model_id));
        let body = json!({
            "model": model_id,
            "content": { "parts": [{ "text": text }] },
        });

        let res = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(ApiError::internal)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!(
                "Gemini embed error ({}): {}",
                status.as_u16(),
                text
            )));
        }

        let payload: Value = res.json().await.map_err(ApiError::internal)?;
        extract_embedding_values(&payload).ok_or_else(|| {
            ApiError::Internal("Gemini embed returned no embedding values".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_model_listing() {
        let raw = r#"{
            "models": [
                { "name": "models/gemini-1.5-flash",
                  "supportedGenerationMethods": ["generateContent"] },
                { "name": "models/text-embedding-004",
                  "supportedGenerationMethods": ["embedContent"] }
            ]
        }"#;
        let parsed: ModelsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.models.len(), 2);
        assert_eq!(parsed.models[0].short_name(), "gemini-1.5-flash");
    }

    #[test]
    fn extracts_first_candidate_text() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "สวัสดีครับ" }], "role": "model" },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(extract_candidate_text(&payload), Some("สวัสดีครับ"));
    }

    #[test]
    fn missing_candidates_yield_none() {
        assert_eq!(extract_candidate_text(&json!({ "candidates": [] })), None);
        assert_eq!(extract_candidate_text(&json!({})), None);
    }

    #[test]
    fn extracts_embedding_values() {
        let payload = json!({ "embedding": { "values": [0.25, -0.5, 1.0] } });
        let values = extract_embedding_values(&payload).unwrap();
        assert_eq!(values, vec![0.25, -0.5, 1.0]);
        assert!(extract_embedding_values(&json!({})).is_none());
    }

    #[test]
    fn model_path_tolerates_resource_prefix() {
        let provider = GeminiProvider::with_base_url(
            "https://example.test/v1beta/".to_string(),
            "k".to_string(),
        );
        assert_eq!(
            provider.model_path("gemini-1.5-flash"),
            "https://example.test/v1beta/models/gemini-1.5-flash"
        );
        assert_eq!(
            provider.model_path("models/text-embedding-004"),
            "https://example.test/v1beta/models/text-embedding-004"
        );
    }
}
