use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::store::{ProductMatch, ProductStore};
use crate::errors::ApiError;

/// Stored procedure that performs the similarity search server-side.
const MATCH_PRODUCTS_RPC: &str = "match_products";

#[derive(Clone)]
pub struct SupabaseStore {
    base_url: String,
    api_key: String,
    client: Client,
}

impl SupabaseStore {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    fn rpc_url(&self) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, MATCH_PRODUCTS_RPC)
    }

    fn rpc_payload(query_embedding: &[f32], match_threshold: f64, match_count: u32) -> Value {
        json!({
            "query_embedding": query_embedding,
            "match_threshold": match_threshold,
            "match_count": match_count,
        })
    }
}

#[async_trait]
impl ProductStore for SupabaseStore {
    async fn match_products(
        &self,
        query_embedding: &[f32],
        match_threshold: f64,
        match_count: u32,
    ) -> Result<Vec<ProductMatch>, ApiError> {
        let payload = Self::rpc_payload(query_embedding, match_threshold, match_count);

        let res = self
            .client
            .post(self.rpc_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(ApiError::internal)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Internal(format!(
                "Supabase rpc {} error ({}): {}",
                MATCH_PRODUCTS_RPC,
                status.as_u16(),
                text
            )));
        }

        let rows: Vec<ProductMatch> = res.json().await.map_err(ApiError::internal)?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_url_targets_the_stored_procedure() {
        let store = SupabaseStore::new(
            "https://example.supabase.co/".to_string(),
            "service-key".to_string(),
        );
        assert_eq!(
            store.rpc_url(),
            "https://example.supabase.co/rest/v1/rpc/match_products"
        );
    }

    #[test]
    fn rpc_payload_uses_the_three_named_parameters() {
        let payload = SupabaseStore::rpc_payload(&[0.1, 0.2], 0.35, 5);
        assert_eq!(payload["match_threshold"], json!(0.35));
        assert_eq!(payload["match_count"], json!(5));
        assert_eq!(payload["query_embedding"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn deserializes_rows_with_partial_metadata() {
        let raw = r#"[
            { "content": "ฟิล์มใส iPhone 15", "metadata": { "model": "iPhone 15", "price": 259 } },
            { "content": "ฟิล์มด้าน", "metadata": {} },
            { "content": "แถวไม่มี metadata" }
        ]"#;
        let rows: Vec<ProductMatch> = serde_json::from_str(raw).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].metadata.price, Some(json!(259)));
        assert!(rows[1].metadata.price.is_none());
        assert!(rows[2].metadata.link.is_none());
    }
}
