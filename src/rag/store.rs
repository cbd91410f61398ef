use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ApiError;

/// Metadata attached to a product row.
///
/// Every field is optional in the store; rendering substitutes
/// placeholders instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductMetadata {
    #[serde(default)]
    pub model: Option<String>,
    /// Number or string depending on how the row was ingested.
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub link: Option<String>,
}

/// A product row returned by the similarity search, ranked best-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMatch {
    pub content: String,
    #[serde(default)]
    pub metadata: ProductMetadata,
}

/// Abstract interface to the vector-similarity product index.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Search for products similar to the query embedding.
    ///
    /// Rows below `match_threshold` are filtered server-side and at most
    /// `match_count` rows come back. An empty result is a valid outcome,
    /// not an error.
    async fn match_products(
        &self,
        query_embedding: &[f32],
        match_threshold: f64,
        match_count: u32,
    ) -> Result<Vec<ProductMatch>, ApiError>;
}
