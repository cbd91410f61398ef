//! Product retrieval.
//!
//! `ProductStore` abstracts the vector-similarity index; `SupabaseStore`
//! drives it over the REST RPC surface. `context` turns ranked rows into
//! the prompt digest.

pub mod context;
pub mod store;
pub mod supabase;

pub use context::{build_product_context, NO_MATCH_SENTINEL};
pub use store::{ProductMatch, ProductMetadata, ProductStore};
pub use supabase::SupabaseStore;
