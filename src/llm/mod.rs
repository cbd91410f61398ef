//! Hosted embedding + text-generation provider.
//!
//! `GenerativeProvider` is the seam the pipeline talks through; the
//! production implementation is `GeminiProvider` over the Generative
//! Language REST API.

pub mod gemini;
pub mod provider;
pub mod selector;
pub mod types;

pub use gemini::GeminiProvider;
pub use provider::GenerativeProvider;
pub use selector::{select_generation_model, DEFAULT_GENERATION_MODEL};
pub use types::ProviderModel;
