use tracing::{info, warn};

use super::provider::GenerativeProvider;
use super::types::ProviderModel;

/// Method a model must advertise to be usable for reply generation.
const GENERATE_METHOD: &str = "generateContent";

/// Marker for the fast/lightweight model family.
const LIGHTWEIGHT_MARKER: &str = "flash";

/// Preferred model generation.
const TARGET_VERSION: &str = "1.5";

/// Fallback identifier when enumeration fails or nothing matches.
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-flash";

/// Preference tiers, evaluated in order over the enumerated list.
fn preference_tiers() -> [fn(&ProviderModel) -> bool; 3] {
    [
        |m| is_lightweight(m) && has_target_version(m),
        is_lightweight,
        has_target_version,
    ]
}

fn is_lightweight(model: &ProviderModel) -> bool {
    model.name.to_lowercase().contains(LIGHTWEIGHT_MARKER)
}

fn has_target_version(model: &ProviderModel) -> bool {
    model.name.contains(TARGET_VERSION)
}

/// Pick a generation model id from an enumerated listing.
///
/// Non-generating entries (embedding models, token counters) are never
/// candidates. Falls through the tiers to the hardcoded default.
pub fn pick_generation_model(models: &[ProviderModel]) -> String {
    let usable: Vec<&ProviderModel> = models
        .iter()
        .filter(|m| m.supports(GENERATE_METHOD))
        .collect();

    for tier in preference_tiers() {
        if let Some(model) = usable.iter().find(|m| tier(m)) {
            return model.short_name().to_string();
        }
    }

    DEFAULT_GENERATION_MODEL.to_string()
}

/// Startup-time selection. Never fails: an enumeration error degrades to
/// the default identifier.
pub async fn select_generation_model(provider: &dyn GenerativeProvider) -> String {
    match provider.list_models().await {
        Ok(models) => {
            let id = pick_generation_model(&models);
            info!("Selected generation model: {}", id);
            id
        }
        Err(err) => {
            warn!(
                "Failed to enumerate models, falling back to {}: {}",
                DEFAULT_GENERATION_MODEL, err
            );
            DEFAULT_GENERATION_MODEL.to_string()
        }
    }
}
