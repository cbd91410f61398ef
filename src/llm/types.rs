use serde::Deserialize;

/// A model advertised by the provider's listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderModel {
    /// Full resource name, e.g. `models/gemini-1.5-flash`.
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ProviderModel {
    pub fn supports(&self, method: &str) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == method)
    }

    /// Identifier without the `models/` resource prefix.
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_strips_resource_prefix() {
        let model = ProviderModel {
            name: "models/gemini-1.5-flash".to_string(),
            supported_generation_methods: vec!["generateContent".to_string()],
        };
        assert_eq!(model.short_name(), "gemini-1.5-flash");
        assert!(model.supports("generateContent"));
        assert!(!model.supports("embedContent"));
    }

    #[test]
    fn deserializes_listing_entry() {
        let raw = r#"{
            "name": "models/gemini-1.5-pro",
            "supportedGenerationMethods": ["generateContent", "countTokens"]
        }"#;
        let model: ProviderModel = serde_json::from_str(raw).unwrap();
        assert_eq!(model.short_name(), "gemini-1.5-pro");
        assert!(model.supports("countTokens"));
    }
}
