//! Per-call validation configuration.

use serde::{Deserialize, Serialize};

/// Options for a single validation pass.
///
/// # Example
///
/// ```rust
/// use formset::engine::ValidateConfig;
///
/// let config: ValidateConfig = serde_json::from_str(r#"{ "usePreprocessor": false }"#).unwrap();
/// assert_eq!(config, ValidateConfig::typing());
///
/// // Missing keys fall back to defaults
/// let config: ValidateConfig = serde_json::from_str("{}").unwrap();
/// assert!(config.use_preprocessor);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidateConfig {
    /// Write preprocessed (trimmed) values back into the state
    pub use_preprocessor: bool,
}

impl ValidateConfig {
    /// Config for edits in progress: values are validated but kept as typed.
    pub fn typing() -> Self {
        Self {
            use_preprocessor: false,
        }
    }

    /// Config for committed edits: trimmed values are stored back.
    pub fn committed() -> Self {
        Self {
            use_preprocessor: true,
        }
    }
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self::committed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_preprocessor() {
        assert!(ValidateConfig::default().use_preprocessor);
        assert_eq!(ValidateConfig::default(), ValidateConfig::committed());
    }

    #[test]
    fn typing_skips_preprocessor() {
        assert!(!ValidateConfig::typing().use_preprocessor);
    }

    #[test]
    fn config_serializes_camel_case() {
        let json = serde_json::to_string(&ValidateConfig::typing()).unwrap();
        assert_eq!(json, r#"{"usePreprocessor":false}"#);
    }
}
