//! Inventory configuration.

use serde::Deserialize;

use kiputech_products::{CodeSequence, DEFAULT_CODE_PREFIX, DEFAULT_CODE_WIDTH};

/// Knobs for code generation and import parsing.
///
/// Every field has a default, so a partial document deserializes fine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Prefix of auto-generated codes.
    pub code_prefix: String,
    /// Minimum digit count of auto-generated codes (zero-padded).
    pub code_width: usize,
    /// Field delimiter of import files.
    pub import_delimiter: char,
}

impl InventoryConfig {
    pub fn code_sequence(&self) -> CodeSequence {
        CodeSequence::new(self.code_prefix.clone(), self.code_width)
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            code_prefix: DEFAULT_CODE_PREFIX.to_string(),
            code_width: DEFAULT_CODE_WIDTH,
            import_delimiter: ',',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_in_defaults() {
        let cfg: InventoryConfig = serde_json::from_str(r#"{ "code_prefix": "KT" }"#).unwrap();
        assert_eq!(cfg.code_prefix, "KT");
        assert_eq!(cfg.code_width, 3);
        assert_eq!(cfg.import_delimiter, ',');
    }

    #[test]
    fn code_sequence_follows_config() {
        let cfg = InventoryConfig {
            code_prefix: "KT-".to_string(),
            code_width: 5,
            import_delimiter: ';',
        };
        assert_eq!(cfg.code_sequence().next_code().as_str(), "KT-00001");
    }
}
