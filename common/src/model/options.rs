use serde::{Deserialize, Serialize};

/// Issuing unit used when nothing else is configured.
pub const DEFAULT_UNIT_NAME: &str = "PT PLN (Persero) ULP Cikarang";

/// Presentation-only parameters for composing a survey document.
///
/// None of this is survey fact; it decides how the issuing side of the form is
/// labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub organizational_unit_name: String,
}

impl RenderOptions {
    pub fn new(organizational_unit_name: impl Into<String>) -> Self {
        Self {
            organizational_unit_name: organizational_unit_name.into(),
        }
    }

    /// Overrides the unit name unless `name` is blank.
    pub fn with_unit_name(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            self.organizational_unit_name = name.to_string();
        }
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_NAME)
    }
}
