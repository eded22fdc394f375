use log::debug;
use serde::{Deserialize, Serialize};

/// Catalog entry that means "the surveyor typed the tariff by hand".
pub const TARIFF_OTHER: &str = "Lainnya";

/// Rate/power tiers offered by the survey form.
pub const TARIFF_CATALOG: &[&str] = &[
    "R1 / 450VA",
    "R1 / 900VA",
    "R1 / 1300VA",
    "R1 / 2200VA",
    "R2 / 3500VA",
    "R2 / 4400VA",
    "R2 / 5500VA",
    "R3 / 6600VA",
    "B1 / 1300VA",
    "B1 / 2200VA",
    "B2 / 6600VA",
    "B3 / 200kVA",
    "I3 / 200kVA",
    "S2 / 1300VA",
    "P1 / 6600VA",
    TARIFF_OTHER,
];

/// How the surveyor picked the tariff.
///
/// Resolved to a single string before the record is validated; the record and
/// the composer only ever see the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "camelCase")]
pub enum TariffSelection {
    Catalog(String),
    Other(String),
}

impl TariffSelection {
    /// The tariff text to print, or `None` when a hand-typed override is blank.
    ///
    /// Catalog values outside [`TARIFF_CATALOG`] still resolve verbatim; older
    /// clients may carry tiers this build does not list.
    pub fn resolve(self) -> Option<String> {
        match self {
            TariffSelection::Catalog(value) if value != TARIFF_OTHER => {
                if !Self::is_catalog_entry(&value) {
                    debug!("tariff '{}' is not in the catalog, printing it as given", value);
                }
                Some(value)
            }
            TariffSelection::Catalog(_) => None,
            TariffSelection::Other(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
        }
    }

    pub fn is_catalog_entry(value: &str) -> bool {
        TARIFF_CATALOG.contains(&value) && value != TARIFF_OTHER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_value_resolves_verbatim() {
        let selection = TariffSelection::Catalog("R1 / 1300VA".into());
        assert_eq!(selection.resolve().as_deref(), Some("R1 / 1300VA"));
    }

    #[test]
    fn unlisted_catalog_value_still_resolves() {
        assert!(!TariffSelection::is_catalog_entry("R1M / 900VA"));
        let selection = TariffSelection::Catalog("R1M / 900VA".into());
        assert_eq!(selection.resolve().as_deref(), Some("R1M / 900VA"));
    }

    #[test]
    fn override_is_trimmed_and_must_not_be_blank() {
        assert_eq!(
            TariffSelection::Other("  B2 / 23kVA ".into()).resolve().as_deref(),
            Some("B2 / 23kVA")
        );
        assert_eq!(TariffSelection::Other("   ".into()).resolve(), None);
    }

    #[test]
    fn sentinel_without_override_does_not_resolve() {
        assert_eq!(TariffSelection::Catalog(TARIFF_OTHER.into()).resolve(), None);
        assert!(!TariffSelection::is_catalog_entry(TARIFF_OTHER));
        assert!(TariffSelection::is_catalog_entry("R2 / 3500VA"));
    }

    #[test]
    fn wire_format_is_tagged() {
        let selection: TariffSelection =
            serde_json::from_str(r#"{ "source": "other", "value": "K / 10kVA" }"#)
                .expect("deserialize");
        assert_eq!(selection, TariffSelection::Other("K / 10kVA".into()));
    }
}
