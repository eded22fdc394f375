use serde::{Deserialize, Serialize};

/// Label printed for a `true` answer on the checklist.
pub const ANSWER_YES: &str = "Iya";
/// Label printed for a `false` answer on the checklist.
pub const ANSWER_NO: &str = "Tidak";

/// One of the five construction or fee conditions attached to a survey.
///
/// The declaration order is the numbering on the paper form (1 to 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Obligation {
    NetworkExtensionMediumVoltage,
    BuildSubstation,
    NetworkExtensionLowVoltage,
    PoleInstallation,
    FeeApplies,
}

impl Obligation {
    pub const ALL: [Obligation; 5] = [
        Obligation::NetworkExtensionMediumVoltage,
        Obligation::BuildSubstation,
        Obligation::NetworkExtensionLowVoltage,
        Obligation::PoleInstallation,
        Obligation::FeeApplies,
    ];

    /// Item number on the form, starting at 1.
    pub fn number(self) -> u8 {
        match self {
            Obligation::NetworkExtensionMediumVoltage => 1,
            Obligation::BuildSubstation => 2,
            Obligation::NetworkExtensionLowVoltage => 3,
            Obligation::PoleInstallation => 4,
            Obligation::FeeApplies => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Obligation::NetworkExtensionMediumVoltage => {
                "Perluasan Jaringan Tegangan Menengah (JTM)"
            }
            Obligation::BuildSubstation => "Pembangunan Gardu Distribusi",
            Obligation::NetworkExtensionLowVoltage => "Perluasan Jaringan Tegangan Rendah (JTR)",
            Obligation::PoleInstallation => "Penambahan / Pemasangan Tiang",
            Obligation::FeeApplies => "Dikenakan Biaya Penyambungan",
        }
    }
}

/// The fixed-shape checklist of a survey outcome. Every flag defaults to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Obligations {
    pub network_extension_medium_voltage: bool,
    pub build_substation: bool,
    pub network_extension_low_voltage: bool,
    pub pole_installation: bool,
    pub fee_applies: bool,
}

impl Obligations {
    pub fn get(&self, obligation: Obligation) -> bool {
        match obligation {
            Obligation::NetworkExtensionMediumVoltage => self.network_extension_medium_voltage,
            Obligation::BuildSubstation => self.build_substation,
            Obligation::NetworkExtensionLowVoltage => self.network_extension_low_voltage,
            Obligation::PoleInstallation => self.pole_installation,
            Obligation::FeeApplies => self.fee_applies,
        }
    }

    /// Flags in form order, paired with the obligation they answer.
    pub fn items(&self) -> impl Iterator<Item = (Obligation, bool)> + '_ {
        Obligation::ALL.into_iter().map(|o| (o, self.get(o)))
    }

    /// Builds the checklist from the low five bits of `mask`; bit 0 is item 1.
    pub fn from_bits(mask: u8) -> Self {
        Self {
            network_extension_medium_voltage: mask & 0b00001 != 0,
            build_substation: mask & 0b00010 != 0,
            network_extension_low_voltage: mask & 0b00100 != 0,
            pole_installation: mask & 0b01000 != 0,
            fee_applies: mask & 0b10000 != 0,
        }
    }
}

pub fn answer_label(value: bool) -> &'static str {
    if value { ANSWER_YES } else { ANSWER_NO }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_follow_form_numbering() {
        let numbers: Vec<u8> = Obligations::default()
            .items()
            .map(|(o, _)| o.number())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn from_bits_sets_only_the_matching_flag() {
        let obligations = Obligations::from_bits(0b00100);
        let answers: Vec<bool> = obligations.items().map(|(_, v)| v).collect();
        assert_eq!(answers, vec![false, false, true, false, false]);
    }

    #[test]
    fn missing_flags_deserialize_as_false() {
        let obligations: Obligations =
            serde_json::from_str(r#"{ "feeApplies": true }"#).expect("deserialize");
        assert!(obligations.fee_applies);
        assert!(!obligations.build_substation);
    }
}
