use crate::model::obligations::Obligations;
use crate::model::signature::SignatureImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Request category of a connection survey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationType {
    #[default]
    #[serde(rename = "Pasang Baru")]
    NewConnection,
    #[serde(rename = "Perluasan Jaringan")]
    NetworkExtension,
    #[serde(rename = "Tambah Daya")]
    CapacityIncrease,
    #[serde(rename = "Turun Daya")]
    CapacityDecrease,
    #[serde(rename = "Perubahan Tarif")]
    TariffChange,
    #[serde(rename = "P2TL")]
    IllegalUseInvestigation,
    #[serde(rename = "Survey Perencanaan")]
    PlanningSurvey,
}

impl ApplicationType {
    pub fn label(self) -> &'static str {
        match self {
            ApplicationType::NewConnection => "Pasang Baru",
            ApplicationType::NetworkExtension => "Perluasan Jaringan",
            ApplicationType::CapacityIncrease => "Tambah Daya",
            ApplicationType::CapacityDecrease => "Turun Daya",
            ApplicationType::TariffChange => "Perubahan Tarif",
            ApplicationType::IllegalUseInvestigation => "P2TL",
            ApplicationType::PlanningSurvey => "Survey Perencanaan",
        }
    }
}

/// Outcome of the on-site assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteAssessment {
    #[default]
    #[serde(rename = "Layak Pasang")]
    Feasible,
    #[serde(rename = "Tidak Layak Pasang")]
    Infeasible,
    #[serde(rename = "Perlu Perluasan Jaringan")]
    NeedsExtension,
    #[serde(rename = "Menunggu Kelengkapan Berkas")]
    PendingDocuments,
}

impl SiteAssessment {
    pub fn label(self) -> &'static str {
        match self {
            SiteAssessment::Feasible => "Layak Pasang",
            SiteAssessment::Infeasible => "Tidak Layak Pasang",
            SiteAssessment::NeedsExtension => "Perlu Perluasan Jaringan",
            SiteAssessment::PendingDocuments => "Menunggu Kelengkapan Berkas",
        }
    }
}

/// Where the metering equipment (APP) will be installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeterLocation {
    #[default]
    #[serde(rename = "Persil")]
    OnProperty,
    #[serde(rename = "Gardu")]
    OnSubstation,
}

impl MeterLocation {
    pub fn label(self) -> &'static str {
        match self {
            MeterLocation::OnProperty => "Persil",
            MeterLocation::OnSubstation => "Gardu",
        }
    }
}

/// Who builds the substation when one is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructionResponsibility {
    #[default]
    #[serde(rename = "Pelanggan")]
    Customer,
    #[serde(rename = "PLN")]
    Utility,
}

impl ConstructionResponsibility {
    pub fn label(self) -> &'static str {
        match self {
            ConstructionResponsibility::Customer => "Pelanggan",
            ConstructionResponsibility::Utility => "PLN",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_label!(
    ApplicationType,
    SiteAssessment,
    MeterLocation,
    ConstructionResponsibility
);

/// A validated snapshot of one survey's findings.
///
/// Records are only built by [`crate::validation::validate`], so the required
/// fields are always non-blank and every optional field is already normalized.
/// There are no setters: a new submission builds a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRecord {
    pub(crate) application_type: ApplicationType,
    pub(crate) tariff_class: String,
    pub(crate) customer_id: Option<String>,
    pub(crate) customer_name: String,
    pub(crate) address: String,
    pub(crate) survey_date: OffsetDateTime,
    pub(crate) site_assessment: SiteAssessment,
    pub(crate) surveyor_name: Option<String>,
    pub(crate) customer_representative_name: Option<String>,
    pub(crate) notes: String,
    pub(crate) meter_location: MeterLocation,
    pub(crate) substation_construction_responsibility: ConstructionResponsibility,
    pub(crate) obligations: Obligations,
    pub(crate) customer_signature_image: Option<SignatureImage>,
    pub(crate) surveyor_signature_image: Option<SignatureImage>,
}

impl SurveyRecord {
    pub fn application_type(&self) -> ApplicationType {
        self.application_type
    }

    pub fn tariff_class(&self) -> &str {
        &self.tariff_class
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn survey_date(&self) -> OffsetDateTime {
        self.survey_date
    }

    pub fn site_assessment(&self) -> SiteAssessment {
        self.site_assessment
    }

    pub fn surveyor_name(&self) -> Option<&str> {
        self.surveyor_name.as_deref()
    }

    pub fn customer_representative_name(&self) -> Option<&str> {
        self.customer_representative_name.as_deref()
    }

    /// Empty when the surveyor left no notes.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn meter_location(&self) -> MeterLocation {
        self.meter_location
    }

    pub fn substation_construction_responsibility(&self) -> ConstructionResponsibility {
        self.substation_construction_responsibility
    }

    pub fn obligations(&self) -> &Obligations {
        &self.obligations
    }

    pub fn customer_signature_image(&self) -> Option<&SignatureImage> {
        self.customer_signature_image.as_ref()
    }

    pub fn surveyor_signature_image(&self) -> Option<&SignatureImage> {
        self.surveyor_signature_image.as_ref()
    }
}
