//! Turns the UI's loosely-typed survey state into a [`SurveyRecord`].
//!
//! Only the two required text fields are checked. Enumerated fields arrive
//! already restricted to their closed sets, and `tariff_class` has already been
//! resolved from the catalog or the hand-typed override by the caller.

use crate::model::obligations::Obligations;
use crate::model::signature::SignatureImage;
use crate::model::survey::{
    ApplicationType, ConstructionResponsibility, MeterLocation, SiteAssessment, SurveyRecord,
};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{OffsetDateTime, UtcOffset};

/// Why a candidate was rejected. The UI re-prompts on either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("customer name is required")]
    MissingCustomerName,
    #[error("address is required")]
    MissingAddress,
}

impl ValidationError {
    /// Wire name of the offending field.
    pub fn field(self) -> &'static str {
        match self {
            ValidationError::MissingCustomerName => "customerName",
            ValidationError::MissingAddress => "address",
        }
    }
}

/// Survey answers as collected by the form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyCandidate {
    pub application_type: ApplicationType,
    #[serde(default)]
    pub tariff_class: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub survey_date: Option<OffsetDateTime>,
    pub site_assessment: SiteAssessment,
    #[serde(default)]
    pub surveyor_name: Option<String>,
    #[serde(default)]
    pub customer_representative_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub meter_location: MeterLocation,
    pub substation_construction_responsibility: ConstructionResponsibility,
    #[serde(default)]
    pub obligations: Obligations,
    #[serde(default)]
    pub customer_signature_image: Option<SignatureImage>,
    #[serde(default)]
    pub surveyor_signature_image: Option<SignatureImage>,
}

/// Validates `candidate`, stamping the survey date with the current time when
/// the form did not carry one.
pub fn validate(candidate: SurveyCandidate) -> Result<SurveyRecord, ValidationError> {
    validate_at(candidate, local_now())
}

/// Same as [`validate`] with an explicit clock reading.
pub fn validate_at(
    candidate: SurveyCandidate,
    now: OffsetDateTime,
) -> Result<SurveyRecord, ValidationError> {
    let customer_name = required(candidate.customer_name, ValidationError::MissingCustomerName)?;
    let address = required(candidate.address, ValidationError::MissingAddress)?;

    Ok(SurveyRecord {
        application_type: candidate.application_type,
        tariff_class: candidate.tariff_class.trim().to_string(),
        customer_id: optional(candidate.customer_id),
        customer_name,
        address,
        survey_date: candidate.survey_date.unwrap_or(now),
        site_assessment: candidate.site_assessment,
        surveyor_name: optional(candidate.surveyor_name),
        customer_representative_name: optional(candidate.customer_representative_name),
        notes: optional(candidate.notes).unwrap_or_default(),
        meter_location: candidate.meter_location,
        substation_construction_responsibility: candidate.substation_construction_responsibility,
        obligations: candidate.obligations,
        customer_signature_image: candidate
            .customer_signature_image
            .and_then(|s| SignatureImage::non_blank(s.into_inner())),
        surveyor_signature_image: candidate
            .surveyor_signature_image
            .and_then(|s| SignatureImage::non_blank(s.into_inner())),
    })
}

fn required(value: Option<String>, missing: ValidationError) -> Result<String, ValidationError> {
    match optional(value) {
        Some(value) => Ok(value),
        None => {
            debug!("survey candidate rejected: {}", missing);
            Err(missing)
        }
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn local_now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    match UtcOffset::current_local_offset() {
        Ok(offset) => now.to_offset(offset),
        Err(_) => now,
    }
}
