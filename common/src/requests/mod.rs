use crate::model::options::RenderOptions;
use crate::model::tariff::TariffSelection;
use crate::validation::SurveyCandidate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output format requested for an export job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Html,
    Pdf,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("tariff override text is required when \"Lainnya\" is selected")]
    MissingTariffOverride,
}

impl SubmissionError {
    pub fn field(&self) -> &'static str {
        match self {
            SubmissionError::MissingTariffOverride => "tariff",
        }
    }
}

/// Request payload for the preview and export endpoints.
///
/// Carries the raw tariff selection; everything else is the survey candidate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub tariff: TariffSelection,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(flatten)]
    pub survey: SurveyCandidate,
}

impl SurveySubmission {
    /// Resolves the tariff into the candidate and derives this request's render options.
    pub fn into_parts(
        self,
        defaults: &RenderOptions,
    ) -> Result<(SurveyCandidate, RenderOptions), SubmissionError> {
        let tariff_class = self
            .tariff
            .resolve()
            .ok_or(SubmissionError::MissingTariffOverride)?;
        let options = defaults.clone().with_unit_name(self.unit_name.as_deref());
        let candidate = SurveyCandidate {
            tariff_class,
            ..self.survey
        };
        Ok((candidate, options))
    }
}
