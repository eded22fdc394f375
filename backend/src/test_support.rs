//! Fixtures shared by the service's unit tests.

use common::model::options::RenderOptions;
use common::model::signature::SignatureImage;
use common::{compose, validate_at, DocumentBody, SurveyCandidate};
use serde_json::{json, Value};
use time::macros::datetime;

/// A 1x1 PNG as the signature pad would send it.
pub const TINY_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

pub fn sample_body(signature: Option<&str>) -> DocumentBody {
    let candidate = SurveyCandidate {
        tariff_class: "R1 / 1300VA".into(),
        customer_name: Some("PT. Mekarjaya Propertindo".into()),
        address: Some("Kp. Cihaseum".into()),
        surveyor_signature_image: signature.map(SignatureImage::new),
        ..SurveyCandidate::default()
    };
    let record = validate_at(candidate, datetime!(2024-01-15 09:30 +7)).expect("valid candidate");
    compose(&record, &RenderOptions::default())
}

pub fn submission_json(customer_name: &str) -> Value {
    json!({
        "tariff": { "source": "catalog", "value": "R1 / 1300VA" },
        "applicationType": "Pasang Baru",
        "customerName": customer_name,
        "address": "Kp. Cihaseum",
        "surveyDate": "2024-01-15T09:30:00+07:00",
        "siteAssessment": "Layak Pasang",
        "meterLocation": "Persil",
        "substationConstructionResponsibility": "Pelanggan"
    })
}
