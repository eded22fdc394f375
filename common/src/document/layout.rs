//! The BA Survey form as typed blocks.
//!
//! This is a literal transcription of the paper form: every block has a fixed
//! place, and the record only fills in values. The HTML writer and the PDF
//! renderer both walk the same layout, so they cannot drift apart.

use crate::document::date::long_date;
use crate::model::obligations::{answer_label, Obligation};
use crate::model::options::RenderOptions;
use crate::model::signature::SignatureImage;
use crate::model::survey::SurveyRecord;

pub const TITLE: &str = "BERITA ACARA SURVEY";
pub const SUBTITLE: &str = "Permohonan Penyambungan / Perubahan Daya Tenaga Listrik";

/// Printed in the notes section when the surveyor wrote nothing.
pub const DEFAULT_NOTES: &str = "Tiang sesuai lampiran.";
pub const ATTACHMENT_NOTICE: &str =
    "Lampiran: sketsa lokasi dan dokumentasi foto hasil survey terlampir.";
pub const CLOSING: &str = "Demikian Berita Acara Survey ini dibuat dengan sebenarnya untuk dapat \
                           dipergunakan sebagaimana mestinya.";

/// Heading over the customer's signature.
pub const CUSTOMER_HEADING: &str = "Pelanggan";
/// Printed under a signature when the signer's name is unknown.
pub const NAME_PLACEHOLDER: &str = "_______________";

/// Bounding box for embedded signatures, identical for both sides.
pub const SIGNATURE_MAX_WIDTH_PX: u32 = 180;
pub const SIGNATURE_MAX_HEIGHT_PX: u32 = 80;

pub const REQUIRED_DOCUMENTS_NUMBER: u8 = 6;
pub const REQUIRED_DOCUMENTS_LABEL: &str = "Kelengkapan dokumen yang wajib dipenuhi pelanggan";
pub const REQUIRED_DOCUMENTS: [&str; 5] = [
    "Fotokopi KTP pemohon",
    "Fotokopi NPWP (untuk pelanggan badan usaha)",
    "Fotokopi IMB / PBG atau surat keterangan domisili",
    "Denah lokasi persil",
    "Surat pernyataan kesanggupan membayar biaya penyambungan",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub number: u8,
    pub label: &'static str,
    pub answer: &'static str,
}

/// Items 7 and 8: a selection printed verbatim, followed by fixed clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementItem {
    pub number: u8,
    pub label: &'static str,
    pub selection: &'static str,
    pub clauses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureMark {
    Image(SignatureImage),
    /// Blank line to sign on paper.
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureSlot {
    pub heading: String,
    pub mark: SignatureMark,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub header: Vec<HeaderRow>,
    pub obligations: Vec<ChecklistItem>,
    pub placements: Vec<PlacementItem>,
    pub notes: String,
    pub attachment_notice: &'static str,
    pub closing: &'static str,
    /// Customer on the left, issuing unit on the right.
    pub signatures: [SignatureSlot; 2],
}

pub fn build_layout(record: &SurveyRecord, options: &RenderOptions) -> FormLayout {
    let unit = options.organizational_unit_name.as_str();

    FormLayout {
        title: TITLE,
        subtitle: SUBTITLE,
        header: header_rows(record),
        obligations: record
            .obligations()
            .items()
            .map(|(obligation, value)| checklist_item(obligation, value))
            .collect(),
        placements: placement_items(record, unit),
        notes: if record.notes().is_empty() {
            DEFAULT_NOTES.to_string()
        } else {
            record.notes().to_string()
        },
        attachment_notice: ATTACHMENT_NOTICE,
        closing: CLOSING,
        signatures: [
            signature_slot(
                CUSTOMER_HEADING,
                record.customer_signature_image(),
                record.customer_representative_name(),
            ),
            signature_slot(
                unit,
                record.surveyor_signature_image(),
                record.surveyor_name(),
            ),
        ],
    }
}

fn header_rows(record: &SurveyRecord) -> Vec<HeaderRow> {
    let customer = match record.customer_id() {
        Some(id) => format!("{} / {}", id, record.customer_name()),
        None => record.customer_name().to_string(),
    };

    vec![
        HeaderRow {
            label: "Jenis Permohonan / Tarif Daya",
            value: format!("{} / {}", record.application_type(), record.tariff_class()),
        },
        HeaderRow {
            label: "ID Pelanggan / Nama",
            value: customer,
        },
        HeaderRow {
            label: "Alamat",
            value: record.address().to_string(),
        },
        HeaderRow {
            label: "Tanggal Survey",
            value: long_date(record.survey_date()),
        },
        HeaderRow {
            label: "Hasil Survey",
            value: record.site_assessment().to_string(),
        },
    ]
}

fn checklist_item(obligation: Obligation, value: bool) -> ChecklistItem {
    ChecklistItem {
        number: obligation.number(),
        label: obligation.label(),
        answer: answer_label(value),
    }
}

fn placement_items(record: &SurveyRecord, unit: &str) -> Vec<PlacementItem> {
    vec![
        PlacementItem {
            number: 7,
            label: "Letak APP (Alat Pembatas dan Pengukur)",
            selection: record.meter_location().label(),
            clauses: vec![
                format!("APP dipasang pada lokasi yang mudah dijangkau oleh petugas {unit}."),
                "Pelanggan wajib menjaga keamanan dan keutuhan segel APP.".to_string(),
            ],
        },
        PlacementItem {
            number: 8,
            label: "Pembangunan gardu menjadi tanggung jawab",
            selection: record.substation_construction_responsibility().label(),
            clauses: vec![
                format!("Konstruksi gardu wajib memenuhi standar konstruksi {unit}."),
                format!(
                    "Pelaksanaan pembangunan dikoordinasikan dengan {unit} sebelum penyambungan."
                ),
            ],
        },
    ]
}

fn signature_slot(
    heading: &str,
    image: Option<&SignatureImage>,
    name: Option<&str>,
) -> SignatureSlot {
    SignatureSlot {
        heading: heading.to_string(),
        mark: match image {
            Some(image) => SignatureMark::Image(image.clone()),
            None => SignatureMark::Line,
        },
        name: name.unwrap_or(NAME_PLACEHOLDER).to_string(),
    }
}
