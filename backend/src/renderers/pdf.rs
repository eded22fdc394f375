use super::output_name;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::document::layout::{
    FormLayout, HeaderRow, SignatureMark, SignatureSlot, REQUIRED_DOCUMENTS,
    REQUIRED_DOCUMENTS_LABEL, REQUIRED_DOCUMENTS_NUMBER, SIGNATURE_MAX_HEIGHT_PX,
    SIGNATURE_MAX_WIDTH_PX,
};
use common::model::signature::SignatureImage;
use common::{DocumentBody, DocumentRenderer, RenderFailure, RenderedDocument};
use genpdf::elements::{Break, Image as PdfImage, LinearLayout, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element};
use image::imageops::FilterType;
use image::{load_from_memory, DynamicImage, GenericImageView};
use log::warn;
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const MEDIA_TYPE: &str = "application/pdf";

const MARGIN_MM: i32 = 15;
const IMAGE_DPI: f64 = 150.0;
const BODY_FONT_SIZE: u8 = 9;
const TITLE_FONT_SIZE: u8 = 13;
const SIGNATURE_LINE: &str = "______________________________";

/// Renders the form layout to `{export_dir}/ba-survey-{digest}.pdf`.
///
/// Needs a TrueType family in `fonts_dir`: `Arial-*.ttf`, or
/// `LiberationSans-*.ttf` as fallback. Without one the renderer reports
/// itself unavailable.
pub struct PdfRenderer {
    export_dir: PathBuf,
    fonts_dir: PathBuf,
}

impl PdfRenderer {
    pub fn new(export_dir: impl AsRef<Path>, fonts_dir: impl AsRef<Path>) -> Self {
        Self {
            export_dir: export_dir.as_ref().to_path_buf(),
            fonts_dir: fonts_dir.as_ref().to_path_buf(),
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, body: &DocumentBody) -> Result<RenderedDocument, RenderFailure> {
        let fonts = load_font(&self.fonts_dir)?;

        // Signature PNGs must outlive `render_to_file`.
        let mut temp_files: Vec<NamedTempFile> = Vec::new();
        let doc = build_document(fonts, body.layout(), &mut temp_files)
            .map_err(|e| RenderFailure::Pdf(e.to_string()))?;

        fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join(output_name(&body.digest(), "pdf"));
        doc.render_to_file(&path)
            .map_err(|e| RenderFailure::Pdf(e.to_string()))?;

        Ok(RenderedDocument {
            path,
            media_type: MEDIA_TYPE,
        })
    }
}

fn load_font(
    dir: &Path,
) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, RenderFailure> {
    if let Ok(family) = genpdf::fonts::from_files(dir, "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files(dir, "LiberationSans", None).map_err(|e| {
        RenderFailure::Unavailable(format!("no usable font in {}: {}", dir.display(), e))
    })
}

fn build_document(
    fonts: genpdf::fonts::FontFamily<genpdf::fonts::FontData>,
    layout: &FormLayout,
    temp_files: &mut Vec<NamedTempFile>,
) -> Result<Document, Box<dyn Error>> {
    let mut doc = Document::new(fonts);
    doc.set_title(layout.title);
    doc.set_font_size(BODY_FONT_SIZE);
    doc.set_line_spacing(1.1);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(MARGIN_MM);
    doc.set_page_decorator(decorator);

    doc.push(
        Paragraph::new(layout.title)
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(TITLE_FONT_SIZE)),
    );
    doc.push(Paragraph::new(layout.subtitle).aligned(Alignment::Center));
    doc.push(Break::new(1));

    doc.push(header_table(&layout.header)?);
    doc.push(Break::new(1));

    let mut columns = TableLayout::new(vec![1, 1]);
    columns
        .row()
        .element(checklist_column(layout))
        .element(placement_column(layout))
        .push()?;
    doc.push(columns);
    doc.push(Break::new(1));

    doc.push(Paragraph::new("Catatan:").styled(Style::new().bold()));
    doc.push(multiline(&layout.notes));
    doc.push(Paragraph::new(layout.attachment_notice));
    doc.push(Break::new(1));
    doc.push(Paragraph::new(layout.closing));
    doc.push(Break::new(1));

    let mut signatures = TableLayout::new(vec![1, 1]);
    let [customer, issuer] = &layout.signatures;
    signatures
        .row()
        .element(signature_cell(customer, temp_files))
        .element(signature_cell(issuer, temp_files))
        .push()?;
    doc.push(signatures);

    Ok(doc)
}

fn header_table(rows: &[HeaderRow]) -> Result<TableLayout, Box<dyn Error>> {
    let mut table = TableLayout::new(vec![4, 1, 10]);
    for row in rows {
        table
            .row()
            .element(Paragraph::new(row.label))
            .element(Paragraph::new(":"))
            .element(multiline(&row.value))
            .push()?;
    }
    Ok(table)
}

fn checklist_column(layout: &FormLayout) -> LinearLayout {
    let mut column = LinearLayout::vertical();
    for item in &layout.obligations {
        let mut p = Paragraph::new(format!("{}. {}: ", item.number, item.label));
        p.push_styled(item.answer, Style::new().bold());
        column.push(p);
    }
    column.push(Paragraph::new(format!(
        "{}. {}:",
        REQUIRED_DOCUMENTS_NUMBER, REQUIRED_DOCUMENTS_LABEL
    )));
    for (letter, document) in ('a'..='z').zip(REQUIRED_DOCUMENTS) {
        column.push(Paragraph::new(format!("   {}. {}", letter, document)));
    }
    column
}

fn placement_column(layout: &FormLayout) -> LinearLayout {
    let mut column = LinearLayout::vertical();
    for item in &layout.placements {
        let mut p = Paragraph::new(format!("{}. {}: ", item.number, item.label));
        p.push_styled(item.selection, Style::new().bold());
        column.push(p);
        for clause in &item.clauses {
            column.push(Paragraph::new(format!("   - {}", clause)));
        }
    }
    column
}

fn signature_cell(slot: &SignatureSlot, temp_files: &mut Vec<NamedTempFile>) -> LinearLayout {
    let mut cell = LinearLayout::vertical();
    cell.push(Paragraph::new(slot.heading.as_str()).aligned(Alignment::Center));

    match embedded_signature(slot, temp_files) {
        Some(element) => cell.push(element),
        None => {
            cell.push(Break::new(3));
            cell.push(Paragraph::new(SIGNATURE_LINE).aligned(Alignment::Center));
        }
    }

    cell.push(Paragraph::new(slot.name.as_str()).aligned(Alignment::Center));
    cell
}

/// The signature image for `slot`, or `None` when the line should be drawn.
fn embedded_signature(
    slot: &SignatureSlot,
    temp_files: &mut Vec<NamedTempFile>,
) -> Option<PdfImage> {
    match &slot.mark {
        SignatureMark::Image(image) => match signature_element(image, temp_files) {
            Ok(element) => Some(element),
            Err(e) => {
                warn!("signature for '{}' not embedded: {}", slot.heading, e);
                None
            }
        },
        SignatureMark::Line => None,
    }
}

/// Decodes a signature data string into raw image bytes.
///
/// Accepts `data:<type>;base64,<payload>` as well as a bare base64 payload.
pub(crate) fn decode_signature(signature: &SignatureImage) -> Result<Vec<u8>, RenderFailure> {
    let raw = signature.as_str().trim();
    let payload = match raw.strip_prefix("data:") {
        Some(rest) => {
            let (meta, payload) = rest
                .split_once(',')
                .ok_or_else(|| RenderFailure::Image("data URL without payload".into()))?;
            if !meta.ends_with(";base64") {
                return Err(RenderFailure::Image(format!(
                    "unsupported data URL encoding '{}'",
                    meta
                )));
            }
            payload
        }
        None => raw,
    };
    BASE64
        .decode(payload)
        .map_err(|e| RenderFailure::Image(e.to_string()))
}

/// Scale (<= 1.0) that fits `width` x `height` image pixels into the signature box.
pub(crate) fn signature_scale(width: u32, height: u32) -> f64 {
    // CSS px -> image pixels at IMAGE_DPI, assuming 96 CSS px per inch.
    let css_to_px = IMAGE_DPI / 96.0;
    let max_w = SIGNATURE_MAX_WIDTH_PX as f64 * css_to_px;
    let max_h = SIGNATURE_MAX_HEIGHT_PX as f64 * css_to_px;
    (max_w / width.max(1) as f64)
        .min(max_h / height.max(1) as f64)
        .min(1.0)
}

fn signature_element(
    signature: &SignatureImage,
    temp_files: &mut Vec<NamedTempFile>,
) -> Result<PdfImage, Box<dyn Error>> {
    let bytes = decode_signature(signature)?;
    let img = load_from_memory(&bytes)?;
    let (orig_w, orig_h) = img.dimensions();
    let scale = signature_scale(orig_w, orig_h);

    let resized: DynamicImage = if scale >= 1.0 {
        img
    } else {
        let new_w = (orig_w as f64 * scale).max(1.0).round() as u32;
        let new_h = (orig_h as f64 * scale).max(1.0).round() as u32;
        img.resize(new_w, new_h, FilterType::Lanczos3)
    };

    // Signature pads emit transparent strokes; flatten them onto white paper.
    let rgba = resized.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let raw = DynamicImage::ImageRgba8(background).to_rgb8().into_raw();

    let mut tmp = NamedTempFile::new()?;
    {
        let file = tmp.as_file_mut();
        let mut encoder = PngEncoder::new(file, w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raw)?;
    }

    let mut element = PdfImage::from_path(tmp.path())?;
    element.set_dpi(IMAGE_DPI);
    element.set_alignment(Alignment::Center);
    temp_files.push(tmp);
    Ok(element)
}

fn multiline(text: &str) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    for line in text.lines() {
        layout.push(Paragraph::new(line));
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_body, TINY_PNG};
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_data_url(width: u32, height: u32) -> SignatureImage {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        SignatureImage::new(format!("data:image/png;base64,{}", BASE64.encode(bytes)))
    }

    fn slot(mark: SignatureMark) -> SignatureSlot {
        SignatureSlot {
            heading: "Pelanggan".into(),
            mark,
            name: "Budi".into(),
        }
    }

    #[test]
    fn decodes_data_url_and_bare_payload() {
        let from_url = decode_signature(&SignatureImage::new(TINY_PNG)).expect("data url");
        let bare = TINY_PNG.split_once(',').map(|(_, p)| p).unwrap_or_default();
        let from_bare = decode_signature(&SignatureImage::new(bare)).expect("bare");
        assert_eq!(from_url, from_bare);
        assert!(from_url.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn rejects_non_base64_data_urls() {
        let result = decode_signature(&SignatureImage::new("data:image/svg+xml,<svg/>"));
        assert!(matches!(result, Err(RenderFailure::Image(_))));
    }

    #[test]
    fn scale_only_shrinks() {
        assert_eq!(signature_scale(10, 10), 1.0);
        let scale = signature_scale(1200, 400);
        let box_w = SIGNATURE_MAX_WIDTH_PX as f64 * IMAGE_DPI / 96.0;
        assert!((1200.0 * scale - box_w).abs() < 1e-6);
        assert!(400.0 * scale <= SIGNATURE_MAX_HEIGHT_PX as f64 * IMAGE_DPI / 96.0 + 1e-6);
    }

    #[test]
    fn missing_fonts_make_the_renderer_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let renderer = PdfRenderer::new(dir.path().join("out"), dir.path().join("no-fonts"));
        let body = sample_body(Some(TINY_PNG));

        assert!(matches!(
            renderer.render(&body),
            Err(RenderFailure::Unavailable(_))
        ));
        assert!(common::export(&body, &renderer).is_none());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn small_signature_is_embedded_from_a_live_temp_file() {
        let mut temp_files = Vec::new();
        let element = signature_element(&SignatureImage::new(TINY_PNG), &mut temp_files);
        assert!(element.is_ok());
        assert_eq!(temp_files.len(), 1);
        assert!(temp_files[0].path().exists());
        assert_eq!(
            image::image_dimensions(temp_files[0].path()).expect("dimensions"),
            (1, 1)
        );
    }

    #[test]
    fn oversized_signature_is_scaled_into_the_box() {
        let mut temp_files = Vec::new();
        assert!(signature_element(&png_data_url(1200, 400), &mut temp_files).is_ok());
        assert_eq!(temp_files.len(), 1);

        let (w, h) = image::image_dimensions(temp_files[0].path()).expect("dimensions");
        let max_w = (SIGNATURE_MAX_WIDTH_PX as f64 * IMAGE_DPI / 96.0).ceil() as u32;
        let max_h = (SIGNATURE_MAX_HEIGHT_PX as f64 * IMAGE_DPI / 96.0).ceil() as u32;
        assert!(w < 1200 && w <= max_w, "width {w}");
        assert!(h < 400 && h <= max_h, "height {h}");
    }

    #[test]
    fn transparent_strokes_are_flattened_onto_white() {
        let mut temp_files = Vec::new();
        assert!(signature_element(&png_data_url(4, 4), &mut temp_files).is_ok());
        let flattened = image::open(temp_files[0].path()).expect("open").to_rgb8();
        assert!(flattened.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn malformed_signature_falls_back_to_the_line() {
        let malformed = SignatureImage::new("data:image/png;base64,!!!not-base64");
        let mut temp_files = Vec::new();
        match signature_element(&malformed, &mut temp_files) {
            Ok(_) => panic!("malformed signature should not decode"),
            Err(e) => assert!(e.to_string().starts_with("image error")),
        }

        assert!(embedded_signature(&slot(SignatureMark::Image(malformed)), &mut temp_files).is_none());
        assert!(embedded_signature(&slot(SignatureMark::Line), &mut temp_files).is_none());
        assert!(temp_files.is_empty());
    }

    #[test]
    fn decodable_signature_is_embedded_in_its_slot() {
        let mut temp_files = Vec::new();
        let mark = SignatureMark::Image(SignatureImage::new(TINY_PNG));
        assert!(embedded_signature(&slot(mark), &mut temp_files).is_some());
        assert_eq!(temp_files.len(), 1);
    }
}
