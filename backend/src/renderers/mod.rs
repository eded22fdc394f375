//! File renderers for composed survey documents.
//!
//! - `html`: writes the self-contained markup as-is.
//! - `pdf`: lays the form out again with genpdf and embeds the signatures.
//!
//! Both name their output after the document digest, so exporting the same
//! survey twice overwrites one file instead of piling up copies.

pub mod html;
pub mod pdf;

use crate::config::ServerConfig;
use common::requests::ExportFormat;
use common::DocumentRenderer;

/// File stem shared by every exported survey.
const FILE_PREFIX: &str = "ba-survey";

pub(crate) fn output_name(digest: &str, extension: &str) -> String {
    format!("{}-{}.{}", FILE_PREFIX, digest, extension)
}

/// Picks the renderer for `format`, configured from `config`.
pub fn renderer_for(
    format: ExportFormat,
    config: &ServerConfig,
) -> Box<dyn DocumentRenderer + Send + Sync> {
    match format {
        ExportFormat::Html => Box::new(html::HtmlFileRenderer::new(&config.export_dir)),
        ExportFormat::Pdf => Box::new(pdf::PdfRenderer::new(
            &config.export_dir,
            &config.fonts_dir,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_uses_prefix_and_digest() {
        assert_eq!(output_name("abc123", "pdf"), "ba-survey-abc123.pdf");
    }
}
