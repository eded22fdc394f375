use super::output_name;
use common::{DocumentBody, DocumentRenderer, RenderFailure, RenderedDocument};
use std::fs;
use std::path::{Path, PathBuf};

pub const MEDIA_TYPE: &str = "text/html; charset=utf-8";

/// Writes the composed markup to `{export_dir}/ba-survey-{digest}.html`.
pub struct HtmlFileRenderer {
    export_dir: PathBuf,
}

impl HtmlFileRenderer {
    pub fn new(export_dir: impl AsRef<Path>) -> Self {
        Self {
            export_dir: export_dir.as_ref().to_path_buf(),
        }
    }
}

impl DocumentRenderer for HtmlFileRenderer {
    fn render(&self, body: &DocumentBody) -> Result<RenderedDocument, RenderFailure> {
        fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join(output_name(&body.digest(), "html"));
        fs::write(&path, body.as_str())?;
        Ok(RenderedDocument {
            path,
            media_type: MEDIA_TYPE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_body;

    #[test]
    fn writes_markup_under_digest_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let export_dir = dir.path().join("nested").join("exports");
        let body = sample_body(None);

        let rendered = HtmlFileRenderer::new(&export_dir)
            .render(&body)
            .expect("rendered");

        let expected = format!("ba-survey-{}.html", body.digest());
        assert_eq!(rendered.file_name(), Some(expected.as_str()));
        assert_eq!(fs::read_to_string(&rendered.path).expect("read"), body.as_str());
    }

    #[test]
    fn unwritable_target_is_a_failure_not_a_panic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("exports");
        fs::write(&blocker, "not a directory").expect("write");

        let result = HtmlFileRenderer::new(&blocker).render(&sample_body(None));
        assert!(matches!(result, Err(RenderFailure::Io(_))));
        assert!(common::export(&sample_body(None), &HtmlFileRenderer::new(&blocker)).is_none());
    }
}
