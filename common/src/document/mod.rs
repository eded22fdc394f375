//! Composition of a survey record into a print-ready document body.
//!
//! [`compose`] is pure: no I/O, no clock, no randomness. The same record and
//! options always give a byte-identical body.

pub mod date;
pub mod layout;
pub mod markup;

use crate::model::options::RenderOptions;
use crate::model::survey::SurveyRecord;
use layout::FormLayout;
use std::fmt;

/// A composed BA Survey document.
///
/// Holds the self-contained HTML markup and the layout it was written from,
/// for renderers that build their own output from typed blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBody {
    layout: FormLayout,
    markup: String,
}

impl DocumentBody {
    pub fn as_str(&self) -> &str {
        &self.markup
    }

    pub fn into_string(self) -> String {
        self.markup
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.markup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }

    /// Hex md5 of the markup; stable across runs for the same document.
    pub fn digest(&self) -> String {
        format!("{:x}", md5::compute(self.markup.as_bytes()))
    }
}

impl fmt::Display for DocumentBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

pub fn compose(record: &SurveyRecord, options: &RenderOptions) -> DocumentBody {
    let layout = layout::build_layout(record, options);
    let markup = markup::write_markup(&layout);
    DocumentBody { layout, markup }
}
