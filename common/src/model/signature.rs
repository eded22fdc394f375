use serde::{Deserialize, Serialize};

/// A handwritten signature as produced by the signature pad.
///
/// The value is a self-describing data string (for example
/// `data:image/png;base64,iVBOR...`). It is carried through to the document
/// byte for byte; nothing here looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureImage(String);

impl SignatureImage {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    /// Returns `None` for an empty or whitespace-only capture.
    pub fn non_blank(data: impl Into<String>) -> Option<Self> {
        let data = data.into();
        if data.trim().is_empty() {
            None
        } else {
            Some(Self(data))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for SignatureImage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
