//! Rich-text note documents and their binary encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Character standing in for an embedded image in plain text.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Leading bytes of every encoded document.
const MAGIC: &[u8] = b"DAYBOOK-RT1\n";

/// Character styling carried by a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Style {
    pub const PLAIN: Style = Style {
        bold: false,
        italic: false,
        underline: false,
    };

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::PLAIN
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::PLAIN
        }
    }

    pub fn underline() -> Self {
        Self {
            underline: true,
            ..Self::PLAIN
        }
    }
}

/// An image embedded in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub name: String,
    pub mime: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data,
        }
    }

    /// Guesses a MIME type from a file extension.
    pub fn mime_for_extension(extension: &str) -> &'static str {
        match extension.to_ascii_lowercase().as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "tif" | "tiff" => "image/tiff",
            "heic" => "image/heic",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        }
    }
}

/// One run of a document: styled text or an embedded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Run {
    Text {
        text: String,
        #[serde(default)]
        style: Style,
    },
    Image(Image),
}

impl Run {
    /// Returns the run's contribution to the document's plain text.
    fn push_plain(&self, out: &mut String) {
        match self {
            Run::Text { text, .. } => out.push_str(text),
            Run::Image(_) => out.push(OBJECT_REPLACEMENT),
        }
    }
}

/// A rich-text note document: an ordered list of runs.
///
/// Text runs never hold empty strings, and adjacent text runs never share
/// a style; both are merged away on construction so that equal documents
/// always encode to identical bytes.
///
/// # Examples
///
/// ```
/// use daybook::domain::{RichDocument, Style};
///
/// let mut doc = RichDocument::new();
/// doc.push_text("Buy ", Style::PLAIN);
/// doc.push_text("milk", Style::bold());
/// assert_eq!(doc.plain_text(), "Buy milk");
///
/// let bytes = doc.encode().unwrap();
/// assert_eq!(RichDocument::decode(&bytes).unwrap(), doc);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichDocument {
    runs: Vec<Run>,
}

/// Error returned when stored content is not a readable document.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("content is not a rich-text document (missing header)")]
    MissingHeader,

    #[error("malformed rich-text document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl RichDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding a single unstyled text run.
    pub fn from_plain_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.push_text(text, Style::PLAIN);
        doc
    }

    /// Builds a document from runs, normalizing them.
    pub fn from_runs(runs: impl IntoIterator<Item = Run>) -> Self {
        let mut doc = Self::new();
        for run in runs {
            doc.push(run);
        }
        doc
    }

    /// Appends a run, merging it into the previous one when styles match.
    pub fn push(&mut self, run: Run) {
        match run {
            Run::Text { text, style } => self.push_text(&text, style),
            Run::Image(image) => self.runs.push(Run::Image(image)),
        }
    }

    /// Appends styled text.
    pub fn push_text(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        if let Some(Run::Text {
            text: last,
            style: last_style,
        }) = self.runs.last_mut()
            && *last_style == style
        {
            last.push_str(text);
            return;
        }
        self.runs.push(Run::Text {
            text: text.to_string(),
            style,
        });
    }

    /// Appends an embedded image.
    pub fn push_image(&mut self, image: Image) {
        self.runs.push(Run::Image(image));
    }

    /// Returns the document's runs.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Replaces the runs, re-normalizing.
    pub(crate) fn set_runs(&mut self, runs: Vec<Run>) {
        *self = Self::from_runs(runs);
    }

    /// Returns the text with formatting stripped; images become U+FFFC.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            run.push_plain(&mut out);
        }
        out
    }

    pub fn has_images(&self) -> bool {
        self.runs.iter().any(|run| matches!(run, Run::Image(_)))
    }

    /// True when the document has nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Serializes the document to its storage blob.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut bytes = MAGIC.to_vec();
        serde_json::to_writer(&mut bytes, self)?;
        Ok(bytes)
    }

    /// Parses a storage blob.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let body = bytes.strip_prefix(MAGIC).ok_or(DecodeError::MissingHeader)?;
        let parsed: RichDocument = serde_json::from_slice(body)?;
        Ok(Self::from_runs(parsed.runs))
    }
}

/// Serde adapter storing image bytes as base64 text.
mod base64_bytes {
    use super::{Engine, STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
