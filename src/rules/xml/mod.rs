//! Rules over XML documents.
//!
//! Files are read as raw bytes and parsed with `quick-xml`, so documents in
//! any ASCII-compatible encoding (UTF-8, ISO-8859-1, ...) are accepted. The
//! markup the rules look at (tag and attribute names, the declaration) is
//! ASCII in practice and is decoded lossily.

mod author_tag;
mod encoding;
mod unique_attribute;
mod xml_version;

pub use author_tag::AuthorTag;
pub use encoding::Encoding;
pub use unique_attribute::UniqueAttribute;
pub use xml_version::XmlVersionSpecified;

use crate::files;
use jxlint_common::RuleError;
use quick_xml::Reader;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use std::fs;
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Every `*.xml` file under `source_dir`
pub(crate) fn xml_files(source_dir: &Path) -> Result<Vec<PathBuf>, RuleError> {
    files::all_files_with_extension_in(source_dir, "xml")
}

/// Read and parse `file`. Malformed markup is an evaluation failure.
pub(crate) fn read(file: &Path) -> Result<XmlDocument, RuleError> {
    let bytes = fs::read(file).map_err(|e| RuleError::io(file, e))?;
    XmlDocument::parse(&bytes).map_err(|e| RuleError::message(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute {
    pub name: String,
    pub value: String,
}

/// The `<?xml ...?>` declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Declaration {
    pub version: Option<String>,
    pub encoding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tag {
    pub name: String,
    /// Line of the opening `<`, 1-indexed
    pub line: usize,
    /// In source order, repeated names included
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Default)]
pub(crate) struct XmlDocument {
    /// Only set when the declaration is the first thing in the document
    pub declaration: Option<Declaration>,
    /// Every start (or empty-element) tag in document order
    pub tags: Vec<Tag>,
}

/// Parse error with the line the reader stopped at
#[derive(Debug, thiserror::Error)]
#[error("malformed XML at line {line}: {message}")]
pub(crate) struct MalformedXml {
    pub line: usize,
    pub message: String,
}

impl XmlDocument {
    pub(crate) fn parse(content: &[u8]) -> Result<Self, MalformedXml> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

        let mut reader = Reader::from_reader(content);
        reader.config_mut().trim_text(false);

        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(
                content
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| **b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();
        let line_of = |pos: u64| line_starts.partition_point(|&start| start <= pos as usize);

        let mut document = XmlDocument::default();
        let mut buf = Vec::new();
        let mut first = true;

        loop {
            // Whitespace is reported as text, so this is the offset of the next `<`
            let start = reader.buffer_position();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Decl(decl)) if first => {
                    document.declaration = Some(declaration(&decl));
                }
                Ok(Event::Start(e) | Event::Empty(e)) => {
                    document.tags.push(tag(&e, line_of(start)));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(MalformedXml {
                        line: line_of(reader.buffer_position()),
                        message: e.to_string(),
                    });
                }
                Ok(_) => {}
            }
            first = false;
            buf.clear();
        }

        Ok(document)
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn declaration(decl: &BytesDecl<'_>) -> Declaration {
    Declaration {
        version: decl.version().ok().map(|v| lossy(&v)),
        encoding: decl.encoding().and_then(Result::ok).map(|e| lossy(&e)),
    }
}

fn tag(start: &BytesStart<'_>, line: usize) -> Tag {
    let mut attributes = start.attributes();
    // Keep repeated names; duplicates are reported by a rule
    attributes.with_checks(false);

    Tag {
        name: lossy(start.name().as_ref()),
        line,
        attributes: attributes
            .flatten()
            .map(|attr| Attribute {
                name: lossy(attr.key.as_ref()),
                value: lossy(&attr.value),
            })
            .collect(),
    }
}
