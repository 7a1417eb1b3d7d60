//! A flat, read-only view of an XML document.
//!
//! Alarm exports are only ever queried for all elements with a given name, so
//! the document keeps every element in document order together with its
//! attributes, and nothing else. Names are compared by local name, ignoring
//! any namespace prefix.

use std::{fs, io, path::Path};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

/// An element and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    /// The element's local name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unescaped value of the named attribute, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, DocumentError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| DocumentError::Attribute {
                element: name.clone(),
                message: e.to_string(),
            })?;
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| DocumentError::Attribute {
                    element: name.clone(),
                    message: e.to_string(),
                })?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self { name, attributes })
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Reads and parses the document at the given path.
    ///
    /// UTF-8 and byte-order-marked UTF-16 files are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid text, or is
    /// not well-formed XML.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let bytes = fs::read(path)?;
        let text = decode(&bytes)?;
        Self::parse(&text)
    }

    /// Parses a document from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed XML: a syntax error, a
    /// mismatched or missing end tag, a malformed attribute, a missing or
    /// repeated root element, or text outside the root element.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        let mut elements = Vec::new();
        let mut open: Vec<String> = Vec::new();
        let mut has_root = false;

        loop {
            let event = reader.read_event().map_err(|e| DocumentError::Syntax {
                position: reader.buffer_position(),
                message: e.to_string(),
            })?;

            match event {
                Event::Start(start) => {
                    check_root(open.is_empty(), &mut has_root)?;
                    let element = Element::from_start(&start)?;
                    open.push(element.name.clone());
                    elements.push(element);
                }
                Event::Empty(start) => {
                    check_root(open.is_empty(), &mut has_root)?;
                    elements.push(Element::from_start(&start)?);
                }
                Event::End(_) => {
                    open.pop();
                }
                Event::Text(text) if open.is_empty() => {
                    if !text.iter().all(u8::is_ascii_whitespace) {
                        return Err(outside_root(&reader));
                    }
                }
                Event::CData(_) if open.is_empty() => return Err(outside_root(&reader)),
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(name) = open.pop() {
            return Err(DocumentError::Unclosed(name));
        }
        if !has_root {
            return Err(DocumentError::NoRoot);
        }

        Ok(Self { elements })
    }

    /// All elements with the given local name, in document order.
    pub fn descendants<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |element| element.name == name)
    }

    /// The total number of elements in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn check_root(at_top_level: bool, has_root: &mut bool) -> Result<(), DocumentError> {
    if at_top_level {
        if *has_root {
            return Err(DocumentError::MultipleRoots);
        }
        *has_root = true;
    }
    Ok(())
}

fn outside_root(reader: &Reader<&[u8]>) -> DocumentError {
    DocumentError::Syntax {
        position: reader.buffer_position(),
        message: "content outside the root element".to_string(),
    }
}

fn decode(bytes: &[u8]) -> Result<String, DocumentError> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => utf8(rest),
        [0xFF, 0xFE, rest @ ..] => utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16(rest, u16::from_be_bytes),
        _ => utf8(bytes),
    }
}

fn utf8(bytes: &[u8]) -> Result<String, DocumentError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| DocumentError::Encoding)
}

fn utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, DocumentError> {
    if bytes.len() % 2 != 0 {
        return Err(DocumentError::Encoding);
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| DocumentError::Encoding)
}

/// Errors that make a document unusable.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read document: {0}")]
    Io(#[from] io::Error),

    /// The file is neither UTF-8 nor UTF-16 with a byte order mark.
    #[error("document is not valid UTF-8 or UTF-16 text")]
    Encoding,

    /// The XML is not well-formed.
    #[error("malformed XML at byte {position}: {message}")]
    Syntax {
        /// Byte offset the reader had reached.
        position: usize,
        /// The parser's description of the problem.
        message: String,
    },

    /// An attribute could not be read.
    #[error("malformed attribute on <{element}>: {message}")]
    Attribute {
        /// The element carrying the attribute.
        element: String,
        /// The parser's description of the problem.
        message: String,
    },

    /// The document ended inside an element.
    #[error("unexpected end of document: <{0}> is not closed")]
    Unclosed(String),

    /// The document contains no elements.
    #[error("document has no root element")]
    NoRoot,

    /// The document has more than one top-level element.
    #[error("document has more than one root element")]
    MultipleRoots,
}
