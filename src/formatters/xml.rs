//! Nested XML rendering of a walk.
//!
//! Nesting is rebuilt from the depth of each node and the one after it, so no
//! tree is materialized: an element stays open while the next node is deeper,
//! is closed right away when the next node is a sibling, and closes the
//! skipped ancestor levels too when the next node is shallower.

use anyhow::Result;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::validate_sequence;
use crate::core::Node;

/// Fixed file name used by the CLI when the report is written to disk.
pub const RESULTS_FILE_NAME: &str = "Results.xml";

const ROOT_ELEMENT: &str = "Assemblies";
const MODULE_ELEMENT: &str = "Assembly";
const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-16"?>"#;

pub struct XmlFormatter {
    /// Break lines and indent nested elements by two spaces
    indent: bool,
    /// Start with an XML declaration naming UTF-16
    declaration: bool,
}

impl XmlFormatter {
    pub fn new() -> Self {
        Self {
            indent: true,
            declaration: true,
        }
    }

    pub fn with_indentation(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Writes the document to `output_path` as UTF-16 little endian with a
    /// byte order mark.
    pub fn format_to_file(&self, nodes: &[Node], output_path: &Path) -> Result<()> {
        let document = self.format_sequence(nodes)?;
        fs::write(output_path, encode_utf16le(&document))?;
        Ok(())
    }

    pub fn format_sequence(&self, nodes: &[Node]) -> Result<String> {
        let mut buf = Vec::new();
        self.write_document(nodes, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn write_document<W: Write>(&self, nodes: &[Node], writer: W) -> Result<()> {
        validate_sequence(nodes)?;

        let mut emitter = XmlEmitter::new(writer, self.indent);
        if self.declaration {
            emitter.write_declaration()?;
        }
        emitter.start_element(ROOT_ELEMENT, &[])?;

        let mut pending_closes = 0usize;
        for pair in nodes.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            emitter.start_element(MODULE_ELEMENT, &attributes(current))?;

            match next.depth.cmp(&current.depth) {
                Ordering::Equal => emitter.end_element()?,
                Ordering::Greater => pending_closes += 1,
                Ordering::Less => {
                    emitter.end_element()?;
                    for _ in 0..current.depth - next.depth {
                        emitter.end_element()?;
                        pending_closes -= 1;
                    }
                }
            }
        }

        if let Some(last) = nodes.last() {
            emitter.start_element(MODULE_ELEMENT, &attributes(last))?;
            emitter.end_element()?;
        }

        for _ in 0..pending_closes {
            emitter.end_element()?;
        }
        emitter.end_element()?;

        emitter.into_inner().flush()?;
        Ok(())
    }
}

impl Default for XmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn attributes(node: &Node) -> Vec<(&'static str, &str)> {
    let mut attrs = vec![("Name", node.name.as_str())];
    if !node.status.is_ok() {
        attrs.push(("Status", node.status.as_str()));
    }
    attrs
}

pub fn encode_utf16le(document: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + document.len() * 2);
    bytes.extend_from_slice(&[0xFF, 0xFE]);
    for unit in document.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Streaming element writer. A start tag is left unterminated until the next
/// write, so an element closed with no content comes out self-closed.
struct XmlEmitter<W> {
    writer: W,
    indent: bool,
    open: Vec<&'static str>,
    start_tag_pending: bool,
    at_start: bool,
}

impl<W: Write> XmlEmitter<W> {
    fn new(writer: W, indent: bool) -> Self {
        Self {
            writer,
            indent,
            open: Vec::new(),
            start_tag_pending: false,
            at_start: true,
        }
    }

    fn write_declaration(&mut self) -> io::Result<()> {
        self.writer.write_all(DECLARATION.as_bytes())?;
        self.at_start = false;
        Ok(())
    }

    /// Element names are written as is; attribute values are escaped.
    fn start_element(&mut self, name: &'static str, attrs: &[(&str, &str)]) -> io::Result<()> {
        self.finish_start_tag()?;
        self.break_line(self.open.len())?;
        self.writer.write_all(b"<")?;
        self.writer.write_all(name.as_bytes())?;
        for (key, value) in attrs {
            self.writer.write_all(b" ")?;
            self.writer.write_all(key.as_bytes())?;
            self.writer.write_all(b"=\"")?;
            self.writer
                .write_all(escape_attr_value(value).as_bytes())?;
            self.writer.write_all(b"\"")?;
        }
        self.open.push(name);
        self.start_tag_pending = true;
        Ok(())
    }

    fn end_element(&mut self) -> io::Result<()> {
        let name = self
            .open
            .pop()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no open element"))?;

        if self.start_tag_pending {
            self.start_tag_pending = false;
            return self.writer.write_all(b" />");
        }

        self.break_line(self.open.len())?;
        self.writer.write_all(b"</")?;
        self.writer.write_all(name.as_bytes())?;
        self.writer.write_all(b">")
    }

    fn finish_start_tag(&mut self) -> io::Result<()> {
        if self.start_tag_pending {
            self.start_tag_pending = false;
            self.writer.write_all(b">")?;
        }
        Ok(())
    }

    fn break_line(&mut self, level: usize) -> io::Result<()> {
        if !self.indent {
            return Ok(());
        }
        if !self.at_start {
            self.writer.write_all(b"\n")?;
        }
        self.at_start = false;
        self.writer.write_all(" ".repeat(level * 2).as_bytes())
    }

    fn into_inner(self) -> W {
        self.writer
    }
}

fn escape_attr_value(value: &str) -> Cow<'_, str> {
    if !value.chars().any(|c| escape_for(c).is_some()) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match escape_for(c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn escape_for(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '&' => Some("&amp;"),
        '\n' => Some("&#xA;"),
        '\r' => Some("&#xD;"),
        '\t' => Some("&#x9;"),
        // not representable in XML 1.0
        '\u{0}'..='\u{1F}' => Some("\u{FFFD}"),
        _ => None,
    }
}
