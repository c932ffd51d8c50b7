//! DOCX to HTML conversion.
//!
//! A `.docx` file is a ZIP archive. Parts read here:
//! - `word/document.xml`: paragraphs, runs, tables, drawings
//! - `word/_rels/document.xml.rels`: relationship IDs to media paths
//!
//! Every paragraph becomes a `<p>`, whatever its style or whether it sits in
//! a table cell, because the quiz convention is line based. Images are inlined as base64 `data:` URIs so the
//! HTML is self-contained.

use base64::Engine;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ConvertError, Result};

pub(crate) const DOCUMENT_PART: &str = "word/document.xml";
pub(crate) const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";

type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Convert DOCX bytes into an HTML fragment with inline images.
pub fn docx_to_html(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let document = read_entry(&mut archive, DOCUMENT_PART)?
        .ok_or_else(|| ConvertError::MissingPart(DOCUMENT_PART.to_string()))?;
    let relationships = match read_entry(&mut archive, RELATIONSHIPS_PART)? {
        Some(xml) => parse_relationships(&String::from_utf8_lossy(&xml))?,
        None => HashMap::new(),
    };

    let mut writer = HtmlWriter::new(&mut archive, &relationships);
    writer.write_document(&String::from_utf8_lossy(&document))?;
    Ok(writer.finish())
}

/// Read a ZIP entry, `None` when the archive has no such entry.
fn read_entry(archive: &mut Archive<'_>, name: &str) -> Result<Option<Vec<u8>>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(Some(bytes))
}

#[derive(Debug)]
struct Relationship {
    target: String,
    external: bool,
}

/// Parse the relationships part into a map from ID (e.g. "rId7") to target.
fn parse_relationships(xml: &str) -> Result<HashMap<String, Relationship>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut relationships = HashMap::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr_value(&e, b"Id")?;
                let target = attr_value(&e, b"Target")?;
                let external = attr_value(&e, b"TargetMode")?.as_deref() == Some("External");
                if let (Some(id), Some(target)) = (id, target) {
                    relationships.insert(id, Relationship { target, external });
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(relationships)
}

/// Look up an attribute by local name, ignoring its namespace prefix.
fn attr_value(element: &BytesStart, key: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// `<w:b/>` is on, `<w:b w:val="0"/>` is off.
fn toggle_on(element: &BytesStart) -> Result<bool> {
    Ok(!matches!(
        attr_value(element, b"val")?.as_deref(),
        Some("0" | "false" | "off" | "none")
    ))
}

/// Archive path of a media target, which is relative to `word/` unless absolute.
fn media_path(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else if let Some(parent) = target.strip_prefix("../") {
        parent.to_string()
    } else {
        format!("word/{target}")
    }
}

fn image_mime(path: &str) -> String {
    match mime_guess::from_path(path).first_raw() {
        Some(mime) if mime.starts_with("image/") => mime.to_string(),
        _ => {
            let extension = path.rsplit_once('.').map_or("unknown", |(_, ext)| ext);
            format!("image/{}", extension.to_ascii_lowercase())
        }
    }
}

#[derive(Debug, Default)]
struct Run {
    html: String,
    bold: bool,
    italic: bool,
}

impl Run {
    fn same_format(&self, other: &Run) -> bool {
        self.bold == other.bold && self.italic == other.italic
    }

    fn into_html(self) -> String {
        let mut html = self.html;
        if self.italic {
            html = format!("<em>{html}</em>");
        }
        if self.bold {
            html = format!("<strong>{html}</strong>");
        }
        html
    }
}

/// Closed runs of one paragraph. Adjacent runs with the same formatting are
/// merged so `<strong>` does not break up inside a word.
#[derive(Debug, Default)]
struct Paragraph {
    segments: Vec<Run>,
}

impl Paragraph {
    fn push(&mut self, mut run: Run) {
        if run.html.trim().is_empty() {
            run.bold = false;
            run.italic = false;
        }
        match self.segments.last_mut() {
            Some(last) if last.same_format(&run) => last.html.push_str(&run.html),
            _ => self.segments.push(run),
        }
    }

    fn into_html(self) -> String {
        self.segments.into_iter().map(Run::into_html).collect()
    }
}

struct HtmlWriter<'a, 'b> {
    archive: &'a mut Archive<'b>,
    relationships: &'a HashMap<String, Relationship>,
    html: String,
    paragraphs: Vec<Paragraph>,
    runs: Vec<Run>,
    in_text: bool,
    paragraph_props: usize,
    fallback_depth: usize,
    images: usize,
}

impl<'a, 'b> HtmlWriter<'a, 'b> {
    fn new(archive: &'a mut Archive<'b>, relationships: &'a HashMap<String, Relationship>) -> Self {
        Self {
            archive,
            relationships,
            html: String::new(),
            paragraphs: Vec::new(),
            runs: Vec::new(),
            in_text: false,
            paragraph_props: 0,
            fallback_depth: 0,
            images: 0,
        }
    }

    fn write_document(&mut self, xml: &str) -> Result<()> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Eof => break,
                // mc:Fallback repeats the mc:Choice content for old readers
                Event::Start(e) if e.local_name().as_ref() == b"Fallback" => {
                    self.fallback_depth += 1;
                }
                Event::End(e) if e.local_name().as_ref() == b"Fallback" => {
                    self.fallback_depth = self.fallback_depth.saturating_sub(1);
                }
                _ if self.fallback_depth > 0 => {}
                Event::Start(e) => self.handle_start(&e)?,
                Event::Empty(e) => self.handle_empty(&e)?,
                Event::End(e) => self.handle_end(e.local_name().as_ref()),
                Event::Text(t) if self.in_text => {
                    let text = t.unescape()?;
                    let escaped = html_escape::encode_text(&text);
                    if let Some(run) = self.runs.last_mut() {
                        run.html.push_str(&escaped);
                    }
                }
                _ => {}
            }
            buf.clear();
        }
        Ok(())
    }

    fn finish(self) -> String {
        tracing::debug!(images = self.images, bytes = self.html.len(), "docx converted to html");
        self.html
    }

    fn handle_start(&mut self, e: &BytesStart) -> Result<()> {
        match e.local_name().as_ref() {
            b"p" => self.paragraphs.push(Paragraph::default()),
            b"pPr" => self.paragraph_props += 1,
            b"r" => self.runs.push(Run::default()),
            b"t" => self.in_text = true,
            // a:blip usually carries an extLst child, so it arrives as a start tag
            _ => self.handle_empty(e)?,
        }
        Ok(())
    }

    fn handle_empty(&mut self, e: &BytesStart) -> Result<()> {
        match e.local_name().as_ref() {
            b"b" if self.paragraph_props == 0 => {
                let on = toggle_on(e)?;
                if let Some(run) = self.runs.last_mut() {
                    run.bold = on;
                }
            }
            b"i" if self.paragraph_props == 0 => {
                let on = toggle_on(e)?;
                if let Some(run) = self.runs.last_mut() {
                    run.italic = on;
                }
            }
            b"br" => {
                if attr_value(e, b"type")?.as_deref() != Some("page") {
                    self.push_inline("<br />");
                }
            }
            b"cr" => self.push_inline("<br />"),
            b"tab" if self.paragraph_props == 0 && !self.runs.is_empty() => {
                self.push_inline("\t");
            }
            b"blip" => {
                if let Some(rel_id) = attr_value(e, b"embed")? {
                    self.push_image(&rel_id)?;
                }
            }
            b"imagedata" => {
                if let Some(rel_id) = attr_value(e, b"id")? {
                    self.push_image(&rel_id)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_end(&mut self, name: &[u8]) {
        match name {
            b"p" => {
                if let Some(paragraph) = self.paragraphs.pop() {
                    let content = paragraph.into_html();
                    if !content.trim().is_empty() {
                        self.html.push_str("<p>");
                        self.html.push_str(&content);
                        self.html.push_str("</p>");
                    }
                }
            }
            b"pPr" => self.paragraph_props = self.paragraph_props.saturating_sub(1),
            b"r" => {
                if let Some(run) = self.runs.pop() {
                    match self.paragraphs.last_mut() {
                        Some(paragraph) => paragraph.push(run),
                        None => self.html.push_str(&run.into_html()),
                    }
                }
            }
            b"t" => self.in_text = false,
            _ => {}
        }
    }

    fn push_inline(&mut self, html: &str) {
        if let Some(run) = self.runs.last_mut() {
            run.html.push_str(html);
        } else if let Some(paragraph) = self.paragraphs.last_mut() {
            paragraph.push(Run {
                html: html.to_string(),
                ..Run::default()
            });
        } else {
            self.html.push_str(html);
        }
    }

    fn push_image(&mut self, rel_id: &str) -> Result<()> {
        let Some(relationship) = self.relationships.get(rel_id) else {
            tracing::debug!(rel_id, "image relationship not found");
            return Ok(());
        };
        if relationship.external {
            return Ok(());
        }

        let path = media_path(&relationship.target);
        let Some(bytes) = read_entry(self.archive, &path)? else {
            tracing::debug!(path = %path, "image part missing from archive");
            return Ok(());
        };

        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        let img = format!("<img src=\"data:{};base64,{}\" />", image_mime(&path), data);
        self.push_inline(&img);
        self.images += 1;
        Ok(())
    }
}
