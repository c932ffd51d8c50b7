//! In-memory DOCX builders for tests.
//!
//! Compiled for this crate's own tests and, through the `test-util` feature,
//! for dependents that need document fixtures.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::docx::{DOCUMENT_PART, RELATIONSHIPS_PART};

const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:v="urn:schemas-microsoft-com:vml" "#,
    r#"xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006""#,
);

/// Build a DOCX archive around the given body XML.
/// Media entry `i` is referenced by relationship `rIdImg{i+1}`.
pub fn build_docx(body: &str, media: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NAMESPACES}><w:body>{body}</w:body></w:document>"#
    );
    write_entry(&mut zip, DOCUMENT_PART, document.as_bytes());

    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (idx, (name, bytes)) in media.iter().enumerate() {
        rels.push_str(&format!(
            r#"<Relationship Id="rIdImg{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/{}"/>"#,
            idx + 1,
            name
        ));
        write_entry(&mut zip, &format!("word/media/{name}"), bytes);
    }
    rels.push_str("</Relationships>");
    write_entry(&mut zip, RELATIONSHIPS_PART, rels.as_bytes());

    zip.finish().expect("finish in-memory docx").into_inner()
}

fn write_entry(zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, bytes: &[u8]) {
    zip.start_file(name, SimpleFileOptions::default())
        .expect("start in-memory docx entry");
    zip.write_all(bytes).expect("write in-memory docx entry");
}

/// One paragraph with a single plain run per line.
pub fn paragraphs(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                html_escape::encode_text(line)
            )
        })
        .collect()
}

/// A table with one cell per entry of each row, each cell a single paragraph.
pub fn table(rows: &[&[&str]]) -> String {
    let rows: String = rows
        .iter()
        .map(|cells| {
            let cells: String = cells
                .iter()
                .map(|cell| format!("<w:tc>{}</w:tc>", paragraphs(&[cell])))
                .collect();
            format!("<w:tr>{cells}</w:tr>")
        })
        .collect();
    format!("<w:tbl>{rows}</w:tbl>")
}

/// Paragraph holding one embedded DrawingML image.
pub fn image_paragraph(rel_id: &str) -> String {
    format!(
        r#"<w:p><w:r><w:drawing><a:graphic><a:graphicData><a:blip r:embed="{rel_id}"><a:extLst/></a:blip></a:graphicData></a:graphic></w:drawing></w:r></w:p>"#
    )
}
