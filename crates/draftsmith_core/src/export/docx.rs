//! crates/draftsmith_core/src/export/docx.rs
//!
//! Serializes a section list into a minimal WordprocessingML package: one
//! `Title` heading for the project, then a `Heading1` plus one body
//! paragraph per section.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{xml_escape, ExportError};
use crate::domain::Section;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
    r#"</Types>"#,
);

const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#,
);

const DOCUMENT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"</Relationships>"#,
);

/// Paragraph styles for the project title and the section headings. Word
/// falls back to `Normal` for everything else.
const STYLES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:qFormat/>"#,
    r#"<w:rPr><w:b/><w:sz w:val="56"/><w:szCs w:val="56"/></w:rPr></w:style>"#,
    r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:qFormat/>"#,
    r#"<w:rPr><w:b/><w:sz w:val="32"/><w:szCs w:val="32"/></w:rPr></w:style>"#,
    r#"</w:styles>"#,
);

/// Writes the complete `.docx` package into an in-memory buffer.
pub(crate) fn write_document(title: &str, sections: &[Section]) -> Result<Vec<u8>, ExportError> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    archive.start_file("[Content_Types].xml", options)?;
    archive.write_all(CONTENT_TYPES.as_bytes())?;

    archive.start_file("_rels/.rels", options)?;
    archive.write_all(PACKAGE_RELS.as_bytes())?;

    archive.start_file("word/_rels/document.xml.rels", options)?;
    archive.write_all(DOCUMENT_RELS.as_bytes())?;

    archive.start_file("word/styles.xml", options)?;
    archive.write_all(STYLES.as_bytes())?;

    archive.start_file("word/document.xml", options)?;
    archive.write_all(document_xml(title, sections).as_bytes())?;

    let cursor = archive.finish()?;
    Ok(cursor.into_inner())
}

fn document_xml(title: &str, sections: &[Section]) -> String {
    let mut body = String::new();
    body.push_str(&styled_paragraph("Title", title));

    for section in sections {
        body.push_str(&styled_paragraph("Heading1", &section.title));
        // Crude markdown-marker removal, not a markdown parser. The slide
        // path strips only the bold markers; this path also drops hashes.
        let clean = section.content.replace("**", "").replace('#', "");
        body.push_str(&plain_paragraph(&clean));
    }

    format!(
        "{XML_DECLARATION}\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}<w:sectPr/></w:body></w:document>"
    )
}

fn styled_paragraph(style: &str, text: &str) -> String {
    format!(
        "<w:p><w:pPr><w:pStyle w:val=\"{style}\"/></w:pPr>{run}</w:p>",
        run = text_run(text)
    )
}

fn plain_paragraph(text: &str) -> String {
    format!("<w:p>{run}</w:p>", run = text_run(text))
}

fn text_run(text: &str) -> String {
    format!(
        "<w:r><w:t xml:space=\"preserve\">{}</w:t></w:r>",
        xml_escape(text)
    )
}
