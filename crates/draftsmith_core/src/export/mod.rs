//! crates/draftsmith_core/src/export/mod.rs
//!
//! Converts a project's ordered section list into a downloadable OOXML
//! artifact: a paginated Word document or a PowerPoint slide deck. The two
//! serializers assemble the package parts directly over an in-memory ZIP
//! container.

pub mod docx;
pub mod pptx;

use crate::domain::Section;
use tracing::warn;

/// An error raised while assembling an output package.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to assemble the output package: {0}")]
    Package(#[from] zip::result::ZipError),
    #[error("I/O error while writing the output package: {0}")]
    Io(#[from] std::io::Error),
}

/// The export target, resolved once from a project's `doc_type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Document,
    SlideDeck,
}

impl DocFormat {
    /// Resolves a `doc_type` tag. Only `"word"` and `"docx"` select the
    /// document path; every other value falls through to the slide deck,
    /// which is what clients storing `"powerpoint"` rely on. Tags that are
    /// not a known alias of either format get a log line but keep that
    /// behavior.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "word" | "docx" => DocFormat::Document,
            "powerpoint" | "pptx" => DocFormat::SlideDeck,
            other => {
                warn!("Unrecognized doc_type '{other}', exporting as a slide deck");
                DocFormat::SlideDeck
            }
        }
    }

    /// File extension for the download filename.
    pub fn extension(&self) -> &'static str {
        match self {
            DocFormat::Document => "docx",
            DocFormat::SlideDeck => "pptx",
        }
    }

    /// MIME media type for the download response.
    pub fn media_type(&self) -> &'static str {
        match self {
            DocFormat::Document => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocFormat::SlideDeck => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }
}

/// Serializes a project into a complete, in-memory package for the given
/// format. The returned buffer is ready for immediate transmission.
pub fn export_project(
    title: &str,
    sections: &[Section],
    format: DocFormat,
) -> Result<Vec<u8>, ExportError> {
    match format {
        DocFormat::Document => docx::write_document(title, sections),
        DocFormat::SlideDeck => pptx::write_deck(title, sections),
    }
}

/// Escapes the five XML-significant characters so user text can be embedded
/// in a part body.
pub(crate) fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn section(title: &str, content: &str) -> Section {
        Section {
            id: format!("s-{title}"),
            title: title.to_string(),
            content: content.to_string(),
            refinements: Vec::new(),
            feedback: Default::default(),
            status: Default::default(),
        }
    }

    fn open_archive(bytes: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
        ZipArchive::new(Cursor::new(bytes)).expect("output should be a readable zip")
    }

    fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut part = archive.by_name(name).expect("missing package part");
        let mut text = String::new();
        part.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn word_and_docx_tags_select_the_document_path() {
        assert_eq!(DocFormat::from_tag("word"), DocFormat::Document);
        assert_eq!(DocFormat::from_tag("docx"), DocFormat::Document);
    }

    #[test]
    fn every_other_tag_selects_the_slide_deck_path() {
        for tag in ["powerpoint", "pptx", "", "Word", "wordx", "pdf"] {
            assert_eq!(DocFormat::from_tag(tag), DocFormat::SlideDeck, "tag {tag:?}");
        }
    }

    #[test]
    fn format_metadata_matches_the_path() {
        assert_eq!(DocFormat::Document.extension(), "docx");
        assert_eq!(DocFormat::SlideDeck.extension(), "pptx");
        assert!(DocFormat::Document.media_type().contains("wordprocessingml"));
        assert!(DocFormat::SlideDeck.media_type().contains("presentationml"));
    }

    #[test]
    fn document_export_emits_title_and_section_headings() {
        let sections = [section("Intro", "**Hello** #World")];
        let bytes = export_project("AI Ethics", &sections, DocFormat::Document).unwrap();

        let mut archive = open_archive(bytes);
        let document = read_part(&mut archive, "word/document.xml");

        assert_eq!(document.matches(r#"<w:pStyle w:val="Title"/>"#).count(), 1);
        assert_eq!(document.matches(r#"<w:pStyle w:val="Heading1"/>"#).count(), 1);
        assert!(document.contains(">AI Ethics<"));
        assert!(document.contains(">Intro<"));
        // Both markdown markers are stripped on the document path.
        assert!(document.contains(">Hello World<"));
        assert!(!document.contains("**"));
        assert!(!document.contains('#'));
    }

    #[test]
    fn document_heading_count_is_one_more_than_section_count() {
        let sections = [
            section("One", "a"),
            section("Two", "b"),
            section("Three", "c"),
        ];
        let bytes = export_project("Report", &sections, DocFormat::Document).unwrap();

        let mut archive = open_archive(bytes);
        let document = read_part(&mut archive, "word/document.xml");
        let headings = document.matches(r#"<w:pStyle w:val="Title"/>"#).count()
            + document.matches(r#"<w:pStyle w:val="Heading1"/>"#).count();
        assert_eq!(headings, 1 + sections.len());
    }

    #[test]
    fn document_package_contains_the_mandatory_parts() {
        let bytes = export_project("Report", &[section("One", "a")], DocFormat::Document).unwrap();
        let mut archive = open_archive(bytes);
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/_rels/document.xml.rels",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {name}");
        }
    }

    #[test]
    fn slide_deck_has_one_slide_per_section_plus_title_slide() {
        let sections = [section("One", "a"), section("Two", "b")];
        let bytes = export_project("Pitch", &sections, DocFormat::SlideDeck).unwrap();

        let mut archive = open_archive(bytes);
        let slide_count = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
            .count();
        assert_eq!(slide_count, 1 + sections.len());

        let title_slide = read_part(&mut archive, "ppt/slides/slide1.xml");
        assert!(title_slide.contains(">Pitch<"));
        let second = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(second.contains(">One<"));
    }

    #[test]
    fn slide_bodies_strip_bold_markers_but_keep_hashes() {
        let sections = [section("Intro", "**Hello** #World")];
        let bytes = export_project("AI Ethics", &sections, DocFormat::SlideDeck).unwrap();

        let mut archive = open_archive(bytes);
        let slide = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide.contains(">Intro<"));
        assert!(slide.contains(">Hello #World<"));
        assert!(!slide.contains("**"));
    }

    #[test]
    fn slide_package_contains_the_mandatory_parts() {
        let bytes = export_project("Pitch", &[section("One", "a")], DocFormat::SlideDeck).unwrap();
        let mut archive = open_archive(bytes);
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideLayouts/slideLayout2.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/_rels/slide1.xml.rels",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {name}");
        }
    }

    #[test]
    fn user_text_is_xml_escaped_in_both_paths() {
        let sections = [section("Q&A", "Fish & <Chips>")];

        let bytes = export_project("R&D", &sections, DocFormat::Document).unwrap();
        let mut archive = open_archive(bytes);
        let document = read_part(&mut archive, "word/document.xml");
        assert!(document.contains("R&amp;D"));
        assert!(document.contains("Fish &amp; &lt;Chips&gt;"));

        let bytes = export_project("R&D", &sections, DocFormat::SlideDeck).unwrap();
        let mut archive = open_archive(bytes);
        let slide = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide.contains("Q&amp;A"));
        assert!(slide.contains("Fish &amp; &lt;Chips&gt;"));
    }

    #[test]
    fn empty_structure_still_produces_a_valid_package() {
        let bytes = export_project("Empty", &[], DocFormat::SlideDeck).unwrap();
        let mut archive = open_archive(bytes);
        let presentation = read_part(&mut archive, "ppt/presentation.xml");
        assert!(presentation.contains("sldIdLst"));
        assert!(archive.by_name("ppt/slides/slide1.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide2.xml").is_err());
    }
}
