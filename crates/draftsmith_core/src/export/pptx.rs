//! crates/draftsmith_core/src/export/pptx.rs
//!
//! Serializes a section list into a minimal PresentationML package: a title
//! slide bearing the project title, then one content slide per section on a
//! fixed title-and-body layout. Slide order follows section order.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{xml_escape, ExportError};
use crate::domain::Section;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>"#,
    r#"</Relationships>"#,
);

/// Writes the complete `.pptx` package into an in-memory buffer.
pub(crate) fn write_deck(title: &str, sections: &[Section]) -> Result<Vec<u8>, ExportError> {
    let slide_count = 1 + sections.len();

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    archive.start_file("[Content_Types].xml", options)?;
    archive.write_all(content_types(slide_count).as_bytes())?;

    archive.start_file("_rels/.rels", options)?;
    archive.write_all(PACKAGE_RELS.as_bytes())?;

    archive.start_file("ppt/presentation.xml", options)?;
    archive.write_all(presentation_xml(slide_count).as_bytes())?;

    archive.start_file("ppt/_rels/presentation.xml.rels", options)?;
    archive.write_all(presentation_rels(slide_count).as_bytes())?;

    archive.start_file("ppt/slideMasters/slideMaster1.xml", options)?;
    archive.write_all(slide_master_xml().as_bytes())?;

    archive.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)?;
    archive.write_all(SLIDE_MASTER_RELS.as_bytes())?;

    archive.start_file("ppt/slideLayouts/slideLayout1.xml", options)?;
    archive.write_all(layout_xml("title").as_bytes())?;

    archive.start_file("ppt/slideLayouts/slideLayout2.xml", options)?;
    archive.write_all(layout_xml("tx").as_bytes())?;

    for layout in 1..=2 {
        archive.start_file(
            format!("ppt/slideLayouts/_rels/slideLayout{layout}.xml.rels"),
            options,
        )?;
        archive.write_all(LAYOUT_RELS.as_bytes())?;
    }

    archive.start_file("ppt/theme/theme1.xml", options)?;
    archive.write_all(theme_xml().as_bytes())?;

    // Slide 1 carries the project title on the title layout.
    archive.start_file("ppt/slides/slide1.xml", options)?;
    archive.write_all(title_slide_xml(title).as_bytes())?;
    archive.start_file("ppt/slides/_rels/slide1.xml.rels", options)?;
    archive.write_all(slide_rels(1).as_bytes())?;

    for (index, section) in sections.iter().enumerate() {
        let number = index + 2;
        // Only the bold markers are stripped here; hashes pass through to
        // the slide body, unlike the document path.
        let body = section.content.replace("**", "");

        archive.start_file(format!("ppt/slides/slide{number}.xml"), options)?;
        archive.write_all(content_slide_xml(&section.title, &body).as_bytes())?;
        archive.start_file(format!("ppt/slides/_rels/slide{number}.xml.rels"), options)?;
        archive.write_all(slide_rels(2).as_bytes())?;
    }

    let cursor = archive.finish()?;
    Ok(cursor.into_inner())
}

//=========================================================================================
// Package-level Parts
//=========================================================================================

fn content_types(slide_count: usize) -> String {
    let mut overrides = String::new();
    for number in 1..=slide_count {
        overrides.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{number}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>"
        ));
    }

    format!(
        "{XML_DECLARATION}\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout2.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
         {overrides}\
         </Types>"
    )
}

fn presentation_xml(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for number in 1..=slide_count {
        // Slide ids start at 256 by convention; rId1 is the master.
        slide_ids.push_str(&format!(
            "<p:sldId id=\"{id}\" r:id=\"rId{rid}\"/>",
            id = 255 + number,
            rid = number + 1
        ));
    }

    format!(
        "{XML_DECLARATION}\
         <p:presentation xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>{slide_ids}</p:sldIdLst>\
         <p:sldSz cx=\"9144000\" cy=\"6858000\"/>\
         <p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
         </p:presentation>"
    )
}

fn presentation_rels(slide_count: usize) -> String {
    let mut relationships = String::from(
        "<Relationship Id=\"rId1\" \
         Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" \
         Target=\"slideMasters/slideMaster1.xml\"/>",
    );
    for number in 1..=slide_count {
        relationships.push_str(&format!(
            "<Relationship Id=\"rId{rid}\" \
             Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" \
             Target=\"slides/slide{number}.xml\"/>",
            rid = number + 1
        ));
    }

    format!(
        "{XML_DECLARATION}\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         {relationships}</Relationships>"
    )
}

//=========================================================================================
// Master, Layouts and Theme
//=========================================================================================

const SLIDE_MASTER_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout2.xml"/>"#,
    r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>"#,
    r#"</Relationships>"#,
);

const LAYOUT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>"#,
    r#"</Relationships>"#,
);

fn slide_master_xml() -> String {
    format!(
        "{XML_DECLARATION}\
         <p:sldMaster xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:cSld>\
         <p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"FFFFFF\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>\
         {tree}\
         </p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" \
          accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" \
          accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst>\
         <p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/>\
         <p:sldLayoutId id=\"2147483650\" r:id=\"rId2\"/>\
         </p:sldLayoutIdLst>\
         </p:sldMaster>",
        tree = empty_shape_tree()
    )
}

fn layout_xml(layout_type: &str) -> String {
    format!(
        "{XML_DECLARATION}\
         <p:sldLayout xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\" type=\"{layout_type}\">\
         <p:cSld>{tree}</p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sldLayout>",
        tree = empty_shape_tree()
    )
}

/// The boilerplate theme every presentation part chain has to bottom out
/// in. Colors and fonts match the stock Office theme.
fn theme_xml() -> String {
    let fill = "<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>";
    let line = "<a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>";
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";

    format!(
        "{XML_DECLARATION}\
         <a:theme xmlns:a=\"{NS_A}\" name=\"Office\">\
         <a:themeElements>\
         <a:clrScheme name=\"Office\">\
         <a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
         <a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"44546A\"/></a:dk2>\
         <a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1>\
         <a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>\
         <a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5>\
         <a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
         <a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
         </a:clrScheme>\
         <a:fontScheme name=\"Office\">\
         <a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"Office\">\
         <a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst>\
         <a:lnStyleLst>{line}{line}{line}</a:lnStyleLst>\
         <a:effectStyleLst>{effect}{effect}{effect}</a:effectStyleLst>\
         <a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst>\
         </a:fmtScheme>\
         </a:themeElements>\
         </a:theme>"
    )
}

//=========================================================================================
// Slides
//=========================================================================================

fn slide_rels(layout: usize) -> String {
    format!(
        "{XML_DECLARATION}\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" \
         Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" \
         Target=\"../slideLayouts/slideLayout{layout}.xml\"/>\
         </Relationships>"
    )
}

fn title_slide_xml(title: &str) -> String {
    let title_shape = placeholder_shape(
        2,
        "Title 1",
        r#"type="ctrTitle""#,
        (685800, 2130425, 7772400, 1470025),
        title,
    );
    slide_xml(&title_shape)
}

fn content_slide_xml(title: &str, body: &str) -> String {
    let title_shape = placeholder_shape(
        2,
        "Title 1",
        r#"type="title""#,
        (457200, 274638, 8229600, 1143000),
        title,
    );
    let body_shape = placeholder_shape(
        3,
        "Content Placeholder 2",
        r#"type="body" idx="1""#,
        (457200, 1600200, 8229600, 4525963),
        body,
    );
    slide_xml(&format!("{title_shape}{body_shape}"))
}

fn slide_xml(shapes: &str) -> String {
    format!(
        "{XML_DECLARATION}\
         <p:sld xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr/>\
         {shapes}\
         </p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sld>"
    )
}

fn empty_shape_tree() -> String {
    "<p:spTree>\
     <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
     <p:grpSpPr/>\
     </p:spTree>"
        .to_string()
}

/// One placeholder shape with an explicit frame. `placeholder` is the
/// attribute list of the `<p:ph>` element, e.g. `type="body" idx="1"`. The
/// text goes in verbatim as a single run: no per-line bullet splitting.
fn placeholder_shape(
    id: usize,
    name: &str,
    placeholder: &str,
    frame: (i64, i64, i64, i64),
    text: &str,
) -> String {
    let (x, y, cx, cy) = frame;
    format!(
        "<p:sp>\
         <p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name}\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph {placeholder}/></p:nvPr></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/>\
         <a:p><a:r><a:t>{text}</a:t></a:r></a:p>\
         </p:txBody></p:sp>",
        text = xml_escape(text)
    )
}
