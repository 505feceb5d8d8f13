//! In-memory .pptx fixtures.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const LOGO: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];

/// Stands for a soft line break among a paragraph's runs.
pub const BREAK: &str = "\n";

/// A text box; each inner slice is one paragraph's runs.
pub fn text_box(id: u32, paragraphs: &[&[&str]]) -> String {
    let mut xml = format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr wrap="square"/><a:lstStyle/>"#
    );
    for runs in paragraphs {
        xml.push_str("<a:p>");
        for run in *runs {
            if *run == BREAK {
                xml.push_str(r#"<a:br><a:rPr lang="en-US"/></a:br>"#);
                continue;
            }
            xml.push_str(r#"<a:r><a:rPr lang="en-US" dirty="0"/><a:t>"#);
            xml.push_str(run);
            xml.push_str("</a:t></a:r>");
        }
        xml.push_str(r#"<a:endParaRPr lang="en-US"/></a:p>"#);
    }
    xml.push_str("</p:txBody></p:sp>");
    xml
}

pub fn slide(shapes: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        shapes.concat()
    )
}

/// Build a presentation whose slides appear in the given order.
///
/// Slide parts are numbered in reverse so that presentation order and part
/// names disagree.
pub fn pptx(slides: &[String]) -> Vec<u8> {
    pptx_with_main_type(
        slides,
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
    )
}

pub fn pptx_with_main_type(slides: &[String], main_type: &str) -> Vec<u8> {
    let count = slides.len();
    let part_number = |index: usize| count - index;

    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="png" ContentType="image/png"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>"#,
    );
    content_types.push_str(&format!(
        r#"<Override PartName="/ppt/presentation.xml" ContentType="{main_type}"/>"#
    ));
    for index in 0..count {
        content_types.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            part_number(index)
        ));
    }
    content_types.push_str("</Types>");

    let mut presentation = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldIdLst>"#,
    );
    let mut presentation_rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for index in 0..count {
        presentation.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            256 + index,
            index + 10
        ));
        presentation_rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            index + 10,
            part_number(index)
        ));
    }
    presentation.push_str(r#"</p:sldIdLst><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#);
    presentation_rels.push_str("</Relationships>");

    let package_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#;

    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut add = |name: &str, data: &[u8], options: SimpleFileOptions| {
        zip.start_file(name, options).unwrap();
        zip.write_all(data).unwrap();
    };
    add("[Content_Types].xml", content_types.as_bytes(), deflated);
    add("_rels/.rels", package_rels.as_bytes(), deflated);
    add("ppt/presentation.xml", presentation.as_bytes(), deflated);
    add("ppt/_rels/presentation.xml.rels", presentation_rels.as_bytes(), deflated);
    for (index, xml) in slides.iter().enumerate() {
        add(
            &format!("ppt/slides/slide{}.xml", part_number(index)),
            xml.as_bytes(),
            deflated,
        );
    }
    add("ppt/media/image1.png", LOGO, stored);
    zip.finish().unwrap().into_inner()
}

/// Read one member of a .pptx.
pub fn member(pptx: &[u8], name: &str) -> Vec<u8> {
    use std::io::Read;
    let mut archive = zip::ZipArchive::new(Cursor::new(pptx)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    data
}
