//! Content type discovery from `[Content_Types].xml`.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// Content type map for looking up content types by part name or extension.
///
/// Overrides (keyed by partname) win over defaults (keyed by lower-cased
/// extension), as the OPC discovery algorithm requires.
#[derive(Debug, Default)]
pub struct ContentTypeMap {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Parse content types from [Content_Types].xml.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    // <Default Extension="xml" ContentType="application/xml"/>
                    b"Default" => {
                        if let (Some(ext), Some(ct)) = Self::pair(e, b"Extension")? {
                            map.defaults.insert(ext.to_lowercase(), ct);
                        }
                    },
                    // <Override PartName="/ppt/presentation.xml" ContentType="..."/>
                    b"Override" => {
                        if let (Some(partname), Some(ct)) = Self::pair(e, b"PartName")? {
                            map.overrides.insert(partname, ct);
                        }
                    },
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!("Content types parse error: {}", e)));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Pull the key attribute and `ContentType` out of one element.
    fn pair(e: &BytesStart<'_>, key: &[u8]) -> Result<(Option<String>, Option<String>)> {
        let mut name = None;
        let mut content_type = None;
        for attr in e.attributes() {
            let attr = attr?;
            if attr.key.as_ref() == key {
                name = Some(attr.unescape_value()?.into_owned());
            } else if attr.key.as_ref() == b"ContentType" {
                content_type = Some(attr.unescape_value()?.into_owned());
            }
        }
        Ok((name, content_type))
    }

    /// Get the content type for a partname.
    pub fn get(&self, pack_uri: &PackURI) -> Result<&str> {
        // Partnames compare case-insensitively in OPC; try the exact spelling first
        if let Some(ct) = self.overrides.get(pack_uri.as_str()) {
            return Ok(ct.as_str());
        }
        if let Some((_, ct)) = self
            .overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(pack_uri.as_str()))
        {
            return Ok(ct.as_str());
        }

        self.defaults
            .get(&pack_uri.ext().to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(pack_uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;

    #[test]
    fn test_content_type_map() {
        let xml = br#"<?xml version="1.0"?>
            <Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
                <Default Extension="XML" ContentType="application/xml"/>
                <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
                <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
            </Types>"#;

        let map = ContentTypeMap::from_xml(xml).unwrap();

        let uri = PackURI::new("/docProps/app.xml").unwrap();
        assert_eq!(map.get(&uri).unwrap(), ct::XML);

        let uri = PackURI::new("/ppt/presentation.xml").unwrap();
        assert_eq!(map.get(&uri).unwrap(), ct::PML_PRESENTATION_MAIN);

        let uri = PackURI::new("/PPT/Presentation.xml").unwrap();
        assert_eq!(map.get(&uri).unwrap(), ct::PML_PRESENTATION_MAIN);

        let uri = PackURI::new("/ppt/media/image1.png").unwrap();
        assert!(matches!(map.get(&uri), Err(OpcError::ContentTypeNotFound(_))));
    }
}
