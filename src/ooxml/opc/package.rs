//! In-memory OPC package.
//!
//! OpcPackage keeps every archive member (in archive order) together with the
//! parsed content-type map and package-level relationships. Parts are addressed
//! by PackURI; XML parts are handed out as raw bytes and parsed by the layer
//! that understands them. Replacing a part's bytes and serializing the package
//! leaves every other member exactly as it was read.

use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::content_types::ContentTypeMap;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::{PhysMember, PhysPkgReader, PhysPkgWriter};
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

pub struct OpcPackage {
    /// Archive members in their original order
    members: Vec<PhysMember>,

    /// Member name -> index into `members`
    index: HashMap<String, usize>,

    content_types: ContentTypeMap,

    /// Package-level relationships (`/_rels/.rels`)
    rels: Relationships,
}

impl OpcPackage {
    /// Open an OPC package from a file.
    ///
    /// # Example
    /// ```no_run
    /// use deckfill::ooxml::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("Templates/awards.pptx")?;
    /// println!("{} members", pkg.member_count());
    /// # Ok::<(), deckfill::ooxml::opc::error::OpcError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_members(PhysPkgReader::open(path)?)
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_members(PhysPkgReader::from_reader(reader)?)
    }

    /// Load an OPC package from in-memory bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_members(PhysPkgReader::from_bytes(data)?)
    }

    fn from_members(members: Vec<PhysMember>) -> Result<Self> {
        let index = members
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_dir)
            .map(|(i, m)| (m.name.clone(), i))
            .collect::<HashMap<_, _>>();

        let mut package = Self {
            members,
            index,
            content_types: ContentTypeMap::default(),
            rels: Relationships::new(PACKAGE_URI.to_string()),
        };

        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        package.content_types = ContentTypeMap::from_xml(package.blob(&content_types_uri)?)?;

        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        package.rels = package
            .part_rels(&package_uri)?
            .ok_or_else(|| OpcError::PartNotFound("/_rels/.rels".to_string()))?;

        Ok(package)
    }

    /// Partname of the main document part (for PowerPoint, `presentation.xml`).
    pub fn main_document_partname(&self) -> Result<PackURI> {
        let rel = self.rels.part_with_reltype(&[
            relationship_type::OFFICE_DOCUMENT,
            relationship_type::OFFICE_DOCUMENT_STRICT,
        ])?;
        self.rels.resolve(rel)
    }

    /// Raw bytes of a part.
    pub fn blob(&self, partname: &PackURI) -> Result<&[u8]> {
        self.member_index(partname)
            .map(|i| self.members[i].blob.as_slice())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Content type of a part.
    pub fn content_type(&self, partname: &PackURI) -> Result<&str> {
        self.content_types.get(partname)
    }

    /// Relationships whose source is `source` (a part or the package URI).
    ///
    /// Returns `None` when the source has no `.rels` member.
    pub fn part_rels(&self, source: &PackURI) -> Result<Option<Relationships>> {
        let rels_uri = source.rels_uri().map_err(OpcError::InvalidPackUri)?;
        match self.member_index(&rels_uri) {
            Some(i) => Relationships::from_xml(&self.members[i].blob, source.base_uri()).map(Some),
            None => Ok(None),
        }
    }

    /// Check if a part exists in the package.
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.member_index(partname).is_some()
    }

    /// Number of archive members, directories included.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Serialize the package to bytes, members in their original order.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with(&[])
    }

    /// Serialize the package with some parts' bytes replaced.
    ///
    /// Every override must name an existing part; it keeps that member's
    /// position and compression method.
    pub fn to_bytes_with(&self, overrides: &[(PackURI, Vec<u8>)]) -> Result<Vec<u8>> {
        let mut replaced: HashMap<usize, &[u8]> = HashMap::with_capacity(overrides.len());
        for (partname, blob) in overrides {
            let i = self
                .member_index(partname)
                .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))?;
            replaced.insert(i, blob.as_slice());
        }

        let mut writer = PhysPkgWriter::new();
        for (i, member) in self.members.iter().enumerate() {
            if member.is_dir {
                writer.add_directory(&member.name)?;
            } else {
                let blob = replaced.get(&i).copied().unwrap_or(member.blob.as_slice());
                writer.write(&member.name, blob, member.compression)?;
            }
        }
        writer.finish()
    }

    fn member_index(&self, partname: &PackURI) -> Option<usize> {
        self.index.get(partname.membername()).copied().or_else(|| {
            self.index
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(partname.membername()))
                .map(|(_, &i)| i)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use crate::ooxml::opc::phys_pkg::Compression;

    fn minimal_package() -> Vec<u8> {
        let mut writer = PhysPkgWriter::new();
        writer
            .write(
                "[Content_Types].xml",
                br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#,
                Compression::Deflated,
            )
            .unwrap();
        writer
            .write(
                "_rels/.rels",
                br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#,
                Compression::Deflated,
            )
            .unwrap();
        writer
            .write("ppt/presentation.xml", b"<p:presentation/>", Compression::Deflated)
            .unwrap();
        writer
            .write("ppt/media/logo.png", &[0x89, 0x50, 0x4E, 0x47], Compression::Stored)
            .unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_main_document_part() {
        let pkg = OpcPackage::from_bytes(&minimal_package()).unwrap();
        let main = pkg.main_document_partname().unwrap();
        assert_eq!(main.as_str(), "/ppt/presentation.xml");
        assert_eq!(pkg.content_type(&main).unwrap(), ct::PML_PRESENTATION_MAIN);
        assert_eq!(pkg.blob(&main).unwrap(), b"<p:presentation/>");
    }

    #[test]
    fn test_untouched_package_round_trips() {
        let original = minimal_package();
        let pkg = OpcPackage::from_bytes(&original).unwrap();
        assert_eq!(pkg.to_bytes().unwrap(), original);
    }

    #[test]
    fn test_override_replaces_only_that_part() {
        let pkg = OpcPackage::from_bytes(&minimal_package()).unwrap();
        let main = pkg.main_document_partname().unwrap();
        let bytes = pkg
            .to_bytes_with(&[(main.clone(), b"<p:presentation id=\"2\"/>".to_vec())])
            .unwrap();

        let reloaded = OpcPackage::from_bytes(&bytes).unwrap();
        assert_eq!(reloaded.blob(&main).unwrap(), b"<p:presentation id=\"2\"/>");
        let logo = PackURI::new("/ppt/media/logo.png").unwrap();
        assert_eq!(reloaded.blob(&logo).unwrap(), &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_missing_part() {
        let pkg = OpcPackage::from_bytes(&minimal_package()).unwrap();
        let missing = PackURI::new("/ppt/slides/slide9.xml").unwrap();
        assert!(!pkg.contains_part(&missing));
        assert!(matches!(pkg.blob(&missing), Err(OpcError::PartNotFound(_))));
        assert!(matches!(
            pkg.to_bytes_with(&[(missing, Vec::new())]),
            Err(OpcError::PartNotFound(_))
        ));
    }

    #[test]
    fn test_package_without_content_types() {
        let mut writer = PhysPkgWriter::new();
        writer.write("_rels/.rels", b"<Relationships/>", Compression::Deflated).unwrap();
        let bytes = writer.finish().unwrap();
        assert!(matches!(
            OpcPackage::from_bytes(&bytes),
            Err(OpcError::PartNotFound(_))
        ));
    }
}
