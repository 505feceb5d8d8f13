//! Relationships between parts of an OPC package.
//!
//! A `.rels` part lists the relationships of one source (a part, or the
//! package itself). Only reading is needed: template packages are written
//! back with their original `.rels` members untouched.

use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }
}

/// Relationships of a single source, in document order.
///
/// Sources rarely have more than a handful of relationships, so they are kept
/// inline in a SmallVec and looked up linearly.
#[derive(Debug)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    rels: SmallVec<[Relationship; 8]>,
}

impl Relationships {
    /// Create an empty collection for a source located in `base_uri`.
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: SmallVec::new(),
        }
    }

    /// Parse a `.rels` part.
    ///
    /// # Arguments
    /// * `xml` - Raw bytes of the `.rels` part
    /// * `base_uri` - Directory of the source the relationships belong to
    pub fn from_xml(xml: &[u8], base_uri: &str) -> Result<Self> {
        let mut rels = Self::new(base_uri.to_string());
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    if let Some(rel) = Self::parse_relationship(e)? {
                        rels.rels.push(rel);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {}", e))),
                _ => {},
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read one `<Relationship>` element; entries missing Id, Type or Target are skipped.
    fn parse_relationship(e: &BytesStart<'_>) -> Result<Option<Relationship>> {
        let mut r_id = None;
        let mut reltype = None;
        let mut target_ref = None;
        let mut is_external = false;

        for attr in e.attributes() {
            let attr = attr?;
            match attr.key.as_ref() {
                b"Id" => r_id = Some(attr.unescape_value()?.into_owned()),
                b"Type" => reltype = Some(attr.unescape_value()?.into_owned()),
                b"Target" => target_ref = Some(attr.unescape_value()?.into_owned()),
                b"TargetMode" => is_external = attr.unescape_value()? == target_mode::EXTERNAL,
                _ => {},
            }
        }

        Ok(match (r_id, reltype, target_ref) {
            (Some(r_id), Some(reltype), Some(target_ref)) => Some(Relationship {
                r_id,
                reltype,
                target_ref,
                is_external,
            }),
            _ => None,
        })
    }

    /// Look up a relationship by its rId.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// First relationship whose type is any of `reltypes`.
    pub fn part_with_reltype(&self, reltypes: &[&str]) -> Result<&Relationship> {
        self.rels
            .iter()
            .find(|rel| reltypes.contains(&rel.reltype.as_str()))
            .ok_or_else(|| OpcError::RelationshipNotFound(format!("reltype: {}", reltypes.join(" | "))))
    }

    /// Resolve an internal relationship to the partname it targets.
    pub fn target_partname(&self, r_id: &str) -> Result<PackURI> {
        let rel = self
            .get(r_id)
            .ok_or_else(|| OpcError::RelationshipNotFound(format!("rId: {}", r_id)))?;
        self.resolve(rel)
    }

    /// Resolve a relationship of this collection to an absolute partname.
    pub fn resolve(&self, rel: &Relationship) -> Result<PackURI> {
        if rel.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} targets external resource {}",
                rel.r_id, rel.target_ref
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &rel.target_ref).map_err(OpcError::InvalidPackUri)
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Whether the source has no relationships.
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}
