//! Presentation: the slides of a package in presentation order.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::{OpcPackage, PackURI};
use crate::ooxml::pptx::slide::Slide;
use quick_xml::Reader;
use quick_xml::events::Event;

/// A loaded presentation.
///
/// Owns its package; every slide is parsed up front and can be edited in
/// place. Serializing writes the package back with only the edited slides
/// replaced.
///
/// # Examples
///
/// ```rust,no_run
/// use deckfill::ooxml::pptx::Package;
///
/// let mut pres = Package::open("Templates/awards.pptx")?.presentation()?;
/// println!("{} slides", pres.slide_count());
///
/// for slide in pres.slides_mut() {
///     for frame in slide.text_frames_mut() {
///         for paragraph in frame.paragraphs_mut() {
///             paragraph.replace_text("{year}", "2024");
///         }
///     }
/// }
/// std::fs::write("awards-2024.pptx", pres.to_bytes()?)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Presentation {
    package: OpcPackage,

    /// Partname of the main presentation part
    partname: PackURI,

    slides: Vec<Slide>,
}

impl Presentation {
    pub(crate) fn load(package: OpcPackage, partname: PackURI) -> Result<Self> {
        let rids = slide_rids(package.blob(&partname)?)?;
        let rels = package.part_rels(&partname)?.ok_or_else(|| {
            OoxmlError::PartNotFound(format!("relationships of {}", partname))
        })?;

        let mut slides = Vec::with_capacity(rids.len());
        for r_id in &rids {
            let slide_partname = rels.target_partname(r_id)?;
            let content_type = package.content_type(&slide_partname)?;
            if content_type != ct::PML_SLIDE {
                return Err(OoxmlError::InvalidContentType {
                    expected: ct::PML_SLIDE.to_string(),
                    got: content_type.to_string(),
                });
            }
            let xml = package.blob(&slide_partname)?.to_vec();
            slides.push(Slide::parse(slide_partname, xml)?);
        }

        Ok(Self {
            package,
            partname,
            slides,
        })
    }

    /// Partname of the main presentation part.
    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// Get the number of slides in the presentation.
    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slides_mut(&mut self) -> &mut [Slide] {
        &mut self.slides
    }

    /// Serialize the presentation as `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let overrides: Vec<(PackURI, Vec<u8>)> = self
            .slides
            .iter()
            .filter(|slide| slide.is_modified())
            .map(|slide| (slide.partname().clone(), slide.to_xml()))
            .collect();
        Ok(self.package.to_bytes_with(&overrides)?)
    }
}

/// Relationship ids of the slides listed in `p:sldIdLst`, in order.
fn slide_rids(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut rids = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sldId" => {
                // `id` is the numeric slide id; the relationship id is the namespaced `r:id`
                for attr in e.attributes() {
                    let attr = attr?;
                    if attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id" {
                        rids.push(attr.unescape_value()?.into_owned());
                        break;
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Ok(rids)
}
