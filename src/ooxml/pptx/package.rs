/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::{OpcPackage, PackURI};
use crate::ooxml::pptx::presentation::Presentation;
use std::io::{Read, Seek};
use std::path::Path;

/// A PowerPoint (.pptx) package.
///
/// This is the main entry point for working with PowerPoint presentations.
/// It wraps an OPC package whose main part has been checked to be a
/// presentation (regular, macro-enabled, template or slideshow).
///
/// # Examples
///
/// ```rust,no_run
/// use deckfill::ooxml::pptx::Package;
///
/// let pkg = Package::open("Templates/awards.pptx")?;
/// let pres = pkg.presentation()?;
/// println!("Presentation has {} slides", pres.slide_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,

    /// Partname of the main presentation part
    main_partname: PackURI,
}

impl Package {
    /// Open a .pptx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Create a .pptx package from a reader.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use deckfill::ooxml::pptx::Package;
    /// use std::io::Cursor;
    ///
    /// let data = std::fs::read("Templates/awards.pptx")?;
    /// let pkg = Package::from_reader(Cursor::new(data))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    /// Create a .pptx package from in-memory bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main_partname = opc
            .main_document_partname()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {}", e)))?;

        // Verify it's a PowerPoint presentation by checking the main part's content type
        let content_type = opc.content_type(&main_partname)?;
        if !ct::PML_MAIN_PARTS.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::PML_MAIN_PARTS.join(" or "),
                got: content_type.to_string(),
            });
        }

        Ok(Self { opc, main_partname })
    }

    /// Load the presentation, parsing every slide.
    ///
    /// The presentation takes ownership of the package.
    pub fn presentation(self) -> Result<Presentation> {
        Presentation::load(self.opc, self.main_partname)
    }
}
