//! Physical (ZIP) layer of an OPC package.
//!
//! Reading pulls every archive member into memory in archive order, keeping
//! the compression method it was stored with. Writing replays members in the
//! order given, so a package that is read and written back keeps its layout.

use crate::ooxml::opc::error::{OpcError, Result};
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// How a member's bytes are stored in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Stored,
    Deflated,
}

/// One archive member with its decompressed content.
#[derive(Debug, Clone)]
pub struct PhysMember {
    /// Member name as stored in the archive (no leading slash)
    pub name: String,

    /// Decompressed content; empty for directories
    pub blob: Vec<u8>,

    pub compression: Compression,

    pub is_dir: bool,
}

/// Physical package reader.
pub struct PhysPkgReader;

impl PhysPkgReader {
    /// Read every member of the package file at `path`.
    ///
    /// # Errors
    /// Returns `PackageNotFound` if the file does not exist, or a ZIP error if
    /// it is not a readable archive.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Vec<PhysMember>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Read every member from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Vec<PhysMember>> {
        let mut archive = ZipArchive::new(reader)?;
        let mut members = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let compression = match entry.compression() {
                CompressionMethod::Stored => Compression::Stored,
                _ => Compression::Deflated,
            };
            let is_dir = entry.is_dir();
            let name = entry.name().to_string();

            let mut blob = Vec::with_capacity(entry.size() as usize);
            if !is_dir {
                entry.read_to_end(&mut blob)?;
            }

            members.push(PhysMember {
                name,
                blob,
                compression,
                is_dir,
            });
        }

        Ok(members)
    }

    /// Read every member from an in-memory archive.
    #[inline]
    pub fn from_bytes(data: &[u8]) -> Result<Vec<PhysMember>> {
        Self::from_reader(Cursor::new(data))
    }
}

/// Physical package writer that builds the archive in memory.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Options for a member. The timestamp is pinned so identical content
    /// always serializes to identical bytes.
    fn options(compression: Compression) -> SimpleFileOptions {
        let method = match compression {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        };
        SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(zip::DateTime::default())
    }

    /// Write a file member.
    pub fn write(&mut self, name: &str, blob: &[u8], compression: Compression) -> Result<()> {
        self.archive.start_file(name, Self::options(compression))?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Write a directory member.
    pub fn add_directory(&mut self, name: &str) -> Result<()> {
        self.archive
            .add_directory(name, Self::options(Compression::Stored))?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}
