//! Input acquisition
//!
//! Opens almanac sources as a `BufRead`, detecting gzip/bzip2 compression by
//! extension or magic bytes. Large plain files are memory mapped; `-` reads
//! from stdin.

use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Plain files at or above this size are memory mapped (64MB)
pub const MMAP_THRESHOLD: u64 = 64 * 1024 * 1024;

/// Compression format of an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

impl CompressionFormat {
    /// Classify by extension first, then by leading bytes
    pub fn sniff(extension: &str, magic: &[u8]) -> Self {
        if extension == "gz" || magic.starts_with(&[0x1f, 0x8b]) {
            CompressionFormat::Gzip
        } else if extension == "bz2" || magic.starts_with(b"BZh") {
            CompressionFormat::Bzip2
        } else {
            CompressionFormat::Plain
        }
    }
}

/// Detect compression format from file path and content
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    Ok(CompressionFormat::sniff(extension, &magic[..bytes_read]))
}

/// Read-only memory map exposed as `BufRead`
pub struct MappedReader {
    mmap: Mmap,
    position: usize,
}

impl MappedReader {
    pub fn new(file: &File) -> io::Result<Self> {
        // SAFETY: the input file is not expected to change while mapped
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self { mmap, position: 0 })
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }
}

impl Read for MappedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.mmap[self.position..];
        let n = buf.len().min(remaining.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(n)
    }
}

impl BufRead for MappedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(&self.mmap[self.position..])
    }

    fn consume(&mut self, amt: usize) {
        self.position = (self.position + amt).min(self.mmap.len());
    }
}

/// Open an input source for line-oriented reading
///
/// `-` selects stdin. Compressed files are decoded transparently.
pub fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        debug!("Reading almanac from stdin");
        return Ok(Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, io::stdin())));
    }

    let format = detect_compression(path)?;
    let file = File::open(path)?;
    debug!("Opening {} as {:?}", path.display(), format);

    match format {
        CompressionFormat::Gzip => Ok(Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            flate2::read::MultiGzDecoder::new(file),
        ))),
        CompressionFormat::Bzip2 => Ok(Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        ))),
        CompressionFormat::Plain => {
            if file.metadata()?.len() >= MMAP_THRESHOLD {
                Ok(Box::new(MappedReader::new(&file)?))
            } else {
                Ok(Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)))
            }
        }
    }
}
