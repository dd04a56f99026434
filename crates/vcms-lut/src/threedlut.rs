//! Binary `.3dlut` file format.
//!
//! A compact little-endian container for a 16-bit [`Clut3D`]. Calibration
//! software writes these files; the color manager loads them as-is.
//!
//! # Format
//!
//! ```text
//! offset  size   field
//! 0       4      signature "3DLT"
//! 4       4      format version (1)
//! 8       4      resolution R (2..=256)
//! 12      4      output bit depth (16)
//! 16      4      data offset D (>= 20)
//! 20      D-20   parameter block (free-form UTF-8, optional)
//! D       R^3*6  samples: R^3 entries of (R, G, B) u16
//! ```
//!
//! Samples use the [`Clut3D`] order: red index fastest, then green, then blue.
//!
//! # Example
//!
//! ```rust,ignore
//! use vcms_lut::threedlut;
//!
//! let header = threedlut::probe("display.3dlut")?;
//! let lut = threedlut::read("display.3dlut")?;
//! assert_eq!(lut.size(), header.resolution);
//! ```

use crate::clut::{MAX_SIZE, MIN_SIZE};
use crate::{Clut3D, LutError, LutResult};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use tracing::debug;

/// File signature.
pub const SIGNATURE: [u8; 4] = *b"3DLT";

/// Supported format version.
pub const VERSION: u32 = 1;

/// Supported output bit depth.
pub const BIT_DEPTH: u32 = 16;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: u64 = 20;

/// Parsed `.3dlut` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format version
    pub version: u32,
    /// Cube resolution along each axis
    pub resolution: usize,
    /// Output bit depth
    pub bit_depth: u32,
    /// Byte offset of the sample data
    pub data_offset: u64,
}

impl Header {
    /// Header for writing `lut` with a parameter block of `params_len` bytes.
    pub fn for_lut(lut: &Clut3D, params_len: usize) -> Self {
        Self {
            version: VERSION,
            resolution: lut.size(),
            bit_depth: BIT_DEPTH,
            data_offset: HEADER_LEN + params_len as u64,
        }
    }

    /// Size of the sample data in bytes.
    #[inline]
    pub fn data_len(&self) -> u64 {
        let r = self.resolution as u64;
        r * r * r * 3 * 2
    }

    /// Total file size implied by this header.
    #[inline]
    pub fn file_len(&self) -> u64 {
        self.data_offset + self.data_len()
    }
}

/// Reads and validates the fixed header.
///
/// Does not look at the parameter block or the samples.
pub fn read_header<R: Read>(reader: &mut R) -> LutResult<Header> {
    let mut signature = [0u8; 4];
    reader.read_exact(&mut signature).map_err(header_err)?;
    if signature != SIGNATURE {
        return Err(LutError::Format(format!(
            "invalid signature: {:?}",
            String::from_utf8_lossy(&signature)
        )));
    }

    let version = reader.read_u32::<LittleEndian>().map_err(header_err)?;
    let resolution = reader.read_u32::<LittleEndian>().map_err(header_err)? as usize;
    let bit_depth = reader.read_u32::<LittleEndian>().map_err(header_err)?;
    let data_offset = reader.read_u32::<LittleEndian>().map_err(header_err)? as u64;

    if version != VERSION {
        return Err(LutError::Format(format!("unsupported version: {}", version)));
    }
    if !(MIN_SIZE..=MAX_SIZE).contains(&resolution) {
        return Err(LutError::Format(format!(
            "resolution {} outside {}..={}",
            resolution, MIN_SIZE, MAX_SIZE
        )));
    }
    if bit_depth != BIT_DEPTH {
        return Err(LutError::Format(format!(
            "unsupported output bit depth: {}",
            bit_depth
        )));
    }
    if data_offset < HEADER_LEN {
        return Err(LutError::Format(format!(
            "data offset {} overlaps header",
            data_offset
        )));
    }

    Ok(Header {
        version,
        resolution,
        bit_depth,
        data_offset,
    })
}

/// Checks a `.3dlut` file without loading its samples.
///
/// Validates the header and that the file length matches the declared
/// resolution exactly.
pub fn probe<P: AsRef<Path>>(path: P) -> LutResult<Header> {
    let file = File::open(path.as_ref())?;
    let len = file.metadata()?.len();
    let mut reader = BufReader::new(file);
    if len < HEADER_LEN {
        return Err(short_header(&mut reader, len));
    }

    let header = read_header(&mut reader)?;
    check_len(&header, len)?;
    Ok(header)
}

/// Whether `path` is a structurally valid `.3dlut` file.
pub fn is_valid<P: AsRef<Path>>(path: P) -> bool {
    probe(path).is_ok()
}

/// Reads a `.3dlut` file.
///
/// Either the whole cube is returned or an error; never a partial grid.
pub fn read<P: AsRef<Path>>(path: P) -> LutResult<Clut3D> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    let lut = parse(BufReader::new(file), len)?;
    debug!(path = %path.display(), resolution = lut.size(), "Loaded 3dlut");
    Ok(lut)
}

/// Parses a `.3dlut` stream of total length `len`.
pub fn parse<R: Read>(mut reader: R, len: u64) -> LutResult<Clut3D> {
    if len < HEADER_LEN {
        return Err(short_header(&mut reader, len));
    }
    let header = read_header(&mut reader)?;
    check_len(&header, len)?;

    // Skip the parameter block
    let skip = header.data_offset - HEADER_LEN;
    io::copy(&mut reader.by_ref().take(skip), &mut io::sink())?;

    let mut data = vec![0u16; header.resolution.pow(3) * 3];
    reader.read_u16_into::<LittleEndian>(&mut data)?;

    Clut3D::from_data(data, header.resolution)
}

/// Reads the free-form parameter block of a `.3dlut` file.
pub fn read_params<P: AsRef<Path>>(path: P) -> LutResult<String> {
    let header = probe(path.as_ref())?;
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    read_header(&mut reader)?;

    let mut params = vec![0u8; (header.data_offset - HEADER_LEN) as usize];
    reader.read_exact(&mut params)?;
    Ok(String::from_utf8_lossy(&params).into_owned())
}

/// Writes a cube to a `.3dlut` file.
///
/// # Example
///
/// ```rust,ignore
/// let lut = Clut3D::identity(33)?;
/// threedlut::write("identity.3dlut", &lut, "identity")?;
/// ```
pub fn write<P: AsRef<Path>>(path: P, lut: &Clut3D, params: &str) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, lut, params)?;
    writer.flush()?;
    Ok(())
}

/// Writes a cube in `.3dlut` layout to any writer.
pub fn write_to<W: Write>(writer: &mut W, lut: &Clut3D, params: &str) -> LutResult<()> {
    let header = Header::for_lut(lut, params.len());
    let data_offset = u32::try_from(header.data_offset)
        .map_err(|_| LutError::Format("parameter block too large".into()))?;

    writer.write_all(&SIGNATURE)?;
    writer.write_u32::<LittleEndian>(header.version)?;
    writer.write_u32::<LittleEndian>(header.resolution as u32)?;
    writer.write_u32::<LittleEndian>(header.bit_depth)?;
    writer.write_u32::<LittleEndian>(data_offset)?;
    writer.write_all(params.as_bytes())?;

    for &v in lut.data() {
        writer.write_u16::<LittleEndian>(v)?;
    }
    Ok(())
}

fn check_len(header: &Header, len: u64) -> LutResult<()> {
    if len != header.file_len() {
        return Err(LutError::Size {
            expected: header.file_len(),
            actual: len,
        });
    }
    Ok(())
}

/// Error for a stream of `len` bytes, too short to hold a header.
///
/// A signature mismatch in the bytes that are present is a format error;
/// otherwise the file is merely short.
fn short_header<R: Read>(reader: &mut R, len: u64) -> LutError {
    let mut head = Vec::with_capacity(SIGNATURE.len());
    let present = len.min(SIGNATURE.len() as u64);
    if let Err(e) = reader.take(present).read_to_end(&mut head) {
        return LutError::Io(e);
    }
    if !SIGNATURE.starts_with(&head) {
        return LutError::Format(format!(
            "invalid signature: {:?}",
            String::from_utf8_lossy(&head)
        ));
    }
    LutError::Size {
        expected: HEADER_LEN,
        actual: len,
    }
}

fn header_err(e: io::Error) -> LutError {
    if e.kind() == ErrorKind::UnexpectedEof {
        LutError::Format("truncated header".into())
    } else {
        LutError::Io(e)
    }
}
