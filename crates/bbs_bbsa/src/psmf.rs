//! PSMF movie detection
//!
//! Movies are cataloged with the variable length sentinel, their real size is kept in their own header.
//!
//! | Offset (bytes) | Field         | Description                                   |
//! |----------------|---------------|-----------------------------------------------|
//! | 0x0000         | Magic number  | 4 bytes: "PSMF"                               |
//! | 0x0004         | Version       | 4 bytes                                       |
//! | 0x0008         | Header size   | 4 bytes                                       |
//! | 0x000C         | Stream size   | 4 bytes: big endian length of the movie       |

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};
use tracing::{debug, instrument};

/// "PSMF" read as a little endian integer
pub const PSMF_MAGIC: u32 = 0x464D5350;

const PSMF_LENGTH_OFFSET: u64 = 12;

/// Returns whether a PSMF header starts at `offset`
pub fn is_psmf<R: Read + Seek>(reader: &mut R, offset: u64) -> std::io::Result<bool> {
    reader.seek(SeekFrom::Start(offset))?;
    Ok(reader.read_u32::<LittleEndian>()? == PSMF_MAGIC)
}

/// Read the length stored in a PSMF header at `offset`, or `None` when no PSMF header is present
#[instrument(skip(reader), err)]
pub fn try_read_psmf_length<R: Read + Seek>(reader: &mut R, offset: u64) -> std::io::Result<Option<u32>> {
    if !is_psmf(reader, offset)? {
        return Ok(None);
    }

    reader.seek(SeekFrom::Start(offset + PSMF_LENGTH_OFFSET))?;
    let mut raw = [0u8; 4];
    reader.read_exact(&mut raw)?;

    let length = (u32::from(raw[0]) << 24)
        | (u32::from(raw[1]) << 16)
        | (u32::from(raw[2]) << 8)
        | u32::from(raw[3]);

    debug!(offset, length, "found psmf header");
    Ok(Some(length))
}
