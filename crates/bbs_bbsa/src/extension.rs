//! Recognition of the file formats stored inside BBSA archives by their magic code

use byteorder::{LittleEndian, ReadBytesExt};
use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use tracing::instrument;

/// File formats that can be recognised from the first four bytes of an entry
///
/// The magic values are the first four bytes of the entry read as a little endian integer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Compiled lua script
    Lub,
    Ice,
    Ctd,
    Edp,
    /// Nested archive
    Arc,
    Mbd,
    Ead,
    Fep,
    Itb,
    Itc,
    Ite,
    /// Animation
    Pam,
    /// Model
    Pmo,
    /// Sound container
    Scd,
    /// Texture
    Tm2,
    Txa,
    Exa,
}

impl FileKind {
    /// Identify a file format from its magic code
    pub const fn from_magic(magic: u32) -> Option<Self> {
        Some(match magic {
            0x61754C1B => Self::Lub,
            0x41264129 => Self::Ice,
            0x44544340 => Self::Ctd,
            0x50444540 => Self::Edp,
            0x00435241 => Self::Arc,
            0x44424D40 => Self::Mbd,
            0x00444145 => Self::Ead,
            0x07504546 => Self::Fep,
            0x00425449 => Self::Itb,
            0x00435449 => Self::Itc,
            0x00455449 => Self::Ite,
            0x004D4150 => Self::Pam,
            0x004F4D50 => Self::Pmo,
            0x42444553 => Self::Scd,
            0x324D4954 => Self::Tm2,
            0x00415854 => Self::Txa,
            0x00617865 => Self::Exa,
            _ => return None,
        })
    }

    /// File extension used for this format, without the leading dot
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Lub => "lub",
            Self::Ice => "ice",
            Self::Ctd => "ctd",
            Self::Edp => "edp",
            Self::Arc => "arc",
            Self::Mbd => "mbd",
            Self::Ead => "ead",
            Self::Fep => "fep",
            Self::Itb => "itb",
            Self::Itc => "itc",
            Self::Ite => "ite",
            Self::Pam => "pam",
            Self::Pmo => "pmo",
            Self::Scd => "scd",
            Self::Tm2 => "tm2",
            Self::Txa => "txa",
            Self::Exa => "exa",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Returns the file extension matching a magic code, if it is a known one
pub fn sniff(magic: u32) -> Option<&'static str> {
    FileKind::from_magic(magic).map(|kind| kind.extension())
}

/// Read the magic code at `offset` and identify the file format stored there
#[instrument(skip(reader), err)]
pub fn read_file_kind<R: Read + Seek>(reader: &mut R, offset: u64) -> std::io::Result<Option<FileKind>> {
    reader.seek(SeekFrom::Start(offset))?;
    let magic = reader.read_u32::<LittleEndian>()?;
    Ok(FileKind::from_magic(magic))
}
