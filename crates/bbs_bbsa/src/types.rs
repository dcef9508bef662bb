//! Base types for structure of BBSA archives.

use binrw::BinRead;
use std::io::{Read, Seek};

use crate::error::{Error, Result};

/// Size in bytes of a single sector. All offsets and lengths in the catalog are expressed in sectors.
pub const SECTOR_SIZE: u64 = 0x800;

/// Number of physical archive files (`BBS0.DAT` to `BBS4.DAT`) sharing one logical sector space
pub const SEGMENT_COUNT: usize = 5;

/// Sector thresholds splitting the logical sector space into the physical archive segments
///
/// Each value is the first logical sector owned by the matching segment. Thresholds are only ever
/// compared from segment 4 down to segment 0, so the segments must not overlap.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    /// First logical sector of `BBS0.DAT`
    pub archive0_sector_index: u32,

    /// First logical sector of `BBS1.DAT`
    pub archive1_sector_index: u32,

    /// First logical sector of `BBS2.DAT`
    pub archive2_sector_index: u32,

    /// First logical sector of `BBS3.DAT`
    pub archive3_sector_index: u32,

    /// First logical sector of `BBS4.DAT`
    pub archive4_sector_index: u32,
}

impl Header {
    /// Create a header from the five segment thresholds, ordered from segment 0 to segment 4
    pub const fn new(thresholds: [u32; SEGMENT_COUNT]) -> Self {
        Self {
            archive0_sector_index: thresholds[0],
            archive1_sector_index: thresholds[1],
            archive2_sector_index: thresholds[2],
            archive3_sector_index: thresholds[3],
            archive4_sector_index: thresholds[4],
        }
    }

    /// Returns the first logical sector of the given segment, if the segment exists
    pub const fn sector_index(&self, segment: usize) -> Option<u32> {
        match segment {
            0 => Some(self.archive0_sector_index),
            1 => Some(self.archive1_sector_index),
            2 => Some(self.archive2_sector_index),
            3 => Some(self.archive3_sector_index),
            4 => Some(self.archive4_sector_index),
            _ => None,
        }
    }
}

impl From<[u32; SEGMENT_COUNT]> for Header {
    fn from(value: [u32; SEGMENT_COUNT]) -> Self {
        Self::new(value)
    }
}

const BBSA_MAGIC: &[u8; 4] = b"bbsa";

/// BBSA master header
///
/// Found at the very start of `BBS0.DAT`. Only the fields needed to address the archive segments are
/// interpreted, the partition and directory tables it points to are left alone.
/// All data is stored in little endian format
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq)]
#[br(magic = b"bbsa", little)]
pub struct BbsaHeader {
    /// Version of the archive format
    pub version: u32,

    /// Number of partitions in the partition table
    pub partition_count: u16,

    #[allow(dead_code)]
    unknown_0a: u16,

    /// Number of entries in the directory table
    pub directory_count: u16,

    /// Offset from the start of the file to the partition table
    pub partition_offset: u16,

    /// Offset from the start of the file to the directory table
    pub directory_offset: u32,

    /// Offset from the start of the file to the archive partition
    pub archive_partition_offset: u16,

    /// First logical sector of `BBS0.DAT`
    pub archive0_sector_index: u16,

    /// Total amount of sectors across every segment
    pub total_sector_count: u32,

    /// First logical sector of `BBS1.DAT`
    pub archive1_sector_index: u32,

    /// First logical sector of `BBS2.DAT`
    pub archive2_sector_index: u32,

    /// First logical sector of `BBS3.DAT`
    pub archive3_sector_index: u32,

    /// First logical sector of `BBS4.DAT`
    pub archive4_sector_index: u32,
}

impl BbsaHeader {
    /// Read the master header from the start of `reader`.
    ///
    /// Returns [`Error::InvalidArchive`] when the stream does not start with the `bbsa` magic.
    #[tracing::instrument(skip(reader), err)]
    pub fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.rewind()?;
        reader.read_exact(&mut magic)?;
        if &magic != BBSA_MAGIC {
            return Err(Error::InvalidArchive);
        }

        reader.rewind()?;
        Ok(Self::read(reader)?)
    }

    /// Returns the segment thresholds held by this header
    pub fn thresholds(&self) -> Header {
        Header {
            archive0_sector_index: self.archive0_sector_index.into(),
            archive1_sector_index: self.archive1_sector_index,
            archive2_sector_index: self.archive2_sector_index,
            archive3_sector_index: self.archive3_sector_index,
            archive4_sector_index: self.archive4_sector_index,
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::{BbsaHeader, Header};

    #[rustfmt::skip]
    const MASTER_HEADER: [u8; 0x2C] = [
        0x62, 0x62, 0x73, 0x61,
        0x05, 0x00, 0x00, 0x00,
        0x03, 0x00,
        0x00, 0x00,
        0x10, 0x00,
        0x30, 0x00,
        0x00, 0x01, 0x00, 0x00,
        0x40, 0x00,
        0x02, 0x00,
        0x00, 0x50, 0x00, 0x00,
        0xE8, 0x03, 0x00, 0x00,
        0xD0, 0x07, 0x00, 0x00,
        0xB8, 0x0B, 0x00, 0x00,
        0xA0, 0x0F, 0x00, 0x00,
    ];

    #[test]
    fn read_master_header() -> Result<()> {
        let mut input = Cursor::new(MASTER_HEADER);

        let expected = BbsaHeader {
            version: 5,
            partition_count: 3,
            directory_count: 16,
            partition_offset: 0x30,
            directory_offset: 0x100,
            archive_partition_offset: 0x40,
            archive0_sector_index: 2,
            total_sector_count: 0x5000,
            archive1_sector_index: 1000,
            archive2_sector_index: 2000,
            archive3_sector_index: 3000,
            archive4_sector_index: 4000,
            ..Default::default()
        };

        assert_eq!(BbsaHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn master_header_thresholds() -> Result<()> {
        let header = BbsaHeader::from_reader(&mut Cursor::new(MASTER_HEADER))?;

        assert_eq!(header.thresholds(), Header::new([2, 1000, 2000, 3000, 4000]));

        Ok(())
    }

    #[test]
    fn read_invalid_magic() {
        let mut input = MASTER_HEADER;
        input[0] = 0x40;

        let header = BbsaHeader::from_reader(&mut Cursor::new(input));
        assert!(matches!(header, Err(Error::InvalidArchive)));
    }

    #[test]
    fn read_truncated_header() {
        let header = BbsaHeader::from_reader(&mut Cursor::new(&MASTER_HEADER[..0x10]));
        assert!(matches!(header, Err(Error::BinRWError(_))));
    }

    #[test]
    fn sector_index_by_segment() {
        let header = Header::from([0, 1000, 2000, 3000, 4000]);

        assert_eq!(header.sector_index(0), Some(0));
        assert_eq!(header.sector_index(3), Some(3000));
        assert_eq!(header.sector_index(5), None);
    }
}
