//! Mapping of logical catalog sectors onto the physical archive segments

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Header, SECTOR_SIZE};

/// Physical position of an entry inside one of the archive segments
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveLocation {
    /// Index of the segment holding the data, from 0 to 4
    pub segment: usize,

    /// Sector inside the segment's own stream
    pub physical_sector: u64,
}

impl ArchiveLocation {
    /// Byte offset of the entry inside the segment's stream
    pub fn byte_offset(&self) -> u64 {
        self.physical_sector * SECTOR_SIZE
    }
}

/// Resolve a logical sector into the segment holding it and the sector inside that segment.
///
/// Segments 1 to 4 count their sectors from one past their threshold, while segment 0 is shifted
/// forward by its threshold to skip the master header stored in front of its data.
///
/// ```
/// use bbs_bbsa::{offset::resolve, Header};
///
/// let header = Header::new([0, 1000, 2000, 3000, 4000]);
/// let location = resolve(&header, 1500).unwrap();
///
/// assert_eq!(location.segment, 1);
/// assert_eq!(location.physical_sector, 501);
/// ```
pub fn resolve(header: &Header, offset: u32) -> Result<ArchiveLocation> {
    let logical = u64::from(offset);

    let location = if offset >= header.archive4_sector_index {
        ArchiveLocation {
            segment: 4,
            physical_sector: logical - u64::from(header.archive4_sector_index) + 1,
        }
    } else if offset >= header.archive3_sector_index {
        ArchiveLocation {
            segment: 3,
            physical_sector: logical - u64::from(header.archive3_sector_index) + 1,
        }
    } else if offset >= header.archive2_sector_index {
        ArchiveLocation {
            segment: 2,
            physical_sector: logical - u64::from(header.archive2_sector_index) + 1,
        }
    } else if offset >= header.archive1_sector_index {
        ArchiveLocation {
            segment: 1,
            physical_sector: logical - u64::from(header.archive1_sector_index) + 1,
        }
    } else if offset >= header.archive0_sector_index {
        ArchiveLocation {
            segment: 0,
            physical_sector: logical + u64::from(header.archive0_sector_index),
        }
    } else {
        debug!(offset, "logical sector is below every segment");
        return Err(Error::UnresolvableOffset(offset));
    };

    debug!(
        offset,
        segment = location.segment,
        physical_sector = location.physical_sector,
        "resolved logical sector"
    );
    Ok(location)
}
