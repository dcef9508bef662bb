//! Catalog entries and access to their data

use bon::Builder;
use std::io::{self, Read, Seek};
use tracing::{debug, instrument, warn};

use crate::{
    error::{Error, Result},
    extension::read_file_kind,
    folder::resolve_folder,
    offset::{resolve, ArchiveLocation},
    psmf::try_read_psmf_length,
    stream::EntryStream,
    types::{Header, SECTOR_SIZE},
};

/// Length value used by the catalog for entries whose size has to be read from their content
pub const VARIABLE_LENGTH: u32 = 0xFFF;

/// A single record of the BBSA catalog
///
/// ```
/// use bbs_bbsa::{Entry, Header};
///
/// let entry = Entry::builder()
///     .header(Header::new([0, 1000, 2000, 3000, 4000]))
///     .offset(1500)
///     .length(10)
///     .file_hash(0x1234ABCD)
///     .folder_hash(0x80000000)
///     .build();
///
/// assert_eq!(entry.name(), "sound/bgm/@1234ABCD");
/// assert!(!entry.has_complete_name());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Entry {
    /// Segment thresholds of the archive this entry belongs to
    header: Header,

    /// Logical sector of the entry data
    offset: u32,

    /// Number of sectors, or [`VARIABLE_LENGTH`]
    length: u32,

    #[builder(into)]
    file_name: Option<String>,

    #[builder(into)]
    folder_name: Option<String>,

    file_hash: u32,

    folder_hash: u32,
}

impl Entry {
    /// Logical sector of the entry data
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length of the entry in sectors as stored in the catalog
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Whether the catalog length is the variable length sentinel
    pub fn is_variable_length(&self) -> bool {
        self.length == VARIABLE_LENGTH
    }

    /// Hash of the file name, used as the name when the catalog does not store one
    pub fn file_hash(&self) -> u32 {
        self.file_hash
    }

    /// Packed folder hash, see [`FolderHash`](crate::folder::FolderHash) for its fields
    pub fn folder_hash(&self) -> u32 {
        self.folder_hash
    }

    /// Whether both the file and the folder name were stored in the catalog
    pub fn has_complete_name(&self) -> bool {
        self.file_name.is_some() && self.folder_name.is_some()
    }

    /// Name of the file, or `@` followed by the file hash
    pub fn file_name(&self) -> String {
        match &self.file_name {
            Some(name) => name.clone(),
            None => format!("@{:08X}", self.file_hash),
        }
    }

    /// Name of the folder, recovered from the folder hash when missing from the catalog
    pub fn folder_name(&self) -> String {
        match &self.folder_name {
            Some(name) => name.clone(),
            None => resolve_folder(self.folder_hash)
                .unwrap_or_else(|| format!("@{:08X}", self.folder_hash)),
        }
    }

    /// Full path of the entry, without extension
    ///
    /// # Warnings
    ///
    /// Names come straight from the catalog. Check them before using them as a path on disk, they may
    /// contain `..` components.
    pub fn name(&self) -> String {
        format!("{}/{}", self.folder_name(), self.file_name())
    }

    /// Locate the segment and sector holding this entry
    pub fn location(&self) -> Result<ArchiveLocation> {
        resolve(&self.header, self.offset)
    }

    /// Full path of the entry, with an extension guessed from the entry content.
    ///
    /// `loader` returns the stream covering the whole segment at the given index.
    /// Entries that cannot be located, or whose content is not recognised, get no extension.
    #[instrument(skip(self, loader), fields(offset = self.offset), err)]
    pub fn calculate_name_with_extension<F, S>(&self, loader: F) -> Result<String>
    where
        F: FnOnce(usize) -> io::Result<S>,
        S: Read + Seek,
    {
        let name = self.name();
        let location = match self.location() {
            Ok(location) => location,
            Err(Error::UnresolvableOffset(_)) => return Ok(name),
            Err(e) => return Err(e),
        };

        let mut stream = loader(location.segment)?;
        Ok(match read_file_kind(&mut stream, location.byte_offset())? {
            Some(kind) => format!("{name}.{kind}"),
            None => name,
        })
    }

    /// Open a read only view over the entry data.
    ///
    /// Returns `None` when the entry cannot be located in any segment. Entries using the
    /// [`VARIABLE_LENGTH`] sentinel take their length from their PSMF header when they have one,
    /// otherwise the sentinel is used as a sector count.
    #[instrument(skip(self, loader), fields(offset = self.offset, length = self.length), err)]
    pub fn open_stream<F, S>(&self, loader: F) -> Result<Option<EntryStream<S>>>
    where
        F: FnOnce(usize) -> io::Result<S>,
        S: Read + Seek,
    {
        let location = match self.location() {
            Ok(location) => location,
            Err(Error::UnresolvableOffset(offset)) => {
                debug!(offset, "entry cannot be located");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let mut stream = loader(location.segment)?;
        let start = location.byte_offset();
        let mut len = u64::from(self.length) * SECTOR_SIZE;

        if self.is_variable_length() {
            match try_read_psmf_length(&mut stream, start)? {
                Some(psmf_length) => len = psmf_length.into(),
                None => warn!(
                    name = %self.name(),
                    "variable length entry is not a psmf movie, keeping {len} bytes"
                ),
            }
        }

        Ok(Some(EntryStream::new(stream, start, len)))
    }
}
