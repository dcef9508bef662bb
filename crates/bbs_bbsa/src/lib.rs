//! This library handles locating and naming the entries of **BBSA** archives used by *Kingdom Hearts Birth by Sleep*.
//!
//! # BBSA Archive Format Documentation
//!
//! The game data is split across up to five physical files, `BBS0.DAT` to `BBS4.DAT`, which are
//! addressed by the catalog as one logical sector space. This crate turns a catalog entry into the
//! segment and byte range holding its data, and recovers a usable name for entries whose name was only
//! stored as a hash.
//!
//! ## File Structure
//!
//! `BBS0.DAT` starts with the master header, followed by the catalog and the first segment's data.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "bbsa"                                            |
//! | 0x0004         | Version                | 4 bytes                                                    |
//! | 0x0008         | Partition Count        | 2 bytes: Number of partitions                              |
//! | 0x000A         | Unknown                | 2 bytes                                                    |
//! | 0x000C         | Directory Count        | 2 bytes: Number of directory entries                       |
//! | 0x000E         | Partition Offset       | 2 bytes: Offset to the partition table                     |
//! | 0x0010         | Directory Offset       | 4 bytes: Offset to the directory table                     |
//! | 0x0014         | Archive Partition      | 2 bytes: Offset to the archive partition                   |
//! | 0x0016         | Archive 0 Sector       | 2 bytes: First logical sector of `BBS0.DAT`                |
//! | 0x0018         | Total Sectors          | 4 bytes: Number of sectors across every segment            |
//! | 0x001C         | Archive 1 Sector       | 4 bytes: First logical sector of `BBS1.DAT`                |
//! | 0x0020         | Archive 2 Sector       | 4 bytes: First logical sector of `BBS2.DAT`                |
//! | 0x0024         | Archive 3 Sector       | 4 bytes: First logical sector of `BBS3.DAT`                |
//! | 0x0028         | Archive 4 Sector       | 4 bytes: First logical sector of `BBS4.DAT`                |
//!
//! ### Sectors
//!
//! Every offset and length of the catalog is counted in sectors of `0x800` bytes. A logical sector is
//! mapped to a segment by comparing it against the segment thresholds from `BBS4.DAT` down to
//! `BBS0.DAT`, see [`offset::resolve`].
//!
//! ### Variable Length Entries
//!
//! Entries cataloged with a length of `0xFFF` sectors have their size stored in their content. Only
//! PSMF movies are supported, their size is a big endian integer 12 bytes into the movie.
//!
//! ### Names
//!
//! Catalog entries do not always keep their names. Missing file names are replaced by `@` and the
//! file hash in hex, missing folder names are recovered from the folder hash (see [`folder`]), and
//! extensions are guessed from the first four bytes of the entry (see [`extension`]).
//!
//! ## Additional Information
//!
//! - **File Extension**: `.DAT`
//! - **Endianness**: Little-endian for all multi-byte integers, except inside PSMF headers
//!

pub mod entry;
pub mod error;
pub mod extension;
pub mod folder;
pub mod offset;
pub mod psmf;
pub mod stream;
pub mod types;

pub use entry::{Entry, VARIABLE_LENGTH};
pub use extension::FileKind;
pub use offset::ArchiveLocation;
pub use stream::{EntryStream, SharedFile};
pub use types::{BbsaHeader, Header, SECTOR_SIZE};
