use std::{
    fs::File,
    io,
    path::{Component, Path, PathBuf},
};

use bbs_bbsa::{BbsaHeader, Header};
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::debug;

pub mod extract;
pub mod folder;
pub mod header;
pub mod locate;

#[derive(clap::Subcommand)]
pub enum BbsaCommands {
    /// Print the segment thresholds stored in BBS0.DAT
    Header(header::HeaderArgs),
    /// Find the segment and sector holding a logical sector
    Locate(locate::LocateArgs),
    /// Resolve the folder path encoded in a folder hash
    Folder(folder::FolderArgs),
    /// Extract a single catalog entry into a directory
    Extract(extract::ExtractArgs),
}

impl BbsaCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            BbsaCommands::Header(header) => header.handle(),
            BbsaCommands::Locate(locate) => locate.handle(),
            BbsaCommands::Folder(folder) => folder.handle(),
            BbsaCommands::Extract(extract) => extract.handle(),
        }
    }
}

/// Path of the file holding the given segment, `BBS0.DAT` to `BBS4.DAT`
pub fn segment_path(directory: &Path, segment: usize) -> PathBuf {
    directory.join(format!("BBS{segment}.DAT"))
}

/// Open the file holding the given segment
pub fn open_segment(directory: &Path, segment: usize) -> io::Result<File> {
    let path = segment_path(directory, segment);
    debug!("opening {}", path.display());
    File::open(path)
}

/// Read the segment thresholds from the master header of `BBS0.DAT`
pub fn read_header(directory: &Path) -> Result<Header> {
    let mut f = open_segment(directory, 0)
        .into_diagnostic()
        .context(format!("path: {}", segment_path(directory, 0).display()))?;
    Ok(BbsaHeader::from_reader(&mut f)?.thresholds())
}

/// Parse a 32-bit hash written in hex, optionally prefixed with `0x` or `@`
pub fn parse_hash(value: &str) -> std::result::Result<u32, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .or_else(|| value.strip_prefix('@'))
        .unwrap_or(value);

    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hash {value}: {e}"))
}

/// Parse a sector number written in decimal, or in hex when prefixed with `0x`
pub fn parse_sector(value: &str) -> std::result::Result<u32, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => value.parse(),
    };

    parsed.map_err(|e| format!("invalid sector {value}: {e}"))
}

/// Join an entry name onto `directory`, refusing names that would escape it
pub fn output_path(directory: &Path, name: &str) -> Result<PathBuf> {
    let name = Path::new(name);
    if !name
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(miette!("refusing to write outside of the output directory: {}", name.display()));
    }

    Ok(directory.join(name))
}
