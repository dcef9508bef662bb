//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file is an invalid bbsa archive
    #[error("file is an invalid bbsa archive")]
    InvalidArchive,

    /// logical sector {0} is below every archive segment
    #[error("logical sector {0:#x} is below every archive segment")]
    #[diagnostic(help("the entry cannot be physically located and should be skipped"))]
    UnresolvableOffset(u32),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
