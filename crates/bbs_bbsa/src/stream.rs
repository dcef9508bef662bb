//! Bounded views over a segment stream

use std::fmt::{self, Debug};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use tracing::instrument;

/// A read only window over the bytes of a single entry inside a segment stream
///
/// The window keeps its own position and seeks the backing stream before every read, so several
/// windows taking turns on one backing handle (a `&mut Cursor<_>`, a `&File`, ...) from a single
/// thread never depend on each other's cursor. Reads never go past the end of the window, whatever
/// the size of the backing stream.
///
/// Seeking and reading are two separate calls. Windows read from several threads at once must not
/// share a cursor: wrap the file in a [`SharedFile`], or give each thread its own handle.
pub struct EntryStream<R> {
    inner: R,
    start: u64,
    len: u64,
    position: u64,
}

impl<R> Debug for EntryStream<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EntryStream")
            .field("start", &self.start)
            .field("len", &self.len)
            .field("position", &self.position)
            .finish()
    }
}

impl<R> EntryStream<R> {
    /// Create a window of `len` bytes starting at `start` in `inner`
    pub fn new(inner: R, start: u64, len: u64) -> Self {
        Self {
            inner,
            start,
            len,
            position: 0,
        }
    }

    /// Offset of the window inside the backing stream
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Size of the window in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the window holds no bytes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current position relative to the start of the window
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Unwrap and return the backing stream
    ///
    /// The position of the stream is undefined.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> Read for EntryStream<R> {
    #[instrument(skip(self, buf), fields(start = self.start, position = self.position), err)]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.len.saturating_sub(self.position);
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let wanted = buf.len().min(usize::try_from(remaining).unwrap_or(usize::MAX));
        self.inner.seek(SeekFrom::Start(self.start + self.position))?;
        let read = self.inner.read(&mut buf[..wanted])?;
        self.position += read as u64;
        Ok(read)
    }
}

impl<R> Seek for EntryStream<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => self.len.checked_add_signed(delta),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
        };

        let Some(target) = target else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            ));
        };

        self.position = target;
        Ok(target)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position)
    }
}

/// Handle over a shared [`File`] that reads at explicit offsets and never moves the file cursor
///
/// Every copy keeps its own position, so any number of threads may read the same file through
/// their own `SharedFile`.
///
/// ```no_run
/// use bbs_bbsa::{EntryStream, SharedFile};
/// use std::{fs::File, io::Read};
///
/// let file = File::open("BBS1.DAT")?;
/// std::thread::scope(|s| {
///     for start in [0, 0x800] {
///         let file = &file;
///         s.spawn(move || {
///             let mut data = Vec::new();
///             EntryStream::new(SharedFile::new(file), start, 0x800).read_to_end(&mut data)
///         });
///     }
/// });
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SharedFile<'a> {
    file: &'a File,
    position: u64,
}

impl<'a> SharedFile<'a> {
    pub fn new(file: &'a File) -> Self {
        Self { file, position: 0 }
    }
}

#[cfg(unix)]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::read_at(file, buf, offset)
}

#[cfg(windows)]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_read(file, buf, offset)
}

#[cfg(not(any(unix, windows)))]
fn read_at(_file: &File, _buf: &mut [u8], _offset: u64) -> io::Result<usize> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "positional reads are not supported on this platform",
    ))
}

impl Read for SharedFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = read_at(self.file, buf, self.position)?;
        self.position += read as u64;
        Ok(read)
    }
}

impl Seek for SharedFile<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => self.file.metadata()?.len().checked_add_signed(delta),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
        };

        let Some(target) = target else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            ));
        };

        self.position = target;
        Ok(target)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position)
    }
}
