use bbs_bbsa::{error::Error, BbsaHeader, Entry, Header, SECTOR_SIZE, VARIABLE_LENGTH};
use std::io::{Cursor, Read};
use tracing::info;
use tracing_test::traced_test;

const SECTOR: usize = SECTOR_SIZE as usize;

/// Five in memory segments laid out like `BBS0.DAT` to `BBS4.DAT`
struct Archive {
    segments: Vec<Vec<u8>>,
}

impl Archive {
    fn new() -> Self {
        #[rustfmt::skip]
        let master: [u8; 0x2C] = [
            0x62, 0x62, 0x73, 0x61,
            0x05, 0x00, 0x00, 0x00,
            0x01, 0x00,
            0x00, 0x00,
            0x01, 0x00,
            0x30, 0x00,
            0x40, 0x00, 0x00, 0x00,
            0x40, 0x00,
            0x01, 0x00,
            0x80, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0x20, 0x00, 0x00, 0x00,
            0x30, 0x00, 0x00, 0x00,
            0x40, 0x00, 0x00, 0x00,
        ];

        let mut segments = vec![vec![0u8; 0x20 * SECTOR]; 5];
        segments[0][..master.len()].copy_from_slice(&master);
        Archive { segments }
    }

    fn put(&mut self, segment: usize, sector: usize, content: &[u8]) {
        let start = sector * SECTOR;
        self.segments[segment][start..start + content.len()].copy_from_slice(content);
    }

    fn header(&self) -> Result<Header, Error> {
        let header = BbsaHeader::from_reader(&mut Cursor::new(&self.segments[0]))?;
        Ok(header.thresholds())
    }

    fn load(&self, segment: usize) -> std::io::Result<Cursor<&[u8]>> {
        info!("loading segment {segment}");
        Ok(Cursor::new(&self.segments[segment][..]))
    }
}

fn read_all(archive: &Archive, entry: &Entry) -> Result<Option<Vec<u8>>, Error> {
    let Some(mut stream) = entry.open_stream(|i| archive.load(i))? else {
        return Ok(None);
    };

    let mut buffer = Vec::new();
    stream.read_to_end(&mut buffer)?;
    Ok(Some(buffer))
}

#[traced_test]
#[test]
fn header_thresholds_from_master_header() -> Result<(), Error> {
    let archive = Archive::new();
    assert_eq!(archive.header()?, Header::new([1, 0x10, 0x20, 0x30, 0x40]));
    Ok(())
}

#[traced_test]
#[test]
fn extract_named_entries_across_segments() -> Result<(), Error> {
    let mut archive = Archive::new();
    let header = archive.header()?;

    // logical 0x05 lives in BBS0.DAT at sector 0x05 + 1
    archive.put(0, 0x06, b"TIM2 texture");
    // logical 0x12 lives in BBS1.DAT at sector 0x12 - 0x10 + 1
    archive.put(1, 0x03, b"\x1BLua script");
    // logical 0x45 lives in BBS4.DAT at sector 0x45 - 0x40 + 1
    archive.put(4, 0x06, b"SEDBSSCF");

    let cases = [
        (0x05, 0xD0200001, "message/en/system/@0000000A.tm2", &b"TIM2 texture"[..]),
        (0x12, 0xC0000000, "lua/@0000000A.lub", &b"\x1BLua script"[..]),
        (0x45, 0x91030000, "sound/se/event/cd/@0000000A.scd", &b"SEDBSSCF"[..]),
    ];

    for (offset, folder_hash, name, content) in cases {
        let entry = Entry::builder()
            .header(header)
            .offset(offset)
            .length(1)
            .file_hash(0x0A)
            .folder_hash(folder_hash)
            .build();

        assert_eq!(entry.calculate_name_with_extension(|i| archive.load(i))?, name);

        let data = read_all(&archive, &entry)?.expect("entry should resolve");
        assert_eq!(data.len(), SECTOR);
        assert_eq!(&data[..content.len()], content);
    }

    Ok(())
}

#[traced_test]
#[test]
fn example_entry_length() -> Result<(), Error> {
    let header = Header::new([0, 1000, 2000, 3000, 4000]);
    let entry = Entry::builder()
        .header(header)
        .offset(1500)
        .length(10)
        .file_hash(1)
        .folder_hash(1)
        .build();

    let location = entry.location()?;
    assert_eq!(location.segment, 1);
    assert_eq!(location.physical_sector, 501);

    let stream = entry
        .open_stream(|_| Ok(Cursor::new(Vec::<u8>::new())))?
        .expect("entry should resolve");
    assert_eq!(stream.len(), 20480);

    Ok(())
}

#[traced_test]
#[test]
fn extract_psmf_movie() -> Result<(), Error> {
    let mut archive = Archive::new();
    let header = archive.header()?;

    let mut movie = vec![0x50, 0x53, 0x4D, 0x46, 0x30, 0x30, 0x31, 0x35];
    movie.extend_from_slice(&[0x00, 0x00, 0x08, 0x00]);
    movie.extend_from_slice(&[0x00, 0x00, 0x10, 0x00]);
    movie.resize(0x1000, 0x11);
    archive.put(2, 0x02, &movie);

    let entry = Entry::builder()
        .header(header)
        .offset(0x21)
        .length(VARIABLE_LENGTH)
        .file_hash(0x0B)
        .folder_hash(0xAA200000)
        .build();

    assert_eq!(
        entry.calculate_name_with_extension(|i| archive.load(i))?,
        "sound/voice/en/battle/@0000000B"
    );

    let data = read_all(&archive, &entry)?.expect("entry should resolve");
    assert_eq!(data, movie);

    Ok(())
}

#[traced_test]
#[test]
fn unresolvable_entry_is_skipped() -> Result<(), Error> {
    let archive = Archive::new();
    let entry = Entry::builder()
        .header(archive.header()?)
        .offset(0)
        .length(1)
        .file_name("lost.bin")
        .folder_name("nowhere")
        .file_hash(0)
        .folder_hash(0)
        .build();

    assert!(entry.has_complete_name());
    assert!(matches!(entry.location(), Err(Error::UnresolvableOffset(0))));
    assert_eq!(
        entry.calculate_name_with_extension(|i| archive.load(i))?,
        "nowhere/lost.bin"
    );
    assert!(read_all(&archive, &entry)?.is_none());

    Ok(())
}

#[traced_test]
#[test]
fn interleaved_entries_on_one_segment() -> Result<(), Error> {
    let mut archive = Archive::new();
    let header = archive.header()?;
    archive.put(3, 0x01, &[0xAA; SECTOR]);
    archive.put(3, 0x02, &[0xBB; SECTOR]);

    let first = Entry::builder()
        .header(header)
        .offset(0x30)
        .length(1)
        .file_hash(1)
        .folder_hash(1)
        .build();
    let second = Entry::builder()
        .header(header)
        .offset(0x31)
        .length(1)
        .file_hash(2)
        .folder_hash(1)
        .build();

    let mut shared = Cursor::new(&archive.segments[3][..]);
    let handle = &mut shared;
    let mut a = first
        .open_stream(|_| Ok(handle))?
        .expect("entry should resolve");
    let mut chunk_a = [0u8; 16];
    a.read_exact(&mut chunk_a)?;
    let handle = a.into_inner();

    let mut b = second
        .open_stream(|_| Ok(handle))?
        .expect("entry should resolve");
    let mut chunk_b = [0u8; 16];
    b.read_exact(&mut chunk_b)?;

    assert_eq!(chunk_a, [0xAA; 16]);
    assert_eq!(chunk_b, [0xBB; 16]);

    Ok(())
}
