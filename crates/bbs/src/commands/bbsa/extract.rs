use bbs_bbsa::Entry;
use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tracing::{info, warn};

#[derive(Args)]
pub struct ExtractArgs {
    /// The directory holding BBS0.DAT to BBS4.DAT
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target directory
    #[arg(short = 'O', long, value_name = "DIR")]
    output: PathBuf,

    /// The logical sector of the entry
    #[arg(short, long, value_parser = super::parse_sector)]
    offset: u32,

    /// The length of the entry in sectors
    #[arg(short, long, value_parser = super::parse_sector)]
    length: u32,

    /// The hash of the file name
    #[arg(long, value_parser = super::parse_hash)]
    file_hash: u32,

    /// The hash of the folder name
    #[arg(long, value_parser = super::parse_hash)]
    folder_hash: u32,

    /// The file name, when the catalog has it
    #[arg(long)]
    file_name: Option<String>,

    /// The folder name, when the catalog has it
    #[arg(long)]
    folder_name: Option<String>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let header = super::read_header(&self.directory)?;
        let entry = Entry::builder()
            .header(header)
            .offset(self.offset)
            .length(self.length)
            .maybe_file_name(self.file_name.clone())
            .maybe_folder_name(self.folder_name.clone())
            .file_hash(self.file_hash)
            .folder_hash(self.folder_hash)
            .build();

        let name = entry
            .calculate_name_with_extension(|i| super::open_segment(&self.directory, i))?;
        let Some(mut stream) = entry.open_stream(|i| super::open_segment(&self.directory, i))?
        else {
            warn!(
                file_hash = entry.file_hash(),
                folder_hash = entry.folder_hash(),
                "skipping {name}, it is not stored in any segment"
            );
            return Ok(());
        };

        let p = super::output_path(&self.output, &name)?;
        info!("writing {}", p.display());

        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent)
                .into_diagnostic()
                .context(format!("creating {}", parent.display()))?;
        }
        let mut out = if !self.overwrite {
            File::create_new(&p)
                .into_diagnostic()
                .context(format!("creating {}", &p.display()))?
        } else {
            File::create(&p)
                .into_diagnostic()
                .context(format!("creating {}", &p.display()))?
        };

        std::io::copy(&mut stream, &mut out).into_diagnostic()?;
        Ok(())
    }
}
