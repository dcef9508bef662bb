use clap::Args;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct HeaderArgs {
    /// The directory holding BBS0.DAT to BBS4.DAT
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,
}

impl HeaderArgs {
    pub fn handle(&self) -> Result<()> {
        let header = super::read_header(&self.directory)?;

        for segment in 0..bbs_bbsa::types::SEGMENT_COUNT {
            if let Some(sector) = header.sector_index(segment) {
                println!("{} {:#010x}", format!("BBS{segment}.DAT").bold(), sector);
            }
        }
        Ok(())
    }
}
