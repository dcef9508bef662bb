use bbs_bbsa::{error::Error, offset::resolve};
use clap::Args;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Args)]
pub struct LocateArgs {
    /// The directory holding BBS0.DAT to BBS4.DAT
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A logical sector from the catalog
    #[arg(short, long, value_parser = super::parse_sector)]
    offset: u32,
}

impl LocateArgs {
    pub fn handle(&self) -> Result<()> {
        let header = super::read_header(&self.directory)?;

        match resolve(&header, self.offset) {
            Ok(location) => println!(
                "{} sector {:#x} (byte {:#x})",
                format!("BBS{}.DAT", location.segment).bold(),
                location.physical_sector,
                location.byte_offset()
            ),
            Err(Error::UnresolvableOffset(offset)) => {
                warn!("logical sector {offset:#x} is below every segment");
                println!("{}", "unresolvable".red());
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}
