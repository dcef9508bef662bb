use bbs_bbsa::folder::{resolve_folder, FolderHash};
use clap::Args;
use miette::Result;
use tracing::debug;

#[derive(Args)]
pub struct FolderArgs {
    /// A folder hash in hex
    #[arg(value_parser = super::parse_hash)]
    hash: u32,
}

impl FolderArgs {
    pub fn handle(&self) -> Result<()> {
        debug!("{:?}", FolderHash::from(self.hash));

        match resolve_folder(self.hash) {
            Some(folder) => println!("{folder}"),
            None => println!("@{:08X}", self.hash),
        }
        Ok(())
    }
}
