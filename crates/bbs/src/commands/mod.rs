pub mod bbsa;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle BBSA archives
    Bbsa {
        #[command(subcommand)]
        command: bbsa::BbsaCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Bbsa { command } => command.handle(),
        }
    }
}
