pub mod cel;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle CEL and CL2 archives
    Cel {
        #[command(subcommand)]
        command: cel::CelCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Cel { command } => command.handle(),
        }
    }
}
