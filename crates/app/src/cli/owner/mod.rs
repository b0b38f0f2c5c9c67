use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct OwnerCommand {
    #[command(subcommand)]
    command: OwnerSubcommand,
}

#[derive(Debug, Subcommand)]
enum OwnerSubcommand {
    Create(create::CreateOwnerArgs),
}

pub(crate) async fn run(command: OwnerCommand) -> Result<(), String> {
    match command.command {
        OwnerSubcommand::Create(args) => create::run(args).await,
    }
}
