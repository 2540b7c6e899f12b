use clap::Parser;

use crate::error::Error;

pub mod pieces;
pub mod serve;

#[derive(Parser)]
pub enum SubCommand {
  /// Serve the editor and the grid update API
  Serve(serve::ServeCommand),
  /// Print the track piece connection table
  Pieces(pieces::PiecesCommand),
}

pub fn run_command(sub: SubCommand) -> Result<(), Error> {
  match sub {
    SubCommand::Serve(cmd) => cmd.execute(),
    SubCommand::Pieces(cmd) => cmd.execute()
  }
}
