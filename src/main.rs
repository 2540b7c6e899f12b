mod commands;
mod config;
mod error;
mod models;

use clap::Parser;
use log::error;
use std::process;

use crate::commands::{run_command, SubCommand};


/// grid editor server for track layouts
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
  #[clap(subcommand)]
  command: SubCommand,
}



fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
  let args = Args::parse();
  if let Err(err) = run_command(args.command) {
    error!("{}", err);
    process::exit(1);
  }
}
