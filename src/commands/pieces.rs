use clap::Parser;

use crate::error::Error;
use crate::models::{track_piece, TrackPiece, TRACK_PIECES};

#[derive(Parser)]
pub struct PiecesCommand {
  // Only show this piece
  name: Option<String>,

  // Print the table as JSON
  #[clap(long)]
  json: bool,
}

impl PiecesCommand {
  pub fn execute(&self) -> Result<(), Error> {
    let pieces = self.select()?;
    if self.json {
      println!("{}", serde_json::to_string_pretty(&pieces)?);
    } else {
      for piece in pieces {
        println!("{}", format_piece(piece));
      }
    }
    Ok(())
  }

  fn select(&self) -> Result<Vec<&'static TrackPiece>, Error> {
    match &self.name {
      Some(name) => track_piece(name)
        .map(|p| vec![p])
        .ok_or_else(|| Error::UnknownPiece(name.clone())),
      None => Ok(TRACK_PIECES.iter().collect()),
    }
  }
}

fn format_piece(piece: &TrackPiece) -> String {
  let connections = piece.connections;
  format!("{:<10} {:04b} {} ({})", piece.name, connections.bits(), connections, connections.count())
}
