use serde::Serialize;
use std::fmt;

#[rustfmt::skip]
mod bits {
  pub(crate) const NORTH: u8 = 0b0001;
  pub(crate) const SOUTH: u8 = 0b0010;
  pub(crate) const EAST: u8  = 0b0100;
  pub(crate) const WEST: u8  = 0b1000;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
  North,
  South,
  East,
  West,
}

impl Direction {
  pub const ALL: [Direction; 4] = [Direction::North, Direction::South, Direction::East, Direction::West];

  pub const fn bit(self) -> u8 {
    match self {
      Direction::North => bits::NORTH,
      Direction::South => bits::SOUTH,
      Direction::East => bits::EAST,
      Direction::West => bits::WEST,
    }
  }

  pub const fn label(self) -> &'static str {
    match self {
      Direction::North => "N",
      Direction::South => "S",
      Direction::East => "E",
      Direction::West => "W",
    }
  }
}

/// Set of directions a track block connects to, one bit per direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Connections(u8);

impl Connections {
  const fn new(bits: u8) -> Connections {
    Connections(bits)
  }

  pub const fn bits(self) -> u8 {
    self.0
  }

  pub const fn contains(self, direction: Direction) -> bool {
    self.0 & direction.bit() != 0
  }

  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  pub fn directions(self) -> impl Iterator<Item = Direction> {
    Direction::ALL.into_iter().filter(move |d| self.contains(*d))
  }
}

impl fmt::Display for Connections {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for direction in self.directions() {
      f.write_str(direction.label())?;
    }
    Ok(())
  }
}

#[derive(Debug, Serialize)]
pub struct TrackPiece {
  pub name: &'static str,
  pub connections: Connections,
}

// Masks are for the unrotated piece. Names match the icon stems under static/icons.
pub static TRACK_PIECES: &[TrackPiece] = &[
  TrackPiece { name: "straight", connections: Connections::new(bits::NORTH | bits::SOUTH) },
  TrackPiece { name: "curve", connections: Connections::new(bits::SOUTH | bits::EAST) },
  TrackPiece { name: "junction", connections: Connections::new(bits::NORTH | bits::SOUTH | bits::EAST) },
  TrackPiece {
    name: "crossing",
    connections: Connections::new(bits::NORTH | bits::SOUTH | bits::EAST | bits::WEST),
  },
  TrackPiece { name: "buffer", connections: Connections::new(bits::NORTH) },
];

pub fn track_piece(name: &str) -> Option<&'static TrackPiece> {
  TRACK_PIECES.iter().find(|p| p.name == name)
}
