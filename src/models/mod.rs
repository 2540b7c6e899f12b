pub mod image_state;
pub mod track;

pub use image_state::{decode_grid_update, GridUpdateResponse};
pub use track::{track_piece, TrackPiece, TRACK_PIECES};
