pub mod logic;

pub use logic::piece::Piece;
