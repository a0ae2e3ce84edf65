use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner value of a square nobody controls.
pub const NEUTRAL: u8 = 0;
pub const PLAYER_ONE: u8 = 1;
pub const PLAYER_TWO: u8 = 2;

/// A value that can be turned into a piece owner.
///
/// Conversion never fails: anything that is not an integer in `0..=2`
/// becomes [`NEUTRAL`].
pub trait OwnerInput: Copy + fmt::Debug {
    fn to_owner(self) -> u8;
}

macro_rules! impl_owner_input_int {
    ($($t:ty),*) => {
        $(
            impl OwnerInput for $t {
                fn to_owner(self) -> u8 {
                    match u8::try_from(self) {
                        Ok(owner) if owner <= PLAYER_TWO => owner,
                        _ => {
                            log::trace!("owner {self} coerced to neutral");
                            NEUTRAL
                        }
                    }
                }
            }
        )*
    };
}

impl_owner_input_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_owner_input_float {
    ($($t:ty),*) => {
        $(
            impl OwnerInput for $t {
                #[allow(
                    clippy::float_cmp,
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss
                )]
                fn to_owner(self) -> u8 {
                    if self.is_finite() && self.fract() == 0.0 && (0.0..=2.0).contains(&self) {
                        self as u8
                    } else {
                        log::trace!("owner {self} coerced to neutral");
                        NEUTRAL
                    }
                }
            }
        )*
    };
}

impl_owner_input_float!(f32, f64);

/// Applies the owner rule: integers in `0..=2` pass through, everything else is 0.
pub fn clamp_owner<O: OwnerInput>(input: O) -> u8 {
    input.to_owner()
}

/// A single checkers piece: who owns it and whether it has been crowned.
///
/// Owner and king flag change independently. Nothing here stops a neutral
/// piece from being kinged or a king from being demoted; board rules live
/// with the game engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PieceRepr")]
pub struct Piece {
    owner: u8,
    king: bool,
}

impl Piece {
    #[must_use]
    pub fn new<O: OwnerInput>(owner: O) -> Self {
        Self {
            owner: clamp_owner(owner),
            king: false,
        }
    }

    pub fn set_owner<O: OwnerInput>(&mut self, new_owner: O) {
        self.owner = clamp_owner(new_owner);
    }

    pub const fn set_king(&mut self, new_king: bool) {
        self.king = new_king;
    }

    #[must_use]
    pub const fn owner(&self) -> u8 {
        self.owner
    }

    #[must_use]
    pub const fn is_king(&self) -> bool {
        self.king
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match (self.owner, self.king) {
            (PLAYER_ONE, false) => '1',
            (PLAYER_TWO, false) => '2',
            (PLAYER_ONE, true) => 'A',
            (PLAYER_TWO, true) => 'B',
            (_, true) => 'K',
            (_, false) => '.',
        };
        write!(f, "{glyph}")
    }
}

// Wire shape accepted on deserialize. Owner is read as a number so
// out-of-range and fractional values clamp instead of erroring.
#[derive(Deserialize)]
struct PieceRepr {
    owner: f64,
    #[serde(default)]
    king: bool,
}

impl From<PieceRepr> for Piece {
    fn from(repr: PieceRepr) -> Self {
        let mut piece = Self::new(repr.owner);
        piece.set_king(repr.king);
        piece
    }
}
