//! 8.8 fixed-point arithmetic.
//!
//! All entity motion uses this representation: the high part is the
//! integer pixel coordinate, the low 8 bits are 1/256ths of a pixel.
//! The backing store is an `i32` so the full unsigned 0..=255 pixel
//! range and negative intercept deltas both fit; the arithmetic is
//! otherwise exactly the hardware's 8.8 scheme.

use serde::{Deserialize, Serialize};

/// An 8.8 fixed-point value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Fx(i32);

impl Fx {
    /// Bits in the fractional part.
    pub const SHIFT: u32 = 8;

    /// One pixel in raw units.
    pub const SCALE: i32 = 1 << Self::SHIFT;

    pub const ZERO: Fx = Fx(0);

    /// Build from a whole pixel coordinate.
    pub fn from_px(px: i32) -> Fx {
        Fx(px << Self::SHIFT)
    }

    /// Build from raw 8.8 units.
    pub fn from_raw(raw: i32) -> Fx {
        Fx(raw)
    }

    /// Raw 8.8 units.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Truncate to the pixel coordinate.
    ///
    /// Arithmetic shift, not rounding: negative values truncate toward
    /// negative infinity, matching the hardware for negative intercept
    /// deltas.
    pub fn to_px(self) -> i32 {
        self.0 >> Self::SHIFT
    }
}

impl std::ops::Add for Fx {
    type Output = Fx;

    fn add(self, rhs: Fx) -> Fx {
        Fx(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Fx {
    fn add_assign(&mut self, rhs: Fx) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Fx {
    type Output = Fx;

    fn sub(self, rhs: Fx) -> Fx {
        Fx(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Fx {
    type Output = Fx;

    fn neg(self) -> Fx {
        Fx(-self.0)
    }
}
