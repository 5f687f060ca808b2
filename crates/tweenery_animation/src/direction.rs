//! Playback direction flags
//!
//! A direction is two independent bits. `BACKWARD` flips the value mapping and
//! `ALTERNATE` toggles that flip after every finished iteration. They combine
//! with `|`:
//!
//! ```rust
//! use tweenery_animation::Direction;
//!
//! let ping_pong = Direction::ALTERNATE | Direction::BACKWARD;
//! assert!(ping_pong.is_reversed() && ping_pong.is_alternate());
//! assert_eq!(Direction::ALTERNATE | Direction::FORWARD, Direction::ALTERNATE);
//! ```

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Playback direction for tweens
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Direction {
    /// Map progress with the reversed formula
    pub reversed: bool,
    /// Toggle `reversed` after each finished iteration
    pub alternate: bool,
}

impl Direction {
    pub const FORWARD: Direction = Direction {
        reversed: false,
        alternate: false,
    };
    pub const BACKWARD: Direction = Direction {
        reversed: true,
        alternate: false,
    };
    pub const ALTERNATE: Direction = Direction {
        reversed: false,
        alternate: true,
    };

    const REVERSED_BIT: u8 = 0b01;
    const ALTERNATE_BIT: u8 = 0b10;

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn is_alternate(&self) -> bool {
        self.alternate
    }

    /// Packed form: bit 0 is reversed, bit 1 is alternate
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.reversed {
            bits |= Self::REVERSED_BIT;
        }
        if self.alternate {
            bits |= Self::ALTERNATE_BIT;
        }
        bits
    }

    /// Inverse of [`Direction::bits`]; higher bits are ignored
    pub fn from_bits(bits: u8) -> Self {
        Self {
            reversed: bits & Self::REVERSED_BIT != 0,
            alternate: bits & Self::ALTERNATE_BIT != 0,
        }
    }
}

impl BitOr for Direction {
    type Output = Direction;

    fn bitor(self, rhs: Direction) -> Direction {
        Direction {
            reversed: self.reversed || rhs.reversed,
            alternate: self.alternate || rhs.alternate,
        }
    }
}

impl BitOrAssign for Direction {
    fn bitor_assign(&mut self, rhs: Direction) {
        *self = *self | rhs;
    }
}
