use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

id_newtype!(GroupId);
id_newtype!(PersonId);
id_newtype!(MinistryId);

/// Visual slot handed to a couple. The palette cycles after the last entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoupleColor {
    Pink,
    Blue,
    Green,
    Yellow,
    Purple,
    Red,
    Teal,
    Indigo,
}

impl CoupleColor {
    pub const PALETTE: [CoupleColor; 8] = [
        CoupleColor::Pink,
        CoupleColor::Blue,
        CoupleColor::Green,
        CoupleColor::Yellow,
        CoupleColor::Purple,
        CoupleColor::Red,
        CoupleColor::Teal,
        CoupleColor::Indigo,
    ];

    pub fn from_slot(slot: usize) -> Self {
        Self::PALETTE[slot % Self::PALETTE.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            CoupleColor::Pink => "pink",
            CoupleColor::Blue => "blue",
            CoupleColor::Green => "green",
            CoupleColor::Yellow => "yellow",
            CoupleColor::Purple => "purple",
            CoupleColor::Red => "red",
            CoupleColor::Teal => "teal",
            CoupleColor::Indigo => "indigo",
        }
    }

    /// ANSI foreground code used by the terminal renderer.
    pub fn ansi_code(self) -> u8 {
        match self {
            CoupleColor::Pink => 95,
            CoupleColor::Blue => 34,
            CoupleColor::Green => 32,
            CoupleColor::Yellow => 33,
            CoupleColor::Purple => 35,
            CoupleColor::Red => 31,
            CoupleColor::Teal => 36,
            CoupleColor::Indigo => 94,
        }
    }
}

impl fmt::Display for CoupleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Order-independent identity of a couple: the two member ids, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    pub low: PersonId,
    pub high: PersonId,
}

impl PairKey {
    pub fn new(a: PersonId, b: PersonId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c_{}_{}", self.low, self.high)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoupleToken {
    pub pair: PairKey,
    pub color: CoupleColor,
}
