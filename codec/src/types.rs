//! Value types carried inside tiles.

use std::num::{NonZeroU16, NonZeroU8};

/// A block type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockId(u16);

impl BlockId {
    /// Creates a new block ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw block ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for BlockId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

/// A wall type identifier. Wall `0` means "no wall" and is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallId(NonZeroU16);

impl WallId {
    /// Creates a wall ID, returning `None` for the empty wall.
    #[must_use]
    pub const fn new(id: u16) -> Option<Self> {
        match NonZeroU16::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the raw wall ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0.get()
    }
}

/// A paint color in `1..=31`. Color `0` means "unpainted" and is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaintColor(u8);

impl PaintColor {
    /// Largest color value that fits the five-bit paint field.
    pub const MAX: u8 = 31;

    /// Creates a paint color, clamping values above [`Self::MAX`].
    ///
    /// Returns `None` for `0` (no paint).
    #[must_use]
    pub const fn new(raw: u8) -> Option<Self> {
        match raw {
            0 => None,
            raw if raw > Self::MAX => Some(Self(Self::MAX)),
            raw => Some(Self(raw)),
        }
    }

    /// Accepts a color byte read from the wire without clamping.
    #[must_use]
    pub const fn from_wire(raw: u8) -> Option<Self> {
        match raw {
            1..=Self::MAX => Some(Self(raw)),
            _ => None,
        }
    }

    /// Returns the raw color value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// The kind of liquid occupying a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LiquidType {
    #[default]
    Water = 0,
    Lava = 1,
    Honey = 2,
    Shimmer = 3,
}

impl LiquidType {
    /// Parses a liquid type code.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Water),
            1 => Some(Self::Lava),
            2 => Some(Self::Honey),
            3 => Some(Self::Shimmer),
            _ => None,
        }
    }

    /// Returns the wire code.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// A non-empty body of liquid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Liquid {
    pub amount: NonZeroU8,
    pub kind: LiquidType,
}

impl Liquid {
    /// Creates a liquid, returning `None` when `amount` is zero.
    #[must_use]
    pub const fn new(amount: u8, kind: LiquidType) -> Option<Self> {
        match NonZeroU8::new(amount) {
            Some(amount) => Some(Self { amount, kind }),
            None => None,
        }
    }
}

/// The shape of an active block. Halved and the slopes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockShape {
    #[default]
    Normal,
    Halved,
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
    /// Slope values 5 to 7 carry no named shape but are forwarded unchanged.
    Slope5,
    Slope6,
    Slope7,
}

impl BlockShape {
    /// Maps the three-bit slope field to a shape. `0` is [`BlockShape::Normal`].
    /// Bits above the field are ignored.
    #[must_use]
    pub const fn from_slope_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::Normal,
            1 => Self::TopRight,
            2 => Self::TopLeft,
            3 => Self::BottomRight,
            4 => Self::BottomLeft,
            5 => Self::Slope5,
            6 => Self::Slope6,
            _ => Self::Slope7,
        }
    }

    /// Returns the three-bit slope field for this shape (`0` for normal and halved).
    #[must_use]
    pub const fn slope_bits(self) -> u8 {
        match self {
            Self::Normal | Self::Halved => 0,
            Self::TopRight => 1,
            Self::TopLeft => 2,
            Self::BottomRight => 3,
            Self::BottomLeft => 4,
            Self::Slope5 => 5,
            Self::Slope6 => 6,
            Self::Slope7 => 7,
        }
    }
}

/// Sub-tile frame coordinates for frame-dependent blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileFrame {
    pub x: i16,
    pub y: i16,
}

impl TileFrame {
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Wire colors present on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wiring {
    pub red: bool,
    pub blue: bool,
    pub green: bool,
    pub yellow: bool,
}

impl Wiring {
    /// Returns `true` if any wire is present.
    #[must_use]
    pub const fn any(self) -> bool {
        self.red || self.blue || self.green || self.yellow
    }
}

/// The liquid-interaction discriminator optionally carried by a tile square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeType(NonZeroU8);

impl ChangeType {
    pub const LAVA_WATER: Self = Self(match NonZeroU8::new(1) {
        Some(v) => v,
        None => unreachable!(),
    });
    pub const HONEY_WATER: Self = Self(match NonZeroU8::new(2) {
        Some(v) => v,
        None => unreachable!(),
    });
    pub const HONEY_LAVA: Self = Self(match NonZeroU8::new(3) {
        Some(v) => v,
        None => unreachable!(),
    });

    /// Creates a change type, returning `None` for `0` (no change type).
    #[must_use]
    pub const fn new(raw: u8) -> Option<Self> {
        match NonZeroU8::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Returns the raw discriminator byte.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0.get()
    }
}
