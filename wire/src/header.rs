//! Frame header types and constants.

use std::fmt;

/// Header size in bytes: `u16 total_len | u8 kind`.
pub const FRAME_HEADER_SIZE: usize = 2 + 1;

/// The one-byte identifier selecting a frame's body codec.
///
/// Any byte value is a legal kind on the wire; the constants below name the
/// kinds the codec has body layouts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PacketKind(u8);

impl PacketKind {
    pub const PLAYER_CONNECT: Self = Self(1);
    pub const TILE_SQUARE: Self = Self(20);
    pub const REMOVE_ITEM_OWNER: Self = Self(39);
    pub const REQUEST_SIGN: Self = Self(46);
    pub const ENTER_WORLD: Self = Self(49);
    pub const NPC_BUFFS: Self = Self(54);
    pub const PLAYER_TELEPORT_ITEM: Self = Self(73);
    pub const ANGLER_QUEST: Self = Self(74);
    pub const ALTER_ITEM: Self = Self(88);
    pub const AMBIENT_EFFECT: Self = Self(112);
    pub const OLD_ONES_ARMY_INFO: Self = Self(116);

    /// Creates a kind from its raw byte.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the raw kind byte.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns a display name for kinds the codec knows.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            1 => "PlayerConnect",
            20 => "TileSquare",
            39 => "RemoveItemOwner",
            46 => "RequestSign",
            49 => "EnterWorld",
            54 => "NpcBuffs",
            73 => "PlayerTeleportItem",
            74 => "AnglerQuest",
            88 => "AlterItem",
            112 => "AmbientEffect",
            116 => "OldOnesArmyInfo",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u8> for PacketKind {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl From<PacketKind> for u8 {
    fn from(kind: PacketKind) -> Self {
        kind.0
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}({})", self.0),
            None => write!(f, "Unknown({})", self.0),
        }
    }
}

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Total frame length, including this header.
    pub total_len: u16,
    /// Body codec selector.
    pub kind: PacketKind,
}

impl FrameHeader {
    /// Creates a header for a body of `body_len` bytes.
    ///
    /// Returns `None` if the total does not fit the u16 prefix.
    #[must_use]
    pub fn for_body(kind: PacketKind, body_len: usize) -> Option<Self> {
        let total = body_len.checked_add(FRAME_HEADER_SIZE)?;
        let total_len = u16::try_from(total).ok()?;
        Some(Self { total_len, kind })
    }

    /// Returns the declared body length (saturating for malformed headers).
    #[must_use]
    pub const fn body_len(self) -> usize {
        (self.total_len as usize).saturating_sub(FRAME_HEADER_SIZE)
    }
}
