//! Block frame-dependency lookup.
//!
//! Some block types (furniture, plants, torches, ...) render from a sub-tile
//! frame and carry two extra `i16` frame coordinates on the wire. Which ids
//! do is game data, not protocol: the codec consults a [`FrameLookup`] and
//! ships a default table that callers may replace.

use crate::types::BlockId;

const WORDS: usize = (u16::MAX as usize + 1) / 64;

/// Answers whether a block type carries frame coordinates on the wire.
pub trait FrameLookup {
    fn has_frames(&self, id: BlockId) -> bool;
}

impl<F> FrameLookup for F
where
    F: Fn(BlockId) -> bool,
{
    fn has_frames(&self, id: BlockId) -> bool {
        self(id)
    }
}

/// A bitset over every possible block id.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<u16>", into = "Vec<u16>")
)]
pub struct BlockFrames {
    bits: [u64; WORDS],
}

impl BlockFrames {
    /// A table in which no block has frames.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Builds a table from a list of frame-dependent block ids.
    #[must_use]
    pub const fn from_ids(ids: &[u16]) -> Self {
        let mut bits = [0u64; WORDS];
        let mut i = 0;
        while i < ids.len() {
            let id = ids[i] as usize;
            bits[id / 64] |= 1 << (id % 64);
            i += 1;
        }
        Self { bits }
    }

    /// Returns the bundled default table.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Marks or clears a block id as frame-dependent.
    pub fn set(&mut self, id: BlockId, has_frames: bool) {
        let id = usize::from(id.raw());
        if has_frames {
            self.bits[id / 64] |= 1 << (id % 64);
        } else {
            self.bits[id / 64] &= !(1 << (id % 64));
        }
    }

    /// Returns the frame-dependent ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..=u16::MAX)
            .map(BlockId::new)
            .filter(|id| self.has_frames(*id))
    }

    /// Returns the number of frame-dependent ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns `true` if no id is frame-dependent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|word| *word == 0)
    }
}

impl FrameLookup for BlockFrames {
    fn has_frames(&self, id: BlockId) -> bool {
        let id = usize::from(id.raw());
        self.bits[id / 64] & (1 << (id % 64)) != 0
    }
}

impl Default for BlockFrames {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl std::fmt::Debug for BlockFrames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockFrames")
            .field("len", &self.len())
            .finish()
    }
}

impl From<Vec<u16>> for BlockFrames {
    fn from(ids: Vec<u16>) -> Self {
        Self::from_ids(&ids)
    }
}

impl From<BlockFrames> for Vec<u16> {
    fn from(frames: BlockFrames) -> Self {
        frames.ids().map(BlockId::raw).collect()
    }
}

impl FromIterator<BlockId> for BlockFrames {
    fn from_iter<I: IntoIterator<Item = BlockId>>(iter: I) -> Self {
        let mut frames = Self::empty();
        for id in iter {
            frames.set(id, true);
        }
        frames
    }
}

static BUILTIN: BlockFrames = BlockFrames::from_ids(DEFAULT_FRAME_IMPORTANT);

/// Frame-dependent block ids for the 1.4.0 game data.
const DEFAULT_FRAME_IMPORTANT: &[u16] = &[
    3, 4, 5, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 24, 26, 27, 28, 29, 31, 33, 34, 35,
    36, 42, 49, 50, 55, 61, 71, 72, 73, 74, 77, 78, 79, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90,
    91, 92, 93, 94, 95, 96, 97, 98, 99, 100, 101, 102, 103, 104, 105, 106, 110, 113, 114, 125,
    126, 128, 129, 132, 133, 134, 135, 136, 137, 138, 139, 141, 142, 143, 144, 149, 165, 171,
    172, 173, 174, 178, 184, 185, 186, 187, 201, 207, 209, 210, 212, 215, 216, 217, 218, 219,
    220, 227, 228, 231, 233, 235, 236, 237, 238, 239, 240, 241, 242, 243, 244, 245, 246, 247,
    254, 269, 270, 271, 275, 276, 277, 278, 279, 280, 281, 282, 283, 285, 286, 287, 288, 289,
    290, 291, 292, 293, 294, 295, 296, 297, 298, 299, 300, 301, 302, 303, 304, 305, 306, 307,
    308, 309, 310, 314, 316, 317, 318, 319, 320, 323, 324, 334, 335, 337, 338, 339, 349, 354,
    355, 356, 358, 359, 360, 361, 362, 363, 364, 372, 373, 374, 375, 376, 377, 378, 380, 386,
    387, 388, 389, 390, 391, 392, 393, 394, 395, 405, 406, 410, 411, 412, 413, 414, 419, 420,
    423, 424, 425, 427, 428, 429, 435, 436, 437, 438, 439, 440, 441, 442, 443, 444, 445, 452,
    453, 454, 455, 456, 457, 461, 462, 463, 464, 465, 466, 467, 468, 469, 470, 471, 475, 476,
    480, 484, 485, 486, 487, 488, 489, 490, 491, 493, 494, 497, 499, 505, 506, 509, 510, 511,
    518, 519, 520, 521, 522, 523, 524, 525, 526, 527, 529, 530, 531, 532, 533, 538, 542, 543,
    544, 545, 547, 548, 549, 550, 551, 552, 553, 554, 555, 556, 558, 559, 560, 564, 565, 567,
    568, 569, 570, 571, 572, 573, 579, 580, 581, 582, 583, 584, 585, 586, 587, 588, 589, 590,
    591, 592, 593, 594, 595, 596, 597, 598, 599, 600, 601, 602, 603, 604, 605, 606, 607, 608,
    609, 610, 611, 612, 613, 614, 615, 616, 617, 619, 620, 621, 622,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_known_ids() {
        let frames = BlockFrames::builtin();
        assert!(!frames.has_frames(BlockId::new(0)), "dirt has no frames");
        assert!(!frames.has_frames(BlockId::new(1)), "stone has no frames");
        assert!(frames.has_frames(BlockId::new(4)), "torches have frames");
        assert!(frames.has_frames(BlockId::new(21)), "chests have frames");
        assert_eq!(frames.len(), DEFAULT_FRAME_IMPORTANT.len());
    }

    #[test]
    fn empty_table() {
        let frames = BlockFrames::empty();
        assert!(frames.is_empty());
        assert!(!frames.has_frames(BlockId::new(21)));
    }

    #[test]
    fn set_and_clear() {
        let mut frames = BlockFrames::empty();
        frames.set(BlockId::new(u16::MAX), true);
        assert!(frames.has_frames(BlockId::new(u16::MAX)));
        frames.set(BlockId::new(u16::MAX), false);
        assert!(frames.is_empty());
    }

    #[test]
    fn ids_roundtrip_through_vec() {
        let frames = BlockFrames::from_ids(&[7, 3, 900]);
        let ids: Vec<u16> = frames.clone().into();
        assert_eq!(ids, vec![3, 7, 900]);
        assert_eq!(BlockFrames::from(ids), frames);
    }

    #[test]
    fn closure_lookup() {
        let lookup = |id: BlockId| id.raw() >= 100;
        assert!(lookup.has_frames(BlockId::new(100)));
        assert!(!lookup.has_frames(BlockId::new(99)));
    }

    #[test]
    fn collect_from_ids() {
        let frames: BlockFrames = [BlockId::new(5), BlockId::new(6)].into_iter().collect();
        assert_eq!(frames.len(), 2);
    }
}
