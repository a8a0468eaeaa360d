//! Keyboard shortcuts for the display grid
//!
//! Blocks are addressed by a single keystroke: the first nine by the digits
//! '1' through '9', the next twenty-six by the letters 'a' through 'z'.
//! Blocks past the thirty-fifth have no key and can only be looked at.
//!
//! The map is never stored. Both directions are computed from the block
//! index, so it is injective by construction and cannot drift from the
//! participant count it was built for.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    constants::keymap::{DIGIT_KEYS, MAX_KEYED_BLOCKS},
    count::ParticipantCount,
};

/// One-based index of a block in the display grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(usize);

impl BlockId {
    /// Creates a block id, returning `None` for index zero
    pub fn new(index: usize) -> Option<Self> {
        (index > 0).then_some(Self(index))
    }

    /// Returns the one-based index
    pub fn get(self) -> usize {
        self.0
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Mapping between keys and blocks for a given number of players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    count: ParticipantCount,
}

impl KeyMap {
    /// Derives the key map for `count` blocks
    pub fn new(count: ParticipantCount) -> Self {
        Self { count }
    }

    /// Number of blocks that can be reached from the keyboard
    pub fn len(&self) -> usize {
        self.count.get().min(MAX_KEYED_BLOCKS)
    }

    /// Whether no block has a key, which never happens for a valid count
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the block a key activates
    ///
    /// Letters are matched case-insensitively. Keys that are not part of
    /// the map, or that address a block past the participant count, yield
    /// `None`.
    pub fn block_for(&self, key: char) -> Option<BlockId> {
        index_for_key(key)
            .filter(|&index| index <= self.count.get())
            .and_then(BlockId::new)
    }

    /// Looks up the key that activates a block
    pub fn key_for(&self, block: BlockId) -> Option<char> {
        if block.get() > self.count.get() {
            return None;
        }
        key_for_index(block.get())
    }

    /// Iterates over every `(key, block)` pair in block order
    pub fn iter(&self) -> impl Iterator<Item = (char, BlockId)> + '_ {
        (1..=self.len()).filter_map(|index| Some((key_for_index(index)?, BlockId::new(index)?)))
    }
}

fn key_for_index(index: usize) -> Option<char> {
    match index {
        1..=DIGIT_KEYS => char::from_digit(index as u32, 10),
        _ if (DIGIT_KEYS + 1..=MAX_KEYED_BLOCKS).contains(&index) => {
            let offset = u8::try_from(index - DIGIT_KEYS - 1).ok()?;
            Some(char::from(b'a' + offset))
        }
        _ => None,
    }
}

fn index_for_key(key: char) -> Option<usize> {
    match key.to_ascii_lowercase() {
        digit @ '1'..='9' => digit.to_digit(10).map(|d| d as usize),
        letter @ 'a'..='z' => Some(DIGIT_KEYS + 1 + (letter as usize - 'a' as usize)),
        _ => None,
    }
}
