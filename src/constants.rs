//! Configuration constants for the game display
//!
//! This module contains the fixed limits and defaults used throughout the
//! crate. Runtime-tunable values in [`crate::config::Options`] take their
//! defaults and bounds from here.

/// Keyboard mapping constants
pub mod keymap {
    /// Number of blocks addressed by the digit keys '1' through '9'
    pub const DIGIT_KEYS: usize = 9;
    /// Number of blocks addressed by the letter keys 'a' through 'z'
    pub const LETTER_KEYS: usize = 26;
    /// Highest block index that still has a keyboard key
    pub const MAX_KEYED_BLOCKS: usize = DIGIT_KEYS + LETTER_KEYS;
}

/// Block highlight constants
pub mod activation {
    /// Default time in milliseconds a block stays lit after a key press
    pub const DURATION_MS: u64 = 3000;
    /// Shortest configurable highlight in milliseconds
    pub const MIN_DURATION_MS: u64 = 100;
    /// Longest configurable highlight in milliseconds
    pub const MAX_DURATION_MS: u64 = 60_000;
}

/// Entry form constants
pub mod entry {
    /// Counts above this value trigger the layout warning
    pub const LARGE_COUNT_THRESHOLD: usize = 26;
    /// Smallest configurable warning threshold
    pub const MIN_LARGE_COUNT_THRESHOLD: usize = 1;
    /// Largest configurable warning threshold
    pub const MAX_LARGE_COUNT_THRESHOLD: usize = 1000;
    /// Maximum number of characters the count field accepts
    pub const MAX_INPUT_LENGTH: usize = 12;
}

/// Toast message constants
pub mod notice {
    /// Default time in milliseconds a notice stays on screen
    pub const DURATION_MS: u64 = 3000;
    /// Shortest configurable notice duration in milliseconds
    pub const MIN_DURATION_MS: u64 = 500;
    /// Longest configurable notice duration in milliseconds
    pub const MAX_DURATION_MS: u64 = 30_000;
}

/// Layout and animation constants for the terminal front end
pub mod presentation {
    /// Title shown on both screens unless configured otherwise
    pub const DEFAULT_TITLE: &str = "Don't Do It";
    /// Maximum length of a configured title in characters
    pub const MAX_TITLE_LENGTH: usize = 60;
    /// Narrowest a block may be drawn, in terminal cells
    pub const MIN_BLOCK_WIDTH: u16 = 20;
    /// Preferred block height in terminal rows
    pub const BLOCK_HEIGHT: u16 = 7;
    /// Shortest a block may be squeezed to before blocks are dropped
    pub const MIN_BLOCK_HEIGHT: u16 = 5;
    /// Delay between the reveal of consecutive blocks, in milliseconds
    pub const REVEAL_STAGGER_MS: u64 = 50;
    /// Upper bound on the time between two redraws, in milliseconds
    pub const FRAME_TICK_MS: u64 = 50;
    /// Floating shapes drawn behind the entry form
    pub const ENTRY_SHAPES: usize = 10;
    /// Floating shapes drawn behind the display grid
    pub const DISPLAY_SHAPES: usize = 8;
}
