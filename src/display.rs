//! The player grid
//!
//! Mounted with a participant count, the grid shows one block per player and
//! lights a block up when its key is pressed. It owns the alarm queue for its
//! highlights, so unmounting the grid cancels every pending deactivation.
//!
//! When the screen is too small for every block, the grid shows a window of
//! whole rows. The window can be scrolled and always follows the most
//! recently pressed block.

use std::ops::Range;

use tracing::{debug, info};
use web_time::{Duration, Instant};

use crate::{
    activation::Activations,
    backdrop::{Backdrop, BackdropStyle},
    constants::presentation::REVEAL_STAGGER_MS,
    count::ParticipantCount,
    keymap::{BlockId, KeyMap},
    timer::AlarmQueue,
};

/// Everything the renderer needs to draw one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockView {
    /// The block's index
    pub id: BlockId,
    /// Key that activates it, if it has one
    pub key_hint: Option<char>,
    /// Whether the block is lit
    pub active: bool,
    /// Whether the block's reveal delay has passed
    pub revealed: bool,
}

/// How many blocks fit on screen at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Blocks per row
    pub columns: usize,
    /// Rows on screen
    pub rows: usize,
}

/// State of the display screen
#[derive(Debug)]
pub struct DisplayGrid {
    count: ParticipantCount,
    keymap: KeyMap,
    activations: Activations,
    alarms: AlarmQueue,
    backdrop: Backdrop,
    mounted_at: Instant,
    page: Page,
    first_row: usize,
    last_pressed: Option<BlockId>,
}

impl DisplayGrid {
    /// Mounts the grid for `count` players
    ///
    /// # Arguments
    ///
    /// * `count` - Number of blocks to show
    /// * `activation_duration` - How long a key press keeps a block lit
    /// * `now` - Mount time, used for the staggered reveal and the backdrop
    pub fn mount(count: ParticipantCount, activation_duration: Duration, now: Instant) -> Self {
        info!(%count, "display grid mounted");
        Self {
            count,
            keymap: KeyMap::new(count),
            activations: Activations::new(activation_duration),
            alarms: AlarmQueue::new(),
            backdrop: Backdrop::generate(&BackdropStyle::display(), &mut fastrand::Rng::new()),
            mounted_at: now,
            // everything on one row until the front end reports its size
            page: Page {
                columns: count.get(),
                rows: 1,
            },
            first_row: 0,
            last_pressed: None,
        }
    }

    /// Handles a key press
    ///
    /// # Returns
    ///
    /// The block that was activated, or `None` if the key is not mapped
    pub fn press(&mut self, key: char, now: Instant) -> Option<BlockId> {
        let Some(block) = self.keymap.block_for(key) else {
            debug!(?key, "unmapped key ignored");
            return None;
        };

        self.activations.activate(block, self.alarms.scheduler(now));
        self.last_pressed = Some(block);
        self.scroll_to(block);
        Some(block)
    }

    /// Tells the grid how many blocks the screen can hold
    ///
    /// The window is clamped to the new shape and moved to keep the most
    /// recently pressed block in view.
    pub fn set_page(&mut self, columns: usize, rows: usize) {
        let page = Page {
            columns: columns.max(1),
            rows: rows.max(1),
        };
        if page == self.page {
            return;
        }
        debug!(columns = page.columns, rows = page.rows, "grid page resized");
        self.page = page;
        self.first_row = self.first_row.min(self.max_first_row());
        if let Some(block) = self.last_pressed {
            self.scroll_to(block);
        }
    }

    /// The current page shape
    pub fn page(&self) -> Page {
        self.page
    }

    fn total_rows(&self) -> usize {
        self.count.get().div_ceil(self.page.columns)
    }

    fn max_first_row(&self) -> usize {
        self.total_rows().saturating_sub(self.page.rows)
    }

    /// Moves the window down by `rows`, stopping at the last row
    pub fn scroll_down(&mut self, rows: usize) {
        self.first_row = self
            .first_row
            .saturating_add(rows)
            .min(self.max_first_row());
    }

    /// Moves the window up by `rows`, stopping at the first row
    pub fn scroll_up(&mut self, rows: usize) {
        self.first_row = self.first_row.saturating_sub(rows);
    }

    /// Scrolls the least distance that brings `block` into view
    pub fn scroll_to(&mut self, block: BlockId) {
        let row = (block.get() - 1) / self.page.columns;
        if row < self.first_row {
            self.first_row = row;
        } else if row >= self.first_row + self.page.rows {
            self.first_row = row + 1 - self.page.rows;
        }
    }

    /// Zero-based positions of the blocks in the window
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.first_row * self.page.columns;
        let end = (start + self.page.columns * self.page.rows).min(self.count.get());
        start..end
    }

    /// Delivers every alarm that is due at `now`
    ///
    /// # Returns
    ///
    /// Number of blocks that went out
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut deactivated = 0;
        while let Some(message) = self.alarms.pop_due(now) {
            if self.activations.receive_alarm(&message) {
                deactivated += 1;
            }
        }
        deactivated
    }

    /// Deadline of the next pending deactivation
    pub fn next_deadline(&self) -> Option<Instant> {
        self.alarms.next_deadline()
    }

    /// Iterates over every block in index order
    pub fn blocks(&self, now: Instant) -> impl Iterator<Item = BlockView> + '_ {
        let elapsed = now.saturating_duration_since(self.mounted_at);
        (1..=self.count.get()).filter_map(move |index| {
            let id = BlockId::new(index)?;
            Some(BlockView {
                id,
                key_hint: self.keymap.key_for(id),
                active: self.activations.is_active(id),
                revealed: elapsed >= Self::reveal_delay(id),
            })
        })
    }

    /// Time after mount at which `block` becomes fully visible
    pub fn reveal_delay(block: BlockId) -> Duration {
        Duration::from_millis(REVEAL_STAGGER_MS * block.get() as u64)
    }

    /// Whether `block` is lit
    pub fn is_active(&self, block: BlockId) -> bool {
        self.activations.is_active(block)
    }

    /// Number of blocks on the grid
    pub fn count(&self) -> ParticipantCount {
        self.count
    }

    /// The decorative shapes behind the grid
    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Time since the grid was mounted
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.mounted_at)
    }
}
