//! # Don't Do It
//!
//! This library provides the core of the "Don't Do It" party-game display:
//! a host enters how many people are playing, then a full-screen grid shows
//! one card per player. An operator lights up a player's card with a single
//! keystroke and the highlight fades out on its own after a short delay.
//!
//! The crate is split into a pure core (counting, key mapping, activation
//! timers, notices, navigation) and a terminal front end in [`tui`].

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub mod activation;
pub mod app;
pub mod backdrop;
pub mod config;
pub mod constants;
pub mod count;
pub mod display;
pub mod entry;
pub mod keymap;
pub mod notice;
pub mod session;
pub mod timer;
pub mod tui;

/// Alarm messages for timed events
///
/// Every delayed effect in the game is expressed as one of these messages.
/// Components hand them to a scheduling callback together with a delay and
/// receive them back once the delay has elapsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Block highlight alarms
    Activation(activation::AlarmMessage),
    /// Toast message alarms
    Notice(notice::AlarmMessage),
}

/// A truncated vector that maintains the exact count while limiting displayed items
///
/// The display grid uses this to show as many blocks as fit on screen while
/// still knowing how many blocks exist in total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncatedVec<T> {
    /// The exact total count of items
    exact_count: usize,
    /// The truncated list of items (up to the limit)
    items: Vec<T>,
}

impl<T> TruncatedVec<T> {
    /// Creates a new truncated vector from an iterator
    ///
    /// # Arguments
    ///
    /// * `list` - An iterator over items to include
    /// * `limit` - Maximum number of items to include in the truncated vector
    /// * `exact_count` - The exact total count of items (may be larger than limit)
    pub fn new<I: Iterator<Item = T>>(list: I, limit: usize, exact_count: usize) -> Self {
        let items = list.take(limit).collect_vec();
        Self { exact_count, items }
    }

    /// Returns the exact count of items
    pub fn exact_count(&self) -> usize {
        self.exact_count
    }

    /// Returns the truncated items
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items left out of the truncated list
    pub fn hidden_count(&self) -> usize {
        self.exact_count.saturating_sub(self.items.len())
    }
}
