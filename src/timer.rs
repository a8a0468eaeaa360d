//! Delayed delivery of alarm messages
//!
//! Components never own timers. They call a scheduling callback with an
//! [`AlarmMessage`] and a delay, and the host delivers the message back once
//! the delay has passed. [`AlarmQueue`] is that host-side bookkeeping: a
//! deadline-ordered queue polled by the event loop.
//!
//! Dropping a queue drops every alarm still pending in it, which is how a
//! view cancels its timers when it goes away.

use std::{cmp::Ordering, collections::BinaryHeap};

use web_time::{Duration, Instant};

use crate::AlarmMessage;

#[derive(Debug)]
struct Pending {
    deadline: Instant,
    sequence: u64,
    message: AlarmMessage,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // reversed so the max-heap yields the earliest deadline first,
    // with insertion order breaking ties
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Alarms waiting for their deadline
#[derive(Debug, Default)]
pub struct AlarmQueue {
    pending: BinaryHeap<Pending>,
    sequence: u64,
}

impl AlarmQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `message` for delivery `delay` after `now`
    pub fn schedule(&mut self, message: AlarmMessage, delay: Duration, now: Instant) {
        self.sequence += 1;
        self.pending.push(Pending {
            deadline: now + delay,
            sequence: self.sequence,
            message,
        });
    }

    /// Returns a scheduling callback anchored at `now`
    ///
    /// This is the shape components expect for their `schedule_message`
    /// argument.
    pub fn scheduler(&mut self, now: Instant) -> impl FnMut(AlarmMessage, Duration) + '_ {
        move |message, delay| self.schedule(message, delay, now)
    }

    /// Removes and returns the earliest alarm whose deadline is at or before `now`
    pub fn pop_due(&mut self, now: Instant) -> Option<AlarmMessage> {
        if self.pending.peek()?.deadline > now {
            return None;
        }
        self.pending.pop().map(|pending| pending.message)
    }

    /// Deadline of the earliest pending alarm
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.peek().map(|pending| pending.deadline)
    }

    /// Number of pending alarms
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no alarm is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
