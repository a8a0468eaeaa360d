//! Timed block highlights
//!
//! Pressing a block's key lights it up; an alarm scheduled at the same time
//! puts it out again. Blocks never interact with each other.
//!
//! A second press on a block that is already lit restarts its countdown.
//! Every press bumps the block's generation and the alarm carries the
//! generation it was scheduled for, so only the alarm belonging to the most
//! recent press can put the block out. Earlier alarms still fire but find a
//! newer generation and do nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use web_time::Duration;

use crate::keymap::BlockId;

/// Alarm messages for block highlights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Puts a block out if it has not been pressed again since
    Deactivate {
        /// The block to put out
        block: BlockId,
        /// Generation of the press that scheduled this alarm
        generation: u64,
    },
}

/// Which blocks are currently lit
#[derive(Debug, Clone, Default)]
pub struct Activations {
    /// Lit blocks and the generation of their latest press
    active: HashMap<BlockId, u64>,
    /// Generation counter shared by all blocks
    generation: u64,
    /// How long a press keeps a block lit
    duration: Duration,
}

impl Activations {
    /// Creates an empty activation state where each press lasts `duration`
    pub fn new(duration: Duration) -> Self {
        Self {
            active: HashMap::new(),
            generation: 0,
            duration,
        }
    }

    /// Lights `block` and schedules it to go out
    ///
    /// # Arguments
    ///
    /// * `block` - The block whose key was pressed
    /// * `schedule_message` - Function to schedule the deactivation alarm
    ///
    /// # Type Parameters
    ///
    /// * `S` - Function type for scheduling alarm messages
    pub fn activate<S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        block: BlockId,
        mut schedule_message: S,
    ) {
        self.generation += 1;
        let restarted = self.active.insert(block, self.generation).is_some();

        debug!(%block, generation = self.generation, restarted, "block activated");

        schedule_message(
            AlarmMessage::Deactivate {
                block,
                generation: self.generation,
            }
            .into(),
            self.duration,
        );
    }

    /// Handles a scheduled alarm
    ///
    /// # Returns
    ///
    /// `true` if a block went out as a result, `false` if the alarm was
    /// stale or not meant for this component
    pub fn receive_alarm(&mut self, message: &crate::AlarmMessage) -> bool {
        let crate::AlarmMessage::Activation(AlarmMessage::Deactivate { block, generation }) =
            message
        else {
            return false;
        };

        if self.active.get(block) != Some(generation) {
            trace!(%block, generation, "stale deactivation ignored");
            return false;
        }

        self.active.remove(block);
        debug!(%block, "block deactivated");
        true
    }

    /// Whether `block` is currently lit
    pub fn is_active(&self, block: BlockId) -> bool {
        self.active.contains_key(&block)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(3000);

    fn block(index: usize) -> BlockId {
        BlockId::new(index).unwrap()
    }

    fn activate(
        activations: &mut Activations,
        index: usize,
    ) -> Vec<(crate::AlarmMessage, Duration)> {
        let mut scheduled = Vec::new();
        activations.activate(block(index), |message, delay| {
            scheduled.push((message, delay));
        });
        scheduled
    }

    #[test]
    fn test_starts_idle() {
        let activations = Activations::new(DURATION);

        assert!((1..=35).all(|index| !activations.is_active(block(index))));
    }

    #[test]
    fn test_activate_schedules_one_alarm() {
        let mut activations = Activations::new(DURATION);
        let scheduled = activate(&mut activations, 3);

        assert!(activations.is_active(block(3)));
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].1, DURATION);
        assert!(matches!(
            scheduled[0].0,
            crate::AlarmMessage::Activation(AlarmMessage::Deactivate { block: b, .. })
                if b == block(3)
        ));
    }

    #[test]
    fn test_alarm_deactivates() {
        let mut activations = Activations::new(DURATION);
        let scheduled = activate(&mut activations, 3);

        assert!(activations.receive_alarm(&scheduled[0].0));
        assert!(!activations.is_active(block(3)));
    }

    #[test]
    fn test_blocks_are_independent() {
        let mut activations = Activations::new(DURATION);
        let first = activate(&mut activations, 1);
        let _second = activate(&mut activations, 2);

        assert!(activations.receive_alarm(&first[0].0));
        assert!(!activations.is_active(block(1)));
        assert!(activations.is_active(block(2)));
    }

    #[test]
    fn test_repress_restarts_countdown() {
        let mut activations = Activations::new(DURATION);
        let first = activate(&mut activations, 4);
        let second = activate(&mut activations, 4);

        // the first press's alarm is stale and must not cut the second short
        assert!(!activations.receive_alarm(&first[0].0));
        assert!(activations.is_active(block(4)));

        assert!(activations.receive_alarm(&second[0].0));
        assert!(!activations.is_active(block(4)));
    }

    #[test]
    fn test_alarm_after_deactivation_is_ignored() {
        let mut activations = Activations::new(DURATION);
        let scheduled = activate(&mut activations, 2);

        assert!(activations.receive_alarm(&scheduled[0].0));
        assert!(!activations.receive_alarm(&scheduled[0].0));
    }

    #[test]
    fn test_foreign_alarm_is_ignored() {
        let mut activations = Activations::new(DURATION);
        activate(&mut activations, 2);

        let foreign: crate::AlarmMessage = crate::notice::AlarmMessage::Dismiss { id: 1 }.into();
        assert!(!activations.receive_alarm(&foreign));
        assert!(activations.is_active(block(2)));
    }
}
