//! Transient user-facing messages
//!
//! Validation errors and the large-count warning are shown as a single toast
//! that disappears on its own. Posting a new notice replaces the current one.

use serde::{Deserialize, Serialize};
use tracing::debug;
use web_time::Duration;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// Something blocked the user's action
    Error,
    /// The action went through, with a caveat
    Warning,
}

/// A message shown to the user for a limited time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity of the message
    pub level: Level,
    /// Text to display
    pub text: String,
}

impl Notice {
    /// Creates an error notice
    pub fn error(text: impl ToString) -> Self {
        Self {
            level: Level::Error,
            text: text.to_string(),
        }
    }

    /// Creates a warning notice
    pub fn warning(text: impl ToString) -> Self {
        Self {
            level: Level::Warning,
            text: text.to_string(),
        }
    }
}

/// Alarm messages for notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Removes the notice with this id if it is still shown
    Dismiss {
        /// Id assigned when the notice was posted
        id: u64,
    },
}

/// The notice currently on screen, if any
#[derive(Debug, Clone, Default)]
pub struct Notices {
    current: Option<(u64, Notice)>,
    next_id: u64,
    duration: Duration,
}

impl Notices {
    /// Creates an empty notice slot where each notice lasts `duration`
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            next_id: 0,
            duration,
        }
    }

    /// Shows `notice`, replacing any notice already on screen
    ///
    /// # Type Parameters
    ///
    /// * `S` - Function type for scheduling alarm messages
    pub fn post<S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        notice: Notice,
        mut schedule_message: S,
    ) {
        self.next_id += 1;
        let id = self.next_id;

        debug!(id, level = ?notice.level, text = %notice.text, "notice posted");

        self.current = Some((id, notice));
        schedule_message(AlarmMessage::Dismiss { id }.into(), self.duration);
    }

    /// Handles a scheduled alarm
    ///
    /// # Returns
    ///
    /// `true` if the notice on screen was dismissed
    pub fn receive_alarm(&mut self, message: &crate::AlarmMessage) -> bool {
        let crate::AlarmMessage::Notice(AlarmMessage::Dismiss { id }) = message else {
            return false;
        };

        if self.current.as_ref().is_some_and(|(current, _)| current == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// The notice currently on screen
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(_, notice)| notice)
    }
}
