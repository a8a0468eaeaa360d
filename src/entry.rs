//! The participant count form
//!
//! A single text field plus a submit action. The field only takes characters
//! that can be part of a signed integer; whether the text actually is one is
//! decided on submit.

use tracing::{info, warn};

use crate::{
    backdrop::{Backdrop, BackdropStyle},
    constants::entry::MAX_INPUT_LENGTH,
    count::{InvalidCount, LargeCountWarning, ParticipantCount},
};

/// Outcome of a successful submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    /// The accepted count
    pub count: ParticipantCount,
    /// Set when the count is above the layout threshold
    pub warning: Option<LargeCountWarning>,
}

/// State of the entry screen
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    input: String,
    backdrop: Backdrop,
}

impl EntryForm {
    /// Creates an empty form with a freshly generated backdrop
    pub fn new() -> Self {
        Self {
            input: String::new(),
            backdrop: Backdrop::generate(&BackdropStyle::entry(), &mut fastrand::Rng::new()),
        }
    }

    /// Appends a typed character
    ///
    /// # Returns
    ///
    /// `false` if the character was refused because it cannot appear in a
    /// count or the field is full
    pub fn push(&mut self, ch: char) -> bool {
        let accepted = (ch.is_ascii_digit() || matches!(ch, '+' | '-' | ' '))
            && self.input.len() < MAX_INPUT_LENGTH;
        if accepted {
            self.input.push(ch);
        }
        accepted
    }

    /// Deletes the last character
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// The text typed so far
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The decorative shapes behind the form
    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Validates the typed text
    ///
    /// The form itself is left untouched either way; publishing the count
    /// and switching screens is up to the caller.
    ///
    /// # Arguments
    ///
    /// * `warning_threshold` - Counts above this produce a [`LargeCountWarning`]
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCount`] if the text is not a positive integer.
    pub fn submit(&self, warning_threshold: usize) -> Result<Submission, InvalidCount> {
        let count = self
            .input
            .parse::<ParticipantCount>()
            .inspect_err(|error| warn!(input = %self.input, %error, "count rejected"))?;

        let warning = count.warning(warning_threshold);
        info!(%count, large = warning.is_some(), "count accepted");

        Ok(Submission { count, warning })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn form_with(text: &str) -> EntryForm {
        let mut form = EntryForm::new();
        for ch in text.chars() {
            form.push(ch);
        }
        form
    }

    #[test]
    fn test_new_form_is_empty() {
        let form = EntryForm::new();

        assert_eq!(form.input(), "");
        assert_eq!(form.backdrop().shapes().len(), 10);
    }

    #[test]
    fn test_push_filters_characters() {
        let mut form = EntryForm::new();

        assert!(form.push('4'));
        assert!(!form.push('x'));
        assert!(!form.push('.'));
        assert!(form.push('2'));
        assert_eq!(form.input(), "42");
    }

    #[test]
    fn test_push_stops_at_max_length() {
        let form = form_with(&"1".repeat(MAX_INPUT_LENGTH + 5));

        assert_eq!(form.input().len(), MAX_INPUT_LENGTH);
    }

    #[test]
    fn test_backspace() {
        let mut form = form_with("123");
        form.backspace();

        assert_eq!(form.input(), "12");

        form.backspace();
        form.backspace();
        form.backspace();
        assert_eq!(form.input(), "");
    }

    #[test]
    fn test_submit_valid() {
        let submission = form_with("5").submit(26).unwrap();

        assert_eq!(submission.count.get(), 5);
        assert!(submission.warning.is_none());
    }

    #[test]
    fn test_submit_large_count_warns_but_succeeds() {
        let submission = form_with("30").submit(26).unwrap();

        assert_eq!(submission.count.get(), 30);
        assert_eq!(submission.warning.map(|w| w.count), Some(30));
    }

    #[test]
    fn test_submit_invalid() {
        assert_eq!(form_with("").submit(26), Err(InvalidCount::Empty));
        assert_eq!(form_with("0").submit(26), Err(InvalidCount::NotPositive));
        assert_eq!(form_with("-4").submit(26), Err(InvalidCount::NotPositive));
        assert_eq!(form_with("1-2").submit(26), Err(InvalidCount::NotANumber));
    }

    #[test]
    fn test_submit_leaves_input_in_place() {
        let form = form_with("0");
        let _ = form.submit(26);

        assert_eq!(form.input(), "0");
    }
}
