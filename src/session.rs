//! Shared session state and route guarding
//!
//! The participant count is the only state shared between the two screens.
//! It lives here, owned by the top-level [`crate::app::App`], instead of in
//! a global.

use serde::{Deserialize, Serialize};

use crate::count::ParticipantCount;

/// The two screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// The participant count form
    Entry,
    /// The player grid
    Display,
}

/// State that outlives a single screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    participant_count: Option<ParticipantCount>,
}

impl Session {
    /// Creates a session with no count
    pub fn new() -> Self {
        Self::default()
    }

    /// The published participant count, if any
    pub fn participant_count(&self) -> Option<ParticipantCount> {
        self.participant_count
    }

    /// Publishes the count submitted on the entry form
    pub fn publish(&mut self, count: ParticipantCount) {
        self.participant_count = Some(count);
    }

    /// Forgets the count, as happens when the entry form is revisited
    pub fn reset(&mut self) {
        self.participant_count = None;
    }

    /// Applies the route guard
    ///
    /// # Returns
    ///
    /// The route that should actually be shown: `Display` is only reachable
    /// once a count has been published, every other request goes through
    pub fn resolve(&self, requested: Route) -> Route {
        match (requested, self.participant_count) {
            (Route::Display, None) => Route::Entry,
            (route, _) => route,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_count_redirects() {
        let session = Session::new();

        assert_eq!(session.resolve(Route::Display), Route::Entry);
        assert_eq!(session.resolve(Route::Entry), Route::Entry);
    }

    #[test]
    fn test_display_with_count_is_allowed() {
        let mut session = Session::new();
        session.publish(ParticipantCount::new(3).unwrap());

        assert_eq!(session.resolve(Route::Display), Route::Display);
        assert_eq!(session.participant_count().map(ParticipantCount::get), Some(3));
    }

    #[test]
    fn test_reset_closes_display_again() {
        let mut session = Session::new();
        session.publish(ParticipantCount::new(3).unwrap());
        session.reset();

        assert_eq!(session.participant_count(), None);
        assert_eq!(session.resolve(Route::Display), Route::Entry);
    }
}
