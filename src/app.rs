//! Top-level composition
//!
//! [`App`] owns the session, the screen currently shown and the notice slot.
//! The front end feeds it [`Input`]s and clock ticks and draws whatever it
//! exposes; it never touches the components directly.

use tracing::info;
use web_time::Instant;

use crate::{
    config::Options,
    display::DisplayGrid,
    entry::EntryForm,
    notice::{Notice, Notices},
    session::{Route, Session},
    timer::AlarmQueue,
};

/// Front-end independent input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A printable character
    Char(char),
    /// Delete the last typed character
    Backspace,
    /// Submit
    Enter,
    /// Go back, or quit from the first screen
    Escape,
    /// Quit immediately
    Interrupt,
    /// Scroll the grid up one row
    ScrollUp,
    /// Scroll the grid down one row
    ScrollDown,
    /// Scroll the grid up one screen
    PageUp,
    /// Scroll the grid down one screen
    PageDown,
}

/// The screen currently mounted
#[derive(Debug)]
pub enum View {
    /// The participant count form
    Entry(EntryForm),
    /// The player grid
    Display(Box<DisplayGrid>),
}

impl View {
    /// The route this view belongs to
    pub fn route(&self) -> Route {
        match self {
            View::Entry(_) => Route::Entry,
            View::Display(_) => Route::Display,
        }
    }
}

/// The whole application state
#[derive(Debug)]
pub struct App {
    options: Options,
    session: Session,
    view: View,
    notices: Notices,
    alarms: AlarmQueue,
    should_quit: bool,
}

impl App {
    /// Starts the application on the entry screen
    pub fn new(options: Options) -> Self {
        Self {
            notices: Notices::new(options.notice_duration()),
            options,
            session: Session::new(),
            view: View::Entry(EntryForm::new()),
            alarms: AlarmQueue::new(),
            should_quit: false,
        }
    }

    /// Switches screens, subject to the route guard
    ///
    /// Going to the entry screen forgets the participant count. Going to the
    /// display screen without a count lands on the entry screen instead.
    ///
    /// # Returns
    ///
    /// The route actually shown
    pub fn navigate(&mut self, requested: Route, now: Instant) -> Route {
        let resolved = self.session.resolve(requested);
        if resolved != requested {
            info!(?requested, ?resolved, "navigation redirected");
        }

        match (resolved, self.session.participant_count()) {
            (Route::Display, Some(count)) => {
                self.view = View::Display(Box::new(DisplayGrid::mount(
                    count,
                    self.options.activation_duration(),
                    now,
                )));
            }
            _ => {
                self.session.reset();
                self.view = View::Entry(EntryForm::new());
            }
        }

        info!(route = ?self.view.route(), "navigated");
        self.view.route()
    }

    /// Handles one input event
    pub fn handle_input(&mut self, input: Input, now: Instant) {
        if input == Input::Interrupt {
            self.should_quit = true;
            return;
        }

        match &mut self.view {
            View::Entry(form) => match input {
                Input::Char(ch) => {
                    form.push(ch);
                }
                Input::Backspace => form.backspace(),
                Input::Enter => self.submit(now),
                Input::Escape => self.should_quit = true,
                Input::Interrupt
                | Input::ScrollUp
                | Input::ScrollDown
                | Input::PageUp
                | Input::PageDown => {}
            },
            View::Display(grid) => match input {
                Input::Char(ch) => {
                    grid.press(ch, now);
                }
                Input::ScrollUp => grid.scroll_up(1),
                Input::ScrollDown => grid.scroll_down(1),
                Input::PageUp => {
                    let rows = grid.page().rows;
                    grid.scroll_up(rows);
                }
                Input::PageDown => {
                    let rows = grid.page().rows;
                    grid.scroll_down(rows);
                }
                Input::Escape => {
                    self.navigate(Route::Entry, now);
                }
                Input::Backspace | Input::Enter | Input::Interrupt => {}
            },
        }
    }

    fn submit(&mut self, now: Instant) {
        let View::Entry(form) = &self.view else {
            return;
        };

        match form.submit(self.options.large_count_threshold()) {
            Ok(submission) => {
                if let Some(warning) = submission.warning {
                    self.notices
                        .post(Notice::warning(warning), self.alarms.scheduler(now));
                }
                self.session.publish(submission.count);
                self.navigate(Route::Display, now);
            }
            Err(error) => {
                self.notices
                    .post(Notice::error(error), self.alarms.scheduler(now));
            }
        }
    }

    /// Delivers every alarm that is due at `now`
    pub fn tick(&mut self, now: Instant) {
        while let Some(message) = self.alarms.pop_due(now) {
            self.notices.receive_alarm(&message);
        }
        if let View::Display(grid) = &mut self.view {
            grid.tick(now);
        }
    }

    /// Passes the on-screen grid shape to the display grid, if it is mounted
    pub fn set_grid_page(&mut self, columns: usize, rows: usize) {
        if let View::Display(grid) = &mut self.view {
            grid.set_page(columns, rows);
        }
    }

    /// Deadline of the next pending alarm on any component
    pub fn next_deadline(&self) -> Option<Instant> {
        let grid_deadline = match &self.view {
            View::Display(grid) => grid.next_deadline(),
            View::Entry(_) => None,
        };
        match (self.alarms.next_deadline(), grid_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// The mounted screen
    pub fn view(&self) -> &View {
        &self.view
    }

    /// The route of the mounted screen
    pub fn route(&self) -> Route {
        self.view.route()
    }

    /// The shared session state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The notice on screen, if any
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    /// The options the app was started with
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether the user asked to quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
