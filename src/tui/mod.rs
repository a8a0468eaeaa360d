//! Terminal front end
//!
//! Runs the game full-screen in the terminal (ratatui + crossterm). The loop
//! sleeps until either a key arrives, the next alarm is due, or the next
//! animation frame.

use std::{error::Error, io, panic};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::info;
use web_time::{Duration, Instant};

use crate::{
    app::{App, Input},
    config::Options,
    constants::presentation::FRAME_TICK_MS,
};

pub mod render;

/// Runs the game until the user quits
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(options);
    let started = Instant::now();
    info!("terminal session started");

    while !app.should_quit() {
        let now = Instant::now();
        app.tick(now);
        render::fit_viewport(&mut app, terminal.area()?);
        terminal.draw(|frame| render::draw(frame, &app, now, now.duration_since(started)))?;

        if event::poll(poll_timeout(app.next_deadline(), now))? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = translate(key) {
                    app.handle_input(input, Instant::now());
                }
            }
        }
    }

    info!("terminal session ended");
    Ok(())
}

/// Maps a terminal key event onto an [`Input`]
///
/// Only presses count; repeats and releases are dropped, as are characters
/// typed with Ctrl or Alt held, except Ctrl+C which quits.
pub fn translate(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let modified = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c' | 'C') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Input::Interrupt)
        }
        KeyCode::Char(_) if modified => None,
        KeyCode::Char(ch) => Some(Input::Char(ch)),
        KeyCode::Enter => Some(Input::Enter),
        KeyCode::Backspace => Some(Input::Backspace),
        KeyCode::Esc => Some(Input::Escape),
        KeyCode::Up => Some(Input::ScrollUp),
        KeyCode::Down => Some(Input::ScrollDown),
        KeyCode::PageUp => Some(Input::PageUp),
        KeyCode::PageDown => Some(Input::PageDown),
        _ => None,
    }
}

/// How long to wait for input before the next redraw
fn poll_timeout(deadline: Option<Instant>, now: Instant) -> Duration {
    let frame = Duration::from_millis(FRAME_TICK_MS);
    deadline.map_or(frame, |deadline| {
        deadline.saturating_duration_since(now).min(frame)
    })
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).inspect_err(|_| teardown_terminal())?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).inspect_err(|_| teardown_terminal())?;
        terminal.hide_cursor().inspect_err(|_| teardown_terminal())?;
        terminal.clear().inspect_err(|_| teardown_terminal())?;

        // leave the terminal usable if something panics mid-frame
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            teardown_terminal();
            previous_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn area(&self) -> io::Result<Rect> {
        let size = self.terminal.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
