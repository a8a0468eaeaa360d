//! Drawing both screens
//!
//! Rendering is a pure function of the [`App`] state and the clock, so the
//! same frame can be reproduced against a test backend.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use web_time::{Duration, Instant};

use crate::{
    TruncatedVec,
    app::{App, View},
    backdrop::Backdrop,
    constants::presentation::{BLOCK_HEIGHT, MIN_BLOCK_HEIGHT, MIN_BLOCK_WIDTH},
    display::{BlockView, DisplayGrid},
    entry::EntryForm,
    notice::{Level, Notice},
};

const BACKGROUND: Color = Color::Rgb(30, 30, 46);
const CARD: Color = Color::Rgb(45, 45, 68);
const TEXT: Color = Color::Rgb(248, 248, 242);
const MUTED: Color = Color::Rgb(140, 140, 160);
const PURPLE: Color = Color::Rgb(138, 43, 226);
const CORAL: Color = Color::Rgb(255, 107, 107);
const TEAL: Color = Color::Rgb(0, 210, 211);
const ACTIVE: Color = Color::Rgb(200, 0, 0);
const SHAPE: Color = Color::Rgb(70, 45, 100);
const TITLE_GRADIENT: [Color; 3] = [PURPLE, CORAL, TEAL];

const INSTRUCTIONS: [&str; 2] = [
    "Everyone wears a card they cannot see; only the others can read it.",
    "Do what your card says and you get hit!",
];

/// Draws the current screen
///
/// # Arguments
///
/// * `frame` - Frame to draw into
/// * `app` - Application state
/// * `now` - Current time, for timers and the staggered reveal
/// * `uptime` - Time since the program started, for ambient animation
pub fn draw(frame: &mut Frame<'_>, app: &App, now: Instant, uptime: Duration) {
    let area = frame.area();
    frame.render_widget(Block::new().style(Style::new().bg(BACKGROUND)), area);

    match app.view() {
        View::Entry(form) => {
            draw_backdrop(frame.buffer_mut(), area, form.backdrop(), uptime);
            draw_entry(frame, area, form, app.options().title(), uptime);
        }
        View::Display(grid) => {
            let elapsed = grid.elapsed(now);
            draw_backdrop(frame.buffer_mut(), area, grid.backdrop(), elapsed);
            draw_display(frame, area, grid, app.options().title(), now, uptime);
        }
    }

    if let Some(notice) = app.notice() {
        draw_notice(frame, area, notice);
    }
}

fn title_line(title: &str, uptime: Duration) -> Line<'static> {
    let phase = (uptime.as_millis() / 250) as usize;
    let spans: Vec<_> = title
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let color = TITLE_GRADIENT[(i / 3 + phase) % TITLE_GRADIENT.len()];
            Span::styled(
                ch.to_string(),
                Style::new().fg(color).add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    Line::from(spans).alignment(Alignment::Center)
}

fn draw_backdrop(buf: &mut Buffer, area: Rect, backdrop: &Backdrop, elapsed: Duration) {
    for shape in backdrop.shapes() {
        let (dx, dy) = shape.offset_at(elapsed);
        let cx = f32::from(area.x) + shape.x * f32::from(area.width) + dx;
        let cy = f32::from(area.y) + shape.y * f32::from(area.height) + dy / 2.0;
        // cells are about twice as tall as they are wide
        let rx = shape.radius * 2.0;
        let ry = shape.radius;

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let nx = (f32::from(x) + 0.5 - cx) / rx;
                let ny = (f32::from(y) + 0.5 - cy) / ry;
                let distance = nx * nx + ny * ny;
                if distance > 1.0 {
                    continue;
                }
                let symbol = if distance < 0.4 { "▒" } else { "░" };
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(symbol).set_fg(SHAPE);
                }
            }
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_entry(frame: &mut Frame<'_>, area: Rect, form: &EntryForm, title: &str, uptime: Duration) {
    let card = centered(area, 52, 13);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(PURPLE))
        .style(Style::new().bg(CARD).fg(TEXT));
    let inner = block.inner(card);
    frame.render_widget(Clear, card);
    frame.render_widget(block, card);

    let [_, title_area, _, subtitle_area, _, input_area, _, button_area, hint_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

    frame.render_widget(Paragraph::new(title_line(title, uptime)), title_area);
    frame.render_widget(
        Paragraph::new("Enter the number of players")
            .alignment(Alignment::Center)
            .style(Style::new().fg(TEXT)),
        subtitle_area,
    );

    let field = if form.input().is_empty() {
        Line::from(vec![
            Span::styled("▏", Style::new().fg(PURPLE)),
            Span::styled("Number of players", Style::new().fg(MUTED)),
        ])
    } else {
        Line::from(vec![
            Span::styled(form.input().to_owned(), Style::new().fg(TEXT)),
            Span::styled("▏", Style::new().fg(PURPLE)),
        ])
    };
    let field_area = centered(input_area, 40, 3);
    frame.render_widget(
        Paragraph::new(field).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::new().fg(PURPLE)),
        ),
        field_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                "  Start  ",
                Style::new().fg(TEXT).bg(PURPLE).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ", Style::new().bg(CORAL)),
        ]))
        .alignment(Alignment::Center),
        button_area,
    );
    frame.render_widget(
        Paragraph::new("Enter to start · Esc to quit")
            .alignment(Alignment::Center)
            .style(Style::new().fg(MUTED)),
        hint_area,
    );
}

/// How the blocks are arranged on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Blocks per row
    pub columns: u16,
    /// Rows that fit on screen
    pub rows: u16,
    /// Height of every block
    pub block_height: u16,
}

impl GridLayout {
    /// Fits `count` blocks into `area`
    ///
    /// Blocks are at least [`MIN_BLOCK_WIDTH`] wide and shrink from
    /// [`BLOCK_HEIGHT`] down to [`MIN_BLOCK_HEIGHT`] rows before any block is
    /// left out.
    pub fn fit(area: Rect, count: usize) -> Self {
        let count = u16::try_from(count).unwrap_or(u16::MAX).max(1);
        let columns = (area.width / MIN_BLOCK_WIDTH).clamp(1, count);
        let rows_needed = count.div_ceil(columns);
        let block_height = (area.height / rows_needed).clamp(MIN_BLOCK_HEIGHT, BLOCK_HEIGHT);
        let rows = (area.height / block_height).clamp(1, rows_needed);

        Self {
            columns,
            rows,
            block_height,
        }
    }

    /// Number of blocks that fit
    pub fn capacity(&self) -> usize {
        usize::from(self.columns) * usize::from(self.rows)
    }

    /// Screen area of the block at zero-based `position`
    pub fn block_area(&self, area: Rect, position: usize) -> Rect {
        let column = (position % usize::from(self.columns)) as u16;
        let row = (position / usize::from(self.columns)) as u16;
        let width = area.width / self.columns;

        Rect::new(
            area.x + column * width,
            area.y + row * self.block_height,
            width,
            self.block_height,
        )
        .intersection(area)
    }
}

fn display_areas(area: Rect) -> [Rect; 5] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Min(MIN_BLOCK_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// Reports how many blocks fit in `area` to the mounted grid
///
/// Call before [`draw`] whenever the screen may have changed size, so that
/// scrolling and the follow-the-last-press window match what is drawn.
pub fn fit_viewport(app: &mut App, area: Rect) {
    let View::Display(grid) = app.view() else {
        return;
    };
    let [_, _, _, grid_area, _] = display_areas(area);
    let layout = GridLayout::fit(grid_area, grid.count().get());
    app.set_grid_page(usize::from(layout.columns), usize::from(layout.rows));
}

fn draw_display(
    frame: &mut Frame<'_>,
    area: Rect,
    grid: &DisplayGrid,
    title: &str,
    now: Instant,
    uptime: Duration,
) {
    let [title_area, _, instructions_area, grid_area, footer_area] = display_areas(area);

    frame.render_widget(Paragraph::new(title_line(title, uptime)), title_area);

    let instructions_box = centered(instructions_area, 80, 4);
    frame.render_widget(Clear, instructions_box);
    frame.render_widget(
        Paragraph::new(INSTRUCTIONS.map(Line::from).to_vec())
            .alignment(Alignment::Center)
            .style(Style::new().fg(TEXT).bg(CARD))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().fg(MUTED)),
            ),
        instructions_box,
    );

    let layout = GridLayout::fit(grid_area, grid.count().get());
    let window = grid.visible_range();
    let blocks = TruncatedVec::new(
        grid.blocks(now).skip(window.start),
        window.len().min(layout.capacity()),
        grid.count().get(),
    );
    for (position, view) in blocks.items().iter().enumerate() {
        draw_block(frame, layout.block_area(grid_area, position), view);
    }

    let mut footer = vec![
        Span::styled("Esc", Style::new().fg(TEAL)),
        Span::styled(" back   ", Style::new().fg(MUTED)),
        Span::styled("Ctrl+C", Style::new().fg(TEAL)),
        Span::styled(" quit", Style::new().fg(MUTED)),
    ];
    if blocks.hidden_count() > 0 {
        footer.push(Span::styled("   ↑↓ PgUp PgDn", Style::new().fg(TEAL)));
        footer.push(Span::styled(" scroll", Style::new().fg(MUTED)));
        footer.push(Span::styled(
            format!(
                "   showing {}-{} of {} blocks",
                window.start + 1,
                window.start + blocks.items().len(),
                blocks.exact_count()
            ),
            Style::new().fg(CORAL),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(footer)).alignment(Alignment::Center),
        footer_area,
    );
}

fn draw_block(frame: &mut Frame<'_>, area: Rect, view: &BlockView) {
    // leave a one-cell gutter between neighbours
    let area = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), area.height);
    if area.width < 3 || area.height < 3 {
        return;
    }

    let (background, border, border_type) = if view.active {
        (ACTIVE, CORAL, BorderType::Thick)
    } else {
        (CARD, MUTED, BorderType::Rounded)
    };
    let mut style = Style::new().bg(background).fg(TEXT);
    if !view.revealed {
        style = style.add_modifier(Modifier::DIM);
    }

    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::new().fg(border))
        .style(style);
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let [accent_area, number_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                "━".repeat(usize::from(accent_area.width / 2)),
                Style::new().fg(PURPLE),
            ),
            Span::styled(
                "━".repeat(usize::from(accent_area.width - accent_area.width / 2)),
                Style::new().fg(CORAL),
            ),
        ])),
        accent_area,
    );

    let number_row = Rect::new(
        number_area.x,
        number_area.y + number_area.height / 2,
        number_area.width,
        number_area.height.min(1),
    );
    frame.render_widget(
        Paragraph::new(view.id.to_string())
            .alignment(Alignment::Center)
            .style(Style::new().add_modifier(Modifier::BOLD)),
        number_row,
    );

    if let Some(key) = view.key_hint {
        frame.render_widget(
            Paragraph::new(format!("Key: {key}"))
                .alignment(Alignment::Center)
                .style(Style::new().fg(if view.active { TEXT } else { MUTED })),
            hint_area,
        );
    }
}

fn draw_notice(frame: &mut Frame<'_>, area: Rect, notice: &Notice) {
    let (background, label) = match notice.level {
        Level::Error => (ACTIVE, "Error"),
        Level::Warning => (Color::Rgb(180, 130, 0), "Warning"),
    };
    let text = format!(" {label}: {} ", notice.text);
    let width = u16::try_from(text.chars().count())
        .unwrap_or(u16::MAX)
        .min(area.width);
    let toast = Rect::new(area.x + (area.width - width) / 2, area.y, width, 1.min(area.height));

    frame.render_widget(Clear, toast);
    frame.render_widget(
        Paragraph::new(text).style(
            Style::new()
                .bg(background)
                .fg(TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        toast,
    );
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::{app::Input, config::Options, count::ParticipantCount, keymap::KeyMap};

    fn render(app: &App, now: Instant, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| draw(frame, app, now, Duration::ZERO))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .chunks(usize::from(width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect())
            .collect()
    }

    fn screen(lines: &[String]) -> String {
        lines.join("\n")
    }

    fn submit(app: &mut App, text: &str, now: Instant) {
        for ch in text.chars() {
            app.handle_input(Input::Char(ch), now);
        }
        app.handle_input(Input::Enter, now);
    }

    #[test]
    fn test_grid_layout_single_row() {
        let layout = GridLayout::fit(Rect::new(0, 0, 120, 20), 5);

        assert_eq!(layout.columns, 5);
        assert_eq!(layout.rows, 1);
        assert_eq!(layout.block_height, BLOCK_HEIGHT);
        assert_eq!(layout.capacity(), 5);
    }

    #[test]
    fn test_grid_layout_wraps_and_shrinks() {
        let layout = GridLayout::fit(Rect::new(0, 0, 100, 20), 20);

        assert_eq!(layout.columns, 5);
        assert_eq!(layout.block_height, MIN_BLOCK_HEIGHT);
        assert_eq!(layout.rows, 4);
        assert_eq!(layout.capacity(), 20);
    }

    #[test]
    fn test_grid_layout_truncates_when_too_small() {
        let layout = GridLayout::fit(Rect::new(0, 0, 40, 10), 30);

        assert_eq!(layout.columns, 2);
        assert_eq!(layout.rows, 2);
        assert_eq!(layout.capacity(), 4);
    }

    #[test]
    fn test_grid_layout_narrow_terminal_still_has_a_column() {
        let layout = GridLayout::fit(Rect::new(0, 0, 10, 10), 3);

        assert_eq!(layout.columns, 1);
        assert!(layout.capacity() >= 1);
    }

    #[test]
    fn test_block_areas_do_not_overlap() {
        let area = Rect::new(0, 5, 100, 20);
        let layout = GridLayout::fit(area, 8);
        let rects: Vec<_> = (0..layout.capacity().min(8))
            .map(|i| layout.block_area(area, i))
            .collect();

        for (i, a) in rects.iter().enumerate() {
            assert!(area.contains(a.as_position()));
            for b in &rects[i + 1..] {
                assert!(!a.intersects(*b));
            }
        }
    }

    #[test]
    fn test_entry_screen_shows_prompt() {
        let app = App::new(Options::default());
        let text = screen(&render(&app, Instant::now(), 80, 24));

        assert!(text.contains("Don't Do It"));
        assert!(text.contains("Enter the number of players"));
        assert!(text.contains("Number of players"));
        assert!(text.contains("Start"));
    }

    #[test]
    fn test_entry_screen_shows_typed_text() {
        let now = Instant::now();
        let mut app = App::new(Options::default());
        app.handle_input(Input::Char('1'), now);
        app.handle_input(Input::Char('2'), now);
        let text = screen(&render(&app, now, 80, 24));

        assert!(text.contains("12▏"));
    }

    #[test]
    fn test_error_notice_is_drawn() {
        let now = Instant::now();
        let mut app = App::new(Options::default());
        submit(&mut app, "0", now);
        let text = screen(&render(&app, now, 100, 24));

        assert!(text.contains("Error: the number of players must be at least 1"));
    }

    #[test]
    fn test_display_screen_shows_blocks_and_hints() {
        let now = Instant::now();
        let mut app = App::new(Options::default());
        submit(&mut app, "5", now);
        let text = screen(&render(&app, now, 120, 30));

        for key in ['1', '2', '3', '4', '5'] {
            assert!(text.contains(&format!("Key: {key}")), "missing hint {key}");
        }
        assert!(!text.contains("Key: 6"));
        assert!(text.contains("only the others can read it"));
        assert!(!text.contains("showing"));
    }

    #[test]
    fn test_active_block_is_red() {
        let now = Instant::now();
        let mut app = App::new(Options::default());
        submit(&mut app, "3", now);
        app.handle_input(Input::Char('2'), now);

        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal
            .draw(|frame| draw(frame, &app, now, Duration::ZERO))
            .unwrap();
        let buffer = terminal.backend().buffer();

        let active_cells = buffer.content().iter().filter(|c| c.bg == ACTIVE).count();
        assert!(active_cells > 0);
    }

    fn visible_hints(text: &str, count: usize) -> Vec<usize> {
        let keymap = KeyMap::new(ParticipantCount::new(count).unwrap());
        keymap
            .iter()
            .filter(|(key, _)| text.contains(&format!("Key: {key}")))
            .map(|(_, block)| block.get())
            .collect()
    }

    #[test]
    fn test_pressed_block_outside_first_screen_is_shown_lit() {
        let now = Instant::now();
        let mut app = App::new(Options::default());
        submit(&mut app, "20", now);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        fit_viewport(&mut app, Rect::new(0, 0, 80, 24));
        app.handle_input(Input::Char('k'), now);
        terminal
            .draw(|frame| draw(frame, &app, now, Duration::ZERO))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();

        assert!(text.contains("Key: k"));
        assert!(buffer.content().iter().any(|cell| cell.bg == ACTIVE));
        assert!(text.contains("showing 9-20 of 20 blocks"));
    }

    #[test]
    fn test_paging_shows_every_block() {
        let now = Instant::now();
        let mut app = App::new(Options::default());
        submit(&mut app, "20", now);

        fit_viewport(&mut app, Rect::new(0, 0, 80, 24));
        let first = visible_hints(&screen(&render(&app, now, 80, 24)), 20);
        assert_eq!(first, (1..=12).collect::<Vec<_>>());

        app.handle_input(Input::PageDown, now);
        let second = visible_hints(&screen(&render(&app, now, 80, 24)), 20);
        assert_eq!(second, (9..=20).collect::<Vec<_>>());

        let mut seen: Vec<_> = first.into_iter().chain(second).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_large_count_warning_is_drawn() {
        let now = Instant::now();
        let mut app = App::new(Options::default());
        submit(&mut app, "60", now);
        fit_viewport(&mut app, Rect::new(0, 0, 80, 24));
        let text = screen(&render(&app, now, 80, 24));

        assert!(text.contains("Warning:"));
        assert!(text.contains("of 60 blocks"));
    }
}
