//! Terminal host for the Terra Life simulation.
//!
//! Owns everything the core deliberately does not: the terminal itself, the
//! periodic step timer, clamping of resize input into the supported range,
//! and rendering of the grid and statistics panes. Built on `ratatui` over a
//! `crossterm` backend.

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};
use sysinfo::{System, SystemExt};

use terra_life::{
    grid::{MAX_GRID_DIM, MIN_GRID_DIM},
    sim::AUTO_STEP_INTERVAL,
    CellState, Simulation,
};

/// Grid width used when the application starts.
const DEFAULT_WIDTH: usize = 10;
/// Grid height used when the application starts.
const DEFAULT_HEIGHT: usize = 10;

/// Clamps a requested grid dimension into the supported range.
///
/// The core treats out-of-range dimensions as a caller error, so every
/// user-supplied size passes through here before reaching it.
fn clamp_dim(value: usize) -> usize {
    value.clamp(MIN_GRID_DIM, MAX_GRID_DIM)
}

/// Host-side application state: the simulation plus the terminal-facing
/// pieces the core does not own.
struct App {
    /// The simulation being driven.
    sim: Simulation,
    /// System information for the memory line of the statistics pane.
    sys: System,
    /// Screen rectangle the grid was last drawn into, used to map mouse
    /// clicks back onto cell coordinates.
    grid_area: Rect,
}

impl App {
    /// Creates the host state with a paused simulation of the given size.
    fn new(width: usize, height: usize) -> App {
        App {
            sim: Simulation::new(clamp_dim(width), clamp_dim(height)),
            sys: System::new_all(),
            grid_area: Rect::default(),
        }
    }

    /// Advances the simulation one generation and refreshes the memory
    /// reading shown in the statistics pane.
    fn step(&mut self) {
        self.sim.advance();
        self.sys.refresh_memory();
    }

    /// Applies a width/height change request.
    ///
    /// Clamps both values first and rebuilds the grid only when a clamped
    /// value actually differs from the active dimensions, so hammering a key
    /// at the boundary does not keep resetting the simulation.
    fn request_resize(&mut self, width: usize, height: usize) {
        let width = clamp_dim(width);
        let height = clamp_dim(height);
        if width != self.sim.grid().width() || height != self.sim.grid().height() {
            self.sim.resize(width, height);
        }
    }

    /// Adjusts the grid width by `delta` columns.
    fn resize_width(&mut self, delta: isize) {
        let requested = self.sim.grid().width().saturating_add_signed(delta);
        let height = self.sim.grid().height();
        self.request_resize(requested, height);
    }

    /// Adjusts the grid height by `delta` rows.
    fn resize_height(&mut self, delta: isize) {
        let width = self.sim.grid().width();
        let requested = self.sim.grid().height().saturating_add_signed(delta);
        self.request_resize(width, requested);
    }

    /// Maps a terminal click back onto the grid pane and cycles the clicked
    /// cell's state. Clicks outside the pane are ignored.
    fn toggle_cell_at(&mut self, column: u16, row: u16) {
        let area = self.grid_area;
        if column < area.x || row < area.y {
            return;
        }
        let x = (column - area.x) as usize;
        let y = (row - area.y) as usize;
        if x < area.width as usize && y < area.height as usize {
            self.sim.toggle_cell(x, y);
        }
    }
}

/// Draws the game grid to the terminal interface.
///
/// # Arguments
///
/// * `f` - The frame to draw on
/// * `app` - The application state
/// * `area` - The area of the terminal to draw in
fn draw_grid(f: &mut ratatui::Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(
        "Terra Life [Space: Run/Pause | Enter: Step | Click: Edit | c: Clear | r: Random | Arrows: Resize | q: Quit]",
    );

    // remember where the cells land so mouse clicks can be mapped back
    app.grid_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };

    let grid = app.sim.grid();
    let mut cells = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let glyph = match grid.get(x, y).map(|cell| cell.state) {
                Some(CellState::Alive) => '█',
                Some(CellState::Water) => '~',
                Some(CellState::Desert) => '▒',
                _ => ' ',
            };
            cells.push(glyph);
        }
        cells.push('\n');
    }

    let paragraph = Paragraph::new(cells)
        .style(Style::default().fg(Color::White))
        .block(block);

    f.render_widget(paragraph, area);
}

/// Draws the statistics panel to the terminal interface.
///
/// # Arguments
///
/// * `f` - The frame to draw on
/// * `app` - The application state
/// * `area` - The area of the terminal to draw in
fn draw_stats(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let grid = app.sim.grid();
    let stats = app.sim.stats();
    let generation = app.sim.generation();
    let memory_used = app.sys.used_memory() / 1024;
    let memory_total = app.sys.total_memory() / 1024;

    let stats_text = format!(
        "Statistics:\n\
        Grid: {}x{}\n\
        Generation: {}\n\
        Alive: {}\n\
        Water: {}\n\
        Desert: {}\n\
        Cells Created: {}\n\
        Cells Destroyed: {}\n\
        Birth Rate: {:.2}/gen\n\
        Death Rate: {:.2}/gen\n\
        Memory Usage: {}KB/{:.2}MB\n\
        Drowning Rule: {}\n\
        Status: {}\n",
        grid.width(),
        grid.height(),
        generation,
        grid.count_state(CellState::Alive),
        grid.count_state(CellState::Water),
        grid.count_state(CellState::Desert),
        stats.cells_created,
        stats.cells_destroyed,
        stats.cells_created as f64 / generation.max(1) as f64,
        stats.cells_destroyed as f64 / generation.max(1) as f64,
        memory_used,
        memory_total as f64 / 1024.0,
        if app.sim.rules().drowning { "on" } else { "off" },
        if app.sim.running() { "Running" } else { "Paused" }
    );

    let stats_widget = Paragraph::new(stats_text)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(stats_widget, area);
}

/// Main entry point for the Terra Life terminal host.
///
/// Sets up the terminal interface, creates the initial simulation, and runs
/// the event loop. The loop is the only periodic trigger in the program: one
/// generation fires per [`AUTO_STEP_INTERVAL`] while auto-run is active, and
/// pausing, clearing, or quitting synchronously prevents any further
/// automatic step.
///
/// # Controls
///
/// * Space: start/stop automatic stepping
/// * Enter: step one generation (works while running too)
/// * Mouse click: cycle the clicked cell through empty/alive/desert/water
/// * c: clear the grid
/// * r: reseed the grid randomly
/// * Arrow keys: resize the grid (clamped to the supported range)
/// * q: quit
///
/// # Errors
///
/// Returns an error if terminal manipulation fails.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let mut last_step = Instant::now();

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
                .split(f.size());

            draw_grid(f, &mut app, chunks[0]);
            draw_stats(f, &app, chunks[1]);
        })?;

        let timeout = AUTO_STEP_INTERVAL
            .checked_sub(last_step.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char(' ') => app.sim.toggle_running(),
                    KeyCode::Enter => app.step(),
                    KeyCode::Char('c') => app.sim.reset(),
                    KeyCode::Char('r') => app.sim.randomize(),
                    KeyCode::Left => app.resize_width(-1),
                    KeyCode::Right => app.resize_width(1),
                    KeyCode::Up => app.resize_height(-1),
                    KeyCode::Down => app.resize_height(1),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        app.toggle_cell_at(mouse.column, mouse.row);
                    }
                }
                _ => {}
            }
        }

        if last_step.elapsed() >= AUTO_STEP_INTERVAL {
            if app.sim.running() {
                app.step();
            }
            last_step = Instant::now();
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
