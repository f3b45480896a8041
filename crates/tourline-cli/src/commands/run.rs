use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use tourline_core::{AppConfig, Viewport};
use tourline_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{CaptionWidget, CursorWidget, PageWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Tourline"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: Arc<AppConfig>) -> Result<()> {
    let size = terminal.size()?;
    let viewport = Viewport::new(size.width as f64, size.height.saturating_sub(1) as f64);

    // Create app state and start the tour right away
    let mut app = App::new(config.clone(), viewport);
    app.start_tour(Instant::now());
    info!("TUI started at {}x{}", size.width, size.height);

    // Create event handler with animation FPS support
    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.motion.animation_fps);

    // Main loop
    loop {
        app.tick(Instant::now());

        // Draw UI
        terminal.draw(|frame| {
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            PageWidget::render(frame, main_layout[0], &app.page, app.hovered());
            CursorWidget::render(frame, main_layout[0], app.presentation());
            CaptionWidget::render(frame, main_layout[0], app.presentation());
            StatusBarWidget::render(frame, main_layout[1], &app);
        })?;

        // Handle events (use faster tick rate during animations)
        let until_deadline = app.until_next_deadline(Instant::now());
        if let Some(event) = event_handler.next(app.needs_fast_update(), until_deadline)? {
            match event {
                AppEvent::Key(key) => app.handle_input(handle_key_event(key), Instant::now()),
                AppEvent::Mouse(mouse) => app.handle_input(handle_mouse_event(mouse), Instant::now()),
                AppEvent::Resize(w, h) => app.resize(w, h),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("TUI exiting");
    Ok(())
}
