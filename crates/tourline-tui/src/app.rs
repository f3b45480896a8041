use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tourline_core::script::{default_stages, default_tour};
use tourline_core::{AppConfig, Presentation, RunStatus, Sequencer, TourEvent, TourHost, Viewport};

use crate::input::InputAction;
use crate::page::DemoPage;

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// The narrated page
    pub page: DemoPage,
    /// Tour sequencer driving the pointer over `page`
    pub sequencer: Sequencer,
    /// Notifications from the sequencer
    events: mpsc::UnboundedReceiver<TourEvent>,
    /// Most recent stage label
    pub stage: Option<String>,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create the app for a page viewport (terminal size minus the status bar)
    pub fn new(config: Arc<AppConfig>, viewport: Viewport) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let sequencer = Sequencer::from_config(&config)
            .with_stages(default_stages())
            .with_event_sender(tx)
            .with_cursor(viewport.center());

        Self {
            config,
            page: DemoPage::new(viewport),
            sequencer,
            events: rx,
            stage: None,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn presentation(&self) -> &Presentation {
        self.sequencer.presentation()
    }

    /// Start the built-in tour against the current layout
    pub fn start_tour(&mut self, now: Instant) {
        let script = default_tour(self.page.viewport());
        match self.sequencer.activate(script, &mut self.page, now) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                warn!("Could not start tour: {}", e);
                self.status_message = Some(format!(" {}", e));
            }
        }
    }

    /// Cancel any run in flight and start over
    pub fn restart_tour(&mut self, now: Instant) {
        self.sequencer.deactivate();
        self.drain_events();
        self.page.set_scroll_offset(0.0);
        self.start_tour(now);
    }

    pub fn handle_input(&mut self, action: InputAction, now: Instant) {
        match action {
            InputAction::Quit => {
                self.sequencer.deactivate();
                self.should_quit = true;
            }
            InputAction::Resume => {
                if !self.sequencer.resume(&mut self.page, now) {
                    debug!("Continue pressed while not waiting");
                }
            }
            InputAction::Restart => self.restart_tour(now),
            InputAction::Stop => self.sequencer.deactivate(),
            InputAction::None => {}
        }
        self.drain_events();
    }

    /// Advance the tour to `now` and apply its notifications
    pub fn tick(&mut self, now: Instant) {
        self.sequencer.update(&mut self.page, now);
        self.drain_events();
    }

    /// Terminal resized; the page area excludes the one-row status bar
    pub fn resize(&mut self, width: u16, height: u16) {
        self.page
            .resize(Viewport::new(width as f64, height.saturating_sub(1) as f64));
    }

    /// Render at frame rate while something animates
    pub fn needs_fast_update(&self) -> bool {
        self.sequencer.needs_fast_update()
    }

    /// Time left until the next phase is due
    pub fn until_next_deadline(&self, now: Instant) -> Option<Duration> {
        self.sequencer
            .next_deadline()
            .map(|due| due.saturating_duration_since(now))
    }

    /// Id of the element under the tour pointer
    pub fn hovered(&self) -> Option<&str> {
        if self.sequencer.status().is_active() {
            self.page.element_at(self.presentation().cursor)
        } else {
            None
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: TourEvent) {
        match event {
            TourEvent::Activated { total, .. } => {
                info!("Tour started with {} actions", total);
                self.stage = None;
            }
            TourEvent::StageChanged { label, .. } => {
                self.stage = Some(label);
            }
            TourEvent::ActionStarted { index, kind, .. } => {
                debug!("Action {} ({}) started", index, kind);
            }
            TourEvent::WaitingForUser { .. } => {
                self.status_message = None;
            }
            TourEvent::Completed { .. } => {
                self.status_message = Some(" Tour complete. Press r to watch again.".to_string());
            }
            TourEvent::Cancelled { .. } => {
                self.status_message = Some(" Tour stopped. Press r to restart.".to_string());
            }
        }
    }

    pub fn status(&self) -> RunStatus {
        self.sequencer.status()
    }
}
