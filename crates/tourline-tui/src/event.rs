use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use tourline_core::config::frame_interval;

/// Event handler for terminal events
pub struct EventHandler {
    /// Poll timeout while nothing animates
    tick_rate: Duration,
    /// Poll timeout while the pointer or scroll is mid-animation
    animation_rate: Duration,
}

impl EventHandler {
    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            animation_rate: frame_interval(animation_fps),
        }
    }

    /// Poll for the next event
    ///
    /// Uses the animation rate when `fast` is set, otherwise the idle rate.
    /// The wait is capped at `until_deadline` so a pending phase is not
    /// overslept.
    pub fn next(&self, fast: bool, until_deadline: Option<Duration>) -> Result<Option<AppEvent>> {
        let base = self.timeout(fast);
        let timeout = until_deadline.map_or(base, |d| d.min(base));
        self.poll(timeout)
    }

    pub fn timeout(&self, fast: bool) -> Duration {
        if fast {
            self.animation_rate
        } else {
            self.tick_rate
        }
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse button or movement
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Poll timed out with no input
    Tick,
}
