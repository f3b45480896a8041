use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;
use crate::script::ActionKind;

/// Lifecycle of one sequencer run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    WaitingForUser,
    Completed,
    Cancelled,
}

impl RunStatus {
    /// Completed or cancelled: nothing further happens until re-activation
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Cancelled)
    }

    /// A run is in flight and `activate` would be refused
    pub fn is_active(&self) -> bool {
        matches!(self, RunStatus::Running | RunStatus::WaitingForUser)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::Idle => "IDLE",
            RunStatus::Running => "PLAYING",
            RunStatus::WaitingForUser => "YOUR TURN",
            RunStatus::Completed => "DONE",
            RunStatus::Cancelled => "STOPPED",
        }
    }
}

/// Externally observable snapshot consumed by the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub run_id: Option<Uuid>,
    pub status: RunStatus,
    /// Index of the action in flight (equals `total` once completed)
    pub index: usize,
    pub total: usize,
    /// Live simulated pointer position
    pub cursor: Point,
    /// Caption text; kept after hiding so it can fade out
    pub caption: String,
    pub caption_visible: bool,
    /// Transient flag while a click plays
    pub clicking: bool,
    pub waiting_for_user: bool,
    /// Live document scroll offset
    pub scroll_offset: f64,
    pub stage: Option<String>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            run_id: None,
            status: RunStatus::Idle,
            index: 0,
            total: 0,
            cursor: Point::default(),
            caption: String::new(),
            caption_visible: false,
            clicking: false,
            waiting_for_user: false,
            scroll_offset: 0.0,
            stage: None,
        }
    }
}

impl Presentation {
    /// Caption to draw, if visible and non-empty
    pub fn visible_caption(&self) -> Option<&str> {
        if self.caption_visible && !self.caption.is_empty() {
            Some(self.caption.as_str())
        } else {
            None
        }
    }

    pub(crate) fn show_caption(&mut self, text: &str) {
        self.caption.clear();
        self.caption.push_str(text);
        self.caption_visible = true;
    }

    pub(crate) fn hide_caption(&mut self) {
        self.caption_visible = false;
    }

    pub(crate) fn clear_caption(&mut self) {
        self.caption.clear();
        self.caption_visible = false;
    }

    /// Progress through the script in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.total > 0 {
            (self.index as f64 / self.total as f64).min(1.0)
        } else if self.status == RunStatus::Completed {
            1.0
        } else {
            0.0
        }
    }
}

/// Notifications emitted by the sequencer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TourEvent {
    /// A run began
    Activated { run_id: Uuid, total: usize },
    /// The logical stage changed
    StageChanged { run_id: Uuid, label: String },
    /// An action began executing
    ActionStarted { run_id: Uuid, index: usize, kind: ActionKind },
    /// A pause is waiting for a user gesture
    WaitingForUser { run_id: Uuid, index: usize },
    /// Every action ran; emitted exactly once per run
    Completed { run_id: Uuid },
    /// The run was deactivated before completing
    Cancelled { run_id: Uuid, index: usize },
}

impl TourEvent {
    pub fn run_id(&self) -> Uuid {
        match self {
            TourEvent::Activated { run_id, .. }
            | TourEvent::StageChanged { run_id, .. }
            | TourEvent::ActionStarted { run_id, .. }
            | TourEvent::WaitingForUser { run_id, .. }
            | TourEvent::Completed { run_id }
            | TourEvent::Cancelled { run_id, .. } => *run_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(RunStatus::Running.is_active());
        assert!(RunStatus::WaitingForUser.is_active());
        assert!(!RunStatus::Idle.is_active());
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(!RunStatus::Idle.is_terminal());
    }

    #[test]
    fn test_caption_visibility() {
        let mut p = Presentation::default();
        assert_eq!(p.visible_caption(), None);

        p.show_caption("hello");
        assert_eq!(p.visible_caption(), Some("hello"));

        p.hide_caption();
        assert_eq!(p.visible_caption(), None);
        assert_eq!(p.caption, "hello");

        p.clear_caption();
        assert!(p.caption.is_empty());
    }
}
