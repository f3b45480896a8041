//! Tour script data model
//!
//! A [`Script`] is an immutable, ordered list of [`Action`]s fixed when the
//! sequencer is activated. Durations left unset fall back to the per-kind
//! defaults in [`TourConfig`](crate::config::TourConfig).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::TourConfig;
use crate::geometry::{Point, Viewport};
use crate::sequencer::StageTable;

/// Symbolic reference to a live host element, resolved when the action runs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetDescriptor(pub String);

impl TargetDescriptor {
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self(descriptor.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetDescriptor {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One scripted step of the tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Speak {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
    },
    Move {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<TargetDescriptor>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
    },
    Click {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<TargetDescriptor>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
    },
    Scroll {
        target_offset: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
    },
    Hover {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
    },
    Pause {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u64>,
        #[serde(default)]
        wait_for_user: bool,
    },
    /// Any kind this build does not know; executed as a no-op
    #[serde(other)]
    Unknown,
}

/// Discriminant of [`Action`] used for logging and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Speak,
    Move,
    Click,
    Scroll,
    Hover,
    Pause,
    Unknown,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Speak => "speak",
            ActionKind::Move => "move",
            ActionKind::Click => "click",
            ActionKind::Scroll => "scroll",
            ActionKind::Hover => "hover",
            ActionKind::Pause => "pause",
            ActionKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Speak { .. } => ActionKind::Speak,
            Action::Move { .. } => ActionKind::Move,
            Action::Click { .. } => ActionKind::Click,
            Action::Scroll { .. } => ActionKind::Scroll,
            Action::Hover { .. } => ActionKind::Hover,
            Action::Pause { .. } => ActionKind::Pause,
            Action::Unknown => ActionKind::Unknown,
        }
    }

    /// Explicitly authored duration, if any
    pub fn explicit_duration(&self) -> Option<u64> {
        match self {
            Action::Speak { duration, .. }
            | Action::Move { duration, .. }
            | Action::Click { duration, .. }
            | Action::Scroll { duration, .. }
            | Action::Hover { duration, .. }
            | Action::Pause { duration, .. } => *duration,
            Action::Unknown => None,
        }
    }

    /// Nominal timing budget, defaulted per kind when unset
    pub fn duration(&self, tour: &TourConfig) -> Duration {
        self.explicit_duration()
            .map(Duration::from_millis)
            .unwrap_or_else(|| tour.default_duration(self.kind()))
    }

    pub fn target(&self) -> Option<&TargetDescriptor> {
        match self {
            Action::Move { target, .. } | Action::Click { target, .. } => target.as_ref(),
            _ => None,
        }
    }

    pub fn speak(message: impl Into<String>, duration: u64) -> Self {
        Action::Speak {
            message: message.into(),
            duration: Some(duration),
        }
    }

    pub fn move_to(target: impl Into<TargetDescriptor>, duration: u64) -> Self {
        Action::Move {
            target: Some(target.into()),
            x: None,
            y: None,
            duration: Some(duration),
        }
    }

    pub fn move_to_point(point: Point, duration: u64) -> Self {
        Action::Move {
            target: None,
            x: Some(point.x),
            y: Some(point.y),
            duration: Some(duration),
        }
    }

    pub fn click(target: impl Into<TargetDescriptor>, message: Option<&str>, duration: u64) -> Self {
        Action::Click {
            target: Some(target.into()),
            message: message.map(str::to_string),
            duration: Some(duration),
        }
    }

    pub fn scroll(target_offset: f64, duration: u64) -> Self {
        Action::Scroll {
            target_offset,
            duration: Some(duration),
        }
    }

    pub fn hover(message: Option<&str>, duration: u64) -> Self {
        Action::Hover {
            message: message.map(str::to_string),
            duration: Some(duration),
        }
    }

    pub fn pause(duration: u64) -> Self {
        Action::Pause {
            duration: Some(duration),
            wait_for_user: false,
        }
    }

    pub fn wait_for_user(duration: u64) -> Self {
        Action::Pause {
            duration: Some(duration),
            wait_for_user: true,
        }
    }
}

/// Fixed, ordered list of actions for one tour run
///
/// Cloning is cheap; the action list is shared and never mutated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    actions: Arc<[Action]>,
}

impl Script {
    pub fn new(actions: impl Into<Vec<Action>>) -> Self {
        Self {
            actions: actions.into().into(),
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }
}

impl FromIterator<Action> for Script {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.actions.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<Action>::deserialize(deserializer).map(Script::new)
    }
}

/// Built-in walkthrough of the demo page
///
/// Built from the viewport measured at activation so nothing depends on the
/// window size at load time.
pub fn default_tour(viewport: Viewport) -> Script {
    let center = viewport.center();
    let corner = Point::new((viewport.width - 4.0).max(0.0), (viewport.height - 3.0).max(0.0));

    Script::new(vec![
        // Welcome
        Action::move_to_point(center, 1200),
        Action::speak("Welcome to Tourline! Let me show you around.", 3000),
        // Navigation
        Action::move_to("#nav-features", 1500),
        Action::hover(Some("The top bar jumps between sections."), 2000),
        Action::move_to("text:Pricing", 1200),
        Action::hover(Some("Plans live under Pricing."), 1800),
        // Features
        Action::move_to("#card-sequencer", 1500),
        Action::speak("Every step of this tour is a scripted action.", 3000),
        Action::move_to("#card-drivers", 1200),
        Action::speak("Pointer and scroll motion are eased, frame by frame.", 3000),
        // Hands-on
        Action::move_to("#start-button", 1500),
        Action::click("#start-button", Some("Clicking for you..."), 1000),
        Action::speak("That click was real: the button changed state.", 2500),
        Action::wait_for_user(10000),
        // Deep dive
        Action::scroll(viewport.height * 1.5, 1500),
        Action::move_to("role:faq", 1500),
        Action::hover(Some("Answers to common questions live down here."), 2000),
        Action::move_to("#missing-element", 800),
        Action::scroll(0.0, 1200),
        // Finish
        Action::move_to_point(corner, 1500),
        Action::speak("That's the tour. Press r to watch it again.", 3000),
        Action::pause(1000),
    ])
}

/// Stage labels for [`default_tour`]
pub fn default_stages() -> StageTable {
    StageTable::new()
        .stage(0, "Welcome")
        .stage(2, "Navigation")
        .stage(6, "Features")
        .stage(10, "Hands-on")
        .stage(14, "Deep dive")
        .stage(19, "Finish")
}
