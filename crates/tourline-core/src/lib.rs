pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod motion;
pub mod resolver;
pub mod runner;
pub mod script;
pub mod sequencer;

pub use config::{AppConfig, EasingType, MotionConfig, ScrollConfig, TourConfig};
pub use error::{Error, Result};
pub use geometry::{Point, Rect, Viewport};
pub use host::{RecordingHost, TourHost};
pub use resolver::{Anchor, ElementIndex, TargetResolver, UiElement};
pub use runner::{RunOutcome, TourControl, TourRunner, MAX_SPEED, MIN_SPEED};
pub use script::{Action, ActionKind, Script, TargetDescriptor};
pub use sequencer::{Presentation, RunStatus, Sequencer, StageLabeler, StageTable, TourEvent};
