//! Scripted action sequencer
//!
//! The sequencer owns a [`Script`] and a cursor into it and executes one
//! action at a time. It is frame driven: the host calls [`Sequencer::update`]
//! with the current instant and the sequencer fires whatever phase has come
//! due, chaining each phase from the previous deadline rather than from the
//! frame time.
//!
//! Exactly one phase (a timer deadline or a driver animation) is in flight
//! per run. `deactivate` drops it, so nothing armed by a cancelled run can
//! advance the script afterwards.

mod stage;
mod state;

use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{AppConfig, EasingType, TourConfig};
use crate::geometry::Point;
use crate::host::TourHost;
use crate::motion::{MotionDriver, ScrollDriver};
use crate::script::{Action, Script, TargetDescriptor};
use crate::{Error, Result};

pub use stage::{StageLabeler, StageTable};
pub use state::{Presentation, RunStatus, TourEvent};

/// What the in-flight action is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Caption visible; hides at the deadline
    Speaking,
    /// Fixed delay before advancing
    Grace,
    /// Pointer animation settles at the deadline
    Moving,
    /// Click flag raised; clears at the deadline
    Clicking,
    /// Scroll animation settles at the deadline
    Scrolling,
    /// Optional caption; clears at the deadline
    Hovering,
    /// Timed delay
    Pausing,
    /// Waiting for `resume`; the deadline is the fallback timeout
    AwaitingUser,
}

/// The single pending timer/animation handle of a run
#[derive(Debug, Clone, Copy)]
struct Phase {
    run_id: Uuid,
    index: usize,
    step: Step,
    due: Instant,
}

/// Drives a tour script against a [`TourHost`]
pub struct Sequencer {
    tour: TourConfig,
    script: Script,
    status: RunStatus,
    index: usize,
    run_id: Option<Uuid>,
    phase: Option<Phase>,
    pointer: MotionDriver,
    scroll: ScrollDriver,
    presentation: Presentation,
    stages: Option<Box<dyn StageLabeler>>,
    event_tx: Option<mpsc::UnboundedSender<TourEvent>>,
}

impl Sequencer {
    pub fn new(tour: TourConfig, motion_easing: EasingType, scroll_easing: EasingType) -> Self {
        Self {
            tour,
            script: Script::default(),
            status: RunStatus::Idle,
            index: 0,
            run_id: None,
            phase: None,
            pointer: MotionDriver::with_easing(motion_easing),
            scroll: ScrollDriver::with_easing(scroll_easing),
            presentation: Presentation::default(),
            stages: None,
            event_tx: None,
        }
    }

    /// Create a sequencer from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.tour.clone(), config.motion.easing, config.scroll.easing)
    }

    /// Set the stage labeler used for stage-change notifications
    pub fn with_stages(mut self, stages: impl StageLabeler + 'static) -> Self {
        self.stages = Some(Box::new(stages));
        self
    }

    /// Set the event sender for host notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<TourEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Place the pointer before a run starts
    pub fn with_cursor(mut self, cursor: Point) -> Self {
        self.pointer.set_immediate(cursor);
        self.presentation.cursor = cursor;
        self
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Deadline of the in-flight phase, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.phase.map(|p| p.due)
    }

    /// Pointer or scroll is mid-animation; hosts should render at frame rate
    pub fn needs_fast_update(&self) -> bool {
        self.pointer.is_animating() || self.scroll.is_animating()
    }

    /// Begin executing `script` from index 0
    ///
    /// Refused with [`Error::AlreadyActive`] while a run is in flight; the
    /// existing run is left untouched.
    pub fn activate<H>(&mut self, script: Script, host: &mut H, now: Instant) -> Result<()>
    where
        H: TourHost + ?Sized,
    {
        if self.status.is_active() {
            warn!(index = self.index, status = ?self.status, "Tour already active");
            return Err(Error::AlreadyActive {
                index: self.index,
                status: self.status,
            });
        }

        let run_id = Uuid::new_v4();
        info!(%run_id, actions = script.len(), "Tour activated");

        self.script = script;
        self.index = 0;
        self.run_id = Some(run_id);
        self.phase = None;
        self.status = RunStatus::Running;
        self.scroll.set_immediate(host.scroll_offset());

        // Cursor position carries over from the previous run
        self.presentation = Presentation {
            run_id: Some(run_id),
            status: RunStatus::Running,
            total: self.script.len(),
            cursor: self.pointer.current(),
            scroll_offset: self.scroll.current(),
            ..Presentation::default()
        };

        self.send_event(TourEvent::Activated {
            run_id,
            total: self.script.len(),
        });
        self.start_current(host, now);
        Ok(())
    }

    /// Cancel the in-flight action and stop the run; idempotent
    ///
    /// Side effects already applied (a synthesized click) are not undone.
    pub fn deactivate(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        let was_active = self.status.is_active();

        self.phase = None;
        self.pointer.cancel();
        self.scroll.cancel();
        self.status = RunStatus::Cancelled;

        let p = &mut self.presentation;
        p.status = RunStatus::Cancelled;
        p.clicking = false;
        p.waiting_for_user = false;
        p.cursor = self.pointer.current();
        p.scroll_offset = self.scroll.current();
        p.hide_caption();

        if let (true, Some(run_id)) = (was_active, self.run_id) {
            info!(%run_id, index = self.index, "Tour cancelled");
            self.send_event(TourEvent::Cancelled {
                run_id,
                index: self.index,
            });
        }
    }

    /// Continue past a pause that waits for the user
    ///
    /// Outside `WaitingForUser` this is a silent no-op returning `false`, so
    /// duplicate gestures are harmless.
    pub fn resume<H>(&mut self, host: &mut H, now: Instant) -> bool
    where
        H: TourHost + ?Sized,
    {
        if self.status != RunStatus::WaitingForUser {
            debug!(status = ?self.status, "Resume ignored");
            return false;
        }
        debug!(index = self.index, "Resumed by user");
        self.finish_waiting(host, now);
        true
    }

    /// Fire every phase due by `now`, then sample the drivers
    ///
    /// Call this every frame. Returns the updated presentation snapshot.
    pub fn update<H>(&mut self, host: &mut H, now: Instant) -> &Presentation
    where
        H: TourHost + ?Sized,
    {
        while let Some(phase) = self.phase {
            if phase.due > now {
                break;
            }
            self.phase = None;
            self.fire(host, phase);
        }

        self.presentation.cursor = self.pointer.update(now).value;
        if self.scroll.is_animating() {
            let offset = self.scroll.update(now).value;
            host.set_scroll_offset(offset);
            self.presentation.scroll_offset = offset;
        }

        &self.presentation
    }

    /// Handle a phase whose deadline has been reached
    fn fire<H>(&mut self, host: &mut H, phase: Phase)
    where
        H: TourHost + ?Sized,
    {
        if Some(phase.run_id) != self.run_id || phase.index != self.index || !self.status.is_active() {
            debug!(index = phase.index, step = ?phase.step, "Discarding stale phase");
            return;
        }

        let at = phase.due;
        match phase.step {
            Step::Speaking => {
                self.presentation.hide_caption();
                self.arm(Step::Grace, at + self.tour.grace());
            }
            Step::Grace => self.advance(host, at),
            Step::Moving => {
                self.presentation.cursor = self.pointer.update(at).value;
                self.arm(Step::Grace, at + self.tour.grace());
            }
            Step::Clicking => {
                self.presentation.clicking = false;
                self.presentation.clear_caption();
                self.advance(host, at);
            }
            Step::Scrolling => {
                let offset = self.scroll.update(at).value;
                host.set_scroll_offset(offset);
                self.presentation.scroll_offset = offset;
                self.arm(Step::Grace, at + self.tour.grace());
            }
            Step::Hovering => {
                self.presentation.clear_caption();
                self.advance(host, at);
            }
            Step::Pausing => self.arm(Step::Grace, at + self.tour.grace()),
            Step::AwaitingUser => {
                debug!(index = self.index, "Pause timed out, continuing without user");
                self.finish_waiting(host, at);
            }
        }
    }

    fn finish_waiting<H>(&mut self, host: &mut H, at: Instant)
    where
        H: TourHost + ?Sized,
    {
        self.phase = None;
        self.status = RunStatus::Running;
        self.presentation.status = RunStatus::Running;
        self.presentation.waiting_for_user = false;
        self.presentation.clear_caption();
        self.advance(host, at);
    }

    fn arm(&mut self, step: Step, due: Instant) {
        if let Some(run_id) = self.run_id {
            self.phase = Some(Phase {
                run_id,
                index: self.index,
                step,
                due,
            });
        }
    }

    fn advance<H>(&mut self, host: &mut H, at: Instant)
    where
        H: TourHost + ?Sized,
    {
        self.index += 1;
        self.start_current(host, at);
    }

    /// Start the action at `self.index`, or complete the run past the end
    fn start_current<H>(&mut self, host: &mut H, at: Instant)
    where
        H: TourHost + ?Sized,
    {
        let Some(run_id) = self.run_id else {
            return;
        };

        while let Some(action) = self.script.get(self.index).cloned() {
            self.presentation.index = self.index;
            self.publish_stage(run_id, &action);
            debug!(index = self.index, kind = %action.kind(), "Starting action");
            self.send_event(TourEvent::ActionStarted {
                run_id,
                index: self.index,
                kind: action.kind(),
            });

            let duration = action.duration(&self.tour);
            match action {
                Action::Speak { message, .. } => {
                    self.presentation.show_caption(&message);
                    self.arm(Step::Speaking, at + duration);
                }
                Action::Move { target, x, y, .. } => {
                    let point = self.resolve_point(host, target.as_ref(), x, y);
                    self.pointer.animate_to(point, duration, at);
                    let due = self.pointer.settles_at().unwrap_or(at);
                    self.arm(Step::Moving, due);
                }
                Action::Click { target, message, .. } => {
                    self.presentation.clicking = true;
                    if let Some(message) = message {
                        self.presentation.show_caption(&message);
                    }
                    if let Some(target) = target {
                        self.click(host, &target);
                    }
                    self.arm(Step::Clicking, at + duration);
                }
                Action::Scroll { target_offset, .. } => {
                    // The user may have scrolled since the last action
                    self.scroll.set_immediate(host.scroll_offset());
                    self.scroll.animate_to(target_offset, duration, at);
                    let due = self.scroll.settles_at().unwrap_or(at);
                    self.arm(Step::Scrolling, due);
                }
                Action::Hover { message, .. } => {
                    if let Some(message) = message {
                        self.presentation.show_caption(&message);
                    }
                    self.arm(Step::Hovering, at + duration);
                }
                Action::Pause { wait_for_user: true, .. } => {
                    self.presentation.show_caption(&self.tour.pause_prompt);
                    self.presentation.waiting_for_user = true;
                    self.presentation.status = RunStatus::WaitingForUser;
                    self.status = RunStatus::WaitingForUser;
                    self.send_event(TourEvent::WaitingForUser {
                        run_id,
                        index: self.index,
                    });
                    self.arm(Step::AwaitingUser, at + duration);
                }
                Action::Pause { wait_for_user: false, .. } => {
                    self.arm(Step::Pausing, at + duration);
                }
                Action::Unknown => {
                    debug!(index = self.index, "Skipping unknown action");
                    self.index += 1;
                    continue;
                }
            }
            return;
        }

        self.complete(run_id);
    }

    fn complete(&mut self, run_id: Uuid) {
        self.phase = None;
        self.status = RunStatus::Completed;
        self.index = self.script.len();

        let p = &mut self.presentation;
        p.status = RunStatus::Completed;
        p.index = self.index;
        p.clicking = false;
        p.waiting_for_user = false;

        info!(%run_id, "Tour completed");
        self.send_event(TourEvent::Completed { run_id });
    }

    /// Anchor for a move: resolved target, then explicit coordinates, then
    /// the viewport center
    fn resolve_point<H>(
        &self,
        host: &H,
        target: Option<&TargetDescriptor>,
        x: Option<f64>,
        y: Option<f64>,
    ) -> Point
    where
        H: TourHost + ?Sized,
    {
        if let Some(target) = target {
            if let Some(anchor) = host.resolve(target) {
                return anchor.point;
            }
            debug!(%target, "Move target not found");
        }

        let cursor = self.pointer.current();
        match (x, y) {
            (None, None) => {
                if let Some(target) = target {
                    warn!(%target, "Move target not found, falling back to viewport center");
                }
                host.viewport().center()
            }
            (x, y) => Point::new(x.unwrap_or(cursor.x), y.unwrap_or(cursor.y)),
        }
    }

    fn click<H>(&self, host: &mut H, target: &TargetDescriptor)
    where
        H: TourHost + ?Sized,
    {
        match host.resolve(target) {
            Some(anchor) => {
                debug!(%target, element = %anchor.element_id, "Synthesizing click");
                host.activate(target, &anchor);
            }
            None => debug!(%target, "Click target not found, skipping activation"),
        }
    }

    fn publish_stage(&mut self, run_id: Uuid, action: &Action) {
        let Some(label) = self
            .stages
            .as_ref()
            .and_then(|stages| stages.label(self.index, action))
        else {
            return;
        };

        if self.presentation.stage.as_deref() != Some(label.as_str()) {
            debug!(stage = %label, "Stage changed");
            self.presentation.stage = Some(label.clone());
            self.send_event(TourEvent::StageChanged { run_id, label });
        }
    }

    /// Send an event to the host (if event channel is configured)
    fn send_event(&self, event: TourEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send tour event: receiver dropped");
            }
        }
    }
}
