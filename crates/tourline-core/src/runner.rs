//! Async driver that runs a [`Sequencer`] on a tokio task

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::host::TourHost;
use crate::script::Script;
use crate::sequencer::{Presentation, RunStatus, Sequencer};
use crate::Result;

/// Slowest playback multiplier accepted by [`TourRunner::with_speed`]
pub const MIN_SPEED: f64 = 0.01;
/// Fastest playback multiplier accepted by [`TourRunner::with_speed`]
pub const MAX_SPEED: f64 = 1000.0;

/// Commands a host can send to a running tour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourControl {
    /// User gesture continuing a wait-for-user pause
    Resume,
    /// Stop the tour
    Cancel,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutcome {
    pub status: RunStatus,
    /// Wall time from activation to the terminal state
    pub elapsed: Duration,
}

/// Frame loop around a sequencer and its host
pub struct TourRunner<H: TourHost> {
    sequencer: Sequencer,
    host: H,
    script: Script,
    frame: Duration,
    speed: f64,
    presentation_tx: Option<watch::Sender<Presentation>>,
}

impl<H: TourHost> TourRunner<H> {
    pub fn new(sequencer: Sequencer, host: H, script: Script) -> Self {
        Self {
            sequencer,
            host,
            script,
            frame: Duration::from_millis(16),
            speed: 1.0,
            presentation_tx: None,
        }
    }

    pub fn with_frame_interval(mut self, frame: Duration) -> Self {
        if !frame.is_zero() {
            self.frame = frame;
        }
        self
    }

    /// Play the tour faster (> 1.0) or slower (< 1.0) than authored
    ///
    /// The multiplier is clamped to `MIN_SPEED..=MAX_SPEED`; NaN and
    /// non-positive values leave the speed unchanged.
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed.is_nan() || speed <= 0.0 {
            return self;
        }
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self
    }

    /// Publish a snapshot after every frame and command
    pub fn with_presentation_sender(mut self, tx: watch::Sender<Presentation>) -> Self {
        self.presentation_tx = Some(tx);
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Run the script until it completes, is cancelled, or shutdown fires
    pub async fn run(
        &mut self,
        mut controls: mpsc::UnboundedReceiver<TourControl>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<RunOutcome> {
        let started = Instant::now();
        let origin = started.into_std();
        let speed = self.speed;
        // Tour time runs `speed` times faster than the tokio clock
        let clock = move || origin + started.elapsed().mul_f64(speed);

        self.sequencer.activate(self.script.clone(), &mut self.host, clock())?;
        self.publish();

        info!(frame_ms = self.frame.as_millis() as u64, speed, "Tour runner started");

        let mut frames = tokio::time::interval(self.frame);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut controls_open = true;
        let mut shutdown_open = true;

        while !self.sequencer.status().is_terminal() {
            tokio::select! {
                result = shutdown.changed(), if shutdown_open => {
                    match result {
                        Ok(()) if *shutdown.borrow() => {
                            info!("Tour runner received shutdown signal");
                            self.sequencer.deactivate();
                        }
                        Ok(()) => {}
                        Err(_) => shutdown_open = false,
                    }
                }

                control = controls.recv(), if controls_open => {
                    match control {
                        Some(TourControl::Resume) => {
                            self.sequencer.resume(&mut self.host, clock());
                        }
                        Some(TourControl::Cancel) => self.sequencer.deactivate(),
                        None => {
                            debug!("Control channel closed");
                            controls_open = false;
                        }
                    }
                }

                _ = frames.tick() => {
                    self.sequencer.update(&mut self.host, clock());
                }
            }
            self.publish();
        }

        let outcome = RunOutcome {
            status: self.sequencer.status(),
            elapsed: started.elapsed(),
        };
        info!(status = ?outcome.status, elapsed_ms = outcome.elapsed.as_millis() as u64, "Tour runner finished");
        Ok(outcome)
    }

    fn publish(&self) {
        if let Some(ref tx) = self.presentation_tx {
            tx.send_replace(self.sequencer.presentation().clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::geometry::{Rect, Viewport};
    use crate::host::RecordingHost;
    use crate::resolver::UiElement;
    use crate::script::Action;
    use crate::sequencer::TourEvent;

    fn runner(script: Script) -> TourRunner<RecordingHost> {
        let host = RecordingHost::new(
            Viewport::new(80.0, 24.0),
            vec![UiElement::new("go", "button", "Go", Rect::new(0.0, 0.0, 4.0, 2.0))],
        );
        TourRunner::new(Sequencer::from_config(&AppConfig::default()), host, script)
    }

    fn channels() -> (
        mpsc::UnboundedSender<TourControl>,
        mpsc::UnboundedReceiver<TourControl>,
        watch::Sender<bool>,
        watch::Receiver<bool>,
    ) {
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        (control_tx, control_rx, shutdown_tx, shutdown_rx)
    }

    fn speak_then_pause() -> Script {
        Script::new(vec![Action::speak("hello", 1000), Action::pause(500)])
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_to_completion_on_schedule() {
        let (_control_tx, control_rx, _shutdown_tx, shutdown_rx) = channels();
        let mut runner = runner(speak_then_pause());

        let outcome = runner.run(control_rx, shutdown_rx).await.unwrap();
        assert_eq!(outcome.status, RunStatus::Completed);
        assert!(outcome.elapsed >= Duration::from_millis(2500));
        assert!(outcome.elapsed < Duration::from_millis(2600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_scales_tour_time() {
        let (_control_tx, control_rx, _shutdown_tx, shutdown_rx) = channels();
        let mut runner = runner(speak_then_pause()).with_speed(2.0);

        let outcome = runner.run(control_rx, shutdown_rx).await.unwrap();
        assert_eq!(outcome.status, RunStatus::Completed);
        assert!(outcome.elapsed >= Duration::from_millis(1250));
        assert!(outcome.elapsed < Duration::from_millis(1300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_extreme_speed_is_clamped() {
        let (_control_tx, control_rx, _shutdown_tx, shutdown_rx) = channels();
        let mut runner = runner(Script::new(vec![Action::speak("hi", 1000)])).with_speed(1e30);
        assert_eq!(runner.speed, MAX_SPEED);

        let outcome = runner.run(control_rx, shutdown_rx).await.unwrap();
        assert_eq!(outcome.status, RunStatus::Completed);

        let runner = runner.with_speed(f64::INFINITY).with_speed(1e-9);
        assert_eq!(runner.speed, MIN_SPEED);
        let runner = runner.with_speed(f64::NAN).with_speed(-2.0);
        assert_eq!(runner.speed, MIN_SPEED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_control_ends_wait() {
        let (control_tx, control_rx, _shutdown_tx, shutdown_rx) = channels();
        let mut runner = runner(Script::new(vec![
            Action::wait_for_user(10_000),
            Action::click("#go", None, 100),
        ]));
        control_tx.send(TourControl::Resume).unwrap();

        let outcome = runner.run(control_rx, shutdown_rx).await.unwrap();
        assert_eq!(outcome.status, RunStatus::Completed);
        assert!(outcome.elapsed < Duration::from_secs(1));
        assert_eq!(runner.host().activations, vec!["go".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_control_stops_run() {
        let (control_tx, control_rx, _shutdown_tx, shutdown_rx) = channels();
        let mut runner = runner(Script::new(vec![Action::speak("long", 60_000)]));
        control_tx.send(TourControl::Cancel).unwrap();

        let outcome = runner.run(control_rx, shutdown_rx).await.unwrap();
        assert_eq!(outcome.status, RunStatus::Cancelled);
        assert_eq!(runner.sequencer().current_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_signal_cancels() {
        let (_control_tx, control_rx, shutdown_tx, shutdown_rx) = channels();
        let mut runner = runner(Script::new(vec![Action::speak("long", 60_000)]));
        shutdown_tx.send(true).unwrap();

        let outcome = runner.run(control_rx, shutdown_rx).await.unwrap();
        assert_eq!(outcome.status, RunStatus::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_channels_still_reach_timeout() {
        let (control_tx, control_rx, shutdown_tx, shutdown_rx) = channels();
        drop(control_tx);
        drop(shutdown_tx);
        let mut runner = runner(Script::new(vec![Action::wait_for_user(2000)]));

        let outcome = runner.run(control_rx, shutdown_rx).await.unwrap();
        assert_eq!(outcome.status, RunStatus::Completed);
        assert!(outcome.elapsed >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_presentation_and_events() {
        let (_control_tx, control_rx, _shutdown_tx, shutdown_rx) = channels();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (presentation_tx, presentation_rx) = watch::channel(Presentation::default());

        let sequencer = Sequencer::from_config(&AppConfig::default()).with_event_sender(event_tx);
        let mut runner = TourRunner::new(
            sequencer,
            RecordingHost::empty(Viewport::new(80.0, 24.0)),
            Script::new(vec![Action::scroll(30.0, 300)]),
        )
        .with_presentation_sender(presentation_tx);

        runner.run(control_rx, shutdown_rx).await.unwrap();

        let last = presentation_rx.borrow().clone();
        assert_eq!(last.status, RunStatus::Completed);
        assert_eq!(last.scroll_offset, 30.0);
        assert_eq!(runner.host().last_scroll(), Some(30.0));

        let mut completed = 0;
        while let Ok(event) = event_rx.try_recv() {
            if matches!(event, TourEvent::Completed { .. }) {
                completed += 1;
            }
        }
        assert_eq!(completed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_run_reactivates() {
        let mut runner = runner(Script::new(vec![Action::pause(100)]));

        let (_c1, control_rx, _s1, shutdown_rx) = channels();
        let first = runner.run(control_rx, shutdown_rx).await.unwrap();
        let first_id = runner.sequencer().run_id();

        let (_c2, control_rx, _s2, shutdown_rx) = channels();
        let second = runner.run(control_rx, shutdown_rx).await.unwrap();

        assert_eq!(first.status, RunStatus::Completed);
        assert_eq!(second.status, RunStatus::Completed);
        assert_ne!(runner.sequencer().run_id(), first_id);
    }
}
