use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use tourline_core::script::{default_stages, default_tour};
use tourline_core::{AppConfig, RecordingHost, Sequencer, TourControl, TourEvent, TourRunner, Viewport};
use tourline_tui::DemoPage;

/// Play the built-in tour against a recording host, printing events as JSON
/// lines
///
/// Waits for the user are continued automatically.
pub async fn run(config: Arc<AppConfig>, speed: f64, width: u16, height: u16) -> Result<()> {
    let viewport = Viewport::new(width as f64, height as f64);
    let page = DemoPage::new(viewport);
    let host = RecordingHost::new(viewport, page.elements().to_vec());
    let script = default_tour(viewport);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<TourEvent>();
    let (control_tx, control_rx) = mpsc::unbounded_channel::<TourControl>();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sequencer = Sequencer::from_config(&config)
        .with_stages(default_stages())
        .with_event_sender(event_tx)
        .with_cursor(viewport.center());
    let mut runner = TourRunner::new(sequencer, host, script)
        .with_frame_interval(config.motion.frame_interval())
        .with_speed(speed);

    // Setup signal handler for cancellation
    let signal = tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    // Print events as they arrive
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to encode tour event: {}", e),
            }
            if matches!(event, TourEvent::WaitingForUser { .. }) {
                let _ = control_tx.send(TourControl::Resume);
            }
        }
    });

    let outcome = runner.run(control_rx, shutdown_rx).await?;
    let activations = runner.host().activations.clone();
    let scroll_writes = runner.host().scroll_writes.len();

    // Dropping the runner closes the event channel so the printer finishes
    drop(runner);
    signal.abort();
    if let Err(e) = printer.await {
        warn!("Event printer failed: {}", e);
    }

    eprintln!();
    eprintln!("Tour {} after {:.1}s", outcome.status.label(), outcome.elapsed.as_secs_f64());
    if activations.is_empty() {
        eprintln!("  Clicked: (nothing)");
    } else {
        eprintln!("  Clicked: {}", activations.join(", "));
    }
    eprintln!("  Scroll frames: {}", scroll_writes);

    Ok(())
}
