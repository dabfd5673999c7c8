// app.rs - Wires the generator, dispatcher and renderer together

use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{LoopConfig, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use crate::error::{Error, Result};
use crate::events::{self, EventQueue};
use crate::generator::Generator;
use crate::renderer::GridApp;
use crate::supervisor::{ShutdownReason, Supervisor};

/// Install the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridloop=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Run the animation until the user quits. Blocks the calling thread, which
/// must be the main thread on platforms that require it for windowing.
pub fn run(config: LoopConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("gridloop-worker")
        .build()
        .map_err(Error::Runtime)?;

    let (update_tx, update_rx) = mpsc::channel(config.update_capacity);
    let (event_tx, event_rx) = mpsc::channel(config.event_capacity);
    let mut supervisor = Supervisor::new();

    {
        let _guard = runtime.enter();

        let generator = Generator::new(config.variant, config.tick_interval, StdRng::from_entropy(), update_tx);
        let shutdown = supervisor.handle();
        supervisor.spawn("generator", async move {
            generator.run(shutdown).await;
        });

        let shutdown = supervisor.handle();
        supervisor.spawn("dispatcher", async move {
            events::run(event_rx, shutdown).await;
        });
    }

    let app = GridApp::new(update_rx, EventQueue::new(event_tx), supervisor.handle(), config.frame_interval);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_resizable(false),
        ..Default::default()
    };

    info!(variant = config.variant.name(), "opening window");
    let result = eframe::run_native(WINDOW_TITLE, options, Box::new(move |_cc| Box::new(app)));

    // The window is gone whichever way run_native returned
    supervisor.kill(ShutdownReason::WindowClosed);
    let grace = config.shutdown_grace;
    let handle = supervisor.handle();
    let reason = match runtime.block_on(async move { tokio::time::timeout(grace, supervisor.wait()).await }) {
        Ok(reason) => {
            info!(reason = ?reason, "shutdown complete");
            reason
        }
        Err(_) => {
            warn!(grace_ms = config.shutdown_grace.as_millis() as u64, "background tasks did not stop in time");
            handle.reason()
        }
    };

    result.map_err(|e| Error::Window(e.to_string()))?;
    shutdown_result(reason)
}

/// A run that ended because a background task failed is an error, whatever
/// the window did afterwards.
fn shutdown_result(reason: Option<ShutdownReason>) -> Result<()> {
    match reason {
        Some(ShutdownReason::TaskFailed(detail)) => Err(Error::TaskFailed(detail)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_shutdowns_are_clean() {
        for reason in [ShutdownReason::QuitEvent, ShutdownReason::QuitKey, ShutdownReason::WindowClosed] {
            assert!(shutdown_result(Some(reason.clone())).is_ok(), "{reason}");
        }
        assert!(shutdown_result(None).is_ok());
    }

    #[test]
    fn test_task_failure_is_an_error() {
        let err = shutdown_result(Some(ShutdownReason::TaskFailed("generator: boom".into()))).unwrap_err();
        assert!(matches!(&err, Error::TaskFailed(detail) if detail == "generator: boom"));
        assert_eq!(err.to_string(), "background task failed: generator: boom");
    }

    #[tokio::test]
    async fn test_panicking_task_maps_to_error() {
        let mut supervisor = Supervisor::new();
        supervisor.spawn("generator", async { panic!("boom") });

        let reason = supervisor.wait().await;
        assert!(matches!(shutdown_result(reason), Err(Error::TaskFailed(_))));
    }
}
