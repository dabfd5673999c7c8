// generator.rs - Background task that animates the grid and publishes snapshots

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, trace};

use crate::color::Color;
use crate::config::Variant;
use crate::grid::{Cell, Grid, Point};
use crate::supervisor::ShutdownHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GeneratorState {
    #[default]
    Running,
    Cancelling,
    Stopped,
}

/// Result of one non-blocking publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Sent,
    /// The update channel was full; the snapshot was discarded.
    Dropped,
    /// The renderer is gone.
    Closed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorReport {
    pub ticks: u64,
    pub published: u64,
    pub dropped: u64,
    /// Whether the loop ended because shutdown was requested.
    pub cancelled: bool,
    pub final_state: GeneratorState,
}

/// Sole writer of the animated grid. Every publish hands the renderer a
/// fresh immutable snapshot, so the working grid is never shared.
pub struct Generator<R> {
    variant: Variant,
    interval: Duration,
    grid: Grid,
    rng: R,
    updates: mpsc::Sender<Arc<Grid>>,
    state: GeneratorState,
    report: GeneratorReport,
}

impl<R: Rng + Send> Generator<R> {
    pub fn new(
        variant: Variant,
        interval: Duration,
        rng: R,
        updates: mpsc::Sender<Arc<Grid>>,
    ) -> Self {
        Self {
            variant,
            interval,
            grid: Grid::empty(),
            rng,
            updates,
            state: GeneratorState::Running,
            report: GeneratorReport::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn report(&self) -> GeneratorReport {
        self.report
    }

    /// Apply one animation step to the working grid.
    pub fn tick(&mut self) {
        let band = self.variant.hue_band();
        match self.variant {
            Variant::Regen => {
                self.grid = Grid::random(band, &mut self.rng);
            }
            Variant::Reveal => {
                let point = match self.grid.empty_points().choose(&mut self.rng) {
                    Some(&point) => point,
                    // Fully revealed: keep the animation alive by recoloring anywhere
                    None => Point::new(
                        self.rng.gen_range(0..self.grid.width()),
                        self.rng.gen_range(0..self.grid.height()),
                    ),
                };
                let cell = Cell::new(Color::random(band, &mut self.rng));
                self.grid.set(point, cell);
                trace!(x = point.x, y = point.y, color = %cell.color, "cell revealed");
            }
        }
        self.report.ticks += 1;
    }

    /// Offer a snapshot to the renderer without ever waiting for room.
    pub fn publish(&mut self) -> PublishOutcome {
        match self.updates.try_send(self.grid.snapshot()) {
            Ok(()) => {
                self.report.published += 1;
                PublishOutcome::Sent
            }
            Err(TrySendError::Full(_)) => {
                self.report.dropped += 1;
                trace!("update channel full, snapshot dropped");
                PublishOutcome::Dropped
            }
            Err(TrySendError::Closed(_)) => PublishOutcome::Closed,
        }
    }

    fn transition(&mut self, next: GeneratorState) {
        debug!(from = ?self.state, to = ?next, "generator state");
        self.state = next;
        if next == GeneratorState::Cancelling {
            self.report.cancelled = true;
        }
        self.report.final_state = next;
    }

    /// Tick, publish and sleep until shutdown is requested or the renderer
    /// drops its end of the channel.
    pub async fn run(mut self, shutdown: ShutdownHandle) -> GeneratorReport {
        info!(variant = self.variant.name(), interval_ms = self.interval.as_millis() as u64, "generator started");

        loop {
            if shutdown.is_dying() {
                self.transition(GeneratorState::Cancelling);
                break;
            }

            self.tick();

            if shutdown.is_dying() {
                self.transition(GeneratorState::Cancelling);
                break;
            }
            if self.publish() == PublishOutcome::Closed {
                debug!("update channel closed");
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.dying() => {}
            }
        }

        self.transition(GeneratorState::Stopped);
        info!(
            ticks = self.report.ticks,
            published = self.report.published,
            dropped = self.report.dropped,
            "generator stopped"
        );
        self.report
    }
}
