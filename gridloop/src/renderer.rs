// renderer.rs - Foreground eframe app: forwards input, paints snapshots

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use egui::{Sense, Vec2, ViewportCommand};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::events::{EventQueue, InputEvent};
use crate::grid::Grid;
use crate::input::InputTranslator;
use crate::supervisor::ShutdownHandle;
use crate::surface::{EguiSurface, draw_grid};

pub struct GridApp {
    updates: mpsc::Receiver<Arc<Grid>>,
    events: EventQueue,
    shutdown: ShutdownHandle,
    translator: InputTranslator,
    current: Option<Arc<Grid>>,
    frame_interval: Duration,
    snapshots_taken: u64,
}

impl GridApp {
    pub fn new(
        updates: mpsc::Receiver<Arc<Grid>>,
        events: EventQueue,
        shutdown: ShutdownHandle,
        frame_interval: Duration,
    ) -> Self {
        Self {
            updates,
            events,
            shutdown,
            translator: InputTranslator::new(),
            current: None,
            frame_interval,
            snapshots_taken: 0,
        }
    }

    pub fn current(&self) -> Option<&Arc<Grid>> {
        self.current.as_ref()
    }

    pub fn snapshots_taken(&self) -> u64 {
        self.snapshots_taken
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Enqueue one already-translated event. Returns false if it was dropped.
    /// A quit request that finds the queue full shuts down directly so it
    /// is never lost.
    pub fn push_event(&mut self, event: InputEvent) -> bool {
        if self.events.push(event) {
            return true;
        }
        if let Some(reason) = event.shutdown_reason() {
            self.shutdown.kill(reason);
        }
        false
    }

    /// Push this frame's input into the event queue. Returns true when a
    /// window close request must be cancelled so the quit can travel
    /// through the dispatcher first.
    pub fn forward_input(&mut self, raw: &[egui::Event], close_requested: bool) -> bool {
        for event in raw {
            if let Some(event) = self.translator.translate(event) {
                self.push_event(event);
            }
        }

        if !close_requested || self.shutdown.is_dying() {
            return false;
        }
        self.push_event(InputEvent::Quit);
        true
    }

    /// Take at most one pending snapshot. Returns true if a new one arrived.
    pub fn take_update(&mut self) -> bool {
        match self.updates.try_recv() {
            Ok(grid) => {
                debug!(at = %chrono::Local::now().format("%H:%M:%S%.3f"), revealed = grid.revealed_count(), "draw grid");
                self.current = Some(grid);
                self.snapshots_taken += 1;
                true
            }
            Err(_) => false,
        }
    }

    /// Close the event queue once shutdown is visible. Returns true while
    /// the loop should terminate.
    pub fn check_shutdown(&mut self) -> bool {
        if !self.shutdown.is_dying() {
            return false;
        }
        if self.events.close() {
            info!(
                reason = ?self.shutdown.reason(),
                snapshots = self.snapshots_taken,
                dropped_events = self.events.dropped(),
                "render loop stopping"
            );
        }
        true
    }

    /// One pass of the render loop against `ctx`.
    pub fn frame_tick(&mut self, ctx: &egui::Context) {
        let (raw, close_requested) = ctx.input(|i| (i.events.clone(), i.viewport().close_requested()));
        if self.forward_input(&raw, close_requested) {
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
        }

        self.take_update();

        egui::CentralPanel::default().frame(egui::Frame::none()).show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT), Sense::hover());
            if let Some(grid) = &self.current {
                let mut surface = EguiSurface::new(&painter, response.rect.min);
                draw_grid(grid, &mut surface);
            }
        });

        if self.check_shutdown() {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        } else {
            ctx.request_repaint_after(self.frame_interval);
        }
    }
}

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame_tick(ctx);
    }
}
