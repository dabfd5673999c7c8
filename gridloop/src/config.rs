// config.rs - Compile-time configuration for the grid animation

use std::time::Duration;

use crate::color::HueBand;

// Window and grid geometry
pub const WINDOW_TITLE: &str = "gridloop";
pub const GRID_WIDTH: usize = 20;                     // Columns
pub const GRID_HEIGHT: usize = 20;                    // Rows
pub const CELL_WIDTH: f32 = 20.0;                     // Pixels per cell, horizontally
pub const CELL_HEIGHT: f32 = 20.0;                    // Pixels per cell, vertically
pub const CELL_PADDING: f32 = 1.0;                    // Gap on each side of a painted cell
pub const CELL_ALPHA: u8 = 255;
pub const WINDOW_WIDTH: f32 = CELL_WIDTH * GRID_WIDTH as f32;
pub const WINDOW_HEIGHT: f32 = CELL_HEIGHT * GRID_HEIGHT as f32;

// Color sampling
pub const SATURATION: f64 = 0.5;
pub const VALUE: f64 = 0.8;
pub const FULL_HUE: HueBand = HueBand::new(0.0, 360.0);
pub const REVEAL_HUE: HueBand = HueBand::new(240.0, 120.0);  // Blue through magenta

// Channels and timing
pub const UPDATE_CAPACITY: usize = 5;                 // Pending grid snapshots
pub const EVENT_CAPACITY: usize = 100;                // Pending input events
pub const REGEN_INTERVAL: Duration = Duration::from_secs(1);
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(10);
pub const FRAME_INTERVAL: Duration = Duration::from_millis(10);
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Which animation the generator drives. The two are mutually exclusive;
/// each binary in the workspace picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Replace every cell with a fresh random color on each tick.
    Regen,
    /// Reveal one empty cell per tick, then keep recoloring random cells.
    Reveal,
}

impl Variant {
    pub fn hue_band(self) -> HueBand {
        match self {
            Variant::Regen => FULL_HUE,
            Variant::Reveal => REVEAL_HUE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Regen => "regen",
            Variant::Reveal => "reveal",
        }
    }
}

/// Timing and capacity knobs for one run of the loop.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub variant: Variant,
    pub tick_interval: Duration,
    pub frame_interval: Duration,
    pub update_capacity: usize,
    pub event_capacity: usize,
    pub shutdown_grace: Duration,
}

impl LoopConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let tick_interval = match variant {
            Variant::Regen => REGEN_INTERVAL,
            Variant::Reveal => REVEAL_INTERVAL,
        };

        Self {
            variant,
            tick_interval,
            frame_interval: FRAME_INTERVAL,
            update_capacity: UPDATE_CAPACITY,
            event_capacity: EVENT_CAPACITY,
            shutdown_grace: SHUTDOWN_GRACE,
        }
    }
}
