//! Animated grid of colored cells.
//!
//! A background [`generator::Generator`] mutates its own grid on a timer and
//! offers immutable snapshots to the foreground [`renderer::GridApp`] over a
//! small bounded channel, dropping snapshots the renderer has no room for.
//! Input flows the other way through an [`events::EventQueue`] to a
//! background dispatcher. A [`supervisor::Supervisor`] ties the lifetimes
//! together: quitting the window or pressing `q` stops everything.

pub mod app;
pub mod color;
pub mod config;
pub mod error;
pub mod events;
pub mod generator;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod supervisor;
pub mod surface;

pub use app::{init_logging, run};
pub use config::{LoopConfig, Variant};
pub use error::{Error, Result};
