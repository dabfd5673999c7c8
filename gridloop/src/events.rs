//! Input events and the background dispatcher that interprets them.
//!
//! The renderer pushes [`InputEvent`]s into an [`EventQueue`]; the
//! dispatcher drains it until the queue is closed. Quit and the `q` key
//! request shutdown, everything else is traced.

use std::fmt;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use crate::supervisor::{ShutdownHandle, ShutdownReason};

/// Key identity as seen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keysym {
    /// A printable key, unshifted; shift is reported in the modifiers.
    Char(char),
    /// Anything without a single-character name (arrows, Enter, F1 ...).
    Named(&'static str),
}

impl fmt::Display for Keysym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keysym::Char(c) => write!(f, "{c}"),
            Keysym::Named(name) => write!(f, "{name}"),
        }
    }
}

// Modifier bits
pub const MOD_SHIFT: u16 = 0x0001;
pub const MOD_CTRL: u16 = 0x0040;
pub const MOD_ALT: u16 = 0x0100;
pub const MOD_GUI: u16 = 0x0400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub symbol: Keysym,
    pub modifiers: u16,
    pub repeat: bool,
    pub timestamp: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Platform-neutral input event. Timestamps are milliseconds since the
/// renderer started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    MouseMotion { x: i32, y: i32, xrel: i32, yrel: i32, timestamp: u32 },
    MouseButton { x: i32, y: i32, button: u8, state: ButtonState, timestamp: u32 },
    MouseWheel { x: i32, y: i32, timestamp: u32 },
}

impl InputEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            InputEvent::Quit => "quit",
            InputEvent::KeyDown(_) => "key_down",
            InputEvent::KeyUp(_) => "key_up",
            InputEvent::MouseMotion { .. } => "mouse_motion",
            InputEvent::MouseButton { .. } => "mouse_button",
            InputEvent::MouseWheel { .. } => "mouse_wheel",
        }
    }

    /// The shutdown this event asks for, if any: Quit, or a `q` key press.
    pub fn shutdown_reason(&self) -> Option<ShutdownReason> {
        match self {
            InputEvent::Quit => Some(ShutdownReason::QuitEvent),
            InputEvent::KeyDown(key) if key.symbol == Keysym::Char('q') => Some(ShutdownReason::QuitKey),
            _ => None,
        }
    }
}

/// What the dispatcher did with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Shutdown(ShutdownReason),
    Traced,
}

/// Interpret one event. Only Quit and a plain `q` key press change state.
pub fn dispatch(event: &InputEvent, shutdown: &ShutdownHandle) -> Dispatch {
    match *event {
        InputEvent::Quit => {
            shutdown.kill(ShutdownReason::QuitEvent);
            Dispatch::Shutdown(ShutdownReason::QuitEvent)
        }
        InputEvent::KeyDown(key) => {
            info!(
                target: "gridloop::events",
                timestamp_ms = key.timestamp,
                sym = %key.symbol,
                modifiers = key.modifiers,
                repeat = key.repeat,
                "keyboard down"
            );
            match event.shutdown_reason() {
                Some(reason) => {
                    shutdown.kill(reason.clone());
                    Dispatch::Shutdown(reason)
                }
                None => Dispatch::Traced,
            }
        }
        InputEvent::KeyUp(key) => {
            info!(
                target: "gridloop::events",
                timestamp_ms = key.timestamp,
                sym = %key.symbol,
                modifiers = key.modifiers,
                repeat = key.repeat,
                "keyboard up"
            );
            Dispatch::Traced
        }
        InputEvent::MouseMotion { x, y, xrel, yrel, timestamp } => {
            info!(target: "gridloop::events", timestamp_ms = timestamp, x, y, xrel, yrel, "mouse motion");
            Dispatch::Traced
        }
        InputEvent::MouseButton { x, y, button, state, timestamp } => {
            info!(target: "gridloop::events", timestamp_ms = timestamp, x, y, button, state = ?state, "mouse button");
            Dispatch::Traced
        }
        InputEvent::MouseWheel { x, y, timestamp } => {
            info!(target: "gridloop::events", timestamp_ms = timestamp, x, y, "mouse wheel");
            Dispatch::Traced
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub handled: u64,
    pub traced: u64,
}

/// Drain `events` until every sender is gone.
pub async fn run(mut events: mpsc::Receiver<InputEvent>, shutdown: ShutdownHandle) -> DispatchReport {
    let mut report = DispatchReport::default();
    while let Some(event) = events.recv().await {
        report.handled += 1;
        if dispatch(&event, &shutdown) == Dispatch::Traced {
            report.traced += 1;
        }
    }
    debug!(handled = report.handled, traced = report.traced, "event queue closed");
    report
}

/// Producer side of the event queue.
///
/// When the queue is full the newest event is dropped and counted; the
/// caller never waits. Callers that must not lose a quit request check
/// [`InputEvent::shutdown_reason`] on a failed push. `close` drops the
/// sender exactly once.
pub struct EventQueue {
    tx: Option<mpsc::Sender<InputEvent>>,
    dropped: u64,
}

impl EventQueue {
    pub fn new(tx: mpsc::Sender<InputEvent>) -> Self {
        Self { tx: Some(tx), dropped: 0 }
    }

    /// Returns true if the event was queued.
    pub fn push(&mut self, event: InputEvent) -> bool {
        let Some(tx) = &self.tx else {
            return false;
        };
        match tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                self.dropped += 1;
                warn!(kind = event.kind(), dropped = self.dropped, "event queue full, dropping newest event");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_none()
    }

    /// Returns true only on the call that actually closed the queue.
    pub fn close(&mut self) -> bool {
        match self.tx.take() {
            Some(_) => {
                debug!("event queue closed by renderer");
                true
            }
            None => false,
        }
    }
}
