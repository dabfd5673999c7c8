//! Cooperative cancellation group for the background tasks.
//!
//! The [`Supervisor`] spawns tasks and owns a shutdown signal. Any holder of
//! a [`ShutdownHandle`] may request shutdown; tasks poll
//! [`ShutdownHandle::is_dying`] at their loop boundaries or await
//! [`ShutdownHandle::dying`]. The first recorded reason wins and the signal
//! never resets.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Why the group is shutting down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The window manager asked the window to close.
    QuitEvent,
    /// The user pressed `q`.
    QuitKey,
    /// The window went away without going through the event queue.
    WindowClosed,
    /// A supervised task panicked or was aborted.
    TaskFailed(String),
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::QuitEvent => write!(f, "quit event"),
            ShutdownReason::QuitKey => write!(f, "q pressed"),
            ShutdownReason::WindowClosed => write!(f, "window closed"),
            ShutdownReason::TaskFailed(detail) => write!(f, "task failed: {detail}"),
        }
    }
}

/// Cloneable view of the shutdown signal.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<Option<ShutdownReason>>>,
}

impl ShutdownHandle {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Request shutdown. Returns true only for the call that actually
    /// flipped the signal; later calls keep the original reason.
    pub fn kill(&self, reason: ShutdownReason) -> bool {
        let mut accepted = false;
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason.clone());
            accepted = true;
            true
        });

        if accepted {
            info!(%reason, "shutdown requested");
        } else {
            debug!(%reason, "shutdown already in progress");
        }
        accepted
    }

    /// Non-blocking check of the signal.
    pub fn is_dying(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn reason(&self) -> Option<ShutdownReason> {
        self.tx.borrow().clone()
    }

    /// Resolves once shutdown has been requested.
    pub async fn dying(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close.
        let _ = rx.wait_for(|reason| reason.is_some()).await;
    }
}

/// Owns the shutdown signal and the tasks that observe it.
pub struct Supervisor {
    handle: ShutdownHandle,
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    pub fn new() -> Self {
        Self { handle: ShutdownHandle::new(), tasks: Vec::new() }
    }

    pub fn handle(&self) -> ShutdownHandle {
        self.handle.clone()
    }

    pub fn kill(&self, reason: ShutdownReason) -> bool {
        self.handle.kill(reason)
    }

    pub fn is_dying(&self) -> bool {
        self.handle.is_dying()
    }

    /// Spawn `task` on the current tokio runtime. A panic inside the task
    /// kills the whole group.
    pub fn spawn<F>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = self.handle.clone();
        let watcher = tokio::spawn(async move {
            if let Err(e) = tokio::spawn(task).await {
                error!(task = name, error = %e, "supervised task failed");
                handle.kill(ShutdownReason::TaskFailed(format!("{name}: {e}")));
            }
        });
        debug!(task = name, "task spawned");
        self.tasks.push((name, watcher));
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every spawned task to finish and return the shutdown reason,
    /// if one was recorded.
    pub async fn wait(self) -> Option<ShutdownReason> {
        for (name, task) in self.tasks {
            if let Err(e) = task.await {
                error!(task = name, error = %e, "task watcher failed");
            } else {
                debug!(task = name, "task finished");
            }
        }
        self.handle.reason()
    }
}
