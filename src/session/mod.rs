//! The crawl session: the loop that drives pages through the frontier.
//!
//! A [`SessionController`] owns the frontier, one or more driver surfaces,
//! a storage backend, and the hooks doing per-page work. [`start`] seeds
//! the frontier from configuration and runs until the frontier drains or a
//! [`StopSignal`] fires; [`resume`] restores a persisted frontier instead
//! of seeding.
//!
//! [`start`]: SessionController::start
//! [`resume`]: SessionController::resume

mod controller;
mod hooks;
mod performance;
mod wait;

pub use controller::{SessionController, SessionHandle};
pub use hooks::{NoHooks, PageHooks};
pub use performance::Performance;
pub use wait::{StopSignal, WaitPolicy};

use std::fmt;

/// Lifecycle of a crawl session.
///
/// Idle → Starting → Running → Draining → Stopped, with Paused reachable
/// from Running while a pause is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, not yet started.
    Idle,
    /// Seeding or restoring the frontier.
    Starting,
    /// Visiting pages.
    Running,
    /// Pause requested; the loop is parked between pages.
    Paused,
    /// The frontier drained; final records are being written.
    Draining,
    /// The session ended, normally or not.
    Stopped,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Stopped)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Draining => "draining",
            SessionState::Stopped => "stopped",
        };
        write!(f, "{}", name)
    }
}
