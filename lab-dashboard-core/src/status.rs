//! Creation status model
//!
//! One [`StatusChannel`] lives in the gateway. It keeps the current value in a
//! `watch` channel (late subscribers read it) and fans every accepted
//! transition out on a `broadcast` channel (ordered, no coalescing).
//!
//! Every reset starts a new session. `begin_submission` hands out the session
//! number, and the outcome of that submission only lands while the session is
//! still current.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

use crate::error::{CoreError, CoreResult};

/// Capacity of the transition broadcast; slow subscribers observe `Lagged`.
const STATUS_EVENT_CAPACITY: usize = 64;

/// Lifecycle of an in-flight creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    Form,
    Loading,
    Success,
    Error { message: String },
}

/// [`InstanceStatus`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusKind {
    Form,
    Loading,
    Success,
    Error,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Form => "FORM",
            Self::Loading => "LOADING",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
        })
    }
}

impl InstanceStatus {
    #[must_use]
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::Form => StatusKind::Form,
            Self::Loading => StatusKind::Loading,
            Self::Success => StatusKind::Success,
            Self::Error { .. } => StatusKind::Error,
        }
    }

    /// Allowed moves: `FORM -> LOADING`, `LOADING -> SUCCESS | ERROR`, and
    /// anything back to `FORM`.
    #[must_use]
    pub fn can_transition_to(&self, next: StatusKind) -> bool {
        matches!(
            (self.kind(), next),
            (_, StatusKind::Form)
                | (StatusKind::Form, StatusKind::Loading)
                | (StatusKind::Loading, StatusKind::Success | StatusKind::Error)
        )
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Single publish point for the creation status.
pub struct StatusChannel {
    current: watch::Sender<InstanceStatus>,
    events: broadcast::Sender<InstanceStatus>,
    session: AtomicU64,
}

impl Default for StatusChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusChannel {
    /// Starts in `FORM`.
    #[must_use]
    pub fn new() -> Self {
        let (current, _) = watch::channel(InstanceStatus::Form);
        let (events, _) = broadcast::channel(STATUS_EVENT_CAPACITY);
        Self {
            current,
            events,
            session: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn current(&self) -> InstanceStatus {
        self.current.borrow().clone()
    }

    /// Receiver of every accepted transition from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<InstanceStatus> {
        self.events.subscribe()
    }

    /// Receiver of the latest value only.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<InstanceStatus> {
        self.current.subscribe()
    }

    /// Current session number; bumped by every [`reset`](Self::reset).
    #[must_use]
    pub fn session(&self) -> u64 {
        self.session.load(Ordering::SeqCst)
    }

    /// Move to `next` if allowed from the current value.
    ///
    /// The check and the update happen under the channel's lock, so two
    /// racing completions cannot both succeed.
    pub fn transition(&self, next: InstanceStatus) -> CoreResult<()> {
        self.apply(next, None).map(|_| ())
    }

    /// Apply `next`, only within `submission` when given. Returns the session
    /// the value was applied in.
    fn apply(&self, next: InstanceStatus, submission: Option<u64>) -> CoreResult<u64> {
        let to = next.kind();
        let mut outcome = Ok(0);
        self.current.send_if_modified(|current| {
            let session = self.session();
            if let Some(submission) = submission.filter(|s| *s != session) {
                outcome = Err(CoreError::StaleSubmission {
                    submission,
                    current: session,
                });
                return false;
            }
            if !current.can_transition_to(to) {
                outcome = Err(CoreError::InvalidTransition {
                    from: current.kind(),
                    to,
                });
                return false;
            }
            *current = next.clone();
            // Still under the watch lock: broadcast order matches update order.
            let _ = self.events.send(next.clone());
            outcome = Ok(session);
            true
        });

        match &outcome {
            Ok(_) => log::debug!("Instance status -> {to}"),
            Err(e) => log::warn!("Rejected status change to {to}: {e}"),
        }
        outcome
    }

    /// `FORM -> LOADING`; returns the submission's session number.
    pub fn begin_submission(&self) -> CoreResult<u64> {
        self.apply(InstanceStatus::Loading, None)
    }

    /// `LOADING -> SUCCESS` for `submission`.
    pub fn succeed(&self, submission: u64) -> CoreResult<()> {
        self.apply(InstanceStatus::Success, Some(submission)).map(|_| ())
    }

    /// `LOADING -> ERROR(message)` for `submission`.
    pub fn fail(&self, submission: u64, message: impl Into<String>) -> CoreResult<()> {
        self.apply(
            InstanceStatus::Error {
                message: message.into(),
            },
            Some(submission),
        )
        .map(|_| ())
    }

    /// Back to `FORM` in a new session; always allowed.
    pub fn reset(&self) {
        self.session.fetch_add(1, Ordering::SeqCst);
        let _ = self.transition(InstanceStatus::Form);
    }
}
