//! Deadlines and cancellation.
//!
//! Queries run synchronously. The only loops whose length depends on the
//! data (fuzzy candidate comparison and the per-document union walk) call
//! [`Deadline::check`] between iterations and fail with
//! [`GlaiveError::Cancelled`] once the deadline has passed or the attached
//! [`CancellationToken`] has fired.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{GlaiveError, Result};

/// A shared flag another thread can set to abort a running query.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every query holding this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// When a query must give up.
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    at: Option<Instant>,
    token: Option<CancellationToken>,
}

impl Deadline {
    /// No time limit and no cancellation.
    pub fn none() -> Self {
        Self::default()
    }

    /// Expire at `at`.
    pub fn at(at: Instant) -> Self {
        Deadline {
            at: Some(at),
            token: None,
        }
    }

    /// Expire `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self::at(Instant::now() + timeout)
    }

    /// Also abort when `token` fires.
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Whether this deadline can ever expire.
    pub fn has_limit(&self) -> bool {
        self.at.is_some() || self.token.is_some()
    }

    /// Whether the deadline has passed or cancellation was requested.
    pub fn is_expired(&self) -> bool {
        if let Some(token) = &self.token
            && token.is_cancelled()
        {
            return true;
        }
        self.at.is_some_and(|at| Instant::now() >= at)
    }

    /// Fail with [`GlaiveError::Cancelled`] if expired; `stage` names the interrupted work.
    pub fn check(&self, stage: &str) -> Result<()> {
        if !self.is_expired() {
            return Ok(());
        }
        if self.token.as_ref().is_some_and(CancellationToken::is_cancelled) {
            log::warn!("{stage} cancelled");
            return Err(GlaiveError::cancelled(format!("{stage}: cancellation requested")));
        }
        log::warn!("{stage} exceeded its deadline");
        Err(GlaiveError::cancelled(format!("{stage}: deadline exceeded")))
    }
}
