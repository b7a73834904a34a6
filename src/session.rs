//! Search session: the latest committed search and a stale-response guard.
//!
//! Every search takes a ticket from a monotonically increasing counter.
//! A result is committed only if its ticket is still the newest one issued,
//! so a slow search can never overwrite a search that started after it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::models::SearchOutcome;

/// Token identifying one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct SessionState {
    latest: AtomicU64,
    current: Mutex<Option<SearchOutcome>>,
}

/// Shared search session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: Arc<SessionState>,
}

impl Session {
    /// Issue a ticket for a new search, invalidating all earlier tickets.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.state.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the newest search.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.state.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Store `outcome` if `ticket` is still current. Returns `false` when the
    /// outcome is stale and was discarded.
    pub fn commit(&self, ticket: SearchTicket, outcome: SearchOutcome) -> bool {
        let mut current = match self.state.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.state.latest.load(Ordering::SeqCst),
                entity = %outcome.entity.name,
                "Discarding stale search result"
            );
            return false;
        }

        *current = Some(outcome);
        true
    }

    /// The latest committed outcome.
    pub fn current(&self) -> Option<SearchOutcome> {
        match self.state.current.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Forget the current outcome. Outstanding tickets stay valid.
    pub fn reset(&self) {
        match self.state.current.lock() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}
