//! Search Debouncer
//!
//! Keeps the raw input and the committed term apart. Each keystroke replaces
//! the single pending deadline; the committed term only moves once the input
//! has been quiet for the whole window.
//!
//! Two ways to drive it:
//! - timer-driven: `push` returns a ticket, a timer calls `fire(ticket)` after
//!   the window; only the latest ticket commits.
//! - clock-driven: `push_at(value, now)` then `poll(now)`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    window_ms: u64,
    raw: String,
    committed: String,
    /// (ticket, deadline in ms)
    pending: Option<(u64, u64)>,
    next_ticket: u64,
}

impl Debouncer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            raw: String::new(),
            committed: String::new(),
            pending: None,
            next_ticket: 0,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a keystroke without a clock; the caller owns the timer
    pub fn push(&mut self, value: impl Into<String>) -> u64 {
        self.push_at(value, 0)
    }

    /// Record a keystroke at `now_ms`
    pub fn push_at(&mut self, value: impl Into<String>, now_ms: u64) -> u64 {
        self.raw = value.into();
        self.next_ticket += 1;
        self.pending = Some((self.next_ticket, now_ms + self.window_ms));
        self.next_ticket
    }

    /// Timer callback. Commits only for the most recent ticket, and only
    /// when the term actually changed.
    pub fn fire(&mut self, ticket: u64) -> Option<String> {
        match self.pending {
            Some((latest, _)) if latest == ticket => self.commit(),
            _ => None,
        }
    }

    /// Commit if the pending deadline has passed
    pub fn poll(&mut self, now_ms: u64) -> Option<String> {
        match self.pending {
            Some((_, deadline)) if now_ms >= deadline => self.commit(),
            _ => None,
        }
    }

    /// Commit immediately (Enter key, clear button)
    pub fn flush(&mut self) -> Option<String> {
        self.commit()
    }

    /// Drop any pending commit (unmount)
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The committed term was changed from outside (a reset button).
    /// Adopts it as both raw and committed input and drops any pending
    /// commit. Returns whether anything changed.
    pub fn sync(&mut self, committed: &str) -> bool {
        if committed == self.committed {
            return false;
        }
        self.committed = committed.to_string();
        self.raw = committed.to_string();
        self.pending = None;
        true
    }

    fn commit(&mut self) -> Option<String> {
        self.pending = None;
        let term = self.raw.trim().to_string();
        if term == self.committed {
            return None;
        }
        self.committed = term.clone();
        Some(term)
    }
}
