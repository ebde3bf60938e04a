use serde::Serialize;

/// Identifies one run. A new id is issued on every start/restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        SessionId(self.0 + 1)
    }
}

#[derive(Debug, Clone)]
struct Pending<A> {
    due_ms: f64,
    session: SessionId,
    action: A,
}

/// Deferred actions keyed by session.
///
/// Actions are released by [`Scheduler::take_due`] once the game clock passes
/// their due time. The caller decides whether a released action still applies;
/// [`Scheduler::cancel_session`] drops everything queued for a finished run.
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    pending: Vec<Pending<A>>,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(8),
        }
    }

    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, session: SessionId, action: A) {
        self.pending.push(Pending {
            due_ms: now_ms + delay_ms.max(0.0),
            session,
            action,
        });
    }

    /// Remove and return every action due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<(SessionId, A)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due_ms <= now_ms {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due.into_iter().map(|p| (p.session, p.action)).collect()
    }

    /// Drop every action queued for sessions other than `keep`.
    pub fn cancel_session_except(&mut self, keep: SessionId) {
        self.pending.retain(|p| p.session == keep);
    }

    /// Drop every action queued for `session`.
    pub fn cancel_session(&mut self, session: SessionId) {
        self.pending.retain(|p| p.session != session);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}
