//! Request lifecycle tracking.
//!
//! Every async operation moves `Idle → Pending → (Fulfilled | Rejected)`.
//! Each `begin` hands out a [`Ticket`] carrying a sequence number that
//! increases monotonically per slice. Read tickets are only applied while
//! they are still the latest one issued for the same request key; anything
//! older lost a race with a newer request and is dropped. Mutation tickets
//! carry a confirmed server change and always apply.
//!
//! Tickets also carry the store epoch they were issued in. A store reset
//! moves to a new epoch, so responses to requests started before it are
//! dropped whatever their kind.

use std::collections::HashMap;

/// Action name, e.g. `"work/getMyWorks"`.
pub type RequestKey = &'static str;

/// Status of a background request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    /// Never issued
    #[default]
    Idle,
    /// In flight
    Pending,
    Fulfilled,
    Rejected,
}

/// Handle for one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub key: RequestKey,
    pub seq: u64,
    pub epoch: u64,
    /// Superseded by a newer ticket for the same key
    pub latest_only: bool,
}

/// Loading/error flags plus sequence bookkeeping shared by every slice.
#[derive(Debug, Default, Clone)]
pub struct SliceCore {
    is_loading: bool,
    error: Option<String>,
    next_seq: u64,
    epoch: u64,
    latest: HashMap<RequestKey, u64>,
    status: HashMap<RequestKey, RequestStatus>,
}

impl SliceCore {
    /// `pending`: clears the previous error; `silent` requests leave the
    /// loading flag off (background refreshes).
    pub fn begin(&mut self, key: RequestKey, silent: bool) -> Ticket {
        let ticket = self.issue(key, silent, true);
        self.latest.insert(key, ticket.seq);
        ticket
    }

    /// Like [`SliceCore::begin`], for requests whose confirmed result must
    /// land even when another request with the same key overlaps it.
    pub fn begin_mutation(&mut self, key: RequestKey, silent: bool) -> Ticket {
        self.issue(key, silent, false)
    }

    fn issue(&mut self, key: RequestKey, silent: bool, latest_only: bool) -> Ticket {
        self.next_seq += 1;
        self.status.insert(key, RequestStatus::Pending);
        self.is_loading = !silent;
        self.error = None;
        Ticket {
            key,
            seq: self.next_seq,
            epoch: self.epoch,
            latest_only,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get(ticket.key) == Some(&ticket.seq)
    }

    /// Whether a response for `ticket` would be applied right now.
    pub fn accepts(&self, ticket: Ticket) -> bool {
        ticket.epoch == self.epoch && (!ticket.latest_only || self.is_current(ticket))
    }

    /// Start over in `epoch`; tickets from earlier epochs are refused.
    pub fn enter_epoch(&mut self, epoch: u64) {
        self.epoch = epoch;
    }

    /// `fulfilled`: returns false (and changes nothing) for stale tickets.
    pub fn fulfil(&mut self, ticket: Ticket) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.status.insert(ticket.key, RequestStatus::Fulfilled);
        self.is_loading = false;
        true
    }

    /// `rejected`: records the message; returns false for stale tickets.
    pub fn reject(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.status.insert(ticket.key, RequestStatus::Rejected);
        self.is_loading = false;
        self.error = Some(message.into());
        true
    }

    fn accept(&self, ticket: Ticket) -> bool {
        let current = self.accepts(ticket);
        if !current {
            tracing::debug!(
                key = ticket.key,
                seq = ticket.seq,
                epoch = ticket.epoch,
                "discarding stale response"
            );
        }
        current
    }

    pub fn status(&self, key: RequestKey) -> RequestStatus {
        self.status.get(key).copied().unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Implemented by every store slice so actions can drive any of them.
pub trait Lifecycle {
    fn core_mut(&mut self) -> &mut SliceCore;

    fn begin(&mut self, key: RequestKey, silent: bool) -> Ticket {
        self.core_mut().begin(key, silent)
    }

    fn begin_mutation(&mut self, key: RequestKey, silent: bool) -> Ticket {
        self.core_mut().begin_mutation(key, silent)
    }

    fn reject(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        self.core_mut().reject(ticket, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_then_fulfilled() {
        let mut core = SliceCore::default();
        assert_eq!(core.status("k"), RequestStatus::Idle);

        let t = core.begin("k", false);
        assert!(core.is_loading());
        assert_eq!(core.status("k"), RequestStatus::Pending);

        assert!(core.fulfil(t));
        assert!(!core.is_loading());
        assert_eq!(core.status("k"), RequestStatus::Fulfilled);
    }

    #[test]
    fn rejected_records_message_and_next_begin_clears_it() {
        let mut core = SliceCore::default();
        let t = core.begin("k", false);
        assert!(core.reject(t, "boom"));
        assert_eq!(core.error(), Some("boom"));
        assert_eq!(core.status("k"), RequestStatus::Rejected);

        core.begin("k", false);
        assert_eq!(core.error(), None);
    }

    #[test]
    fn older_ticket_is_discarded() {
        let mut core = SliceCore::default();
        let first = core.begin("k", false);
        let second = core.begin("k", false);

        assert!(!core.fulfil(first));
        assert!(core.is_loading());
        assert!(!core.reject(first, "late"));
        assert_eq!(core.error(), None);

        assert!(core.fulfil(second));
    }

    #[test]
    fn overlapping_mutations_both_apply() {
        let mut core = SliceCore::default();
        let first = core.begin_mutation("k", false);
        let second = core.begin_mutation("k", false);

        assert!(core.fulfil(first));
        assert!(core.fulfil(second));
    }

    #[test]
    fn tickets_from_an_earlier_epoch_are_refused() {
        let mut core = SliceCore::default();
        let read = core.begin("k", false);
        let write = core.begin_mutation("w", false);

        let mut fresh = SliceCore::default();
        fresh.enter_epoch(1);
        let after = fresh.begin("k", false);

        assert_ne!(read, after);
        assert!(!fresh.fulfil(read));
        assert!(!fresh.fulfil(write));
        assert!(fresh.fulfil(after));
    }

    #[test]
    fn keys_are_tracked_independently() {
        let mut core = SliceCore::default();
        let a = core.begin("a", false);
        let b = core.begin("b", false);
        assert!(core.fulfil(a));
        assert!(core.fulfil(b));
    }

    #[test]
    fn silent_begin_keeps_loading_off() {
        let mut core = SliceCore::default();
        core.begin("k", true);
        assert!(!core.is_loading());
    }
}
