//! Per-request view state with last-write-wins settlement.
//!
//! Every async fetch a view owns goes through a [`RequestSlot`]. `begin`
//! stamps the attempt with a ticket; only the result carrying the current
//! ticket may settle the slot, so a retry issued while an older request is
//! still in flight can never be overwritten by the older request landing
//! late.

use crate::error::AppError;

/// Lifecycle of one fetchable piece of view data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Ticket identifying one fetch attempt. Issued by [`RequestSlot::begin`],
/// consumed by [`RequestSlot::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A [`RequestState`] plus the generation counter that enforces
/// last-write-wins by issuance order.
#[derive(Debug)]
pub struct RequestSlot<T> {
    state: RequestState<T>,
    generation: u64,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            state: RequestState::Idle,
            generation: 0,
        }
    }
}

impl<T> RequestSlot<T> {
    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Start a new attempt. Any attempt still in flight is implicitly
    /// superseded; its eventual result will not match the new ticket.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = RequestState::Loading;
        Ticket(self.generation)
    }

    /// Settle the attempt identified by `ticket`. Returns whether the result
    /// was applied; a stale ticket is discarded without touching the state.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<T, AppError>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        // Consume the ticket: one terminal transition per attempt.
        self.generation += 1;
        self.state = match result {
            Ok(value) => RequestState::Ready(value),
            Err(err) => RequestState::Failed(err.user_message()),
        };
        true
    }

    /// Back to `Idle`, e.g. when the owning view unmounts.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = RequestState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_api::ApiError;

    fn failed(message: &str) -> Result<u32, AppError> {
        Err(AppError::Api(ApiError::Status {
            status: 500,
            message: message.to_string(),
        }))
    }

    #[test]
    fn single_attempt_settles_exactly_once() {
        let mut slot = RequestSlot::default();
        let ticket = slot.begin();
        assert!(slot.is_loading());
        assert!(slot.resolve(ticket, Ok(7)));
        assert_eq!(slot.state().value(), Some(&7));
        // A second settlement of the same attempt is ignored.
        assert!(!slot.resolve(ticket, failed("late duplicate")));
        assert_eq!(slot.state().value(), Some(&7));
    }

    #[test]
    fn retry_supersedes_in_flight_attempt() {
        let mut slot = RequestSlot::default();
        let first = slot.begin();
        let second = slot.begin();
        // The older request lands after the retry: discarded.
        assert!(!slot.resolve(first, Ok(1)));
        assert!(slot.is_loading());
        assert!(slot.resolve(second, Ok(2)));
        assert_eq!(slot.state().value(), Some(&2));
    }

    #[test]
    fn failure_replaces_loading_with_message() {
        let mut slot: RequestSlot<u32> = RequestSlot::default();
        let ticket = slot.begin();
        assert!(slot.resolve(ticket, failed("Profile incomplete")));
        assert_eq!(slot.state().error(), Some("Profile incomplete"));
        assert!(!slot.is_loading());
    }

    #[test]
    fn reset_discards_pending_results() {
        let mut slot = RequestSlot::default();
        let ticket = slot.begin();
        slot.reset();
        assert!(!slot.resolve(ticket, Ok(9)));
        assert_eq!(*slot.state(), RequestState::Idle);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Whatever interleaving of begins and resolves happens, only the
            /// most recently issued ticket can settle the slot, and settling
            /// always leaves a terminal state.
            #[test]
            fn last_issued_ticket_wins(script in proptest::collection::vec(0usize..3, 1..40)) {
                let mut slot: RequestSlot<usize> = RequestSlot::default();
                let mut tickets: Vec<Ticket> = Vec::new();
                let mut settled_value: Option<usize> = None;

                for (i, op) in script.iter().enumerate() {
                    match op {
                        0 => {
                            tickets.push(slot.begin());
                            settled_value = None;
                        }
                        1 => {
                            if let Some(&ticket) = tickets.last() {
                                if slot.resolve(ticket, Ok(i)) {
                                    settled_value = Some(i);
                                }
                            }
                        }
                        _ => {
                            // Resolving any non-latest ticket must be a no-op.
                            if tickets.len() >= 2 {
                                let stale = tickets[tickets.len() - 2];
                                prop_assert!(!slot.resolve(stale, Ok(usize::MAX)));
                            }
                        }
                    }
                }

                if let Some(expected) = settled_value {
                    prop_assert_eq!(slot.state().value(), Some(&expected));
                }
            }
        }
    }
}
