use std::sync::Mutex;

use chrono::Utc;

use crate::domain::{DeliveryJob, SearchRequest, Session, SessionEvent};

/// The single page session. The lock is only held while a transition runs,
/// never across a network call.
#[derive(Default)]
pub struct SessionStore {
    session: Mutex<Session>,
}

impl SessionStore {
    pub fn new(session: Session) -> Self {
        SessionStore {
            session: Mutex::new(session),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.transition(|session| (session, ())).0
    }

    pub fn apply(&self, event: SessionEvent) {
        self.transition(|session| (session.apply(event, Utc::now()), ()));
    }

    pub fn begin_generation(&self, request: SearchRequest) -> bool {
        self.transition(|session| session.begin_generation(request, Utc::now())).1
    }

    pub fn begin_delivery(&self) -> Option<DeliveryJob> {
        self.transition(|session| session.begin_delivery(Utc::now())).1
    }

    /// Runs `f` on the current session, stores the session it returns and
    /// hands back a copy of it with the extra output.
    fn transition<T>(&self, f: impl FnOnce(Session) -> (Session, T)) -> (Session, T) {
        let mut guard = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let current = std::mem::take(&mut *guard);
        let (next, output) = f(current);
        *guard = next.clone();
        (next, output)
    }
}
