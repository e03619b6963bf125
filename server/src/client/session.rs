//! Where the API client keeps the issued token and user

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::User;

/// Token and user saved after a successful login or registration
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

/// Client-side session storage
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<StoredSession>;
    fn save(&self, session: StoredSession);
    fn clear(&self);
}

/// Process-local session storage
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    /// A panic while holding the lock cannot leave a half-written session,
    /// so a poisoned lock is still usable.
    fn guard(&self) -> MutexGuard<'_, Option<StoredSession>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<StoredSession> {
        self.guard().clone()
    }

    fn save(&self, session: StoredSession) {
        *self.guard() = Some(session);
    }

    fn clear(&self) {
        *self.guard() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    fn session(token: &str) -> StoredSession {
        let now = Utc::now().naive_utc();
        StoredSession {
            token: token.to_string(),
            user: User {
                id: 1,
                student_id: "12345".to_string(),
                name: "John Doe".to_string(),
                email: "john.doe@university.edu".to_string(),
                program: None,
                year: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    #[test]
    fn save_load_clear() {
        let store = MemorySessionStore::default();
        assert!(store.load().is_none());

        store.save(session("t1"));
        assert_eq!(store.load().unwrap().token, "t1");

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn poisoned_lock_still_saves_and_clears() {
        let store = Arc::new(MemorySessionStore::default());
        store.save(session("before"));

        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the session lock");
        })
        .join();
        assert!(store.inner.is_poisoned());

        store.save(session("after"));
        assert_eq!(store.load().unwrap().token, "after");

        store.clear();
        assert!(store.load().is_none());
    }
}
